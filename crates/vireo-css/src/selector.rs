//! Selector model: matching and specificity.
//!
//! The selector family is a closed sum type: tag selectors, class
//! selectors, and descendant combinations of the two. Matching is pure and
//! side-effect-free; it only reads the node tree.

use vireo_dom::{NodeId, NodeTree};

/// A stylesheet selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Matches elements by lowercase tag name, e.g. `p`.
    Tag(String),
    /// Matches elements carrying a class name, e.g. `.warn`.
    Class(String),
    /// Matches an element whose ancestor chain contains a match for the
    /// left operand while the element itself matches the right operand,
    /// e.g. `div p`.
    Descendant(Box<Selector>, Box<Selector>),
}

impl Selector {
    /// The cascade weight of this selector.
    ///
    /// Tag selectors weigh 1, class selectors 10, and a descendant
    /// combination weighs the sum of its operands.
    #[must_use]
    pub fn specificity(&self) -> u32 {
        match self {
            Selector::Tag(_) => 1,
            Selector::Class(_) => 10,
            Selector::Descendant(ancestor, descendant) => {
                ancestor.specificity() + descendant.specificity()
            }
        }
    }

    /// Whether this selector matches the given node.
    #[must_use]
    pub fn matches(&self, tree: &NodeTree, node: NodeId) -> bool {
        match self {
            Selector::Tag(tag) => tree.as_element(node).is_some_and(|e| e.tag == *tag),
            Selector::Class(name) => tree
                .as_element(node)
                .is_some_and(|e| e.classes().any(|c| c == name)),
            Selector::Descendant(ancestor, descendant) => {
                descendant.matches(tree, node)
                    && tree.ancestors(node).any(|a| ancestor.matches(tree, a))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vireo_dom::{ElementData, NodeKind};

    fn tree_html_div_p() -> (NodeTree, NodeId, NodeId) {
        let mut tree = NodeTree::with_root(ElementData::new("html", Vec::new()));
        let div = tree.alloc(NodeKind::Element(ElementData::new(
            "div",
            vec![("class".to_string(), Some("outer box".to_string()))],
        )));
        let p = tree.alloc(NodeKind::Element(ElementData::new("p", Vec::new())));
        tree.append_child(tree.root(), div);
        tree.append_child(div, p);
        (tree, div, p)
    }

    #[test]
    fn test_tag_selector_matches() {
        let (tree, div, p) = tree_html_div_p();
        let selector = Selector::Tag("div".to_string());
        assert!(selector.matches(&tree, div));
        assert!(!selector.matches(&tree, p));
    }

    #[test]
    fn test_class_selector_matches_any_class_token() {
        let (tree, div, _) = tree_html_div_p();
        assert!(Selector::Class("outer".to_string()).matches(&tree, div));
        assert!(Selector::Class("box".to_string()).matches(&tree, div));
        assert!(!Selector::Class("missing".to_string()).matches(&tree, div));
    }

    #[test]
    fn test_descendant_selector_walks_ancestors() {
        let (tree, div, p) = tree_html_div_p();
        let selector = Selector::Descendant(
            Box::new(Selector::Tag("html".to_string())),
            Box::new(Selector::Tag("p".to_string())),
        );
        assert!(selector.matches(&tree, p));
        assert!(!selector.matches(&tree, div));
    }

    #[test]
    fn test_descendant_is_not_restricted_to_direct_parent() {
        let (tree, _, p) = tree_html_div_p();
        // html is the grandparent of p.
        let selector = Selector::Descendant(
            Box::new(Selector::Class("outer".to_string())),
            Box::new(Selector::Tag("p".to_string())),
        );
        assert!(selector.matches(&tree, p));
    }

    #[test]
    fn test_specificity_weights() {
        assert_eq!(Selector::Tag("p".to_string()).specificity(), 1);
        assert_eq!(Selector::Class("warn".to_string()).specificity(), 10);
        let chain = Selector::Descendant(
            Box::new(Selector::Class("warn".to_string())),
            Box::new(Selector::Tag("p".to_string())),
        );
        assert_eq!(chain.specificity(), 11);
    }
}
