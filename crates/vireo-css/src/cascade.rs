//! Cascade resolution: one final value per property per node.
//!
//! Resolution runs depth-first pre-order so a child always reads its
//! parent's already-resolved values. Per element, in order:
//!
//! 1. the five inherited properties are copied from the parent (fixed
//!    defaults on the root),
//! 2. every matching rule is applied in ascending specificity (stable, so
//!    ties keep stylesheet order),
//! 3. the element's inline `style` attribute is applied last and always
//!    wins, regardless of specificity.
//!
//! Resolution never fails: a declaration whose value cannot be computed is
//! discarded, leaving the previously assigned value in place, and the pass
//! is idempotent.

use vireo_common::warning::warn_once;
use vireo_dom::{NodeId, NodeTree, StyleMap};

use crate::parser::{Rule, parse_inline_style};
use crate::style::{DEFAULT_FONT_SIZE_PX, INHERITED_PROPERTIES, parse_percentage, parse_px};

/// Resolve computed styles for every element in the tree, in place.
pub fn resolve_styles(tree: &mut NodeTree, rules: &[Rule]) {
    // Ascending specificity, so later applications override earlier ones.
    let mut ordered: Vec<&Rule> = rules.iter().collect();
    ordered.sort_by_key(|rule| rule.selector.specificity());
    resolve_node(tree, tree.root(), &ordered);
}

fn resolve_node(tree: &mut NodeTree, id: NodeId, rules: &[&Rule]) {
    let parent = tree.parent(id);

    // Inherited properties: parent's resolved value, or the root default.
    let mut resolved = StyleMap::new();
    for (property, default) in INHERITED_PROPERTIES {
        let value = parent
            .and_then(|p| tree.style(p).get(property).cloned())
            .unwrap_or_else(|| default.to_string());
        let _ = resolved.insert(property.to_string(), value);
    }

    // Percentage font sizes resolve against the parent's computed size.
    let parent_font_size = parent
        .and_then(|p| tree.style(p).get("font-size"))
        .and_then(|v| parse_px(v))
        .unwrap_or(DEFAULT_FONT_SIZE_PX);

    for rule in rules {
        if !rule.selector.matches(tree, id) {
            continue;
        }
        for (property, value) in &rule.declarations {
            if let Some(computed) = compute_value(property, value, parent_font_size) {
                let _ = resolved.insert(property.clone(), computed);
            }
        }
    }

    // Inline style wins over everything from the stylesheet.
    let inline = tree
        .as_element(id)
        .and_then(|e| e.attr("style"))
        .map(parse_inline_style);
    if let Some(declarations) = inline {
        for (property, value) in declarations {
            if let Some(computed) = compute_value(&property, &value, parent_font_size) {
                let _ = resolved.insert(property, computed);
            }
        }
    }

    if let Some(node) = tree.get_mut(id) {
        node.style = resolved;
    }

    // Element children only; text inherits from its parent at layout time.
    let children = tree.children(id).to_vec();
    for child in children {
        if tree.as_element(child).is_some() {
            resolve_node(tree, child, rules);
        }
    }
}

/// Transform a declared value into its computed form.
///
/// Only `font-size` has a transform: a pixel value passes through, a
/// percentage resolves against the parent's resolved size, and any other
/// unit is rejected (`None`), leaving the prior assignment untouched.
fn compute_value(property: &str, value: &str, parent_font_size: f32) -> Option<String> {
    if property != "font-size" {
        return Some(value.to_string());
    }
    if parse_px(value).is_some() {
        return Some(value.to_string());
    }
    if let Some(pct) = parse_percentage(value) {
        let px = pct / 100.0 * parent_font_size;
        return Some(format!("{px}px"));
    }
    warn_once("CSS", &format!("unsupported unit in 'font-size: {value}'"));
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_passes_through() {
        assert_eq!(
            compute_value("font-size", "24px", 16.0),
            Some("24px".to_string())
        );
    }

    #[test]
    fn test_percentage_resolves_against_parent() {
        assert_eq!(
            compute_value("font-size", "50%", 20.0),
            Some("10px".to_string())
        );
        assert_eq!(
            compute_value("font-size", "150%", 16.0),
            Some("24px".to_string())
        );
    }

    #[test]
    fn test_unknown_unit_rejected() {
        assert_eq!(compute_value("font-size", "1.5em", 16.0), None);
        assert_eq!(compute_value("font-size", "large", 16.0), None);
    }

    #[test]
    fn test_other_properties_untransformed() {
        assert_eq!(
            compute_value("color", "orange", 16.0),
            Some("orange".to_string())
        );
        assert_eq!(
            compute_value("margin", "50%", 16.0),
            Some("50%".to_string())
        );
    }
}
