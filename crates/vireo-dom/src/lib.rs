//! Node tree implementation for the Vireo renderer.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships. Children hold a non-owning back-reference to their parent
//! (a stable index, not a structural pointer), while the parent exclusively
//! owns the child list; indices avoid ownership cycles and borrow-checker
//! friction during mutation.
//!
//! Every node carries a computed-style map. It is created empty at node
//! construction and fully populated by one cascade pass before layout reads
//! it; layout never mutates it.

use std::collections::HashMap;

/// Map of attribute names to optional values for an element.
///
/// An attribute written without a value (e.g. `<input disabled>`) maps to
/// `None`, which is distinct from the attribute being absent entirely.
pub type AttributesMap = HashMap<String, Option<String>>;

/// Map of style-property names to resolved value strings.
pub type StyleMap = HashMap<String, String>;

/// A type-safe index into the node tree.
///
/// Provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// A single node in the document tree.
///
/// Parent/child/sibling relationships are stored as indices, enabling O(1)
/// traversal in any direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Whether this node is an element or character data.
    pub kind: NodeKind,

    /// The owning parent, or `None` for the tree root.
    pub parent: Option<NodeId>,

    /// Children in document order.
    pub children: Vec<NodeId>,

    /// Resolved style properties. Empty until cascade resolution runs.
    pub style: StyleMap,
}

/// The two node variants of the document tree.
///
/// The variant set is closed and known at design time, so this is a tagged
/// sum type with exhaustive matching rather than an open class hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// An element with a lowercase tag name and an attribute list.
    Element(ElementData),
    /// Raw character data. Text nodes have no children and no tag.
    Text(String),
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// The element's lowercase tag name.
    pub tag: String,
    /// The element's attribute list.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data from a tag name and attribute pairs.
    ///
    /// The tag name and attribute names are lowercased.
    #[must_use]
    pub fn new(tag: &str, attrs: Vec<(String, Option<String>)>) -> Self {
        let mut map = AttributesMap::new();
        for (name, value) in attrs {
            let _ = map.insert(name.to_ascii_lowercase(), value);
        }
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: map,
        }
    }

    /// Returns the value of an attribute, if present and non-empty.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).and_then(|v| v.as_deref())
    }

    /// Returns the whitespace-separated class names of this element.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }
}

/// Arena-based node tree with O(1) node access and traversal.
///
/// A tree has exactly one root (always an element); every non-root node has
/// exactly one parent, consistent with its position in that parent's child
/// list.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Node>,
    /// The root element.
    root: NodeId,
}

impl NodeTree {
    /// Create a tree containing only the given root element.
    #[must_use]
    pub fn with_root(root: ElementData) -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Element(root),
                parent: None,
                children: Vec::new(),
                style: StyleMap::new(),
            }],
            root: NodeId(0),
        }
    }

    /// Get the root element's ID.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
            style: StyleMap::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent`, updating both sides of
    /// the relationship.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Text(s) => Some(s.as_str()),
            NodeKind::Element(_) => None,
        })
    }

    /// Get a node's resolved style map.
    ///
    /// Empty until the cascade has run.
    #[must_use]
    pub fn style(&self, id: NodeId) -> &StyleMap {
        static EMPTY: std::sync::LazyLock<StyleMap> = std::sync::LazyLock::new(StyleMap::new);
        self.get(id).map_or(&*EMPTY, |n| &n.style)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Flatten the tree depth-first (pre-order), root first.
    #[must_use]
    pub fn flatten(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.flatten_into(self.root, &mut out);
        out
    }

    fn flatten_into(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in self.children(id) {
            self.flatten_into(child, out);
        }
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a NodeTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
