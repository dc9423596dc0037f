//! Markup tokenizer and tree builder for the Vireo renderer.
//!
//! # Scope
//!
//! This crate recovers a well-formed node tree from possibly malformed
//! markup:
//! - **Tokenizer** - a streaming state machine producing open-tag,
//!   close-tag, and text tokens; tolerant of unescaped `<`/`>` in text and
//!   quoted attribute values, and of `<!...>`/`<?...>` constructs (skipped).
//! - **Tree Builder** - a single open-element stack; void elements are
//!   attached but never pushed; mismatched close tags are tolerated by
//!   unconditional pop.
//!
//! The only fatal condition is input that never opens an element: that
//! surfaces as [`StructuralError`] with no partial tree returned.

pub mod token;
pub mod tokenizer;
pub mod tree_builder;

pub use token::Token;
pub use tokenizer::MarkupTokenizer;
pub use tree_builder::{StructuralError, build_tree, is_void_element};

use vireo_dom::{NodeId, NodeKind, NodeTree};

/// Print a tree to stdout with indentation, for debugging.
pub fn print_tree(tree: &NodeTree, id: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    match tree.get(id).map(|n| &n.kind) {
        Some(NodeKind::Element(data)) => {
            println!("{indent}<{}>", data.tag);
        }
        Some(NodeKind::Text(text)) => {
            println!("{indent}[text] {:?}", text);
        }
        None => return,
    }
    for &child in tree.children(id) {
        print_tree(tree, child, depth + 1);
    }
}
