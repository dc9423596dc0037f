//! Tree construction from the token stream.
//!
//! A single open-element stack drives construction. The first element ever
//! opened becomes the tree root. Malformed nesting is tolerated: close tags
//! pop unconditionally (no tag-name verification), close tags for void
//! elements are ignored (the element was never pushed), and a close tag
//! with an empty stack is a no-op.

use thiserror::Error;

use vireo_common::warning::warn_once;
use vireo_dom::{ElementData, NodeKind, NodeTree};

use crate::token::Token;
use crate::tokenizer::MarkupTokenizer;

/// The markup tree builder cannot produce a root.
///
/// This is the pipeline's only fatal parse error: no partial tree is
/// returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructuralError {
    /// The input never opened an element (empty or garbage input).
    #[error("markup contains no element to serve as the tree root")]
    NoRootElement,
}

/// Void elements never take children and have no matching close tag.
///
/// They are attached to the tree but never pushed on the open stack, so a
/// later close tag must not (and cannot) pop them.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "keygen"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Build a node tree from raw markup.
///
/// # Errors
///
/// Returns [`StructuralError::NoRootElement`] if the input never opens an
/// element.
pub fn build_tree(source: &str) -> Result<NodeTree, StructuralError> {
    let mut tokenizer = MarkupTokenizer::new(source);
    tokenizer.run();
    build_from_tokens(tokenizer.into_tokens())
}

/// Build a node tree from an already tokenized stream.
///
/// # Errors
///
/// Returns [`StructuralError::NoRootElement`] if the stream contains no
/// open tag.
pub fn build_from_tokens(tokens: Vec<Token>) -> Result<NodeTree, StructuralError> {
    let mut tree: Option<NodeTree> = None;
    let mut open = Vec::new();

    for token in tokens {
        match token {
            Token::OpenTag {
                name,
                attrs,
                self_closing,
            } => {
                let data = ElementData::new(&name, attrs);
                let id = match tree.as_mut() {
                    None => {
                        let rooted = NodeTree::with_root(data);
                        let root = rooted.root();
                        tree = Some(rooted);
                        root
                    }
                    Some(tree) => {
                        let id = tree.alloc(NodeKind::Element(data));
                        if let Some(&parent) = open.last() {
                            tree.append_child(parent, id);
                        }
                        id
                    }
                };
                if !is_void_element(&name) && !self_closing {
                    open.push(id);
                }
            }
            Token::CloseTag { name } => {
                // Void elements were never pushed; their close tags must
                // not pop whatever is on top.
                if !is_void_element(&name) {
                    let _ = open.pop();
                }
            }
            Token::Text(text) => match (tree.as_mut(), open.last()) {
                (Some(tree), Some(&parent)) => {
                    let id = tree.alloc(NodeKind::Text(text));
                    tree.append_child(parent, id);
                }
                // Text outside any element is discarded.
                _ => {
                    if !text.trim().is_empty() {
                        warn_once("Markup", "discarding text outside any element");
                    }
                }
            },
        }
    }

    tree.ok_or(StructuralError::NoRootElement)
}
