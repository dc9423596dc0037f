//! Integration tests for markup tree construction.

use vireo_dom::{NodeKind, NodeTree};
use vireo_html::{StructuralError, build_tree};

/// Flatten the tree depth-first into printable descriptions.
fn flatten_kinds(tree: &NodeTree) -> Vec<String> {
    tree.flatten()
        .into_iter()
        .map(|id| match tree.get(id).map(|n| &n.kind) {
            Some(NodeKind::Element(data)) => format!("Element({})", data.tag),
            Some(NodeKind::Text(text)) => format!("Text({text:?})"),
            None => unreachable!("flatten returned a dangling id"),
        })
        .collect()
}

#[test]
fn test_round_trip_document_order() {
    let tree = build_tree("<p>hello <b>world</b></p>").unwrap();
    assert_eq!(
        flatten_kinds(&tree),
        vec![
            "Element(p)".to_string(),
            "Text(\"hello \")".to_string(),
            "Element(b)".to_string(),
            "Text(\"world\")".to_string(),
        ]
    );
}

#[test]
fn test_first_element_becomes_root() {
    let tree = build_tree("ignored text<html><body></body></html>").unwrap();
    assert_eq!(tree.as_element(tree.root()).unwrap().tag, "html");
    // Text before the first element is discarded.
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_no_root_is_fatal() {
    assert_eq!(build_tree(""), Err(StructuralError::NoRootElement));
    assert_eq!(build_tree("just text"), Err(StructuralError::NoRootElement));
    assert_eq!(
        build_tree("<!-- only a comment -->"),
        Err(StructuralError::NoRootElement)
    );
}

#[test]
fn test_void_element_not_pushed() {
    // <img> must not swallow the following text as a child.
    let tree = build_tree("<p><img src=x>after</p>").unwrap();
    let p = tree.root();
    let children = tree.children(p);
    assert_eq!(children.len(), 2);
    assert_eq!(tree.as_element(children[0]).unwrap().tag, "img");
    assert_eq!(tree.as_text(children[1]), Some("after"));
    assert!(tree.children(children[0]).is_empty());
}

#[test]
fn test_close_after_void_pops_enclosing_element() {
    // </p> arrives while <img> is the most recent element; img was never
    // pushed, so the pop must remove p itself.
    let tree = build_tree("<div><p>text<img></p>tail</div>").unwrap();
    let div = tree.root();
    let children = tree.children(div);
    assert_eq!(children.len(), 2);
    assert_eq!(tree.as_element(children[0]).unwrap().tag, "p");
    // "tail" lands in div, not in p.
    assert_eq!(tree.as_text(children[1]), Some("tail"));
}

#[test]
fn test_void_close_tag_ignored() {
    // </br> must not pop the enclosing paragraph.
    let tree = build_tree("<p>a<br></br>b</p>").unwrap();
    let p = tree.root();
    let texts: Vec<_> = tree
        .children(p)
        .iter()
        .filter_map(|&id| tree.as_text(id))
        .collect();
    assert_eq!(texts, vec!["a", "b"]);
}

#[test]
fn test_mismatched_close_pops_unconditionally() {
    // </span> closes the <b>; "c" ends up directly under p.
    let tree = build_tree("<p><b>bold</span>c</p>").unwrap();
    let p = tree.root();
    let children = tree.children(p);
    assert_eq!(children.len(), 2);
    assert_eq!(tree.as_element(children[0]).unwrap().tag, "b");
    assert_eq!(tree.as_text(children[1]), Some("c"));
}

#[test]
fn test_extra_close_tags_tolerated() {
    let tree = build_tree("<p>x</p></div></div>").unwrap();
    assert_eq!(tree.as_element(tree.root()).unwrap().tag, "p");
}

#[test]
fn test_self_closing_non_void_not_pushed() {
    let tree = build_tree("<div><widget/>text</div>").unwrap();
    let div = tree.root();
    let children = tree.children(div);
    assert_eq!(children.len(), 2);
    assert_eq!(tree.as_element(children[0]).unwrap().tag, "widget");
    assert_eq!(tree.as_text(children[1]), Some("text"));
}

#[test]
fn test_attributes_preserved_on_nodes() {
    let tree = build_tree("<p class='warn' hidden>hi</p>").unwrap();
    let data = tree.as_element(tree.root()).unwrap();
    assert_eq!(data.attr("class"), Some("warn"));
    assert!(data.attrs.contains_key("hidden"));
    assert_eq!(data.attrs.get("hidden"), Some(&None));
}

#[test]
fn test_parent_back_references_consistent() {
    let tree = build_tree("<html><body><div><p>deep</p></div></body></html>").unwrap();
    for id in tree.flatten() {
        if let Some(parent) = tree.parent(id) {
            assert!(tree.children(parent).contains(&id));
        } else {
            assert_eq!(id, tree.root());
        }
    }
}
