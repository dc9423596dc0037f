//! Integration tests for the arena node tree.

use vireo_dom::{ElementData, NodeKind, NodeTree};

fn element(tag: &str) -> ElementData {
    ElementData::new(tag, Vec::new())
}

#[test]
fn test_root_is_element() {
    let tree = NodeTree::with_root(element("html"));
    assert!(tree.as_element(tree.root()).is_some());
    assert!(tree.parent(tree.root()).is_none());
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_parent_child_round_trip() {
    // Every non-root node's parent must own it in its children list.
    let mut tree = NodeTree::with_root(element("html"));
    let body = tree.alloc(NodeKind::Element(element("body")));
    let p = tree.alloc(NodeKind::Element(element("p")));
    let text = tree.alloc(NodeKind::Text("hello".to_string()));
    tree.append_child(tree.root(), body);
    tree.append_child(body, p);
    tree.append_child(p, text);

    for id in tree.flatten() {
        if let Some(parent) = tree.parent(id) {
            assert!(
                tree.children(parent).contains(&id),
                "node {id:?} not found in its parent's child list"
            );
        } else {
            assert_eq!(id, tree.root());
        }
    }
}

#[test]
fn test_children_in_document_order() {
    let mut tree = NodeTree::with_root(element("ul"));
    let first = tree.alloc(NodeKind::Element(element("li")));
    let second = tree.alloc(NodeKind::Element(element("li")));
    tree.append_child(tree.root(), first);
    tree.append_child(tree.root(), second);

    assert_eq!(tree.children(tree.root()), &[first, second]);
}

#[test]
fn test_flatten_is_depth_first_pre_order() {
    let mut tree = NodeTree::with_root(element("html"));
    let head = tree.alloc(NodeKind::Element(element("head")));
    let title = tree.alloc(NodeKind::Element(element("title")));
    let body = tree.alloc(NodeKind::Element(element("body")));
    tree.append_child(tree.root(), head);
    tree.append_child(head, title);
    tree.append_child(tree.root(), body);

    assert_eq!(tree.flatten(), vec![tree.root(), head, title, body]);
}

#[test]
fn test_ancestors_walk_to_root() {
    let mut tree = NodeTree::with_root(element("html"));
    let body = tree.alloc(NodeKind::Element(element("body")));
    let div = tree.alloc(NodeKind::Element(element("div")));
    tree.append_child(tree.root(), body);
    tree.append_child(body, div);

    let ancestors: Vec<_> = tree.ancestors(div).collect();
    assert_eq!(ancestors, vec![body, tree.root()]);
}

#[test]
fn test_valueless_attribute_is_present_but_none() {
    let data = ElementData::new(
        "input",
        vec![
            ("disabled".to_string(), None),
            ("type".to_string(), Some("text".to_string())),
        ],
    );
    assert!(data.attrs.contains_key("disabled"));
    assert_eq!(data.attrs.get("disabled"), Some(&None));
    assert_eq!(data.attr("disabled"), None);
    assert_eq!(data.attr("type"), Some("text"));
}

#[test]
fn test_classes_split_on_whitespace() {
    let data = ElementData::new(
        "div",
        vec![("class".to_string(), Some("warn  big\tred".to_string()))],
    );
    let classes: Vec<_> = data.classes().collect();
    assert_eq!(classes, vec!["warn", "big", "red"]);
}

#[test]
fn test_style_map_empty_before_cascade() {
    let mut tree = NodeTree::with_root(element("html"));
    let body = tree.alloc(NodeKind::Element(element("body")));
    tree.append_child(tree.root(), body);
    assert!(tree.style(body).is_empty());
}
