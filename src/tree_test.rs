use serde_json::json;

use super::*;

// =============================================================
// Helpers
// =============================================================

/// Two top-level containers, a nested container, and leaves at every depth.
///
/// ```text
/// root-a (container)
///   a1 (leaf)
///   a2 (container)
///     a2x (leaf)
///     a2y (leaf)
/// root-b (container)
/// loose (leaf)
/// ```
fn sample_tree() -> Vec<Element> {
    vec![
        Element::container("root-a", "div").with_children(vec![
            Element::leaf("a1", "h1"),
            Element::container("a2", "div")
                .with_children(vec![Element::leaf("a2x", "p"), Element::leaf("a2y", "p")]),
        ]),
        Element::container("root-b", "div"),
        Element::leaf("loose", "p"),
    ]
}

/// Every id in `tree`, in pre-order.
fn collect_ids(tree: &[Element]) -> Vec<&str> {
    tree.iter()
        .flat_map(|el| std::iter::once(el.id.as_str()).chain(collect_ids(&el.children)))
        .collect()
}

fn sorted_ids(tree: &[Element]) -> Vec<String> {
    let mut ids: Vec<String> = collect_ids(tree).into_iter().map(str::to_owned).collect();
    ids.sort();
    ids
}

// =============================================================
// Serde
// =============================================================

#[test]
fn element_deserializes_host_field_names() {
    let raw = json!({
        "id": "1",
        "type": "div",
        "isContainer": true,
        "style": { "minWidth": "300px" },
        "props": { "tag": "div" },
        "children": []
    });
    let el: Element = serde_json::from_value(raw).unwrap();
    assert_eq!(el.id, "1");
    assert_eq!(el.kind, "div");
    assert!(el.is_container);
    assert_eq!(el.style["minWidth"], "300px");
    assert_eq!(el.props["tag"], "div");
}

#[test]
fn element_missing_optional_fields_default() {
    let el: Element = serde_json::from_value(json!({ "id": "x", "type": "p" })).unwrap();
    assert!(!el.is_container);
    assert!(el.children.is_empty());
    assert!(el.props.is_null());
}

#[test]
fn element_serializes_type_and_is_container() {
    let value = serde_json::to_value(Element::container("c", "section")).unwrap();
    assert_eq!(value["type"], "section");
    assert_eq!(value["isContainer"], true);
}

// =============================================================
// locate
// =============================================================

#[test]
fn locate_top_level() {
    let tree = sample_tree();
    assert_eq!(locate(&tree, "loose").map(|el| el.kind.as_str()), Some("p"));
}

#[test]
fn locate_deeply_nested() {
    let tree = sample_tree();
    let found = locate(&tree, "a2y").unwrap();
    assert_eq!(found.id, "a2y");
}

#[test]
fn locate_missing_is_none() {
    let tree = sample_tree();
    assert!(locate(&tree, "nope").is_none());
    assert!(locate(&[], "a1").is_none());
}

// =============================================================
// is_descendant
// =============================================================

#[test]
fn descendant_direct_child() {
    let tree = sample_tree();
    assert!(is_descendant(&tree[0], "a1"));
}

#[test]
fn descendant_grandchild() {
    let tree = sample_tree();
    assert!(is_descendant(&tree[0], "a2x"));
}

#[test]
fn node_is_not_its_own_descendant() {
    let tree = sample_tree();
    assert!(!is_descendant(&tree[0], "root-a"));
}

#[test]
fn sibling_is_not_descendant() {
    let tree = sample_tree();
    assert!(!is_descendant(&tree[0], "root-b"));
    assert!(!is_descendant(&tree[2], "a1"));
}

// =============================================================
// detach
// =============================================================

#[test]
fn detach_top_level_preserves_sibling_order() {
    let tree = sample_tree();
    let out = detach(&tree, "root-b").unwrap();
    assert_eq!(out.removed.id, "root-b");
    let ids: Vec<&str> = out.remainder.iter().map(|el| el.id.as_str()).collect();
    assert_eq!(ids, vec!["root-a", "loose"]);
}

#[test]
fn detach_nested_keeps_subtree_intact() {
    let tree = sample_tree();
    let out = detach(&tree, "a2").unwrap();
    assert_eq!(out.removed.id, "a2");
    let kids: Vec<&str> = out.removed.children.iter().map(|el| el.id.as_str()).collect();
    assert_eq!(kids, vec!["a2x", "a2y"]);
    assert!(locate(&out.remainder, "a2x").is_none());
    assert_eq!(out.remainder[0].children.len(), 1);
}

#[test]
fn detach_every_id_removes_it_from_remainder() {
    let tree = sample_tree();
    for id in collect_ids(&tree) {
        let out = detach(&tree, id).unwrap();
        assert_eq!(out.removed.id, id);
        assert!(locate(&out.remainder, id).is_none(), "{id} still present");
    }
}

#[test]
fn detach_missing_is_none() {
    let tree = sample_tree();
    assert!(detach(&tree, "ghost").is_none());
}

#[test]
fn detach_does_not_touch_input() {
    let tree = sample_tree();
    let before = tree.clone();
    let _detached = detach(&tree, "a2x");
    assert_eq!(tree, before);
}

// =============================================================
// update_node / append_child
// =============================================================

#[test]
fn update_node_transforms_only_match() {
    let tree = sample_tree();
    let out = update_node(&tree, "a2x", |mut el| {
        el.props = json!({ "text": "edited" });
        el
    });
    assert_eq!(locate(&out, "a2x").unwrap().props["text"], "edited");
    assert!(locate(&out, "a2y").unwrap().props.is_null());
    assert_eq!(collect_ids(&out), collect_ids(&tree));
}

#[test]
fn update_node_missing_returns_equal_tree() {
    let tree = sample_tree();
    let out = update_node(&tree, "ghost", |_| Element::leaf("replaced", "p"));
    assert_eq!(out, tree);
}

#[test]
fn append_child_goes_last() {
    let tree = sample_tree();
    let out = append_child(&tree, "a2", Element::leaf("new", "p"));
    let kids: Vec<&str> = locate(&out, "a2").unwrap().children.iter().map(|el| el.id.as_str()).collect();
    assert_eq!(kids, vec!["a2x", "a2y", "new"]);
}

#[test]
fn append_child_to_missing_parent_is_noop() {
    let tree = sample_tree();
    let out = append_child(&tree, "ghost", Element::leaf("new", "p"));
    assert_eq!(out, tree);
}

// =============================================================
// Properties
// =============================================================

#[test]
fn detach_then_append_preserves_id_multiset() {
    let tree = sample_tree();
    let before = sorted_ids(&tree);
    let moves = [("loose", "a2"), ("a1", "root-b"), ("a2", "root-b"), ("root-b", "root-a")];
    for (id, parent) in moves {
        let out = detach(&tree, id).unwrap();
        let moved = append_child(&out.remainder, parent, out.removed);
        assert_eq!(sorted_ids(&moved), before, "moving {id} into {parent}");
        let parent_node = locate(&moved, parent).unwrap();
        assert_eq!(parent_node.children.last().map(|el| el.id.as_str()), Some(id));
    }
}
