//! Element tree model and the pure mutation functions behind drag-and-drop.
//!
//! The builder's content is a rooted, ordered forest of [`Element`]s. Every
//! function here takes the current tree by reference and returns a new value;
//! nothing mutates a tree in place. Sibling order is render order and is
//! preserved by every operation.
//!
//! Ids are unique across the whole tree. An id that is not present is never an
//! error: lookups return `None` and updates hand back an unchanged tree.

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;

use serde::{Deserialize, Serialize};

/// Unique, stable identifier for an element in the builder tree.
pub type ElementId = String;

/// A node in the builder tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier, unique across every depth of the tree.
    pub id: ElementId,
    /// Tag discriminator (`"div"`, `"h1"`, `"p"`, ...). Descriptive only.
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether this element accepts dropped children.
    #[serde(default)]
    pub is_container: bool,
    /// Opaque style bag for the renderer.
    #[serde(default)]
    pub style: serde_json::Value,
    /// Opaque attribute bag for the renderer.
    #[serde(default)]
    pub props: serde_json::Value,
    /// Ordered children; order is sibling/render order.
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Element {
    /// A container element with no children and empty bags.
    #[must_use]
    pub fn container(id: impl Into<ElementId>, kind: impl Into<String>) -> Self {
        Self::bare(id.into(), kind.into(), true)
    }

    /// A leaf (non-container) element with empty bags.
    #[must_use]
    pub fn leaf(id: impl Into<ElementId>, kind: impl Into<String>) -> Self {
        Self::bare(id.into(), kind.into(), false)
    }

    fn bare(id: ElementId, kind: String, is_container: bool) -> Self {
        Self {
            id,
            kind,
            is_container,
            style: serde_json::Value::Null,
            props: serde_json::Value::Null,
            children: Vec::new(),
        }
    }

    /// Builder-style helper replacing this element's children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    /// Copy of this element's own fields with a different child list.
    ///
    /// Used by path-copying updates so only the nodes along the path from the
    /// root to the change are rebuilt.
    fn rebuilt(&self, children: Vec<Element>) -> Self {
        Self {
            id: self.id.clone(),
            kind: self.kind.clone(),
            is_container: self.is_container,
            style: self.style.clone(),
            props: self.props.clone(),
            children,
        }
    }
}

/// Result of [`detach`]: the tree without the node, and the node itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Detached {
    /// The tree with the node (and its whole subtree) removed.
    pub remainder: Vec<Element>,
    /// The removed node, subtree intact.
    pub removed: Element,
}

/// Find the element with `id` anywhere in `tree` (pre-order depth-first).
#[must_use]
pub fn locate<'a>(tree: &'a [Element], id: &str) -> Option<&'a Element> {
    for el in tree {
        if el.id == id {
            return Some(el);
        }
        if let Some(found) = locate(&el.children, id) {
            return Some(found);
        }
    }
    None
}

/// Whether `target_id` appears anywhere below `ancestor`.
///
/// A node is not its own descendant.
#[must_use]
pub fn is_descendant(ancestor: &Element, target_id: &str) -> bool {
    ancestor
        .children
        .iter()
        .any(|child| child.id == target_id || is_descendant(child, target_id))
}

/// Remove the element with `id` from wherever it lives in `tree`.
///
/// The removed element keeps its own children. Returns `None` when the id is
/// not present, in which case the caller's tree is the unchanged result.
#[must_use]
pub fn detach(tree: &[Element], id: &str) -> Option<Detached> {
    for (index, el) in tree.iter().enumerate() {
        if el.id == id {
            let mut remainder = tree.to_vec();
            let removed = remainder.remove(index);
            return Some(Detached { remainder, removed });
        }
        if let Some(inner) = detach(&el.children, id) {
            let mut remainder = tree.to_vec();
            remainder[index] = el.rebuilt(inner.remainder);
            return Some(Detached { remainder, removed: inner.removed });
        }
    }
    None
}

/// Replace the element with `id` by `transform(element)`.
///
/// Everything else is returned structurally unchanged. A missing id yields a
/// tree equal to the input.
#[must_use]
pub fn update_node<F>(tree: &[Element], id: &str, transform: F) -> Vec<Element>
where
    F: FnOnce(Element) -> Element,
{
    let mut transform = Some(transform);
    update_in(tree, id, &mut transform)
}

fn update_in<F>(tree: &[Element], id: &str, transform: &mut Option<F>) -> Vec<Element>
where
    F: FnOnce(Element) -> Element,
{
    tree.iter()
        .map(|el| {
            if transform.is_none() {
                return el.clone();
            }
            if el.id == id {
                return match transform.take() {
                    Some(f) => f(el.clone()),
                    None => el.clone(),
                };
            }
            if el.children.is_empty() {
                el.clone()
            } else {
                el.rebuilt(update_in(&el.children, id, transform))
            }
        })
        .collect()
}

/// Append `child` as the last child of the element with `parent_id`.
#[must_use]
pub fn append_child(tree: &[Element], parent_id: &str, child: Element) -> Vec<Element> {
    update_node(tree, parent_id, |mut parent| {
        parent.children.push(child);
        parent
    })
}
