//! Arena-based element storage for the headless view tree.
//!
//! Elements are stored in slots addressed by generational indices, so a stale
//! [`ElementId`] kept by a timeline or trigger after its element was removed
//! never resolves to a new element that reused the slot.
//!
//! Bounds are document-space rectangles: `y` grows downward from the top of
//! the page and is independent of the current scroll offset. Animated style
//! values live next to the element; every write bumps a mutation counter so
//! callers can observe whether a frame touched the tree at all.

use std::collections::HashMap;

use super::Rect;
use crate::animation::{Property, PropertyValue};

/// Unique identifier for an element in the tree.
///
/// Uses a generational index design:
/// - `index`: Position in the slot array (reusable after removal)
/// - `generation`: Version counter that increments when a slot is reused
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ElementId {
    index: u32,
    generation: u32,
}

impl ElementId {
    /// Combines generation (high bits) with index (low bits).
    pub fn as_u64(self) -> u64 {
        ((self.generation as u64) << 32) | (self.index as u64)
    }
}

/// An element in the tree and its metadata.
struct Node {
    tag: String,
    /// Anchor name (`id` attribute), addressable by in-page links
    anchor: Option<String>,
    classes: Vec<String>,
    text: Option<String>,
    bounds: Rect,
    style: HashMap<Property, PropertyValue>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Central tree holding every mounted element.
pub struct ViewTree {
    slots: Vec<Slot>,
    free_indices: Vec<u32>,
    mutations: u64,
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_indices: Vec::new(),
            mutations: 0,
        }
    }

    /// Create an element and append it to `parent` (or leave it as a root).
    ///
    /// A parent that is no longer in the tree leaves the new element detached.
    pub fn create_element(&mut self, parent: Option<ElementId>, tag: &str) -> ElementId {
        let node = Node {
            tag: tag.to_string(),
            anchor: None,
            classes: Vec::new(),
            text: None,
            bounds: Rect::default(),
            style: HashMap::new(),
            parent: None,
            children: Vec::new(),
        };

        let id = if let Some(index) = self.free_indices.pop() {
            // Reuse a freed slot - increment generation
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(node);
            ElementId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            ElementId {
                index,
                generation: 0,
            }
        };

        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.node_mut(parent_id) {
                parent_node.children.push(id);
                if let Some(node) = self.node_mut(id) {
                    node.parent = Some(parent_id);
                }
            }
        }

        id
    }

    /// Remove an element and its entire subtree.
    ///
    /// Returns false if the element was already gone.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let Some(node) = self.take(id) else {
            return false;
        };

        if let Some(parent_id) = node.parent {
            if let Some(parent) = self.node_mut(parent_id) {
                parent.children.retain(|child| *child != id);
            }
        }

        let mut pending = node.children;
        while let Some(child_id) = pending.pop() {
            if let Some(child) = self.take(child_id) {
                pending.extend(child.children);
            }
        }
        true
    }

    fn take(&mut self, id: ElementId) -> Option<Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        self.free_indices.push(id.index);
        Some(node)
    }

    fn node(&self, id: ElementId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Whether the element is currently in the tree
    pub fn contains(&self, id: ElementId) -> bool {
        self.node(id).is_some()
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.node(id).map(|node| node.tag.as_str())
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `id` is `ancestor` or lives somewhere below it
    pub fn is_within(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(element) = current {
            if element == ancestor {
                return self.contains(element);
            }
            current = self.parent(element);
        }
        false
    }

    pub fn set_anchor(&mut self, id: ElementId, anchor: &str) {
        if let Some(node) = self.node_mut(id) {
            node.anchor = Some(anchor.to_string());
        }
    }

    pub fn anchor(&self, id: ElementId) -> Option<&str> {
        self.node(id).and_then(|node| node.anchor.as_deref())
    }

    /// Find the element carrying the given anchor name
    pub fn find_anchor(&self, anchor: &str) -> Option<ElementId> {
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            let node = slot.node.as_ref()?;
            (node.anchor.as_deref() == Some(anchor)).then_some(ElementId {
                index: index as u32,
                generation: slot.generation,
            })
        })
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes.retain(|c| c != class);
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.node(id)
            .is_some_and(|node| node.classes.iter().any(|c| c == class))
    }

    pub fn set_text(&mut self, id: ElementId, text: Option<String>) {
        if let Some(node) = self.node_mut(id) {
            node.text = text;
        }
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.node(id).and_then(|node| node.text.as_deref())
    }

    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(node) = self.node_mut(id) {
            node.bounds = bounds;
        }
    }

    /// Document-space bounds of the element
    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.node(id).map(|node| node.bounds)
    }

    /// Descendants of `root` (not including `root`) carrying `class`, in document order
    pub fn query_class(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.has_class(id, class) {
                found.push(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        found
    }

    /// Descendants of `root` with the given tag, in document order
    pub fn query_tag(&self, root: ElementId, tag: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.tag(id) == Some(tag) {
                found.push(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        found
    }

    /// Current value of an animated style property, if one was ever written
    pub fn style(&self, id: ElementId, property: Property) -> Option<&PropertyValue> {
        self.node(id).and_then(|node| node.style.get(&property))
    }

    /// Write a style property. Returns false if the element is gone.
    pub fn set_style(&mut self, id: ElementId, property: Property, value: PropertyValue) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        if node.style.get(&property) != Some(&value) {
            node.style.insert(property, value);
            self.mutations += 1;
        }
        true
    }

    /// Remove a style property, restoring the element's natural value
    pub fn clear_style(&mut self, id: ElementId, property: Property) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        if node.style.remove(&property).is_some() {
            self.mutations += 1;
        }
        true
    }

    /// Count of style writes that changed a value since the tree was created
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    /// Bottom edge of the lowest element, i.e. the scrollable document height
    pub fn document_height(&self) -> f32 {
        self.slots
            .iter()
            .filter_map(|slot| slot.node.as_ref())
            .map(|node| node.bounds.bottom())
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_query() {
        let mut tree = ViewTree::new();
        let root = tree.create_element(None, "div");
        let a = tree.create_element(Some(root), "a");
        let b = tree.create_element(Some(root), "a");
        let inner = tree.create_element(Some(a), "span");
        tree.add_class(a, "nav-item");
        tree.add_class(inner, "nav-item");
        tree.add_class(b, "nav-item");

        assert_eq!(tree.query_class(root, "nav-item"), vec![a, inner, b]);
        assert_eq!(tree.query_tag(root, "a"), vec![a, b]);
        assert_eq!(tree.parent(inner), Some(a));
        assert!(tree.is_within(inner, root));
        assert!(!tree.is_within(root, inner));
    }

    #[test]
    fn test_remove_subtree() {
        let mut tree = ViewTree::new();
        let root = tree.create_element(None, "div");
        let child = tree.create_element(Some(root), "p");
        let grandchild = tree.create_element(Some(child), "span");

        assert!(tree.remove(child));
        assert!(!tree.contains(child));
        assert!(!tree.contains(grandchild));
        assert!(tree.children(root).is_empty());
        assert!(!tree.remove(child));
    }

    #[test]
    fn test_stale_id_after_reuse() {
        let mut tree = ViewTree::new();
        let first = tree.create_element(None, "div");
        tree.remove(first);
        let second = tree.create_element(None, "div");

        assert_ne!(first, second);
        assert!(!tree.contains(first));
        assert!(tree.contains(second));
        assert!(!tree.set_style(first, Property::Opacity, PropertyValue::Number(0.0)));
    }

    #[test]
    fn test_style_mutation_counter() {
        let mut tree = ViewTree::new();
        let el = tree.create_element(None, "div");
        assert_eq!(tree.mutations(), 0);

        tree.set_style(el, Property::Opacity, PropertyValue::Number(0.5));
        tree.set_style(el, Property::Opacity, PropertyValue::Number(0.5));
        assert_eq!(tree.mutations(), 1);

        tree.clear_style(el, Property::Opacity);
        tree.clear_style(el, Property::Opacity);
        assert_eq!(tree.mutations(), 2);
        assert!(tree.style(el, Property::Opacity).is_none());
    }

    #[test]
    fn test_find_anchor() {
        let mut tree = ViewTree::new();
        let root = tree.create_element(None, "main");
        let about = tree.create_element(Some(root), "section");
        tree.set_anchor(about, "about");

        assert_eq!(tree.find_anchor("about"), Some(about));
        assert_eq!(tree.find_anchor("stores"), None);
    }
}
