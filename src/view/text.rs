use super::{ElementId, ViewTree};

/// Class carried by every per-character element created by [`split_chars`]
pub const CHAR_CLASS: &str = "char-span";

/// Replace an element's text with one child element per character.
///
/// Non-space characters become `span` children carrying [`CHAR_CLASS`] and
/// are returned in reading order, ready to be used as timeline targets.
/// Spaces become plain non-breaking-space children so the words keep their
/// gaps without being animated. The element keeps its own classes.
pub fn split_chars(tree: &mut ViewTree, element: ElementId) -> Vec<ElementId> {
    let Some(text) = tree.text(element).map(str::to_owned) else {
        return Vec::new();
    };
    let bounds = tree.bounds(element).unwrap_or_default();
    tree.set_text(element, None);

    let mut chars = Vec::new();
    for c in text.chars() {
        if c == ' ' {
            let space = tree.create_element(Some(element), "text");
            tree.set_text(space, Some("\u{a0}".to_string()));
            tree.set_bounds(space, bounds);
            continue;
        }
        let span = tree.create_element(Some(element), "span");
        tree.add_class(span, CHAR_CLASS);
        tree.set_text(span, Some(c.to_string()));
        tree.set_bounds(span, bounds);
        chars.push(span);
    }
    chars
}
