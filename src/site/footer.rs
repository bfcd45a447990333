use chrono::Datelike;

use super::{text_element, View};
use crate::view::{ElementId, Rect, ViewTree, Viewport};

const FOUNDED: i32 = 2023;
const HEIGHT: f32 = 100.0;

/// Static footer with the copyright line
pub struct Footer {
    root: ElementId,
    copyright: ElementId,
}

impl Footer {
    pub fn new(tree: &mut ViewTree, parent: ElementId) -> Self {
        let root = tree.create_element(Some(parent), "footer");
        let copyright = text_element(tree, root, "p", &copyright_line(current_year()));
        Self { root, copyright }
    }

    pub fn copyright(&self) -> ElementId {
        self.copyright
    }
}

pub(crate) fn copyright_line(year: i32) -> String {
    format!("© {FOUNDED} - {year} Appu Presents. All rights reserved.")
}

fn current_year() -> i32 {
    chrono::Local::now().year().max(FOUNDED)
}

impl View for Footer {
    fn name(&self) -> &'static str {
        "footer"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn layout(&self, tree: &mut ViewTree, top: f32, viewport: Viewport) -> f32 {
        tree.set_bounds(self.root, Rect::new(0.0, top, viewport.width, HEIGHT));
        tree.set_bounds(self.copyright, Rect::new(0.0, top + 24.0, viewport.width, 28.0));
        HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copyright_line() {
        assert_eq!(
            copyright_line(2026),
            "© 2023 - 2026 Appu Presents. All rights reserved."
        );
    }

    #[test]
    fn test_footer_shows_current_year() {
        let mut tree = ViewTree::new();
        let page = tree.create_element(None, "main");
        let footer = Footer::new(&mut tree, page);
        let year = chrono::Local::now().year();
        assert!(year >= FOUNDED);
        assert_eq!(
            tree.text(footer.copyright()),
            Some(copyright_line(year).as_str())
        );
    }
}
