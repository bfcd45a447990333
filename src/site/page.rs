use super::{About, Document, Footer, Header, Nav, PageKind, Stores, Timings, View};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::view::{ElementId, Rect};
use crate::window::Window;

/// A mounted page: navigation, its sections and the footer
pub struct Page {
    kind: PageKind,
    window: Window,
    root: ElementId,
    nav: Nav,
    sections: Vec<Box<dyn View>>,
    footer: Footer,
}

impl Page {
    /// Build, lay out and start animating every view of `kind`
    pub fn mount(window: &Window, kind: PageKind, config: &EngineConfig) -> Result<Self> {
        let (stores, timings) = match kind {
            PageKind::Home => (super::stores()?, super::timings()?),
            PageKind::Privacy | PageKind::Terms => (Vec::new(), Vec::new()),
        };
        let root = window.tree_mut().create_element(None, "main");

        let mut page = {
            let mut tree = window.tree_mut();
            let nav = Nav::new(&mut tree, root, config.mobile_breakpoint);
            let sections: Vec<Box<dyn View>> = match kind {
                PageKind::Home => vec![
                    Box::new(Header::new(&mut tree, root, config.mobile_breakpoint)),
                    Box::new(About::new(&mut tree, root)),
                    Box::new(Stores::new(&mut tree, root, &stores)),
                    Box::new(Timings::new(&mut tree, root, &timings)),
                ],
                PageKind::Privacy => vec![Box::new(Document::privacy(&mut tree, root))],
                PageKind::Terms => vec![Box::new(Document::terms(&mut tree, root))],
            };
            let footer = Footer::new(&mut tree, root);
            Page {
                kind,
                window: window.clone(),
                root,
                nav,
                sections,
                footer,
            }
        };

        let height = page.layout();
        log::debug!("Mounted {:?} page ({}px tall)", kind, height);

        page.nav.animate(window)?;
        for section in &mut page.sections {
            section.animate(window)?;
        }
        page.footer.animate(window)?;
        Ok(page)
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn nav(&self) -> &Nav {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut Nav {
        &mut self.nav
    }

    pub fn footer(&self) -> &Footer {
        &self.footer
    }

    /// Sections between the navigation and the footer, top to bottom
    pub fn sections(&self) -> impl Iterator<Item = &dyn View> {
        self.sections.iter().map(|section| section.as_ref())
    }

    pub fn section(&self, name: &str) -> Option<&dyn View> {
        self.sections().find(|section| section.name() == name)
    }

    /// Every view on the page, navigation first
    pub fn views(&self) -> impl Iterator<Item = &dyn View> {
        std::iter::once(&self.nav as &dyn View)
            .chain(self.sections())
            .chain(std::iter::once(&self.footer as &dyn View))
    }

    /// Lay out every view for the current viewport. Returns the page height.
    pub fn layout(&self) -> f32 {
        let viewport = self.window.viewport();
        let mut tree = self.window.tree_mut();
        let mut top = 0.0;
        for view in self.views() {
            top += view.layout(&mut tree, top, viewport);
        }
        tree.set_bounds(self.root, Rect::new(0.0, 0.0, viewport.width, top));
        top
    }

    /// Re-layout and let every view adapt to the new viewport
    pub fn on_resize(&mut self) -> Result<()> {
        self.layout();
        let viewport = self.window.viewport();
        self.nav.on_resize(viewport)?;
        for section in &mut self.sections {
            section.on_resize(viewport)?;
        }
        self.footer.on_resize(viewport)
    }

    pub fn on_scroll(&mut self) {
        let viewport = self.window.viewport();
        self.nav.on_scroll(viewport);
        for section in &mut self.sections {
            section.on_scroll(viewport);
        }
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.nav.dispose();
        for section in &mut self.sections {
            section.dispose();
        }
        self.footer.dispose();
        self.window.tree_mut().remove(self.root);
        log::debug!("Unmounted {:?} page", self.kind);
    }
}
