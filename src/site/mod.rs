//! The store site: pages, their views and the animations each view runs.
//!
//! A [`Page`] builds its views' elements, lays them out top to bottom and
//! then lets every view start its animations through its own
//! [`AnimationContext`](crate::context::AnimationContext). Navigating away
//! drops the page, which disposes every context and removes the page's
//! elements from the tree.

mod about;
mod data;
mod document;
mod footer;
mod header;
mod nav;
mod page;
mod responsive;
mod stores;
mod timings;

pub use about::About;
pub use data::{parse_stores, parse_timings, stores, timings, StoreRecord, Timing};
pub use document::Document;
pub use footer::Footer;
pub use header::Header;
pub use nav::Nav;
pub use page::Page;
pub use responsive::{is_mobile, ParallaxParams};
pub use stores::Stores;
pub use timings::Timings;

use crate::animation::Property;
use crate::config::EngineConfig;
use crate::context::AnimationContext;
use crate::error::Result;
use crate::timeline::{build, PropertySpec};
use crate::trigger::{Trigger, TriggerMode};
use crate::view::{ElementId, ViewTree, Viewport};
use crate::window::Window;

/// Horizontal padding around section content
const GUTTER: f32 = 24.0;
/// Width from which sections use their roomier spacing
const WIDE_LAYOUT: f32 = 1024.0;
/// Widest content column
const CONTENT_MAX_WIDTH: f32 = 896.0;

/// Which page is mounted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PageKind {
    #[default]
    Home,
    Privacy,
    Terms,
}

impl PageKind {
    /// Route the page is served under
    pub fn path(self) -> &'static str {
        match self {
            PageKind::Home => "/",
            PageKind::Privacy => "/privacy",
            PageKind::Terms => "/terms",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(PageKind::Home),
            "/privacy" => Some(PageKind::Privacy),
            "/terms" => Some(PageKind::Terms),
            _ => None,
        }
    }
}

/// A section of a page.
///
/// Views build their elements when they are created, get laid out by the
/// page, and only then start animating, so scroll triggers always resolve
/// against real bounds.
pub trait View {
    fn name(&self) -> &'static str;

    fn root(&self) -> ElementId;

    /// Anchor that in-page links scroll to
    fn anchor(&self) -> Option<&'static str> {
        None
    }

    /// Assign bounds to this view's elements with its top edge at `top`.
    ///
    /// Returns how far the next view starts below `top`. Fixed-position views
    /// return 0.
    fn layout(&self, tree: &mut ViewTree, top: f32, viewport: Viewport) -> f32;

    /// Open this view's animation context and register its timelines
    fn animate(&mut self, _window: &Window) -> Result<()> {
        Ok(())
    }

    /// React to a viewport size change (layout has already been updated)
    fn on_resize(&mut self, _viewport: Viewport) -> Result<()> {
        Ok(())
    }

    /// React to a scroll offset change
    fn on_scroll(&mut self, _viewport: Viewport) {}

    fn context(&self) -> Option<&AnimationContext> {
        None
    }

    /// Stop every animation and restore animated properties
    fn dispose(&mut self) {}
}

/// Centered content column for a viewport
fn content_column(viewport: Viewport) -> (f32, f32) {
    let width = (viewport.width - 2.0 * GUTTER).clamp(0.0, CONTENT_MAX_WIDTH);
    ((viewport.width - width) / 2.0, width)
}

/// Vertical padding above and below a full-width section
fn section_padding(viewport: Viewport) -> f32 {
    if viewport.width < WIDE_LAYOUT {
        60.0
    } else {
        100.0
    }
}

/// Create a child element with text
fn text_element(tree: &mut ViewTree, parent: ElementId, tag: &str, text: &str) -> ElementId {
    let id = tree.create_element(Some(parent), tag);
    tree.set_text(id, Some(text.to_string()));
    id
}

/// Section title fade-up, played when `section` scrolls into view
fn bind_title_fade(ctx: &mut AnimationContext, title: ElementId, section: ElementId) -> Result<()> {
    let fade = build(
        &[title],
        vec![
            PropertySpec::new(Property::Opacity, 0.0, 1.0)
                .duration(800.0)
                .timing("power2.out".parse()?),
            PropertySpec::new(Property::Y, 30.0, 0.0)
                .duration(800.0)
                .timing("power2.out".parse()?),
        ],
        0.0,
    )?
    .named("section-title");
    ctx.animate(
        fade,
        Trigger::on_scroll(section, "top 80%", None, TriggerMode::PlayOnce)?,
    )?;
    Ok(())
}

/// The running site: a window and the page currently mounted in it
pub struct Site {
    window: Window,
    config: EngineConfig,
    page: Option<Page>,
}

impl Site {
    /// Create the window and mount the configured start page
    pub fn new(config: EngineConfig) -> Result<Self> {
        let window = Window::new(&config);
        let page = Page::mount(&window, config.page, &config)?;
        Ok(Self {
            window,
            config,
            page: Some(page),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn page_mut(&mut self) -> Option<&mut Page> {
        self.page.as_mut()
    }

    /// Unmount the current page and mount `kind` scrolled to the top
    pub fn navigate(&mut self, kind: PageKind) -> Result<()> {
        log::info!("Navigating to {}", kind.path());
        // The old page must be gone before the new one builds its elements
        self.page = None;
        self.window.scroll_to(0.0);
        self.page = Some(Page::mount(&self.window, kind, &self.config)?);
        Ok(())
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.window.scroll_to(offset);
        if let Some(page) = &mut self.page {
            page.on_scroll();
        }
    }

    /// Follow an in-page link such as `#stores`
    pub fn follow_anchor(&mut self, anchor: &str) -> bool {
        let anchor = anchor.trim_start_matches('#');
        let found = match &mut self.page {
            Some(page) => page.nav_mut().follow_link(anchor),
            None => self.window.scroll_to_anchor(anchor),
        };
        if let Some(page) = &mut self.page {
            page.on_scroll();
        }
        found
    }

    /// Open or close the mobile menu drawer
    pub fn toggle_menu(&mut self) -> Result<()> {
        match &mut self.page {
            Some(page) => page.nav_mut().toggle_menu(),
            None => Ok(()),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.window.resize(width, height);
        match &mut self.page {
            Some(page) => page.on_resize(),
            None => Ok(()),
        }
    }

    /// Advance every animation by `dt_ms`
    pub fn frame(&mut self, dt_ms: f32) {
        let stats = self.window.frame(dt_ms);
        if stats.failed > 0 {
            log::debug!("{} bindings cancelled this frame", stats.failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_paths() {
        for kind in [PageKind::Home, PageKind::Privacy, PageKind::Terms] {
            assert_eq!(PageKind::from_path(kind.path()), Some(kind));
        }
        assert_eq!(PageKind::from_path("/terms/"), Some(PageKind::Terms));
        assert_eq!(PageKind::from_path("/cart"), None);
    }

    #[test]
    fn test_content_column() {
        let (x, width) = content_column(Viewport::new(1440.0, 900.0));
        assert_eq!(width, CONTENT_MAX_WIDTH);
        assert_eq!(x, 272.0);

        let (x, width) = content_column(Viewport::new(390.0, 844.0));
        assert_eq!(width, 342.0);
        assert_eq!(x, GUTTER);
    }
}
