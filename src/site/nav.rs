//! Fixed navigation bar and the mobile menu drawer.

use super::{is_mobile, text_element, View};
use crate::animation::{Property, PropertyValue};
use crate::context::{AnimationContext, BoundTrigger};
use crate::error::Result;
use crate::timeline::{build, PropertySpec};
use crate::trigger::Trigger;
use crate::view::{ElementId, Rect, ViewTree, Viewport};
use crate::window::Window;

/// Class on every desktop navigation link
pub const NAV_ITEM_CLASS: &str = "nav-item";
/// Class the bar carries once the page is scrolled past [`SCROLLED_OFFSET`]
pub const SCROLLED_CLASS: &str = "scrolled";
/// Scroll offset after which the bar switches to its compact style
pub const SCROLLED_OFFSET: f32 = 100.0;

const CONTACT_LINK: &str = "https://wa.me/919063656201";
const LINKS: [(&str, &str); 3] = [
    ("About us", "about"),
    ("Our Stores", "stores"),
    ("Timings", "timings"),
];

const BAR_HEIGHT: f32 = 80.0;
const DRAWER_MAX_WIDTH: f32 = 384.0;

pub struct Nav {
    root: ElementId,
    items: Vec<ElementId>,
    drawer: ElementId,
    ctx: Option<AnimationContext>,
    menu: Option<BoundTrigger>,
    menu_open: bool,
    scrolled: bool,
    mobile: bool,
    breakpoint: f32,
}

impl Nav {
    pub fn new(tree: &mut ViewTree, parent: ElementId, breakpoint: f32) -> Self {
        let root = tree.create_element(Some(parent), "nav");

        let mut items = Vec::new();
        for (label, _) in LINKS {
            let item = text_element(tree, root, "a", label);
            tree.add_class(item, NAV_ITEM_CLASS);
            items.push(item);
        }
        let contact = text_element(tree, root, "a", "Contact");
        tree.add_class(contact, NAV_ITEM_CLASS);
        items.push(contact);

        let drawer = tree.create_element(Some(parent), "div");
        tree.add_class(drawer, "mobile-menu");
        for (label, _) in LINKS {
            text_element(tree, drawer, "a", label);
        }
        text_element(tree, drawer, "a", "Contact");
        // Closed drawers sit just off the right edge
        tree.set_style(drawer, Property::XPercent, PropertyValue::Number(100.0));

        Self {
            root,
            items,
            drawer,
            ctx: None,
            menu: None,
            menu_open: false,
            scrolled: false,
            mobile: false,
            breakpoint,
        }
    }

    pub fn items(&self) -> &[ElementId] {
        &self.items
    }

    /// Anchor a navigation link scrolls to (the contact link has none)
    pub fn link_anchor(&self, item: ElementId) -> Option<&'static str> {
        let index = self.items.iter().position(|id| *id == item)?;
        LINKS.get(index).map(|(_, anchor)| *anchor)
    }

    pub fn drawer(&self) -> ElementId {
        self.drawer
    }

    pub fn contact_link(&self) -> &'static str {
        CONTACT_LINK
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// The compact logo shows once scrolled, and always on mobile
    pub fn shows_logo(&self) -> bool {
        self.scrolled || self.mobile
    }

    /// Slide the drawer in or out
    pub fn set_menu_open(&mut self, open: bool) -> Result<()> {
        if open == self.menu_open {
            return Ok(());
        }
        self.menu_open = open;
        let Some(ctx) = self.ctx.as_mut() else {
            return Ok(());
        };

        if let Some(previous) = self.menu.take() {
            ctx.forget(previous.timeline());
        }
        let current = ctx
            .window()
            .tree()
            .style(self.drawer, Property::XPercent)
            .and_then(|value| value.as_number())
            .unwrap_or(100.0);
        let (target, easing) = if open {
            (0.0, "power2.out")
        } else {
            (100.0, "power2.in")
        };
        let slide = build(
            &[self.drawer],
            vec![PropertySpec::new(Property::XPercent, current, target)
                .duration(400.0)
                .timing(easing.parse()?)],
            0.0,
        )?
        .named("mobile-menu");
        self.menu = Some(ctx.animate(slide, Trigger::on_mount(0.0))?);
        log::debug!("Mobile menu {}", if open { "opened" } else { "closed" });
        Ok(())
    }

    pub fn toggle_menu(&mut self) -> Result<()> {
        self.set_menu_open(!self.menu_open)
    }

    /// Follow an in-page link: close the drawer and scroll to the anchor
    pub fn follow_link(&mut self, anchor: &str) -> bool {
        if let Err(err) = self.set_menu_open(false) {
            log::warn!("Failed to close mobile menu: {}", err);
        }
        match &self.ctx {
            Some(ctx) => ctx.window().scroll_to_anchor(anchor),
            None => false,
        }
    }
}

impl View for Nav {
    fn name(&self) -> &'static str {
        "nav"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn layout(&self, tree: &mut ViewTree, top: f32, viewport: Viewport) -> f32 {
        tree.set_bounds(self.root, Rect::new(0.0, top, viewport.width, BAR_HEIGHT));
        let item_width = 120.0;
        let row_width = item_width * self.items.len() as f32;
        let mut x = (viewport.width - row_width) / 2.0;
        for item in &self.items {
            tree.set_bounds(*item, Rect::new(x, top + 20.0, item_width, 40.0));
            x += item_width;
        }

        let drawer_width = (viewport.width * 0.8).min(DRAWER_MAX_WIDTH);
        tree.set_bounds(
            self.drawer,
            Rect::new(viewport.width - drawer_width, top, drawer_width, viewport.height),
        );
        let links = tree.children(self.drawer).to_vec();
        let mut y = top + 96.0;
        for link in links {
            tree.set_bounds(link, Rect::new(viewport.width - drawer_width + 32.0, y, drawer_width - 64.0, 32.0));
            y += 64.0;
        }

        // Fixed to the viewport, so it takes no room in the document
        0.0
    }

    fn animate(&mut self, window: &Window) -> Result<()> {
        self.mobile = is_mobile(window.viewport().width, self.breakpoint);

        let mut ctx = AnimationContext::open(window, self.root)?;
        let items = ctx.query(NAV_ITEM_CLASS);
        let reveal = build(
            &items,
            vec![PropertySpec::new(
                Property::ClipPath,
                "inset(100% 0% 0% 0%)",
                "inset(0% 0% 0% 0%)",
            )
            .duration(1000.0)
            .delay(500.0)
            .timing("power2.out".parse()?)],
            100.0,
        )?
        .named("nav-items");
        ctx.animate(reveal, Trigger::on_mount(0.0))?;
        self.ctx = Some(ctx);
        Ok(())
    }

    fn on_resize(&mut self, viewport: Viewport) -> Result<()> {
        self.mobile = is_mobile(viewport.width, self.breakpoint);
        if !self.mobile && self.menu_open {
            self.set_menu_open(false)?;
        }
        Ok(())
    }

    fn on_scroll(&mut self, viewport: Viewport) {
        let scrolled = viewport.scroll_y > SCROLLED_OFFSET;
        if scrolled == self.scrolled {
            return;
        }
        self.scrolled = scrolled;
        if let Some(ctx) = &self.ctx {
            let mut tree = ctx.window().tree_mut();
            if scrolled {
                tree.add_class(self.root, SCROLLED_CLASS);
            } else {
                tree.remove_class(self.root, SCROLLED_CLASS);
            }
        }
    }

    fn context(&self) -> Option<&AnimationContext> {
        self.ctx.as_ref()
    }

    fn dispose(&mut self) {
        if let Some(ctx) = &mut self.ctx {
            ctx.dispose();
        }
    }
}
