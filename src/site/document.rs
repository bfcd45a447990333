use super::{content_column, text_element, View};
use crate::animation::Property;
use crate::context::AnimationContext;
use crate::error::Result;
use crate::timeline::{build, PropertySpec};
use crate::trigger::Trigger;
use crate::view::{ElementId, Rect, ViewTree, Viewport};
use crate::window::Window;

const LAST_UPDATED: &str = "Last Updated: September 09, 2023";

const PRIVACY_SECTIONS: [&str; 7] = [
    "1. Introduction",
    "2. Information We Collect",
    "3. How We Use Your Information",
    "4. Data Security",
    "5. Your Rights",
    "6. Cookies",
    "7. Contact Us",
];

const TERMS_SECTIONS: [&str; 12] = [
    "1. Acceptance of Terms",
    "2. Use License",
    "3. Product Information",
    "4. Pricing and Payment",
    "5. Shipping and Delivery",
    "6. Returns and Exchanges",
    "7. User Account",
    "8. Intellectual Property",
    "9. Limitation of Liability",
    "10. Governing Law",
    "11. Changes to Terms",
    "12. Contact Information",
];

const TITLE_HEIGHT: f32 = 72.0;
const SECTION_HEIGHT: f32 = 220.0;
const SECTION_GAP: f32 = 32.0;

/// A legal document page body whose blocks fade up one after another on mount
pub struct Document {
    name: &'static str,
    root: ElementId,
    blocks: Vec<ElementId>,
    block_class: &'static str,
    ctx: Option<AnimationContext>,
}

impl Document {
    pub fn privacy(tree: &mut ViewTree, parent: ElementId) -> Self {
        Self::new(tree, parent, "privacy", "Privacy Policy", &PRIVACY_SECTIONS)
    }

    pub fn terms(tree: &mut ViewTree, parent: ElementId) -> Self {
        Self::new(tree, parent, "terms", "Terms of Service", &TERMS_SECTIONS)
    }

    fn new(
        tree: &mut ViewTree,
        parent: ElementId,
        name: &'static str,
        title: &str,
        headings: &[&str],
    ) -> Self {
        let block_class = match name {
            "privacy" => "privacy-section",
            _ => "terms-section",
        };
        let root = tree.create_element(Some(parent), "article");

        let mut blocks = vec![
            text_element(tree, root, "h1", title),
            text_element(tree, root, "p", LAST_UPDATED),
        ];
        for heading in headings {
            let section = tree.create_element(Some(root), "section");
            text_element(tree, section, "h2", heading);
            blocks.push(section);
        }
        for block in &blocks {
            tree.add_class(*block, block_class);
        }

        Self {
            name,
            root,
            blocks,
            block_class,
            ctx: None,
        }
    }

    /// Title, date line and every numbered section, in order
    pub fn blocks(&self) -> &[ElementId] {
        &self.blocks
    }
}

impl View for Document {
    fn name(&self) -> &'static str {
        self.name
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn layout(&self, tree: &mut ViewTree, top: f32, viewport: Viewport) -> f32 {
        let (x, width) = content_column(viewport);
        let mut y = top + 80.0;
        for (index, block) in self.blocks.iter().enumerate() {
            let height = match index {
                0 => TITLE_HEIGHT,
                1 => 40.0,
                _ => SECTION_HEIGHT,
            };
            tree.set_bounds(*block, Rect::new(x, y, width, height));
            if let Some(&heading) = tree.children(*block).first() {
                tree.set_bounds(heading, Rect::new(x + 32.0, y + 32.0, width - 64.0, 40.0));
            }
            y += height + SECTION_GAP;
        }
        let height = y + 80.0 - top;
        tree.set_bounds(self.root, Rect::new(0.0, top, viewport.width, height));
        height
    }

    fn animate(&mut self, window: &Window) -> Result<()> {
        let mut ctx = AnimationContext::open(window, self.root)?;
        let blocks = ctx.query(self.block_class);
        let fade = build(
            &blocks,
            vec![
                PropertySpec::new(Property::Opacity, 0.0, 1.0)
                    .duration(800.0)
                    .timing("power2.out".parse()?),
                PropertySpec::new(Property::Y, 30.0, 0.0)
                    .duration(800.0)
                    .timing("power2.out".parse()?),
            ],
            150.0,
        )?
        .named(self.block_class);
        ctx.animate(fade, Trigger::on_mount(0.0))?;
        self.ctx = Some(ctx);
        Ok(())
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
