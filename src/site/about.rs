use super::{text_element, View};
use crate::animation::{Property, PropertyValue, TimingFunction};
use crate::context::{AnimationContext, TimelineHandle};
use crate::error::Result;
use crate::timeline::{build, PropertySpec};
use crate::trigger::{Trigger, TriggerMode};
use crate::view::{ElementId, Rect, ViewTree, Viewport};
use crate::window::Window;

const TITLE: &str = "About Us";
const BODY: &str = "Founded on September 09, 2023, Appu Presents is a movement dedicated to \
bringing high-end fashion to every woman in India. We believe that premium quality shouldn't \
come with a premium price tag. With over 300,000 followers and a commitment to excellence, we \
are redefining the standards of women's apparel, one outfit at a time.";

/// Width of the rounded card before it expands
const CARD_MAX_WIDTH: f32 = 768.0;
const CARD_RADIUS: &str = "12px";
/// How far the card overlaps the bottom of the header
const OVERLAP: f32 = 80.0;
const HEIGHT: f32 = 420.0;
/// The expansion trails the scroll position by this long
const EXPANSION_SMOOTHING_MS: f32 = 1000.0;

/// Rounded "about" card that widens to the full viewport as it scrolls in
pub struct About {
    root: ElementId,
    ctx: Option<AnimationContext>,
    expansion: Option<TimelineHandle>,
    expanded_width: f32,
}

impl About {
    pub fn new(tree: &mut ViewTree, parent: ElementId) -> Self {
        let root = tree.create_element(Some(parent), "section");
        tree.set_anchor(root, "about");
        tree.add_class(root, "about");
        tree.set_style(root, Property::MaxWidth, PropertyValue::Number(CARD_MAX_WIDTH));
        tree.set_style(root, Property::BorderRadius, CARD_RADIUS.into());

        text_element(tree, root, "h2", TITLE);
        text_element(tree, root, "p", BODY);

        Self {
            root,
            ctx: None,
            expansion: None,
            expanded_width: 0.0,
        }
    }

    /// Viewport width the card currently expands to
    pub fn expanded_width(&self) -> f32 {
        self.expanded_width
    }

    pub fn expansion(&self) -> Option<TimelineHandle> {
        self.expansion
    }
}

fn bind_expansion(ctx: &mut AnimationContext, root: ElementId, width: f32) -> Result<TimelineHandle> {
    let expansion = build(
        &[root],
        vec![
            PropertySpec::new(Property::MaxWidth, CARD_MAX_WIDTH, width),
            PropertySpec::new(Property::BorderRadius, CARD_RADIUS, "0px"),
        ],
        0.0,
    )?
    .named("about-expansion");
    let trigger = Trigger::on_scroll(
        root,
        "top bottom",
        Some("70% bottom"),
        TriggerMode::Scrub {
            smoothing_ms: EXPANSION_SMOOTHING_MS,
        },
    )?;
    Ok(ctx.animate(expansion, trigger)?.timeline())
}

impl View for About {
    fn name(&self) -> &'static str {
        "about"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn anchor(&self) -> Option<&'static str> {
        Some("about")
    }

    fn layout(&self, tree: &mut ViewTree, top: f32, viewport: Viewport) -> f32 {
        let y = top - OVERLAP;
        let width = viewport.width.min(CARD_MAX_WIDTH);
        let x = (viewport.width - width) / 2.0;
        tree.set_bounds(self.root, Rect::new(x, y, width, HEIGHT));

        let children = tree.children(self.root).to_vec();
        let padding = 60.0;
        let mut child_y = y + padding;
        for (child, height) in children.into_iter().zip([48.0, HEIGHT - 2.0 * padding - 48.0]) {
            tree.set_bounds(child, Rect::new(x + 20.0, child_y, width - 40.0, height));
            child_y += height;
        }
        HEIGHT - OVERLAP
    }

    fn animate(&mut self, window: &Window) -> Result<()> {
        let mut ctx = AnimationContext::open(window, self.root)?;

        self.expanded_width = window.viewport().width;
        self.expansion = Some(bind_expansion(&mut ctx, self.root, self.expanded_width)?);

        let children = window.tree().children(self.root).to_vec();
        let power2_out: TimingFunction = "power2.out".parse()?;
        let fade = build(
            &children,
            vec![
                PropertySpec::new(Property::Opacity, 0.0, 1.0),
                PropertySpec::new(Property::Y, 40.0, 0.0),
            ]
            .into_iter()
            .map(|spec| spec.duration(800.0).timing(power2_out.clone()))
            .collect(),
            200.0,
        )?
        .named("about-content");
        ctx.animate(
            fade,
            Trigger::on_scroll(self.root, "top 80%", Some("bottom 20%"), TriggerMode::PlayOnce)?,
        )?;

        self.ctx = Some(ctx);
        Ok(())
    }

    fn on_resize(&mut self, viewport: Viewport) -> Result<()> {
        if viewport.width == self.expanded_width {
            return Ok(());
        }
        let Some(ctx) = self.ctx.as_mut() else {
            return Ok(());
        };
        if let Some(previous) = self.expansion.take() {
            ctx.remove(previous);
        }
        self.expanded_width = viewport.width;
        self.expansion = Some(bind_expansion(ctx, self.root, viewport.width)?);
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
