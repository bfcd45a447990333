use super::{bind_title_fade, content_column, section_padding, text_element, StoreRecord, View};
use crate::animation::{Property, TimingFunction};
use crate::context::AnimationContext;
use crate::error::Result;
use crate::timeline::{build, PropertySpec};
use crate::trigger::{Trigger, TriggerMode};
use crate::view::{ElementId, Rect, ViewTree, Viewport};
use crate::window::Window;

pub const CARD_CLASS: &str = "store-card";

const CARD_HEIGHT: f32 = 360.0;
const IMAGE_HEIGHT: f32 = 192.0;
/// Below this width the grid collapses to a single column
const GRID_BREAKPOINT: f32 = 768.0;

/// Grid of store cards with their call and directions links
pub struct Stores {
    root: ElementId,
    title: ElementId,
    grid: ElementId,
    cards: Vec<ElementId>,
    records: Vec<StoreRecord>,
    ctx: Option<AnimationContext>,
}

impl Stores {
    pub fn new(tree: &mut ViewTree, parent: ElementId, records: &[StoreRecord]) -> Self {
        let root = tree.create_element(Some(parent), "section");
        tree.set_anchor(root, "stores");
        let title = text_element(tree, root, "h2", "Our Stores");
        tree.add_class(title, "section-title");
        let grid = tree.create_element(Some(root), "div");
        tree.add_class(grid, "store-grid");

        let cards = records
            .iter()
            .map(|record| {
                let card = tree.create_element(Some(grid), "div");
                tree.add_class(card, CARD_CLASS);
                text_element(tree, card, "img", &record.image);
                text_element(tree, card, "h3", record.short_name());
                text_element(tree, card, "p", &record.address);
                if record.phone.is_some() {
                    let call = text_element(tree, card, "a", "Call Store");
                    tree.add_class(call, "call");
                }
                let directions = text_element(tree, card, "a", "Get Directions");
                tree.add_class(directions, "directions");
                card
            })
            .collect();

        Self {
            root,
            title,
            grid,
            cards,
            records: records.to_vec(),
            ctx: None,
        }
    }

    pub fn cards(&self) -> &[ElementId] {
        &self.cards
    }

    pub fn records(&self) -> &[StoreRecord] {
        &self.records
    }

    pub fn grid(&self) -> ElementId {
        self.grid
    }
}

impl View for Stores {
    fn name(&self) -> &'static str {
        "stores"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn anchor(&self) -> Option<&'static str> {
        Some("stores")
    }

    fn layout(&self, tree: &mut ViewTree, top: f32, viewport: Viewport) -> f32 {
        let padding = section_padding(viewport);
        let (x, width) = content_column(viewport);
        let columns = if viewport.width < GRID_BREAKPOINT { 1 } else { 3 };
        let (gap_x, gap_y) = if columns == 1 { (32.0, 32.0) } else { (32.0, 60.0) };

        let mut y = top + padding;
        tree.set_bounds(self.title, Rect::new(x, y, width, 48.0));
        y += 96.0;

        let rows = self.cards.len().div_ceil(columns);
        let grid_height = rows as f32 * (CARD_HEIGHT + gap_y) - if rows > 0 { gap_y } else { 0.0 };
        tree.set_bounds(self.grid, Rect::new(x, y, width, grid_height));

        let card_width = (width - gap_x * (columns - 1) as f32) / columns as f32;
        for (index, card) in self.cards.iter().enumerate() {
            let column = index % columns;
            let row = index / columns;
            let card_x = x + column as f32 * (card_width + gap_x);
            let card_y = y + row as f32 * (CARD_HEIGHT + gap_y);
            tree.set_bounds(*card, Rect::new(card_x, card_y, card_width, CARD_HEIGHT));

            let children = tree.children(*card).to_vec();
            let mut child_y = card_y;
            for (i, child) in children.into_iter().enumerate() {
                let height = if i == 0 { IMAGE_HEIGHT } else { 32.0 };
                tree.set_bounds(child, Rect::new(card_x, child_y, card_width, height));
                child_y += height + 8.0;
            }
        }

        let height = y + grid_height + padding - top;
        tree.set_bounds(self.root, Rect::new(0.0, top, viewport.width, height));
        height
    }

    fn animate(&mut self, window: &Window) -> Result<()> {
        let mut ctx = AnimationContext::open(window, self.root)?;
        bind_title_fade(&mut ctx, self.title, self.root)?;

        if !self.cards.is_empty() {
            let power2_out: TimingFunction = "power2.out".parse()?;
            let cards = build(
                &self.cards,
                vec![
                    PropertySpec::new(Property::Opacity, 0.0, 1.0),
                    PropertySpec::new(Property::Y, 50.0, 0.0),
                    PropertySpec::new(Property::Scale, 0.95, 1.0),
                ]
                .into_iter()
                .map(|spec| spec.duration(600.0).timing(power2_out.clone()))
                .collect(),
                120.0,
            )?
            .named("store-cards");
            ctx.animate(
                cards,
                Trigger::on_scroll(self.grid, "top 70%", None, TriggerMode::PlayOnce)?,
            )?;
        }

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
