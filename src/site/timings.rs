use super::{bind_title_fade, content_column, section_padding, text_element, Timing, View};
use crate::animation::{Property, TimingFunction};
use crate::context::AnimationContext;
use crate::error::Result;
use crate::timeline::{build, PropertySpec};
use crate::trigger::{Trigger, TriggerMode};
use crate::view::{ElementId, Rect, ViewTree, Viewport};
use crate::window::Window;

const ROW_HEIGHT: f32 = 56.0;
const TABLE_MAX_WIDTH: f32 = 672.0;

/// Weekly opening hours table
pub struct Timings {
    root: ElementId,
    title: ElementId,
    table: ElementId,
    rows: Vec<ElementId>,
    ctx: Option<AnimationContext>,
}

impl Timings {
    pub fn new(tree: &mut ViewTree, parent: ElementId, timings: &[Timing]) -> Self {
        let root = tree.create_element(Some(parent), "section");
        tree.set_anchor(root, "timings");
        let title = text_element(tree, root, "h2", "Store Timings");
        tree.add_class(title, "section-title");
        let table = tree.create_element(Some(root), "table");

        let rows = timings
            .iter()
            .map(|timing| {
                let row = tree.create_element(Some(table), "tr");
                let day = text_element(tree, row, "td", &timing.day);
                let hours = text_element(tree, row, "td", &timing.hours);
                if timing.day == "Sunday" {
                    tree.add_class(day, "bold");
                    tree.add_class(hours, "bold");
                }
                row
            })
            .collect();

        Self {
            root,
            title,
            table,
            rows,
            ctx: None,
        }
    }

    pub fn rows(&self) -> &[ElementId] {
        &self.rows
    }

    pub fn table(&self) -> ElementId {
        self.table
    }
}

impl View for Timings {
    fn name(&self) -> &'static str {
        "timings"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn anchor(&self) -> Option<&'static str> {
        Some("timings")
    }

    fn layout(&self, tree: &mut ViewTree, top: f32, viewport: Viewport) -> f32 {
        let padding = section_padding(viewport);
        let (x, width) = content_column(viewport);

        let mut y = top + padding;
        tree.set_bounds(self.title, Rect::new(x, y, width, 48.0));
        y += 96.0;

        let table_width = width.min(TABLE_MAX_WIDTH);
        let table_x = x + (width - table_width) / 2.0;
        let table_height = self.rows.len() as f32 * ROW_HEIGHT;
        tree.set_bounds(self.table, Rect::new(table_x, y, table_width, table_height));
        for row in &self.rows {
            tree.set_bounds(*row, Rect::new(table_x, y, table_width, ROW_HEIGHT));
            let cells = tree.children(*row).to_vec();
            let cell_width = table_width / cells.len().max(1) as f32;
            for (i, cell) in cells.into_iter().enumerate() {
                tree.set_bounds(cell, Rect::new(table_x + i as f32 * cell_width, y, cell_width, ROW_HEIGHT));
            }
            y += ROW_HEIGHT;
        }

        let height = y + padding - top;
        tree.set_bounds(self.root, Rect::new(0.0, top, viewport.width, height));
        height
    }

    fn animate(&mut self, window: &Window) -> Result<()> {
        let mut ctx = AnimationContext::open(window, self.root)?;
        bind_title_fade(&mut ctx, self.title, self.root)?;

        if !self.rows.is_empty() {
            let power2_out: TimingFunction = "power2.out".parse()?;
            let rows = build(
                &self.rows,
                vec![
                    PropertySpec::new(Property::Opacity, 0.0, 1.0),
                    PropertySpec::new(Property::X, -30.0, 0.0),
                ]
                .into_iter()
                .map(|spec| spec.duration(500.0).timing(power2_out.clone()))
                .collect(),
                80.0,
            )?
            .named("timing-rows");
            ctx.animate(
                rows,
                Trigger::on_scroll(self.table, "top 75%", None, TriggerMode::PlayOnce)?,
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
