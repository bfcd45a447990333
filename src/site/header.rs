//! Hero header: logo intro, per-character headline, foreground image and
//! the two scroll parallax layers.

use super::{is_mobile, text_element, ParallaxParams, View};
use crate::animation::{Property, TimingFunction};
use crate::context::{AnimationContext, TimelineHandle};
use crate::error::Result;
use crate::timeline::{build, PropertySpec, TimelineBuilder};
use crate::trigger::{Trigger, TriggerMode};
use crate::view::{split_chars, ElementId, Rect, ViewTree, Viewport, CHAR_CLASS};
use crate::window::Window;

const HEADLINE: &str = "Presenting Premium";
const SUBLINE: &str = "Apparel for Women.";

/// Logo intro starts this long after mount
const LOGO_DELAY_MS: f32 = 300.0;
const LOGO_ZOOM_MS: f32 = 1000.0;
const LOGO_PAN_MS: f32 = 1200.0;

pub struct Header {
    root: ElementId,
    background: ElementId,
    logo: ElementId,
    hero: ElementId,
    lines: [ElementId; 2],
    lady: ElementId,
    ctx: Option<AnimationContext>,
    lady_parallax: Option<TimelineHandle>,
    params: Option<ParallaxParams>,
    breakpoint: f32,
}

impl Header {
    pub fn new(tree: &mut ViewTree, parent: ElementId, breakpoint: f32) -> Self {
        let root = tree.create_element(Some(parent), "header");
        tree.add_class(root, "header");

        let background = tree.create_element(Some(root), "div");
        tree.add_class(background, "header-bg");

        let logo = tree.create_element(Some(root), "img");
        tree.add_class(logo, "logo");

        let hero = tree.create_element(Some(root), "h1");
        tree.add_class(hero, "hero");
        let headline = text_element(tree, hero, "span", HEADLINE);
        let subline = text_element(tree, hero, "small", SUBLINE);

        let lady = tree.create_element(Some(root), "div");
        tree.add_class(lady, "lady");

        Self {
            root,
            background,
            logo,
            hero,
            lines: [headline, subline],
            lady,
            ctx: None,
            lady_parallax: None,
            params: None,
            breakpoint,
        }
    }

    pub fn logo(&self) -> ElementId {
        self.logo
    }

    pub fn background(&self) -> ElementId {
        self.background
    }

    pub fn lady(&self) -> ElementId {
        self.lady
    }

    pub fn hero(&self) -> ElementId {
        self.hero
    }

    /// Parameters the foreground parallax is currently built with
    pub fn parallax_params(&self) -> Option<ParallaxParams> {
        self.params
    }

    pub fn lady_parallax(&self) -> Option<TimelineHandle> {
        self.lady_parallax
    }
}

/// Scrubbed foreground parallax across the whole header
fn bind_lady_parallax(
    ctx: &mut AnimationContext,
    root: ElementId,
    lady: ElementId,
    params: ParallaxParams,
) -> Result<TimelineHandle> {
    let parallax = build(
        &[lady],
        vec![
            PropertySpec::new(Property::YPercent, 0.0, params.y_percent).timing("none".parse()?),
            PropertySpec::new(Property::Scale, 1.0, params.scale).timing("none".parse()?),
        ],
        0.0,
    )?
    .named("lady-parallax");
    let trigger = Trigger::on_scroll(root, "top top", Some("bottom top"), TriggerMode::SCRUB)?;
    let bound = ctx.animate(parallax, trigger)?;
    Ok(bound.timeline())
}

impl View for Header {
    fn name(&self) -> &'static str {
        "header"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn layout(&self, tree: &mut ViewTree, top: f32, viewport: Viewport) -> f32 {
        let mobile = is_mobile(viewport.width, self.breakpoint);
        let height = if mobile { 640.0 } else { viewport.height.max(720.0) };
        tree.set_bounds(self.root, Rect::new(0.0, top, viewport.width, height));
        // Oversized so the parallax never shows an edge
        tree.set_bounds(
            self.background,
            Rect::new(0.0, top - height * 0.1, viewport.width, height * 1.2),
        );

        let logo_size = if mobile { 90.0 } else { 180.0 };
        let mut y = top + 120.0;
        tree.set_bounds(
            self.logo,
            Rect::new((viewport.width - logo_size) / 2.0, y, logo_size, logo_size),
        );
        y += logo_size + 20.0;

        let line_height = if mobile { 36.0 } else { 48.0 };
        tree.set_bounds(self.hero, Rect::new(0.0, y, viewport.width, line_height * 2.0));
        for line in self.lines {
            tree.set_bounds(line, Rect::new(0.0, y, viewport.width, line_height));
            y += line_height;
        }

        let lady_width = if mobile { viewport.width * 1.25 } else { viewport.width.min(1800.0) };
        tree.set_bounds(
            self.lady,
            Rect::new(
                (viewport.width - lady_width) / 2.0,
                y,
                lady_width,
                (top + height - y).max(0.0),
            ),
        );
        height
    }

    fn animate(&mut self, window: &Window) -> Result<()> {
        {
            let mut tree = window.tree_mut();
            for line in self.lines {
                split_chars(&mut tree, line);
            }
        }

        let mut ctx = AnimationContext::open(window, self.root)?;
        let power3_out: TimingFunction = "power3.out".parse()?;

        // Zoom in from large and blurred while low, then pan up into place
        let logo = TimelineBuilder::new("logo")
            .then(
                &[self.logo],
                vec![
                    PropertySpec::new(Property::Opacity, 0.0, 1.0),
                    PropertySpec::new(Property::Scale, 3.5, 1.0),
                    PropertySpec::new(Property::Y, 200.0, 200.0),
                    PropertySpec::new(Property::Filter, "blur(20px)", "blur(0px)"),
                ]
                .into_iter()
                .map(|spec| spec.duration(LOGO_ZOOM_MS).timing(power3_out.clone()))
                .collect(),
                0.0,
            )
            .then(
                &[self.logo],
                vec![PropertySpec::new(Property::Y, 200.0, 0.0)
                    .duration(LOGO_PAN_MS)
                    .timing(power3_out.clone())],
                0.0,
            )
            .build()?;
        ctx.animate(logo, Trigger::on_mount(LOGO_DELAY_MS))?;

        // The headline starts as the logo begins to pan
        let chars = ctx.query(CHAR_CLASS);
        let power2_out: TimingFunction = "power2.out".parse()?;
        let headline = build(
            &chars,
            vec![
                PropertySpec::new(Property::Opacity, 0.0, 1.0),
                PropertySpec::new(Property::Filter, "blur(10px)", "blur(0px)"),
                PropertySpec::new(Property::Y, 20.0, 0.0),
            ]
            .into_iter()
            .map(|spec| {
                spec.duration(800.0)
                    .delay(LOGO_DELAY_MS + LOGO_ZOOM_MS)
                    .timing(power2_out.clone())
            })
            .collect(),
            30.0,
        )?
        .named("headline");
        ctx.animate(headline, Trigger::on_mount(0.0))?;

        let background = build(
            &[self.background],
            vec![PropertySpec::new(Property::YPercent, 0.0, 60.0).timing("none".parse()?)],
            0.0,
        )?
        .named("header-bg-parallax");
        ctx.animate(
            background,
            Trigger::on_scroll(self.root, "top top", Some("bottom top"), TriggerMode::SCRUB)?,
        )?;

        // Bound before the reveal so the reveal's start scale is what shows
        let params = ParallaxParams::for_width(window.viewport().width, self.breakpoint);
        self.lady_parallax = Some(bind_lady_parallax(&mut ctx, self.root, self.lady, params)?);
        self.params = Some(params);

        let reveal = build(
            &[self.lady],
            vec![
                PropertySpec::new(Property::Opacity, 0.0, 1.0),
                PropertySpec::new(Property::Filter, "blur(30px)", "blur(0px)"),
                PropertySpec::new(Property::Scale, 1.1, 1.0),
            ]
            .into_iter()
            .map(|spec| spec.duration(1500.0).delay(2000.0).timing(power3_out.clone()))
            .collect(),
            0.0,
        )?
        .named("lady-reveal");
        ctx.animate(reveal, Trigger::on_mount(0.0))?;

        self.ctx = Some(ctx);
        Ok(())
    }

    fn on_resize(&mut self, viewport: Viewport) -> Result<()> {
        let params = ParallaxParams::for_width(viewport.width, self.breakpoint);
        if self.params == Some(params) {
            return Ok(());
        }
        let Some(ctx) = self.ctx.as_mut() else {
            return Ok(());
        };
        if let Some(previous) = self.lady_parallax.take() {
            ctx.remove(previous);
        }
        log::debug!("Rebuilding header parallax for {}px: {:?}", viewport.width, params);
        self.lady_parallax = Some(bind_lady_parallax(ctx, self.root, self.lady, params)?);
        self.params = Some(params);
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
