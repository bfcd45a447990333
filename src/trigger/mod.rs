//! Activation conditions for timelines.
//!
//! A [`Trigger`] decides when a timeline's progress moves: once after the
//! owning view mounts, or in response to scrolling relative to a reference
//! element. Scroll positions are written the way view code describes them:
//! `"top 80%"` means "when the reference element's top edge reaches 80% of
//! the viewport height".

mod binding;
mod controller;

pub(crate) use binding::{Binding, BindingStatus};
pub use controller::{Direction, PlaybackController, PlaybackEvent, PlaybackState};

use std::str::FromStr;

use crate::error::{Result, RevealError};
use crate::view::{ElementId, Rect, ViewTree};

/// A distance along an element or the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    /// Percentage of the element or viewport height
    Percent(f32),
}

impl Length {
    /// Resolve against a height in pixels
    pub fn resolve(self, basis: f32) -> f32 {
        match self {
            Length::Px(px) => px,
            Length::Percent(percent) => basis * percent / 100.0,
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "top" => return Some(Length::Percent(0.0)),
            "center" => return Some(Length::Percent(50.0)),
            "bottom" => return Some(Length::Percent(100.0)),
            _ => {}
        }
        if let Some(percent) = token.strip_suffix('%') {
            return percent.parse().ok().map(Length::Percent);
        }
        token
            .strip_suffix("px")
            .unwrap_or(token)
            .parse()
            .ok()
            .map(Length::Px)
    }
}

/// Where on the scroll axis a trigger boundary lies
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollPosition {
    /// A fixed scroll offset in pixels
    Absolute(f32),
    /// The scroll offset at which `element` (measured on the reference
    /// element) lines up with `viewport` (measured on the viewport)
    Relative { element: Length, viewport: Length },
}

impl ScrollPosition {
    pub fn at(offset_px: f32) -> Self {
        ScrollPosition::Absolute(offset_px)
    }

    /// Scroll offset, in pixels, at which this position is reached
    pub fn resolve(&self, reference: Rect, viewport_height: f32) -> f32 {
        match self {
            ScrollPosition::Absolute(offset) => *offset,
            ScrollPosition::Relative { element, viewport } => {
                reference.y + element.resolve(reference.height) - viewport.resolve(viewport_height)
            }
        }
    }
}

impl FromStr for ScrollPosition {
    type Err = RevealError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || RevealError::InvalidScrollPosition(s.to_string());
        let mut tokens = s.split_whitespace();
        let element = tokens.next().and_then(Length::parse).ok_or_else(invalid)?;
        let viewport = match tokens.next() {
            Some(token) => Length::parse(token).ok_or_else(invalid)?,
            None => Length::Percent(0.0),
        };
        if tokens.next().is_some() {
            return Err(invalid());
        }
        Ok(ScrollPosition::Relative { element, viewport })
    }
}

/// Resolved scroll range in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRange {
    pub start: f32,
    pub end: f32,
}

impl ScrollRange {
    /// Progress through the range at `offset`, clamped to 0.0..=1.0
    pub fn progress(&self, offset: f32) -> f32 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if offset >= self.start { 1.0 } else { 0.0 };
        }
        ((offset - self.start) / span).clamp(0.0, 1.0)
    }
}

/// How scroll position drives a timeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerMode {
    /// Progress follows the scroll offset through the range.
    ///
    /// With a non-zero `smoothing_ms` the displayed progress catches up with
    /// the scroll-derived progress over that time instead of jumping.
    Scrub { smoothing_ms: f32 },
    /// Play forward once when scrolling down past the start, and reverse
    /// when scrolling back up past it.
    PlayOnce,
}

impl TriggerMode {
    pub const SCRUB: TriggerMode = TriggerMode::Scrub { smoothing_ms: 0.0 };
}

/// A scroll-bound activation condition
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTrigger {
    pub reference: ElementId,
    pub start: ScrollPosition,
    pub end: ScrollPosition,
    pub mode: TriggerMode,
}

impl ScrollTrigger {
    /// Trigger on `reference`, ending when its bottom passes the top of the viewport
    pub fn new(reference: ElementId, start: ScrollPosition, mode: TriggerMode) -> Self {
        Self {
            reference,
            start,
            end: ScrollPosition::Relative {
                element: Length::Percent(100.0),
                viewport: Length::Percent(0.0),
            },
            mode,
        }
    }

    pub fn end(mut self, end: ScrollPosition) -> Self {
        self.end = end;
        self
    }

    /// Resolve the trigger's range against the current layout
    pub fn resolve(&self, tree: &ViewTree, viewport_height: f32) -> Result<ScrollRange> {
        let bounds = tree
            .bounds(self.reference)
            .ok_or(RevealError::MissingReferenceElement(self.reference))?;
        let start = self.start.resolve(bounds, viewport_height);
        let end = self.end.resolve(bounds, viewport_height);
        if start > end {
            return Err(RevealError::InvalidRange { start, end });
        }
        Ok(ScrollRange { start, end })
    }
}

/// The activation condition that drives a timeline's progress
#[derive(Clone, Debug, PartialEq)]
pub enum Trigger {
    /// Play once, `delay_ms` after binding
    OnMount { delay_ms: f32 },
    /// Follow the scroll position relative to a reference element
    OnScroll(ScrollTrigger),
}

impl Trigger {
    pub fn on_mount(delay_ms: f32) -> Self {
        Trigger::OnMount { delay_ms }
    }

    /// Scroll trigger from position strings such as `"top 80%"`
    pub fn on_scroll(reference: ElementId, start: &str, end: Option<&str>, mode: TriggerMode) -> Result<Self> {
        let mut trigger = ScrollTrigger::new(reference, start.parse()?, mode);
        if let Some(end) = end {
            trigger = trigger.end(end.parse()?);
        }
        Ok(Trigger::OnScroll(trigger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        let position: ScrollPosition = "top 80%".parse().unwrap();
        assert_eq!(
            position,
            ScrollPosition::Relative {
                element: Length::Percent(0.0),
                viewport: Length::Percent(80.0)
            }
        );

        let position: ScrollPosition = "70% bottom".parse().unwrap();
        assert_eq!(
            position,
            ScrollPosition::Relative {
                element: Length::Percent(70.0),
                viewport: Length::Percent(100.0)
            }
        );

        let position: ScrollPosition = "center 100px".parse().unwrap();
        assert_eq!(
            position,
            ScrollPosition::Relative {
                element: Length::Percent(50.0),
                viewport: Length::Px(100.0)
            }
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            "".parse::<ScrollPosition>(),
            Err(RevealError::InvalidScrollPosition(_))
        ));
        assert!(matches!(
            "middle top".parse::<ScrollPosition>(),
            Err(RevealError::InvalidScrollPosition(_))
        ));
        assert!(matches!(
            "top top top".parse::<ScrollPosition>(),
            Err(RevealError::InvalidScrollPosition(_))
        ));
    }

    #[test]
    fn test_resolve_common_pixel_basis() {
        let reference = Rect::new(0.0, 1000.0, 800.0, 400.0);
        let viewport_height = 600.0;

        let top_80: ScrollPosition = "top 80%".parse().unwrap();
        // 1000 + 0 - 480
        assert_eq!(top_80.resolve(reference, viewport_height), 520.0);

        let bottom_top: ScrollPosition = "bottom top".parse().unwrap();
        assert_eq!(bottom_top.resolve(reference, viewport_height), 1400.0);

        let mixed: ScrollPosition = "50% 100px".parse().unwrap();
        assert_eq!(mixed.resolve(reference, viewport_height), 1100.0);

        assert_eq!(ScrollPosition::at(250.0).resolve(reference, viewport_height), 250.0);
    }

    #[test]
    fn test_range_progress() {
        let range = ScrollRange {
            start: 100.0,
            end: 400.0,
        };
        assert_eq!(range.progress(0.0), 0.0);
        assert_eq!(range.progress(100.0), 0.0);
        assert_eq!(range.progress(250.0), 0.5);
        assert_eq!(range.progress(400.0), 1.0);
        assert_eq!(range.progress(900.0), 1.0);
    }

    #[test]
    fn test_resolve_errors() {
        let mut tree = ViewTree::new();
        let section = tree.create_element(None, "section");
        tree.set_bounds(section, Rect::new(0.0, 500.0, 800.0, 300.0));

        let inverted = ScrollTrigger::new(section, ScrollPosition::at(400.0), TriggerMode::PlayOnce)
            .end(ScrollPosition::at(100.0));
        assert!(matches!(
            inverted.resolve(&tree, 600.0),
            Err(RevealError::InvalidRange { .. })
        ));

        tree.remove(section);
        let trigger = ScrollTrigger::new(section, ScrollPosition::at(0.0), TriggerMode::SCRUB);
        assert!(matches!(
            trigger.resolve(&tree, 600.0),
            Err(RevealError::MissingReferenceElement(_))
        ));
    }
}
