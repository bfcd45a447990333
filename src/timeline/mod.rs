//! Immutable timelines of staggered property transitions.
//!
//! A [`Timeline`] is a flat list of [`Track`]s. Each track animates one
//! property of one target element, starting at a fixed offset from the
//! beginning of the timeline. Offsets come from the segment a track belongs to
//! and from the target's index times the segment's stagger, so sampling the
//! same timeline at the same time always yields the same values.
//!
//! Timelines are built with [`build`] or [`TimelineBuilder`] and never change
//! afterwards; playback only moves the time at which they are sampled.

mod builder;
mod snapshot;

pub use builder::{build, TimelineBuilder};
pub use snapshot::Snapshot;

use crate::animation::{Animatable, Property, PropertySet, PropertyValue, TimingFunction, Transition};
use crate::view::{ElementId, ViewTree};

/// One property animated from `from` to `to`
#[derive(Clone, Debug)]
pub struct PropertySpec {
    pub property: Property,
    pub from: PropertyValue,
    pub to: PropertyValue,
    pub transition: Transition,
}

impl PropertySpec {
    /// Animate `property` between two values using the default transition
    pub fn new(
        property: Property,
        from: impl Into<PropertyValue>,
        to: impl Into<PropertyValue>,
    ) -> Self {
        Self {
            property,
            from: from.into(),
            to: to.into(),
            transition: Transition::default(),
        }
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.transition = self.transition.duration(duration_ms);
        self
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.transition = self.transition.delay(delay_ms);
        self
    }

    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.transition = self.transition.timing(timing);
        self
    }

    /// Value of this property `elapsed_ms` after its track starts
    pub fn value_at(&self, elapsed_ms: f32) -> PropertyValue {
        let t = self.transition.progress_at(elapsed_ms);
        PropertyValue::lerp(&self.from, &self.to, t)
    }
}

/// A property spec placed on one target at a fixed start offset
#[derive(Clone, Debug)]
pub struct Track {
    pub target: ElementId,
    /// Index of the target within its segment
    pub index: usize,
    /// Start time relative to the beginning of the timeline
    pub offset_ms: f32,
    pub spec: PropertySpec,
}

impl Track {
    /// Time at which this track reaches its end value
    pub fn end_ms(&self) -> f32 {
        self.offset_ms + self.spec.transition.total_ms()
    }

    fn value_at(&self, time_ms: f32) -> PropertyValue {
        self.spec.value_at(time_ms - self.offset_ms)
    }
}

/// A built, immutable sequence of property transitions
#[derive(Clone, Debug)]
pub struct Timeline {
    name: String,
    tracks: Vec<Track>,
    targets: Vec<ElementId>,
    properties: PropertySet,
    duration_ms: f32,
}

impl Timeline {
    /// Rename the timeline; names only show up in logs
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Every distinct target, in the order it first appears
    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    /// Every property touched by any track
    pub fn properties(&self) -> PropertySet {
        self.properties
    }

    /// Time at which every track has settled
    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Time at which the last track of `target` settles
    pub fn target_end_ms(&self, target: ElementId) -> Option<f32> {
        self.tracks
            .iter()
            .filter(|track| track.target == target)
            .map(Track::end_ms)
            .reduce(f32::max)
    }

    /// Resolve every (target, property) pair to its value at `time_ms`.
    ///
    /// Before a track starts, its pair shows the track's start value unless an
    /// earlier track for the same pair already started; a started track
    /// overrides earlier ones. This lets a sequence hold its first segment's
    /// end state until the next segment begins.
    pub fn sample(&self, time_ms: f32) -> Vec<(ElementId, Property, PropertyValue)> {
        let mut values: Vec<(ElementId, Property, PropertyValue)> = Vec::new();
        for track in &self.tracks {
            let started = time_ms >= track.offset_ms;
            let slot = values
                .iter_mut()
                .find(|(target, property, _)| *target == track.target && *property == track.spec.property);
            match slot {
                None => values.push((track.target, track.spec.property, track.value_at(time_ms))),
                Some(entry) if started => entry.2 = track.value_at(time_ms),
                Some(_) => {}
            }
        }
        values
    }

    /// Write the timeline's state at `time_ms` into the tree.
    ///
    /// Targets that left the tree are skipped. Returns how many values were written.
    pub fn render(&self, tree: &mut ViewTree, time_ms: f32) -> usize {
        let time_ms = time_ms.clamp(0.0, self.duration_ms);
        let mut written = 0;
        for (target, property, value) in self.sample(time_ms) {
            if tree.set_style(target, property, value) {
                written += 1;
            }
        }
        written
    }

    /// Write the timeline's state at normalized `progress` (0.0 to 1.0)
    pub fn render_progress(&self, tree: &mut ViewTree, progress: f32) -> usize {
        self.render(tree, progress.clamp(0.0, 1.0) * self.duration_ms)
    }
}
