use super::{PropertySpec, Timeline, Track};
use crate::animation::PropertySet;
use crate::error::{Result, RevealError};
use crate::view::ElementId;

/// Build a single-segment timeline.
///
/// Target `i` starts `i * stagger_ms` after the timeline begins and runs every
/// spec in `transitions`. The total duration is
/// `(targets.len() - 1) * stagger_ms + per-target duration`.
pub fn build(
    targets: &[ElementId],
    transitions: Vec<PropertySpec>,
    stagger_ms: f32,
) -> Result<Timeline> {
    TimelineBuilder::new("timeline")
        .then(targets, transitions, stagger_ms)
        .build()
}

struct Segment {
    targets: Vec<ElementId>,
    specs: Vec<PropertySpec>,
    stagger_ms: f32,
}

/// Builder for timelines made of sequential segments.
///
/// Each call to [`then`](TimelineBuilder::then) appends a segment that starts
/// when the previous one has fully settled.
///
/// ```ignore
/// let logo = TimelineBuilder::new("logo")
///     .then(&[logo_el], vec![zoom, fade, blur], 0.0)
///     .then(&[logo_el], vec![pan_up], 0.0)
///     .build()?;
/// ```
pub struct TimelineBuilder {
    name: String,
    segments: Vec<Segment>,
}

impl TimelineBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            segments: Vec::new(),
        }
    }

    /// Append a segment animating `targets` with `specs`, staggered by `stagger_ms`
    pub fn then(mut self, targets: &[ElementId], specs: Vec<PropertySpec>, stagger_ms: f32) -> Self {
        self.segments.push(Segment {
            targets: targets.to_vec(),
            specs,
            stagger_ms,
        });
        self
    }

    /// Validate the segments and lay out every track
    pub fn build(self) -> Result<Timeline> {
        if self.segments.is_empty() {
            return Err(RevealError::EmptyTargetSet);
        }

        let mut tracks = Vec::new();
        let mut targets: Vec<ElementId> = Vec::new();
        let mut properties = PropertySet::empty();
        let mut segment_start = 0.0f32;

        for segment in self.segments {
            if segment.targets.is_empty() {
                return Err(RevealError::EmptyTargetSet);
            }
            if segment.stagger_ms < 0.0 || segment.stagger_ms.is_nan() {
                return Err(RevealError::NegativeDuration(segment.stagger_ms));
            }
            for spec in &segment.specs {
                spec.transition.validate()?;
                if !spec.from.is_compatible(&spec.to) {
                    return Err(RevealError::IncompatibleValues {
                        property: spec.property.name(),
                        from: spec.from.to_string(),
                        to: spec.to.to_string(),
                    });
                }
            }

            let per_target = segment
                .specs
                .iter()
                .map(|spec| spec.transition.total_ms())
                .fold(0.0, f32::max);

            for (index, target) in segment.targets.iter().enumerate() {
                let offset_ms = segment_start + index as f32 * segment.stagger_ms;
                for spec in &segment.specs {
                    properties |= spec.property.flag();
                    tracks.push(Track {
                        target: *target,
                        index,
                        offset_ms,
                        spec: spec.clone(),
                    });
                }
                if !targets.contains(target) {
                    targets.push(*target);
                }
            }

            let count = segment.targets.len() as f32;
            segment_start += (count - 1.0) * segment.stagger_ms + per_target;
        }

        log::trace!(
            "Built timeline '{}': {} tracks, {} targets, {}ms",
            self.name,
            tracks.len(),
            targets.len(),
            segment_start
        );

        Ok(Timeline {
            name: self.name,
            tracks,
            targets,
            properties,
            duration_ms: segment_start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Property, PropertyValue, TimingFunction};
    use crate::view::ViewTree;

    fn targets(tree: &mut ViewTree, n: usize) -> Vec<ElementId> {
        let root = tree.create_element(None, "div");
        (0..n).map(|_| tree.create_element(Some(root), "div")).collect()
    }

    fn fade(duration_ms: f32) -> PropertySpec {
        PropertySpec::new(Property::Opacity, 0.0, 1.0)
            .duration(duration_ms)
            .timing(TimingFunction::Linear)
    }

    #[test]
    fn test_empty_targets_rejected() {
        let result = build(&[], vec![fade(500.0)], 0.0);
        assert!(matches!(result, Err(RevealError::EmptyTargetSet)));
    }

    #[test]
    fn test_staggered_duration() {
        let mut tree = ViewTree::new();
        let els = targets(&mut tree, 3);
        let timeline = build(&els, vec![fade(500.0)], 100.0).unwrap();

        assert_eq!(timeline.duration_ms(), 700.0);
        assert_eq!(timeline.target_end_ms(els[0]), Some(500.0));
        assert_eq!(timeline.target_end_ms(els[1]), Some(600.0));
        assert_eq!(timeline.target_end_ms(els[2]), Some(700.0));
    }

    #[test]
    fn test_duration_formula() {
        let mut tree = ViewTree::new();
        for n in 1..6 {
            for stagger in [0.0, 30.0, 120.0] {
                let els = targets(&mut tree, n);
                let timeline = build(&els, vec![fade(800.0)], stagger).unwrap();
                let expected = (n as f32 - 1.0) * stagger + 800.0;
                assert!((timeline.duration_ms() - expected).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_per_target_duration_is_longest_spec() {
        let mut tree = ViewTree::new();
        let els = targets(&mut tree, 2);
        let specs = vec![
            fade(300.0),
            PropertySpec::new(Property::Y, 20.0, 0.0).duration(400.0).delay(100.0),
        ];
        let timeline = build(&els, specs, 50.0).unwrap();
        assert_eq!(timeline.duration_ms(), 550.0);
        assert_eq!(timeline.tracks().len(), 4);
        assert!(timeline.properties().contains(Property::Y.flag()));
    }

    #[test]
    fn test_incompatible_template_rejected() {
        let mut tree = ViewTree::new();
        let els = targets(&mut tree, 1);
        let spec = PropertySpec::new(Property::Filter, "blur(20px)", "brightness(1)");
        let result = build(&els, vec![spec], 0.0);
        assert!(matches!(result, Err(RevealError::IncompatibleValues { .. })));
    }

    #[test]
    fn test_negative_stagger_rejected() {
        let mut tree = ViewTree::new();
        let els = targets(&mut tree, 2);
        let result = build(&els, vec![fade(100.0)], -10.0);
        assert!(matches!(result, Err(RevealError::NegativeDuration(_))));
    }

    #[test]
    fn test_sequence_holds_until_next_segment() {
        let mut tree = ViewTree::new();
        let els = targets(&mut tree, 1);
        let logo = els[0];
        let timeline = TimelineBuilder::new("logo")
            .then(
                &[logo],
                vec![
                    PropertySpec::new(Property::Y, 200.0, 200.0)
                        .duration(1000.0)
                        .timing(TimingFunction::Linear),
                    fade(1000.0),
                ],
                0.0,
            )
            .then(
                &[logo],
                vec![PropertySpec::new(Property::Y, 200.0, 0.0)
                    .duration(1000.0)
                    .timing(TimingFunction::Linear)],
                0.0,
            )
            .build()
            .unwrap();

        assert_eq!(timeline.duration_ms(), 2000.0);

        let y_at = |time: f32| {
            timeline
                .sample(time)
                .into_iter()
                .find(|(_, property, _)| *property == Property::Y)
                .map(|(_, _, value)| value)
        };
        assert_eq!(y_at(0.0), Some(PropertyValue::Number(200.0)));
        assert_eq!(y_at(999.0), Some(PropertyValue::Number(200.0)));
        assert_eq!(y_at(1500.0), Some(PropertyValue::Number(100.0)));
        assert_eq!(y_at(2000.0), Some(PropertyValue::Number(0.0)));
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut tree = ViewTree::new();
        let els = targets(&mut tree, 3);
        let timeline = build(
            &els,
            vec![PropertySpec::new(Property::Filter, "blur(10px)", "blur(0px)")
                .duration(800.0)
                .timing("power2.out".parse().unwrap())],
            30.0,
        )
        .unwrap();

        let first = timeline.sample(412.0);
        let second = timeline.sample(412.0);
        assert_eq!(first, second);

        timeline.render(&mut tree, 10_000.0);
        for el in &els {
            assert_eq!(
                tree.style(*el, Property::Filter).map(|v| v.to_string()),
                Some("blur(0px)".to_string())
            );
        }
    }
}
