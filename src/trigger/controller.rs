//! Reversible playback for scroll-bound timelines.
//!
//! ## PlayOnce
//!
//! ```text
//!            descend past start     progress reaches 1 or end passed
//!   Idle ────────────────────▶ Entering ───────────────────▶ Entered
//!    ▲                          ▲    │                          │
//!    │ progress reaches 0       │    │ ascend past start        │ ascend past start
//!    │                          │    ▼                          │
//!    └──────────────────────── Exiting ◀────────────────────────┘
//!                   descend past start (reverses in place)
//! ```
//!
//! Crossing the start while a play is in flight flips its direction from the
//! current progress, so the target never jumps. Crossing again in the same
//! direction is a no-op. Scrolling past the end of the range while entering
//! completes the entrance at once.
//!
//! ## Scrub
//!
//! Progress is a direct function of the scroll offset within the range and
//! the controller stays in [`PlaybackState::Scrubbing`].

use super::{ScrollRange, TriggerMode};

/// Playback state of a scroll-bound timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    /// Playing forward toward progress 1
    Entering,
    /// Fully played (PlayOnce only)
    Entered,
    /// Playing backward toward progress 0
    Exiting,
    /// Progress mirrors scroll position (Scrub only)
    Scrubbing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Notable changes reported by the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Playback started or flipped into the given direction
    Started(Direction),
    /// Playback reached the end of the given direction
    Completed(Direction),
}

/// State machine driving one scroll-bound timeline
#[derive(Clone, Debug)]
pub struct PlaybackController {
    mode: TriggerMode,
    state: PlaybackState,
    progress: f32,
    /// Scroll-derived target progress (Scrub only)
    target: f32,
    duration_ms: f32,
    last_offset: Option<f32>,
    forward_plays: u32,
    reverse_plays: u32,
}

impl PlaybackController {
    pub fn new(mode: TriggerMode, duration_ms: f32) -> Self {
        let state = match mode {
            TriggerMode::Scrub { .. } => PlaybackState::Scrubbing,
            TriggerMode::PlayOnce => PlaybackState::Idle,
        };
        Self {
            mode,
            state,
            progress: 0.0,
            target: 0.0,
            duration_ms,
            last_offset: None,
            forward_plays: 0,
            reverse_plays: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Timeline progress from 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Completed forward plays
    pub fn forward_plays(&self) -> u32 {
        self.forward_plays
    }

    /// Completed reverse plays
    pub fn reverse_plays(&self) -> u32 {
        self.reverse_plays
    }

    /// Whether progress will keep changing without further scrolling
    pub fn is_animating(&self) -> bool {
        match self.state {
            PlaybackState::Entering | PlaybackState::Exiting => true,
            PlaybackState::Scrubbing => (self.target - self.progress).abs() > f32::EPSILON,
            PlaybackState::Idle | PlaybackState::Entered => false,
        }
    }

    /// Feed the current scroll offset and the trigger's resolved range.
    pub fn on_scroll(&mut self, offset: f32, range: ScrollRange) -> Option<PlaybackEvent> {
        let previous = self.last_offset.replace(offset);

        match self.mode {
            TriggerMode::Scrub { smoothing_ms } => {
                self.target = range.progress(offset);
                if smoothing_ms <= 0.0 {
                    self.progress = self.target;
                }
                None
            }
            TriggerMode::PlayOnce => {
                // A first observation already past the start counts as a descent
                let was_before = previous.map_or(true, |p| p < range.start);
                let is_before = offset < range.start;

                let event = if was_before && !is_before {
                    self.play(Direction::Forward)
                } else if !was_before && is_before {
                    self.play(Direction::Reverse)
                } else {
                    None
                };

                // Passing the end of the range finishes an entrance immediately
                if self.state == PlaybackState::Entering && offset >= range.end {
                    return Some(self.complete_forward());
                }
                event
            }
        }
    }

    fn play(&mut self, direction: Direction) -> Option<PlaybackEvent> {
        let next = match (direction, self.state) {
            (Direction::Forward, PlaybackState::Idle | PlaybackState::Exiting) => {
                PlaybackState::Entering
            }
            (Direction::Reverse, PlaybackState::Entered | PlaybackState::Entering) => {
                PlaybackState::Exiting
            }
            _ => return None,
        };
        log::trace!("Playback {:?} -> {:?} at {:.3}", self.state, next, self.progress);
        self.state = next;
        Some(PlaybackEvent::Started(direction))
    }

    fn complete_forward(&mut self) -> PlaybackEvent {
        self.progress = 1.0;
        self.state = PlaybackState::Entered;
        self.forward_plays += 1;
        log::trace!("Playback Entering -> Entered");
        PlaybackEvent::Completed(Direction::Forward)
    }

    /// Advance in-flight playback by `dt_ms`.
    pub fn advance(&mut self, dt_ms: f32) -> Option<PlaybackEvent> {
        match self.state {
            PlaybackState::Entering => {
                self.progress = (self.progress + self.step(dt_ms)).min(1.0);
                if self.progress >= 1.0 {
                    return Some(self.complete_forward());
                }
                None
            }
            PlaybackState::Exiting => {
                self.progress = (self.progress - self.step(dt_ms)).max(0.0);
                if self.progress <= 0.0 {
                    self.state = PlaybackState::Idle;
                    self.reverse_plays += 1;
                    log::trace!("Playback Exiting -> Idle");
                    return Some(PlaybackEvent::Completed(Direction::Reverse));
                }
                None
            }
            PlaybackState::Scrubbing => {
                if let TriggerMode::Scrub { smoothing_ms } = self.mode {
                    if smoothing_ms > 0.0 {
                        let blend = (dt_ms / smoothing_ms).min(1.0);
                        self.progress += (self.target - self.progress) * blend;
                        if (self.target - self.progress).abs() < 1e-4 {
                            self.progress = self.target;
                        }
                    }
                }
                None
            }
            PlaybackState::Idle | PlaybackState::Entered => None,
        }
    }

    fn step(&self, dt_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            dt_ms / self.duration_ms
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: ScrollRange = ScrollRange {
        start: 100.0,
        end: 400.0,
    };

    #[test]
    fn test_scrub_endpoints_and_monotonic() {
        let mut controller = PlaybackController::new(TriggerMode::SCRUB, 1000.0);
        assert_eq!(controller.state(), PlaybackState::Scrubbing);

        controller.on_scroll(100.0, RANGE);
        assert_eq!(controller.progress(), 0.0);
        controller.on_scroll(400.0, RANGE);
        assert_eq!(controller.progress(), 1.0);

        let mut previous = -1.0;
        for step in 0..=60 {
            let offset = step as f32 * 10.0;
            controller.on_scroll(offset, RANGE);
            let progress = controller.progress();
            assert!(progress >= previous);
            assert!((0.0..=1.0).contains(&progress));
            previous = progress;
        }
    }

    #[test]
    fn test_scrub_smoothing_catches_up() {
        let mut controller =
            PlaybackController::new(TriggerMode::Scrub { smoothing_ms: 1000.0 }, 1000.0);
        controller.on_scroll(400.0, RANGE);
        assert_eq!(controller.progress(), 0.0);
        assert!(controller.is_animating());

        controller.advance(500.0);
        assert!((controller.progress() - 0.5).abs() < 1e-6);

        controller.advance(1000.0);
        assert_eq!(controller.progress(), 1.0);
        assert!(!controller.is_animating());
    }

    #[test]
    fn test_play_once_toggle_visits_every_state() {
        let mut controller = PlaybackController::new(TriggerMode::PlayOnce, 500.0);
        let mut visited = vec![controller.state()];
        let mut record = |c: &PlaybackController| {
            if visited.last() != Some(&c.state()) {
                visited.push(c.state());
            }
        };

        controller.on_scroll(0.0, RANGE);
        record(&controller);
        controller.on_scroll(150.0, RANGE);
        record(&controller);
        controller.advance(500.0);
        record(&controller);
        controller.on_scroll(50.0, RANGE);
        record(&controller);
        controller.advance(500.0);
        record(&controller);
        controller.on_scroll(150.0, RANGE);
        record(&controller);

        assert_eq!(
            visited,
            vec![
                PlaybackState::Idle,
                PlaybackState::Entering,
                PlaybackState::Entered,
                PlaybackState::Exiting,
                PlaybackState::Idle,
                PlaybackState::Entering,
            ]
        );
    }

    #[test]
    fn test_reversal_keeps_progress() {
        let mut controller = PlaybackController::new(TriggerMode::PlayOnce, 1000.0);
        controller.on_scroll(0.0, RANGE);
        controller.on_scroll(200.0, RANGE);
        controller.advance(300.0);
        assert!((controller.progress() - 0.3).abs() < 1e-6);

        assert_eq!(
            controller.on_scroll(50.0, RANGE),
            Some(PlaybackEvent::Started(Direction::Reverse))
        );
        assert_eq!(controller.state(), PlaybackState::Exiting);
        assert!((controller.progress() - 0.3).abs() < 1e-6);

        controller.advance(100.0);
        assert!((controller.progress() - 0.2).abs() < 1e-6);

        assert_eq!(
            controller.on_scroll(300.0, RANGE),
            Some(PlaybackEvent::Started(Direction::Forward))
        );
        assert!((controller.progress() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_same_direction_is_idempotent() {
        let mut controller = PlaybackController::new(TriggerMode::PlayOnce, 1000.0);
        controller.on_scroll(0.0, RANGE);
        assert!(controller.on_scroll(150.0, RANGE).is_some());
        assert!(controller.on_scroll(300.0, RANGE).is_none());
        assert!(controller.on_scroll(350.0, RANGE).is_none());
        controller.advance(200.0);
        assert!((controller.progress() - 0.2).abs() < 1e-6);
        assert_eq!(controller.state(), PlaybackState::Entering);
    }

    #[test]
    fn test_passing_end_completes_entrance() {
        let mut controller = PlaybackController::new(TriggerMode::PlayOnce, 10_000.0);
        controller.on_scroll(0.0, RANGE);
        controller.on_scroll(150.0, RANGE);
        controller.advance(16.0);
        assert_eq!(controller.state(), PlaybackState::Entering);

        assert_eq!(
            controller.on_scroll(500.0, RANGE),
            Some(PlaybackEvent::Completed(Direction::Forward))
        );
        assert_eq!(controller.state(), PlaybackState::Entered);
        assert_eq!(controller.progress(), 1.0);
        assert_eq!(controller.forward_plays(), 1);

        // Further scrolling past the end does not count another play
        assert!(controller.on_scroll(600.0, RANGE).is_none());
        assert_eq!(controller.forward_plays(), 1);

        controller.on_scroll(50.0, RANGE);
        assert_eq!(controller.state(), PlaybackState::Exiting);
    }

    #[test]
    fn test_jump_past_end_enters_at_once() {
        let mut controller = PlaybackController::new(TriggerMode::PlayOnce, 500.0);
        controller.on_scroll(0.0, RANGE);
        assert_eq!(
            controller.on_scroll(450.0, RANGE),
            Some(PlaybackEvent::Completed(Direction::Forward))
        );
        assert_eq!(controller.state(), PlaybackState::Entered);
    }

    #[test]
    fn test_first_observation_past_start_enters() {
        let mut controller = PlaybackController::new(TriggerMode::PlayOnce, 100.0);
        assert!(controller.on_scroll(250.0, RANGE).is_some());
        assert_eq!(controller.state(), PlaybackState::Entering);
    }

    #[test]
    fn test_one_forward_one_reverse_play() {
        let mut controller = PlaybackController::new(TriggerMode::PlayOnce, 500.0);
        for offset in (0..=500).step_by(50) {
            controller.on_scroll(offset as f32, RANGE);
            controller.advance(16.0);
        }
        for _ in 0..60 {
            controller.advance(16.0);
        }
        for offset in (0..=500).rev().step_by(50) {
            controller.on_scroll(offset as f32, RANGE);
            controller.advance(16.0);
        }
        for _ in 0..60 {
            controller.advance(16.0);
        }

        assert_eq!(controller.forward_plays(), 1);
        assert_eq!(controller.reverse_plays(), 1);
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert_eq!(controller.progress(), 0.0);
    }
}
