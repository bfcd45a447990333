use std::rc::Rc;

use super::{PlaybackController, ScrollTrigger, Trigger};
use crate::error::Result;
use crate::timeline::Timeline;
use crate::view::{Viewport, ViewTree};
use crate::window::FrameFlags;

/// Whether a binding wants more frames
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BindingStatus {
    Active,
    Finished,
}

enum Driver {
    Mount {
        delay_ms: f32,
        elapsed_ms: f32,
    },
    Scroll {
        trigger: ScrollTrigger,
        controller: PlaybackController,
        needs_refresh: bool,
    },
}

/// A timeline attached to its trigger: the unit the window drives every frame.
pub(crate) struct Binding {
    timeline: Rc<Timeline>,
    driver: Driver,
    cancelled: bool,
}

impl Binding {
    pub(crate) fn new(timeline: Rc<Timeline>, trigger: Trigger) -> Self {
        let driver = match trigger {
            Trigger::OnMount { delay_ms } => Driver::Mount {
                delay_ms,
                elapsed_ms: 0.0,
            },
            Trigger::OnScroll(trigger) => Driver::Scroll {
                controller: PlaybackController::new(trigger.mode, timeline.duration_ms()),
                trigger,
                needs_refresh: true,
            },
        };
        Self {
            timeline,
            driver,
            cancelled: false,
        }
    }

    pub(crate) fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub(crate) fn controller(&self) -> Option<&PlaybackController> {
        match &self.driver {
            Driver::Scroll { controller, .. } => Some(controller),
            Driver::Mount { .. } => None,
        }
    }

    /// Normalized progress of a mount binding
    pub(crate) fn mount_progress(&self) -> Option<f32> {
        let Driver::Mount {
            delay_ms,
            elapsed_ms,
        } = &self.driver
        else {
            return None;
        };
        let playhead = elapsed_ms - delay_ms;
        let duration = self.timeline.duration_ms();
        Some(if playhead < 0.0 {
            0.0
        } else if duration <= 0.0 {
            1.0
        } else {
            (playhead / duration).min(1.0)
        })
    }

    pub(crate) fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Show the timeline's start state before any playback
    pub(crate) fn render_initial(&self, tree: &mut ViewTree) {
        self.timeline.render(tree, 0.0);
    }

    /// Advance by one frame.
    ///
    /// Scroll bindings re-read the reference element's layout only when the
    /// window scrolled or resized since the last frame (or on their first frame).
    pub(crate) fn frame(
        &mut self,
        tree: &mut ViewTree,
        viewport: Viewport,
        dt_ms: f32,
        flags: FrameFlags,
    ) -> Result<BindingStatus> {
        if self.cancelled {
            return Ok(BindingStatus::Finished);
        }

        let Binding {
            timeline, driver, ..
        } = self;

        match driver {
            Driver::Mount {
                delay_ms,
                elapsed_ms,
            } => {
                *elapsed_ms += dt_ms;
                let playhead = *elapsed_ms - *delay_ms;
                if playhead < 0.0 {
                    return Ok(BindingStatus::Active);
                }
                timeline.render(tree, playhead);
                if playhead >= timeline.duration_ms() {
                    log::debug!("Mount timeline '{}' finished", timeline.name());
                    return Ok(BindingStatus::Finished);
                }
                Ok(BindingStatus::Active)
            }
            Driver::Scroll {
                trigger,
                controller,
                needs_refresh,
            } => {
                let before = controller.progress();
                if *needs_refresh || flags.intersects(FrameFlags::SCROLLED | FrameFlags::RESIZED) {
                    let range = trigger.resolve(tree, viewport.height)?;
                    if let Some(event) = controller.on_scroll(viewport.scroll_y, range) {
                        log::trace!("Timeline '{}': {:?}", timeline.name(), event);
                    }
                    *needs_refresh = false;
                }
                if let Some(event) = controller.advance(dt_ms) {
                    log::trace!("Timeline '{}': {:?}", timeline.name(), event);
                }
                if controller.progress() != before {
                    timeline.render_progress(tree, controller.progress());
                }
                Ok(BindingStatus::Active)
            }
        }
    }
}
