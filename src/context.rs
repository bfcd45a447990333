//! View-scoped ownership of timelines and their triggers.
//!
//! Every animated view opens one [`AnimationContext`] when it mounts. All
//! timelines and bindings created for the view belong to that context, and
//! disposing it (explicitly or by dropping it) tears them down together:
//!
//! - in-flight playback is cancelled
//! - every listener registered with the window is removed
//! - every animated property is restored to its pre-animation value
//!
//! Disposal restores every (target, property) pair to the value it had when
//! the context first animated it. Removing a timeline on the way, or
//! replacing it with another, does not change what disposal restores.
//!
//! # Example
//!
//! ```ignore
//! let mut ctx = AnimationContext::open(&window, root)?;
//! let title = ctx.query("title");
//! let timeline = build(&title, vec![PropertySpec::new(Property::Opacity, 0.0, 1.0)], 0.0)?;
//! ctx.animate(timeline, Trigger::on_mount(0.0))?;
//! // Dropping the context reverts the title and detaches its listener
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Result, RevealError};
use crate::timeline::{Snapshot, Timeline};
use crate::trigger::{Binding, PlaybackState, Trigger};
use crate::view::ElementId;
use crate::window::{ListenerId, Window};

/// A timeline registered with a context
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineHandle(usize);

/// A timeline attached to a trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundTrigger {
    timeline: TimelineHandle,
    id: u64,
}

impl BoundTrigger {
    pub fn timeline(&self) -> TimelineHandle {
        self.timeline
    }
}

/// Point-in-time view of a binding's playback
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playback {
    pub state: PlaybackState,
    /// Normalized timeline progress from 0.0 to 1.0
    pub progress: f32,
    pub forward_plays: u32,
    pub reverse_plays: u32,
}

struct TimelineEntry {
    timeline: Rc<Timeline>,
    snapshot: Snapshot,
}

struct BindingEntry {
    bound: BoundTrigger,
    binding: Rc<RefCell<Binding>>,
    listener: ListenerId,
}

/// Owner of every timeline and trigger created for one mounted view
pub struct AnimationContext {
    window: Window,
    root: ElementId,
    timelines: Vec<(TimelineHandle, TimelineEntry)>,
    /// First-seen value of every pair any timeline here has animated
    baseline: Snapshot,
    bindings: Vec<BindingEntry>,
    next_timeline: usize,
    next_binding: u64,
    disposed: bool,
}

impl AnimationContext {
    /// Open a context scoped to the subtree under `view_root`
    pub fn open(window: &Window, view_root: ElementId) -> Result<Self> {
        if !window.tree().contains(view_root) {
            return Err(RevealError::MissingReferenceElement(view_root));
        }
        log::debug!("Opened animation context for {:?}", view_root);
        Ok(Self {
            window: window.clone(),
            root: view_root,
            timelines: Vec::new(),
            baseline: Snapshot::default(),
            bindings: Vec::new(),
            next_timeline: 0,
            next_binding: 0,
            disposed: false,
        })
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Elements under the view root carrying `class`, in document order
    pub fn query(&self, class: &str) -> Vec<ElementId> {
        self.window.tree().query_class(self.root, class)
    }

    /// Elements under the view root with the given tag, in document order
    pub fn query_tag(&self, tag: &str) -> Vec<ElementId> {
        self.window.tree().query_tag(self.root, tag)
    }

    /// Take ownership of `timeline`, recording the current values of
    /// everything it animates so they can be restored later.
    pub fn add(&mut self, timeline: Timeline) -> Result<TimelineHandle> {
        if self.disposed {
            return Err(RevealError::ContextDisposed);
        }
        let snapshot = Snapshot::capture(&self.window.tree(), &timeline);
        self.baseline.absorb(&snapshot);
        let handle = TimelineHandle(self.next_timeline);
        self.next_timeline += 1;
        log::trace!(
            "Added timeline '{}' ({} tracks, {}ms)",
            timeline.name(),
            timeline.tracks().len(),
            timeline.duration_ms()
        );
        self.timelines.push((
            handle,
            TimelineEntry {
                timeline: Rc::new(timeline),
                snapshot,
            },
        ));
        Ok(handle)
    }

    pub fn timeline(&self, handle: TimelineHandle) -> Option<&Timeline> {
        self.entry(handle).map(|entry| entry.timeline.as_ref())
    }

    fn entry(&self, handle: TimelineHandle) -> Option<&TimelineEntry> {
        self.timelines
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, entry)| entry)
    }

    /// Attach a registered timeline to `trigger`.
    ///
    /// The timeline's start state is written immediately. Scroll triggers are
    /// resolved against the current layout first, so a missing reference
    /// element or an inverted range is reported here rather than on a later
    /// frame. Binding the same timeline again creates an independent play.
    pub fn bind(&mut self, handle: TimelineHandle, trigger: Trigger) -> Result<BoundTrigger> {
        if self.disposed {
            return Err(RevealError::ContextDisposed);
        }
        let timeline = self
            .entry(handle)
            .map(|entry| entry.timeline.clone())
            .ok_or(RevealError::UnknownTimeline)?;

        match &trigger {
            Trigger::OnMount { delay_ms } => {
                if !(*delay_ms >= 0.0) {
                    return Err(RevealError::NegativeDuration(*delay_ms));
                }
            }
            Trigger::OnScroll(scroll) => {
                scroll.resolve(&self.window.tree(), self.window.viewport().height)?;
            }
        }

        let binding = Rc::new(RefCell::new(Binding::new(timeline, trigger)));
        binding.borrow().render_initial(&mut self.window.tree_mut());
        let listener = self.window.add_listener(&binding);

        let bound = BoundTrigger {
            timeline: handle,
            id: self.next_binding,
        };
        self.next_binding += 1;
        self.bindings.push(BindingEntry {
            bound,
            binding,
            listener,
        });
        Ok(bound)
    }

    /// [`add`](Self::add) then [`bind`](Self::bind)
    pub fn animate(&mut self, timeline: Timeline, trigger: Trigger) -> Result<BoundTrigger> {
        let handle = self.add(timeline)?;
        self.bind(handle, trigger)
    }

    /// Detach one binding. Values it already wrote stay in place.
    pub fn unbind(&mut self, bound: BoundTrigger) -> bool {
        let Some(position) = self.bindings.iter().position(|entry| entry.bound == bound) else {
            return false;
        };
        let entry = self.bindings.remove(position);
        entry.binding.borrow_mut().cancel();
        self.window.remove_listener(entry.listener);
        true
    }

    /// Detach every binding of `handle` and restore what the timeline animated
    pub fn remove(&mut self, handle: TimelineHandle) -> bool {
        let Some(entry) = self.take(handle) else {
            return false;
        };
        entry.snapshot.restore(&mut self.window.tree_mut());
        log::debug!("Removed timeline '{}'", entry.timeline.name());
        true
    }

    /// Detach every binding of `handle` and drop the timeline, leaving the
    /// values it wrote in place. Disposal still restores them.
    pub fn forget(&mut self, handle: TimelineHandle) -> bool {
        let Some(entry) = self.take(handle) else {
            return false;
        };
        log::trace!("Forgot timeline '{}'", entry.timeline.name());
        true
    }

    fn take(&mut self, handle: TimelineHandle) -> Option<TimelineEntry> {
        let position = self.timelines.iter().position(|(h, _)| *h == handle)?;
        let (_, entry) = self.timelines.remove(position);
        let window = &self.window;
        self.bindings.retain(|binding| {
            if binding.bound.timeline != handle {
                return true;
            }
            binding.binding.borrow_mut().cancel();
            window.remove_listener(binding.listener);
            false
        });
        Some(entry)
    }

    /// Current playback of a binding
    pub fn playback(&self, bound: BoundTrigger) -> Option<Playback> {
        let entry = self.bindings.iter().find(|entry| entry.bound == bound)?;
        let binding = entry.binding.borrow();
        if let Some(controller) = binding.controller() {
            return Some(Playback {
                state: controller.state(),
                progress: controller.progress(),
                forward_plays: controller.forward_plays(),
                reverse_plays: controller.reverse_plays(),
            });
        }

        let progress = binding.mount_progress().unwrap_or(0.0);
        let done = progress >= 1.0;
        let state = if done {
            PlaybackState::Entered
        } else if binding.is_cancelled() || progress <= 0.0 {
            PlaybackState::Idle
        } else {
            PlaybackState::Entering
        };
        Some(Playback {
            state,
            progress,
            forward_plays: u32::from(done),
            reverse_plays: 0,
        })
    }

    /// Number of bindings still owned by this context
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Number of timelines still registered with this context
    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Cancel all playback, detach every listener and restore every animated
    /// property. Calling this more than once has no further effect.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        for entry in self.bindings.drain(..) {
            entry.binding.borrow_mut().cancel();
            self.window.remove_listener(entry.listener);
        }

        let timelines = self.timelines.len();
        self.timelines.clear();
        let baseline = std::mem::take(&mut self.baseline);
        baseline.restore(&mut self.window.tree_mut());
        log::debug!(
            "Disposed animation context for {:?} ({} timelines, {} values restored)",
            self.root,
            timelines,
            baseline.len()
        );
    }
}

impl Drop for AnimationContext {
    fn drop(&mut self) {
        self.dispose();
    }
}
