//! The window: view tree, viewport and the frame-driven listener registry.
//!
//! Scroll and resize events never run animation work directly. They update
//! the viewport and set [`FrameFlags`]; the next [`Window::frame`] hands the
//! accumulated flags to every listener once. Many scroll events between two
//! frames therefore cost a single layout read per binding.
//!
//! The registry holds listeners weakly. Each [`AnimationContext`] owns its
//! bindings and removes their listeners when disposed, so nothing registered
//! through a disposed context can run again.
//!
//! [`AnimationContext`]: crate::context::AnimationContext

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use bitflags::bitflags;

use crate::config::EngineConfig;
use crate::trigger::{Binding, BindingStatus};
use crate::view::{ViewTree, Viewport};

bitflags! {
    /// Window changes accumulated since the last frame
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct FrameFlags: u8 {
        /// The scroll offset changed
        const SCROLLED = 0b01;
        /// The viewport size changed (layout may have changed too)
        const RESIZED  = 0b10;
    }
}

/// Identifier of a registered listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listener {
    id: ListenerId,
    binding: Weak<RefCell<Binding>>,
}

struct WindowInner {
    tree: RefCell<ViewTree>,
    viewport: Cell<Viewport>,
    pending: Cell<FrameFlags>,
    listeners: RefCell<Vec<Listener>>,
    next_listener: Cell<u64>,
    clock_ms: Cell<f64>,
}

/// Shared handle to the window. Cloning is cheap; all clones see the same state.
#[derive(Clone)]
pub struct Window {
    inner: Rc<WindowInner>,
}

/// Summary of one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Listeners that ran this frame
    pub listeners: usize,
    /// Listeners removed because they finished or failed
    pub removed: usize,
    /// Listeners that failed and were cancelled
    pub failed: usize,
}

impl Window {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            inner: Rc::new(WindowInner {
                tree: RefCell::new(ViewTree::new()),
                viewport: Cell::new(Viewport::new(config.viewport_width, config.viewport_height)),
                pending: Cell::new(FrameFlags::empty()),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
                clock_ms: Cell::new(0.0),
            }),
        }
    }

    /// Borrow the view tree.
    ///
    /// # Panics
    ///
    /// Panics if the tree is mutably borrowed, e.g. while a frame is running.
    pub fn tree(&self) -> Ref<'_, ViewTree> {
        self.inner.tree.borrow()
    }

    /// Mutably borrow the view tree.
    pub fn tree_mut(&self) -> RefMut<'_, ViewTree> {
        self.inner.tree.borrow_mut()
    }

    pub fn viewport(&self) -> Viewport {
        self.inner.viewport.get()
    }

    /// Milliseconds elapsed across all frames
    pub fn clock_ms(&self) -> f64 {
        self.inner.clock_ms.get()
    }

    fn mark(&self, flags: FrameFlags) {
        self.inner.pending.set(self.inner.pending.get() | flags);
    }

    /// Changes waiting for the next frame
    pub fn pending(&self) -> FrameFlags {
        self.inner.pending.get()
    }

    /// Scroll to `offset` pixels from the top of the document
    pub fn scroll_to(&self, offset: f32) {
        let mut viewport = self.viewport();
        let offset = offset.max(0.0);
        if viewport.scroll_y != offset {
            viewport.scroll_y = offset;
            self.inner.viewport.set(viewport);
            self.mark(FrameFlags::SCROLLED);
        }
    }

    pub fn scroll_by(&self, delta: f32) {
        self.scroll_to(self.viewport().scroll_y + delta);
    }

    /// Scroll so the element with the given anchor sits at the top of the viewport.
    ///
    /// Returns false if no element carries the anchor.
    pub fn scroll_to_anchor(&self, anchor: &str) -> bool {
        let target = {
            let tree = self.tree();
            tree.find_anchor(anchor).and_then(|id| tree.bounds(id))
        };
        match target {
            Some(bounds) => {
                self.scroll_to(bounds.y);
                true
            }
            None => false,
        }
    }

    pub fn resize(&self, width: f32, height: f32) {
        let mut viewport = self.viewport();
        if viewport.width != width || viewport.height != height {
            viewport.width = width;
            viewport.height = height;
            self.inner.viewport.set(viewport);
            self.mark(FrameFlags::RESIZED);
        }
    }

    /// Ask every listener to re-read layout on the next frame
    pub fn request_refresh(&self) {
        self.mark(FrameFlags::RESIZED);
    }

    pub(crate) fn add_listener(&self, binding: &Rc<RefCell<Binding>>) -> ListenerId {
        let id = ListenerId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push(Listener {
            id,
            binding: Rc::downgrade(binding),
        });
        id
    }

    pub(crate) fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|listener| listener.id != id);
        listeners.len() != before
    }

    /// Number of listeners still attached
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Whether any listener is attached (and so would react to the next frame)
    pub fn has_listeners(&self) -> bool {
        self.listener_count() > 0
    }

    /// Run one frame, `dt_ms` after the previous one.
    ///
    /// Each listener runs in isolation: a listener whose binding fails (for
    /// example because its reference element left the tree) is cancelled and
    /// removed, and the remaining listeners still run.
    pub fn frame(&self, dt_ms: f32) -> FrameStats {
        let dt_ms = dt_ms.max(0.0);
        self.inner
            .clock_ms
            .set(self.inner.clock_ms.get() + f64::from(dt_ms));

        let flags = self.inner.pending.replace(FrameFlags::empty());
        let viewport = self.viewport();

        // Snapshot the registry so listeners can be removed while iterating
        let listeners: Vec<(ListenerId, Weak<RefCell<Binding>>)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|listener| (listener.id, listener.binding.clone()))
            .collect();

        let mut stats = FrameStats::default();
        let mut finished = Vec::new();
        {
            let mut tree = self.inner.tree.borrow_mut();
            for (id, weak) in listeners {
                let Some(binding) = weak.upgrade() else {
                    finished.push(id);
                    continue;
                };
                let mut binding = binding.borrow_mut();
                stats.listeners += 1;
                match binding.frame(&mut tree, viewport, dt_ms, flags) {
                    Ok(BindingStatus::Active) => {}
                    Ok(BindingStatus::Finished) => finished.push(id),
                    Err(err) => {
                        log::warn!(
                            "Cancelling timeline '{}' after scroll failure: {}",
                            binding.timeline().name(),
                            err
                        );
                        binding.cancel();
                        stats.failed += 1;
                        finished.push(id);
                    }
                }
            }
        }

        if !finished.is_empty() {
            stats.removed = finished.len();
            self.inner
                .listeners
                .borrow_mut()
                .retain(|listener| !finished.contains(&listener.id));
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_marks_pending() {
        let window = Window::new(&EngineConfig::default());
        assert!(window.pending().is_empty());

        window.scroll_to(120.0);
        assert!(window.pending().contains(FrameFlags::SCROLLED));
        assert_eq!(window.viewport().scroll_y, 120.0);

        window.frame(16.0);
        assert!(window.pending().is_empty());
        assert_eq!(window.clock_ms(), 16.0);
    }

    #[test]
    fn test_scroll_clamps_to_top() {
        let window = Window::new(&EngineConfig::default());
        window.scroll_by(-50.0);
        assert_eq!(window.viewport().scroll_y, 0.0);
        assert!(window.pending().is_empty());
    }

    #[test]
    fn test_resize_marks_pending() {
        let window = Window::new(&EngineConfig::default());
        window.resize(390.0, 844.0);
        assert!(window.pending().contains(FrameFlags::RESIZED));
        assert_eq!(window.viewport().width, 390.0);
    }

    #[test]
    fn test_scroll_to_anchor() {
        let window = Window::new(&EngineConfig::default());
        {
            let mut tree = window.tree_mut();
            let section = tree.create_element(None, "section");
            tree.set_anchor(section, "timings");
            tree.set_bounds(section, crate::view::Rect::new(0.0, 2400.0, 1440.0, 600.0));
        }
        assert!(window.scroll_to_anchor("timings"));
        assert_eq!(window.viewport().scroll_y, 2400.0);
        assert!(!window.scroll_to_anchor("missing"));
    }
}
