//! Scroll-synchronized reveal and parallax animation engine.
//!
//! Elements live in a headless [`ViewTree`](view::ViewTree). Views describe
//! their entrance and scroll effects as [`Timeline`](timeline::Timeline)s,
//! bind them to triggers through an [`AnimationContext`](context::AnimationContext),
//! and the [`Window`](window::Window) advances every live binding once per
//! frame. Dropping a context restores everything it animated.

pub mod animation;
pub mod config;
pub mod context;
pub mod error;
pub mod platform;
pub mod site;
pub mod timeline;
pub mod trigger;
pub mod view;
pub mod window;

use calloop::channel::Channel;

use config::EngineConfig;
use error::Result;
use platform::WindowEvent;
use site::{PageKind, Site};

pub mod prelude {
    pub use crate::animation::{Property, PropertyValue, TimingFunction, Transition};
    pub use crate::config::EngineConfig;
    pub use crate::context::{AnimationContext, BoundTrigger, Playback, TimelineHandle};
    pub use crate::error::{Result, RevealError};
    pub use crate::platform::{event_channel, WindowEvent};
    pub use crate::site::{PageKind, Site, View};
    pub use crate::timeline::{build, PropertySpec, Timeline, TimelineBuilder};
    pub use crate::trigger::{PlaybackState, ScrollPosition, Trigger, TriggerMode};
    pub use crate::view::{ElementId, Rect, ViewTree, Viewport};
    pub use crate::window::{FrameFlags, Window};
    pub use crate::App;
}

/// Builder for running the site inside an event loop
pub struct App {
    config: EngineConfig,
}

impl App {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    pub fn fps(mut self, fps: u32) -> Self {
        self.config.target_fps = fps;
        self
    }

    pub fn page(mut self, page: PageKind) -> Self {
        self.config.page = page;
        self
    }

    /// Viewports narrower than `width` get the mobile layout
    pub fn breakpoint(mut self, width: f32) -> Self {
        self.config.mobile_breakpoint = width;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run until a [`WindowEvent::Quit`] arrives on `events` or its senders
    /// are dropped, then hand back the site in its final state.
    pub fn run(self, events: Channel<WindowEvent>) -> Result<Site> {
        let _ = env_logger::try_init();
        platform::run(self.config, events)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
