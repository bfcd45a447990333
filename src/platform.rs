//! Event loop driving a [`Site`]: window events arrive over a calloop channel
//! and a repeating timer advances every animation once per frame.

use std::time::{Duration, Instant};

use calloop::channel::{self, Channel, Event, Sender};
use calloop::timer::{TimeoutAction, Timer};
use calloop::EventLoop;

use crate::config::EngineConfig;
use crate::error::{Result, RevealError};
use crate::site::{PageKind, Site};

/// Input fed into the running site
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// Scroll to an absolute offset
    Scroll(f32),
    /// Scroll by a delta, as a wheel would
    ScrollBy(f32),
    Resize { width: f32, height: f32 },
    Navigate(PageKind),
    /// Follow an in-page link such as `#stores`
    Anchor(String),
    ToggleMenu,
    Quit,
}

/// Create the sender/receiver pair handed to [`run`]
pub fn event_channel() -> (Sender<WindowEvent>, Channel<WindowEvent>) {
    channel::channel()
}

struct LoopState {
    site: Site,
    running: bool,
    last_frame: Instant,
    error: Option<RevealError>,
}

impl LoopState {
    fn handle(&mut self, event: WindowEvent) {
        let result = match event {
            WindowEvent::Scroll(offset) => {
                self.site.scroll_to(offset);
                Ok(())
            }
            WindowEvent::ScrollBy(delta) => {
                let offset = self.site.window().viewport().scroll_y + delta;
                self.site.scroll_to(offset);
                Ok(())
            }
            WindowEvent::Resize { width, height } => self.site.resize(width, height),
            WindowEvent::Navigate(kind) => self.site.navigate(kind),
            WindowEvent::Anchor(anchor) => {
                if !self.site.follow_anchor(&anchor) {
                    log::warn!("No section for anchor '{}'", anchor);
                }
                Ok(())
            }
            WindowEvent::ToggleMenu => self.site.toggle_menu(),
            WindowEvent::Quit => {
                self.running = false;
                Ok(())
            }
        };

        if let Err(err) = result {
            log::error!("Stopping event loop: {}", err);
            self.error = Some(err);
            self.running = false;
        }
    }
}

/// Mount the configured page and run until [`WindowEvent::Quit`] arrives or
/// every sender is dropped.
///
/// Returns the site as it was when the loop stopped.
pub fn run(config: EngineConfig, events: Channel<WindowEvent>) -> Result<Site> {
    let frame_interval = Duration::from_secs_f32(config.frame_interval_ms() / 1000.0);
    let mut event_loop: EventLoop<LoopState> = EventLoop::try_new()?;
    let handle = event_loop.handle();

    handle
        .insert_source(events, |event, _, state: &mut LoopState| match event {
            Event::Msg(event) => state.handle(event),
            Event::Closed => {
                log::debug!("Event channel closed");
                state.running = false;
            }
        })
        .map_err(|e| e.error)?;

    handle
        .insert_source(
            Timer::from_duration(frame_interval),
            move |now, _, state: &mut LoopState| {
                let dt_ms = now.saturating_duration_since(state.last_frame).as_secs_f32() * 1000.0;
                state.last_frame = now;
                state.site.frame(dt_ms);
                TimeoutAction::ToDuration(frame_interval)
            },
        )
        .map_err(|e| e.error)?;

    log::info!(
        "Running {} at {}x{} ({} fps)",
        config.page.path(),
        config.viewport_width,
        config.viewport_height,
        config.target_fps
    );

    let mut state = LoopState {
        site: Site::new(config)?,
        running: true,
        last_frame: Instant::now(),
        error: None,
    };

    while state.running {
        event_loop.dispatch(Some(frame_interval), &mut state)?;
    }

    match state.error {
        Some(err) => Err(err),
        None => Ok(state.site),
    }
}
