use crate::site::PageKind;

/// Engine and site configuration
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Initial viewport width in pixels
    pub viewport_width: f32,
    /// Initial viewport height in pixels
    pub viewport_height: f32,
    /// Frames per second driven by the event loop
    pub target_fps: u32,
    /// Viewports narrower than this use the mobile layout
    pub mobile_breakpoint: f32,
    /// Page mounted at startup
    pub page: PageKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1440.0,
            viewport_height: 900.0,
            target_fps: 60,
            mobile_breakpoint: 1024.0,
            page: PageKind::Home,
        }
    }
}

impl EngineConfig {
    /// Milliseconds between two frames
    pub fn frame_interval_ms(&self) -> f32 {
        1000.0 / self.target_fps.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval() {
        let config = EngineConfig::default();
        assert!((config.frame_interval_ms() - 16.666_666).abs() < 1e-3);

        let stalled = EngineConfig {
            target_fps: 0,
            ..EngineConfig::default()
        };
        assert_eq!(stalled.frame_interval_ms(), 1000.0);
    }
}
