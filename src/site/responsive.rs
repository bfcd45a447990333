/// Whether a viewport of `width` uses the mobile layout
pub fn is_mobile(width: f32, breakpoint: f32) -> bool {
    width < breakpoint
}

/// End values of the header's foreground parallax
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxParams {
    /// Vertical travel as a percentage of the element's height
    pub y_percent: f32,
    pub scale: f32,
}

impl ParallaxParams {
    /// Desktop drifts the image down a full height; mobile zooms in place.
    pub fn for_width(width: f32, breakpoint: f32) -> Self {
        if is_mobile(width, breakpoint) {
            Self {
                y_percent: 0.0,
                scale: 3.0,
            }
        } else {
            Self {
                y_percent: 100.0,
                scale: 1.0,
            }
        }
    }
}
