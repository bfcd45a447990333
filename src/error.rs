//! Error types for timeline construction, trigger binding and site loading.

use thiserror::Error;

use crate::view::ElementId;

/// Main error type for reveal operations
#[derive(Error, Debug)]
pub enum RevealError {
    /// A timeline was built without any target elements
    #[error("timeline has no target elements")]
    EmptyTargetSet,

    /// A trigger or context referenced an element that is not in the view tree
    #[error("reference element {0:?} is not present in the view tree")]
    MissingReferenceElement(ElementId),

    /// A scroll range whose start resolves after its end
    #[error("invalid scroll range: start {start}px resolves after end {end}px")]
    InvalidRange {
        /// Resolved start offset in pixels
        start: f32,
        /// Resolved end offset in pixels
        end: f32,
    },

    /// Two values that cannot be interpolated into each other
    #[error("cannot interpolate {property} from `{from}` to `{to}`")]
    IncompatibleValues {
        /// Property being animated
        property: &'static str,
        /// Start value
        from: String,
        /// End value
        to: String,
    },

    /// A duration, delay or stagger below zero
    #[error("negative duration: {0}ms")]
    NegativeDuration(f32),

    /// An easing identifier that does not name a known curve
    #[error("unknown easing `{0}`")]
    UnknownEasing(String),

    /// A scroll position string that could not be parsed
    #[error("invalid scroll position `{0}`")]
    InvalidScrollPosition(String),

    /// Work was attempted through a context that has already been disposed
    #[error("animation context has been disposed")]
    ContextDisposed,

    /// A timeline handle that does not belong to (or was removed from) the context
    #[error("unknown timeline handle")]
    UnknownTimeline,

    /// Embedded site data failed to parse
    #[error("failed to parse site data: {0}")]
    SiteData(#[from] toml::de::Error),

    /// The event loop could not be created or dispatched
    #[error("event loop error: {0}")]
    EventLoop(#[from] calloop::Error),
}

/// Result type alias for reveal operations
pub type Result<T> = std::result::Result<T, RevealError>;
