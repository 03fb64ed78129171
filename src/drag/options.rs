use super::style::{Length, ParseLengthError};

/// Options for [`super::Document::bind_drag`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragOptions {
    /// If set, written into the target's declared style at bind time and the
    /// target is repositioned immediately.
    pub top: Option<Length>,

    /// Same as `top`, for the horizontal axis.
    pub left: Option<Length>,
}

impl DragOptions {
    /// Build from style strings (`"50px"`, `"25%"`), the form a host config
    /// usually carries them in.
    pub fn from_style_strings(
        top: Option<&str>,
        left: Option<&str>,
    ) -> Result<Self, ParseLengthError> {
        Ok(Self {
            top: top.map(str::parse).transpose()?,
            left: left.map(str::parse).transpose()?,
        })
    }
}

/// Options for [`super::Document`].
#[derive(Clone, Debug)]
pub struct DocumentOptions {
    /// If true, record drag lifecycle events (session start/end) in a small
    /// ring buffer for display or copy-paste.
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,

    /// If true, run document integrity checks each frame (debug-only).
    pub debug_integrity: bool,

    /// If true, panic on integrity issues (debug-only).
    pub debug_integrity_panic: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            debug_event_log: false,
            debug_event_log_capacity: 200,
            debug_integrity: false,
            debug_integrity_panic: false,
        }
    }
}
