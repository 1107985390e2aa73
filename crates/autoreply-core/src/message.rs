use serde::{Deserialize, Serialize};

/// One segment of an outgoing reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Plain text, already cleaned of blank lines and stray whitespace.
    Text(String),
    /// Image referenced by URL; the host fetches and attaches it.
    Image { url: String },
}

/// An assembled reply, ready to hand back to the host for delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub segments: Vec<Segment>,
}

impl Reply {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// What the host should do with a message after the plugin has seen it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No rule matched; the host proceeds with its normal reply pipeline.
    PassThrough,
    /// A rule matched; the host must suppress its default reply and, if a
    /// payload is present, deliver it through its own sending channel.
    ///
    /// `Handled(None)` means a rule matched but produced no displayable
    /// segments — default handling is still suppressed so the original
    /// message never leaks to a generic fallback.
    Handled(Option<Reply>),
}
