use crate::{error::ReplyError, message::Outcome};
use async_trait::async_trait;

/// Inbound message event — the adapter the host implements once.
///
/// The core never branches on host-internal event shape; whatever the
/// platform's message-chain type looks like, the host exposes exactly one
/// capability here.
pub trait MessageEvent: Send + Sync {
    /// Concatenated text of the event's text-bearing segments.
    ///
    /// The host is responsible for discarding non-text segments (stickers,
    /// mentions, images) before handing the event to the plugin.
    fn extract_text(&self) -> String;
}

/// Plugin lifecycle contract with the host runtime.
///
/// The host constructs the plugin once at startup, calls `on_message` for
/// every inbound message, and calls `stop` at teardown. The plugin never
/// sends messages itself — it only reports an [`Outcome`].
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Human-readable plugin name.
    fn name(&self) -> &str;

    /// Inspect an inbound message and decide whether the host's default
    /// reply pipeline runs.
    async fn on_message(&self, event: &dyn MessageEvent) -> Outcome;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), ReplyError>;
}
