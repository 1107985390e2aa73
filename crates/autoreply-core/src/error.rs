use thiserror::Error;

/// Top-level error type for the autoreply plugin.
///
/// None of these are fatal to the hosting process: config and pattern
/// failures are recovered at the point they occur (empty table, skipped
/// trigger), and routing never propagates an error past the plugin surface.
#[derive(Debug, Error)]
pub enum ReplyError {
    /// Configuration file missing, unreadable, or structurally wrong.
    #[error("config error: {0}")]
    Config(String),

    /// A trigger pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(String),

    /// A response item could not be turned into a message segment.
    #[error("response error: {0}")]
    Response(String),

    /// Unexpected failure while routing a message.
    #[error("routing error: {0}")]
    Routing(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
