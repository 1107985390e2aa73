//! # autoreply
//!
//! Keyword auto-reply plugin for a host messaging-bot runtime. Loads
//! keyword rules from a YAML file, matches inbound message text against
//! precompiled case-insensitive regexes, and on a match hands the host a
//! reply that preempts its default response.
//!
//! Two-phase lifecycle: [`rules::compile`] builds an immutable
//! [`rules::RuleTable`] once at startup, then [`router::route`] is a pure
//! function over it for every inbound message. [`ReplyPlugin`] wires both
//! into the host's plugin contract.

pub mod plugin;
pub mod router;
pub mod rules;

pub use plugin::ReplyPlugin;
pub use router::{route, RouteResult};
pub use rules::{compile, RuleTable};
