//! # autoreply-core
//!
//! Message types, host-boundary traits, configuration parsing, and error
//! handling for the autoreply plugin.

pub mod config;
pub mod error;
pub mod message;
pub mod traits;
