//! Plugin lifecycle: wires config loading, rule compilation, and routing
//! into the host's plugin contract.

use async_trait::async_trait;
use tracing::{info, warn};

use autoreply_core::config::{self, RuleConfig};
use autoreply_core::error::ReplyError;
use autoreply_core::message::Outcome;
use autoreply_core::traits::{MessageEvent, Plugin};

use crate::router::{route, RouteResult};
use crate::rules::{compile, RuleTable};

/// Keyword auto-reply plugin.
///
/// Construction never fails: a missing or malformed rule file yields a
/// plugin with an empty table that passes every message through. The table
/// is immutable for the plugin's lifetime; reloading rules means building
/// a new plugin.
pub struct ReplyPlugin {
    table: RuleTable,
}

impl ReplyPlugin {
    /// Load rules from a YAML file and compile them.
    pub fn from_config_path(path: &str) -> Self {
        Self::from_config(&config::load(path))
    }

    /// Compile an already-parsed configuration.
    pub fn from_config(config: &RuleConfig) -> Self {
        Self {
            table: compile(config),
        }
    }

    /// Number of loaded rules, matchable or not.
    pub fn rule_count(&self) -> usize {
        self.table.len()
    }
}

#[async_trait]
impl Plugin for ReplyPlugin {
    fn name(&self) -> &str {
        "autoreply"
    }

    /// Suppression policy: a matched rule always yields [`Outcome::Handled`],
    /// even when reply assembly produced no segments — otherwise the host's
    /// fallback would answer a message this plugin already claimed. Only a
    /// genuine no-match passes through.
    async fn on_message(&self, event: &dyn MessageEvent) -> Outcome {
        let text = event.extract_text();
        match route(&self.table, &text) {
            RouteResult::NoMatch => Outcome::PassThrough,
            RouteResult::Matched { rule_id, reply } => {
                if reply.is_some() {
                    info!("rule {rule_id} replied");
                } else {
                    warn!("rule {rule_id} matched but produced no segments, suppressing default reply");
                }
                Outcome::Handled(reply)
            }
        }
    }

    async fn stop(&self) -> Result<(), ReplyError> {
        info!("autoreply plugin stopped");
        Ok(())
    }
}
