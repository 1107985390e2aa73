//! Rule configuration parsing.
//!
//! The on-disk format is loose: the top level is either a mapping with a
//! `rules` key or a bare list of rule records, and every field on a record
//! is optional. Everything is normalized into one canonical [`RuleConfig`]
//! before any matching logic runs.


use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

use crate::error::ReplyError;

/// Bundled default rule file, deployed on first run.
const DEFAULT_CONFIG: &str = include_str!("../../../../config/reply.yaml");

/// One rule record as written in YAML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRule {
    /// Identifier; missing ids get a deterministic fallback at compile time.
    #[serde(default)]
    pub id: Option<String>,
    /// Pattern strings, compiled as case-insensitive regexes.
    #[serde(default)]
    pub triggers: Vec<String>,
    /// Response items, validated at reply-assembly time.
    #[serde(default)]
    pub response: Vec<ResponseItem>,
}

/// One response item. Unknown `type` tags parse as [`ResponseItem::Unknown`]
/// and are ignored downstream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResponseItem {
    Text {
        #[serde(default)]
        content: String,
    },
    Image {
        #[serde(default)]
        url: String,
    },
    #[serde(other)]
    Unknown,
}

/// Canonical in-memory rule configuration.
#[derive(Debug, Clone, Default)]
pub struct RuleConfig {
    /// Rule records in declaration order.
    pub rules: Vec<RawRule>,
}

/// The two top-level document shapes found in the wild.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Mapping {
        #[serde(default)]
        rules: Vec<RawRule>,
    },
    List(Vec<RawRule>),
}

/// Parse a YAML rule document.
///
/// Accepts a mapping containing `rules`, a mapping without it (treated as
/// empty), or a bare sequence of rule records.
pub fn parse(content: &str) -> Result<RuleConfig, ReplyError> {
    let doc: RawDocument = serde_yaml::from_str(content)?;
    let rules = match doc {
        RawDocument::Mapping { rules } => rules,
        RawDocument::List(rules) => rules,
    };
    Ok(RuleConfig { rules })
}

/// Load rule configuration from a file.
///
/// Degrades to an empty config on any failure — missing file, unreadable,
/// malformed YAML — so the matching engine is always callable. Failures are
/// logged, never propagated.
pub fn load(path: &str) -> RuleConfig {
    let path = Path::new(path);
    if !path.exists() {
        warn!("config file not found at {}, using empty rule set", path.display());
        return RuleConfig::default();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("failed to read {}: {e}, using empty rule set", path.display());
            return RuleConfig::default();
        }
    };

    match parse(&content) {
        Ok(config) => {
            info!("loaded {} reply rules from {}", config.rules.len(), path.display());
            config
        }
        Err(e) => {
            warn!("failed to parse {}: {e}, using empty rule set", path.display());
            RuleConfig::default()
        }
    }
}

/// Deploy the bundled default rule file to `path` if it does not exist.
///
/// Never overwrites, so user edits are preserved across restarts.
pub fn install_default_config(path: &str) {
    let path = Path::new(path);
    if path.exists() {
        return;
    }
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!("failed to create {}: {e}", parent.display());
            return;
        }
    }
    if let Err(e) = std::fs::write(path, DEFAULT_CONFIG) {
        warn!("failed to write default config to {}: {e}", path.display());
    } else {
        info!("installed default rule file at {}", path.display());
    }
}
