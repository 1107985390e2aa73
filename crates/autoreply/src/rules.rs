//! Rule compilation: raw configuration records → immutable rule table.

use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use tracing::{info, warn};

use autoreply_core::config::{ResponseItem, RuleConfig};

/// One loaded rule. Response items stay raw; reply assembly happens at
/// match time in the router.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub response: Vec<ResponseItem>,
}

/// Immutable table of loaded rules plus compiled triggers.
///
/// `rules` holds every loaded record in declaration order, including rules
/// with zero surviving triggers (they count as loaded but can never match).
/// The side table holds compiled patterns keyed by rule id; duplicate ids
/// shadow by first occurrence.
///
/// Read-only after [`compile`], so routing may run concurrently across
/// messages without locking.
#[derive(Debug, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
    triggers: HashMap<String, Vec<Regex>>,
}

impl RuleTable {
    /// Number of loaded rules, matchable or not.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Loaded rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Compiled triggers for a rule id; empty if the rule can never match.
    pub fn triggers_for(&self, id: &str) -> &[Regex] {
        self.triggers.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Compile raw configuration into an immutable [`RuleTable`].
///
/// Never fails: blank triggers are filtered out, patterns with invalid
/// regex syntax are skipped with a warning, and a rule left with zero
/// triggers is recorded as loaded but contributes nothing matchable.
pub fn compile(config: &RuleConfig) -> RuleTable {
    let mut rules = Vec::with_capacity(config.rules.len());
    let mut triggers: HashMap<String, Vec<Regex>> = HashMap::new();

    for (index, raw) in config.rules.iter().enumerate() {
        let id = raw
            .id
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("rule-{index}"));

        let mut compiled = Vec::new();
        for pattern in &raw.triggers {
            let pattern = pattern.trim();
            if pattern.is_empty() {
                continue;
            }
            match RegexBuilder::new(pattern).case_insensitive(true).build() {
                Ok(re) => compiled.push(re),
                Err(e) => {
                    warn!("rule {id}: skipping trigger '{pattern}' that failed to compile: {e}");
                }
            }
        }

        // First occurrence wins on duplicate ids; later triggers never
        // take part in lookup.
        if !compiled.is_empty() && !triggers.contains_key(&id) {
            triggers.insert(id.clone(), compiled);
        }

        rules.push(Rule {
            id,
            response: raw.response.clone(),
        });
    }

    info!(
        "compiled {} reply rules ({} matchable)",
        rules.len(),
        triggers.len()
    );
    RuleTable { rules, triggers }
}
