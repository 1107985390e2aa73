//! Message routing: first-match scan over the compiled rule table.

use tracing::debug;

use autoreply_core::config::ResponseItem;
use autoreply_core::message::{Reply, Segment};

use crate::rules::RuleTable;

/// Result of routing one message against the rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteResult {
    /// No rule matched; the host keeps its default pipeline.
    NoMatch,
    /// `rule_id` matched. `reply` is `None` when every response item was
    /// invalid — distinct from `NoMatch`, because a matched rule still
    /// suppresses default handling.
    Matched {
        rule_id: String,
        reply: Option<Reply>,
    },
}

/// Clean inbound text before matching.
///
/// Keeps word characters (alphanumerics and `_`) and CJK Unified
/// Ideographs (U+4E00–U+9FFF); punctuation and whitespace are stripped.
/// Latin letters are lower-cased; case folding has no effect on CJK.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || ('\u{4e00}'..='\u{9fff}').contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Find the first rule matching `text` and assemble its reply.
///
/// Pure function over an immutable table: rules are scanned in declaration
/// order, triggers within a rule in declaration order, and the first trigger
/// that matches anywhere in the normalized text (substring search) wins.
/// Messages that normalize to the empty string never match.
pub fn route(table: &RuleTable, text: &str) -> RouteResult {
    let clean = normalize(text);
    if clean.is_empty() {
        return RouteResult::NoMatch;
    }

    for rule in table.rules() {
        if table
            .triggers_for(&rule.id)
            .iter()
            .any(|re| re.is_match(&clean))
        {
            debug!("rule {} matched", rule.id);
            return RouteResult::Matched {
                rule_id: rule.id.clone(),
                reply: build_reply(&rule.response),
            };
        }
    }

    RouteResult::NoMatch
}

/// Assemble reply segments from a matched rule's response items.
///
/// Text items have their non-blank lines trimmed and re-joined with `\n`
/// and are dropped if nothing remains; image items are dropped without a
/// URL; unknown item types are ignored. Item order is preserved. Returns
/// `None` when no valid segment survives.
fn build_reply(items: &[ResponseItem]) -> Option<Reply> {
    let mut segments = Vec::new();
    for item in items {
        match item {
            ResponseItem::Text { content } => {
                let cleaned = content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n");
                if !cleaned.is_empty() {
                    segments.push(Segment::Text(cleaned));
                }
            }
            ResponseItem::Image { url } => {
                if !url.trim().is_empty() {
                    segments.push(Segment::Image { url: url.clone() });
                }
            }
            ResponseItem::Unknown => {}
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(Reply { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::compile;
    use autoreply_core::config::parse;

    fn table_of(yaml: &str) -> RuleTable {
        compile(&parse(yaml).unwrap())
    }

    #[test]
    fn test_normalize_strips_punctuation_and_whitespace() {
        assert_eq!(normalize("  Hello, world!  "), "helloworld");
        assert_eq!(normalize("你好，世界！"), "你好世界");
        assert_eq!(normalize("under_score-dash"), "under_scoredash");
    }

    #[test]
    fn test_normalize_all_punctuation_is_empty() {
        assert_eq!(normalize("?!。，…"), "");
        assert_eq!(normalize("   \t\n"), "");
    }

    #[test]
    fn test_empty_normalization_never_matches() {
        let table = table_of("rules:\n  - id: a\n    triggers: [\".*\"]\n");
        assert_eq!(route(&table, "?!?"), RouteResult::NoMatch);
        assert_eq!(route(&table, ""), RouteResult::NoMatch);
    }

    #[test]
    fn test_first_declared_rule_wins() {
        let table = table_of(
            "rules:\n  - id: r1\n    triggers: [\"hello\"]\n  - id: r2\n    triggers: [\"hello\"]\n",
        );
        match route(&table, "hello there") {
            RouteResult::Matched { rule_id, .. } => assert_eq!(rule_id, "r1"),
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn test_substring_match_within_normalized_text() {
        let table = table_of("rules:\n  - id: a\n    triggers: [\"你好\"]\n");
        assert!(matches!(
            route(&table, "喂，你好呀！"),
            RouteResult::Matched { .. }
        ));
    }

    #[test]
    fn test_case_insensitive_trigger() {
        let table = table_of("rules:\n  - id: a\n    triggers: [\"Hello\"]\n");
        assert!(matches!(
            route(&table, "well hello there"),
            RouteResult::Matched { .. }
        ));
    }

    #[test]
    fn test_zero_trigger_rule_never_matches_its_raw_patterns() {
        // Blank triggers are filtered before compilation, so even the raw
        // trigger string itself does not match.
        let table = table_of("rules:\n  - id: dead\n    triggers: [\"   \"]\n");
        assert_eq!(route(&table, "   "), RouteResult::NoMatch);
        assert_eq!(route(&table, "anything"), RouteResult::NoMatch);
    }

    #[test]
    fn test_routing_is_idempotent() {
        let table = table_of(
            "rules:\n  - id: a\n    triggers: [\"hi\"]\n    response:\n      - {type: text, content: \"hello\"}\n",
        );
        let first = route(&table, "hi there");
        let second = route(&table, "hi there");
        assert_eq!(first, second);
    }

    #[test]
    fn test_text_assembly_strips_blank_lines() {
        let table = table_of(
            "rules:\n  - id: a\n    triggers: [\"hi\"]\n    response:\n      - {type: text, content: \"  hello \\n\\n  world  \"}\n",
        );
        match route(&table, "hi") {
            RouteResult::Matched {
                reply: Some(reply), ..
            } => {
                assert_eq!(reply.segments, vec![Segment::Text("hello\nworld".into())]);
            }
            other => panic!("expected reply, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_items_dropped_order_preserved() {
        let table = table_of(
            "rules:\n  - id: a\n    triggers: [\"hi\"]\n    response:\n      - {type: text, content: \"   \"}\n      - {type: image, url: \"https://example.com/a.png\"}\n      - {type: sticker, pack: \"cats\"}\n      - {type: text, content: \"after\"}\n",
        );
        match route(&table, "hi") {
            RouteResult::Matched {
                reply: Some(reply), ..
            } => {
                assert_eq!(
                    reply.segments,
                    vec![
                        Segment::Image {
                            url: "https://example.com/a.png".into()
                        },
                        Segment::Text("after".into()),
                    ]
                );
            }
            other => panic!("expected reply, got {other:?}"),
        }
    }

    #[test]
    fn test_match_with_all_invalid_items_is_still_a_match() {
        let table = table_of(
            "rules:\n  - id: a\n    triggers: [\"hi\"]\n    response:\n      - {type: text, content: \"\"}\n      - {type: image, url: \"\"}\n",
        );
        assert_eq!(
            route(&table, "hi"),
            RouteResult::Matched {
                rule_id: "a".into(),
                reply: None,
            }
        );
    }

    #[test]
    fn test_greeting_scenario() {
        let table = table_of(
            "rules:\n  - id: a\n    triggers: [\"你好\"]\n    response:\n      - {type: text, content: \"您好！\"}\n",
        );
        match route(&table, "你好呀") {
            RouteResult::Matched {
                rule_id,
                reply: Some(reply),
            } => {
                assert_eq!(rule_id, "a");
                assert_eq!(reply.segments, vec![Segment::Text("您好！".into())]);
            }
            other => panic!("expected reply, got {other:?}"),
        }
        assert_eq!(route(&table, "再见"), RouteResult::NoMatch);
    }
}
