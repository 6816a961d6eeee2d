//! Recover a validation verdict from free-form model output.
//!
//! The validation model is told to answer with bare JSON but regularly wraps
//! it in prose, code fences, or half-formed objects. Strategies run in order
//! and the first one that yields an object wins:
//!
//! 1. the whole trimmed text as JSON
//! 2. the contents of a fenced code block
//! 3. brace-balanced regions (two levels) that mention a verdict field
//! 4. a line-by-line scan that tracks brace depth
//! 5. field-level regex for the judgement token and a quoted reason

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use leadscout_common::{ValidationJudgement, ValidationVerdict};

const JUDGEMENT_FIELD: &str = "validation_judgement";
const REASON_FIELD: &str = "validation_reason";

static RE_FENCED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").unwrap());
static RE_BALANCED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*(?:\{[^{}]*\}[^{}]*)*\}").unwrap());
static RE_JUDGEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:validation_judgement|judgement)["']?\s*:\s*["']?(Correct|Incorrect|Unsure)["']?"#)
        .unwrap()
});
static RE_REASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)(?:validation_reason|reason)["']?\s*:\s*["']([^"']+)["']"#).unwrap()
});

/// Which strategy recovered the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Direct,
    Fenced,
    Balanced,
    LineScan,
    FieldPattern,
}

/// Extract a verdict, or `None` when no strategy finds anything usable.
pub fn extract_verdict(text: &str) -> Option<ValidationVerdict> {
    extract_with_strategy(text).map(|(_, verdict)| verdict)
}

pub fn extract_with_strategy(text: &str) -> Option<(Strategy, ValidationVerdict)> {
    let found = parse_object(text.trim())
        .map(|obj| (Strategy::Direct, verdict_from_object(&obj)))
        .or_else(|| fenced(text).map(|obj| (Strategy::Fenced, verdict_from_object(&obj))))
        .or_else(|| balanced(text).map(|obj| (Strategy::Balanced, verdict_from_object(&obj))))
        .or_else(|| line_scan(text).map(|obj| (Strategy::LineScan, verdict_from_object(&obj))))
        .or_else(|| field_pattern(text).map(|v| (Strategy::FieldPattern, v)));

    match &found {
        Some((strategy, verdict)) => {
            debug!(?strategy, judgement = %verdict.judgement, "Recovered validation verdict")
        }
        None => debug!(len = text.len(), "No verdict recoverable from validation text"),
    }
    found
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn fenced(text: &str) -> Option<Map<String, Value>> {
    let caps = RE_FENCED.captures(text)?;
    parse_object(caps.get(1)?.as_str())
}

fn balanced(text: &str) -> Option<Map<String, Value>> {
    RE_BALANCED
        .find_iter(text)
        .filter_map(|m| parse_object(m.as_str()))
        .find(|obj| obj.contains_key(JUDGEMENT_FIELD) || obj.contains_key(REASON_FIELD))
}

fn line_scan(text: &str) -> Option<Map<String, Value>> {
    let mut collected = String::new();
    let mut depth: i64 = 0;
    let mut open = false;

    for line in text.lines() {
        let segment = if open {
            line
        } else {
            match line.find('{') {
                Some(start) => {
                    open = true;
                    &line[start..]
                }
                None => continue,
            }
        };

        depth += brace_delta(segment);
        if depth > 0 {
            collected.push_str(segment);
            collected.push('\n');
            continue;
        }

        let end = segment.rfind('}').map(|i| i + 1).unwrap_or(segment.len());
        collected.push_str(&segment[..end]);
        if let Some(obj) = parse_object(&collected) {
            return Some(obj);
        }
        collected.clear();
        depth = 0;
        open = false;
    }
    None
}

fn brace_delta(segment: &str) -> i64 {
    segment.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

fn field_pattern(text: &str) -> Option<ValidationVerdict> {
    let judgement = RE_JUDGEMENT
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| ValidationJudgement::parse(m.as_str()));
    let reason = RE_REASON
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string());

    if judgement.is_none() && reason.is_none() {
        return None;
    }
    Some(ValidationVerdict {
        judgement: judgement.unwrap_or(ValidationJudgement::Unsure),
        reason: reason.unwrap_or_else(|| "Could not extract reason".to_string()),
    })
}

fn verdict_from_object(obj: &Map<String, Value>) -> ValidationVerdict {
    ValidationVerdict {
        judgement: obj
            .get(JUDGEMENT_FIELD)
            .and_then(Value::as_str)
            .map(ValidationJudgement::parse)
            .unwrap_or(ValidationJudgement::Unsure),
        reason: obj
            .get(REASON_FIELD)
            .and_then(Value::as_str)
            .unwrap_or("Unable to validate")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_json_parses_directly() {
        let (strategy, v) =
            extract_with_strategy(r#"  {"validation_judgement":"Correct","validation_reason":"ok"}  "#)
                .unwrap();
        assert_eq!(strategy, Strategy::Direct);
        assert_eq!(v.judgement, ValidationJudgement::Correct);
        assert_eq!(v.reason, "ok");
    }

    #[test]
    fn fenced_block_is_unwrapped() {
        let text = "Here is my review:\n```json\n{\"validation_judgement\":\"Correct\",\"validation_reason\":\"ok\"}\n```\nThanks.";
        let (strategy, v) = extract_with_strategy(text).unwrap();
        assert_eq!(strategy, Strategy::Fenced);
        assert_eq!(v.judgement, ValidationJudgement::Correct);
        assert_eq!(v.reason, "ok");
    }

    #[test]
    fn balanced_region_prefers_object_with_verdict_fields() {
        let text = r#"Context {"note": "ignore me"} then {"validation_judgement": "Incorrect", "validation_reason": "Works at a competitor"} done"#;
        let (strategy, v) = extract_with_strategy(text).unwrap();
        assert_eq!(strategy, Strategy::Balanced);
        assert_eq!(v.judgement, ValidationJudgement::Incorrect);
        assert_eq!(v.reason, "Works at a competitor");
    }

    #[test]
    fn deep_nesting_falls_through_to_line_scan() {
        let text = "Result:\n{\n  \"validation_judgement\": \"Unsure\",\n  \"validation_reason\": \"thin profile\",\n  \"meta\": {\"a\": {\"b\": {\"c\": 1}}}\n}\nend";
        let (strategy, v) = extract_with_strategy(text).unwrap();
        assert_eq!(strategy, Strategy::LineScan);
        assert_eq!(v.judgement, ValidationJudgement::Unsure);
        assert_eq!(v.reason, "thin profile");
    }

    #[test]
    fn garbled_judgement_without_reason_uses_fallback_reason() {
        let v = extract_verdict("I think validation_judgement: Incorrect because reasons").unwrap();
        assert_eq!(v.judgement, ValidationJudgement::Incorrect);
        assert_eq!(v.reason, "Could not extract reason");
    }

    #[test]
    fn field_pattern_recovers_quoted_reason_from_broken_json() {
        let text = r#"{"validation_judgement": "correct", "validation_reason": "Founder of voice agency" "#;
        let (strategy, v) = extract_with_strategy(text).unwrap();
        assert_eq!(strategy, Strategy::FieldPattern);
        assert_eq!(v.judgement, ValidationJudgement::Correct);
        assert_eq!(v.reason, "Founder of voice agency");
    }

    #[test]
    fn object_missing_fields_gets_defaults() {
        let v = extract_verdict("{}").unwrap();
        assert_eq!(v.judgement, ValidationJudgement::Unsure);
        assert_eq!(v.reason, "Unable to validate");
    }

    #[test]
    fn unrecoverable_text_is_none() {
        assert_eq!(extract_verdict("The model refused to answer."), None);
        assert_eq!(extract_verdict(""), None);
    }

    #[test]
    fn json_array_is_not_a_verdict() {
        assert_eq!(extract_verdict("[1, 2, 3]"), None);
    }
}
