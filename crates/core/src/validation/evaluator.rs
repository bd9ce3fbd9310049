//! Rule evaluator: pure logic over the form's JSON projection.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use validator::ValidateEmail;

use super::rules::{Condition, FieldViolation, RuleKind, StepRule, ValidationResult};
use crate::attachment::CONTENT_REF_KEY;
use crate::field_path::FieldPath;
use crate::profession::is_known_profession;

/// Optional `+`, then 9 to 18 digits, spaces or hyphens, ending on a digit.
const PHONE_PATTERN: &str = r"^\+?[0-9][0-9 \-]{7,16}[0-9]$";

/// Indian postal index number.
const PINCODE_PATTERN: &str = r"^[1-9][0-9]{5}$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

static PINCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PINCODE_PATTERN).expect("valid regex"));

/// Evaluate all rules against a form document.
pub fn evaluate_rules(rules: &[StepRule], doc: &Value) -> ValidationResult {
    let errors: Vec<FieldViolation> = rules
        .iter()
        .filter(|rule| condition_holds(rule.when, doc))
        .filter_map(|rule| evaluate_single_rule(rule, doc))
        .collect();

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn lookup<'v>(doc: &'v Value, path: &str) -> Option<&'v Value> {
    FieldPath::parse(path).ok()?.get(doc)
}

fn condition_holds(condition: Condition, doc: &Value) -> bool {
    match condition {
        Condition::Always => true,
        Condition::IsTrue(path) => lookup(doc, path).and_then(Value::as_bool) == Some(true),
        Condition::Equals(path, expected) => {
            lookup(doc, path).and_then(Value::as_str) == Some(expected)
        }
        Condition::Differs(a, b) => lookup(doc, a) != lookup(doc, b),
    }
}

fn violation(rule: &StepRule, value: Option<&Value>) -> FieldViolation {
    FieldViolation {
        field: rule.field.to_string(),
        rule_type: rule.kind.as_str().to_string(),
        message: rule.message.to_string(),
        value: value.filter(|v| !is_attachment(v)).cloned(),
    }
}

fn evaluate_single_rule(rule: &StepRule, doc: &Value) -> Option<FieldViolation> {
    let value = lookup(doc, rule.field);
    let passes = match rule.kind {
        RuleKind::Required => is_filled(value),
        RuleKind::Email => non_blank_str(value).map_or(true, |s| s.validate_email()),
        RuleKind::Phone => non_blank_str(value).map_or(true, |s| PHONE_RE.is_match(s)),
        RuleKind::Pincode => non_blank_str(value).map_or(true, |s| PINCODE_RE.is_match(s)),
        RuleKind::Accepted => value.and_then(Value::as_bool) == Some(true),
        RuleKind::Attached => value.is_some_and(is_attachment),
        RuleKind::MinEntries(min) => value
            .and_then(Value::as_array)
            .is_some_and(|rows| rows.len() >= min),
        RuleKind::AnyEntryWith(fields) => value.and_then(Value::as_array).is_some_and(|rows| {
            rows.iter()
                .any(|row| fields.iter().all(|f| is_filled(row.get(*f))))
        }),
        RuleKind::KnownProfession => value
            .and_then(Value::as_str)
            .is_some_and(is_known_profession),
    };

    if passes {
        None
    } else {
        Some(violation(rule, value))
    }
}

fn is_filled(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn is_attachment(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key(CONTENT_REF_KEY))
}
