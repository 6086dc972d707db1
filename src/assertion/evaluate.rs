use serde::Serialize;
use serde_json::{Number, Value};

use super::directive::{AssertionDirective, ValueKind, display_value};
use super::resolve::{NULL, ResponseView, lookup_path};

/// Outcome of evaluating a directive list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionVerdict {
    pub success: bool,
    pub message: String,
}

impl AssertionVerdict {
    fn passed() -> Self {
        Self {
            success: true,
            message: "All assertions passed".to_owned(),
        }
    }

    const fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

/// Evaluates `directives` in order and stops at the first failure.
#[must_use]
pub fn evaluate(
    body: &Value,
    response: &ResponseView,
    directives: &[AssertionDirective],
) -> AssertionVerdict {
    for directive in directives {
        if let Err(message) = check(directive, body, response) {
            return AssertionVerdict::failed(message);
        }
    }
    AssertionVerdict::passed()
}

fn check(
    directive: &AssertionDirective,
    body: &Value,
    response: &ResponseView,
) -> Result<(), String> {
    match directive {
        AssertionDirective::Eq { path, expected } => {
            let actual = response.resolve(body, path);
            if values_equal(&actual, expected) {
                Ok(())
            } else {
                Err(format!(
                    "Expected {}, got {}",
                    display_value(expected),
                    display_value(&actual)
                ))
            }
        }
        AssertionDirective::Contains { path, needle } => {
            let actual = display_value(&response.resolve(body, path));
            if actual.contains(needle.as_str()) {
                Ok(())
            } else {
                Err(format!("Expected to contain {}, got {}", needle, actual))
            }
        }
        AssertionDirective::Gt { path, bound } => {
            let actual = response.resolve(body, path);
            if compare_number(&actual, bound, |value, limit| value > limit) {
                Ok(())
            } else {
                Err(format!(
                    "Expected greater than {}, got {}",
                    bound,
                    display_value(&actual)
                ))
            }
        }
        AssertionDirective::Lt { path, bound } => {
            let actual = response.resolve(body, path);
            if compare_number(&actual, bound, |value, limit| value < limit) {
                Ok(())
            } else {
                Err(format!(
                    "Expected less than {}, got {}",
                    bound,
                    display_value(&actual)
                ))
            }
        }
        AssertionDirective::StatusCode(expected) => {
            if response.status == *expected {
                Ok(())
            } else {
                Err(format!(
                    "Expected status code {}, got {}",
                    expected, response.status
                ))
            }
        }
        AssertionDirective::StatusCodeIn(expected) => {
            if expected.contains(&response.status) {
                Ok(())
            } else {
                Err(format!(
                    "Expected status code in {:?}, got {}",
                    expected, response.status
                ))
            }
        }
        AssertionDirective::JsonPath { path, expected } => {
            let actual = lookup_path(body, path).unwrap_or(&NULL);
            if values_equal(actual, expected) {
                Ok(())
            } else {
                Err(format!(
                    "Expected {} at {}, got {}",
                    display_value(expected),
                    path,
                    display_value(actual)
                ))
            }
        }
        AssertionDirective::Regex { path, pattern } => {
            let actual = display_value(&response.resolve(body, path));
            if pattern.is_match(&actual) {
                Ok(())
            } else {
                Err(format!(
                    "Expected to match pattern {}, got {}",
                    pattern.as_str(),
                    actual
                ))
            }
        }
        AssertionDirective::Exists(path) => {
            if present(body, path) {
                Ok(())
            } else {
                Err(format!("Expected path {} to exist", path))
            }
        }
        AssertionDirective::NotExists(path) => {
            if present(body, path) {
                Err(format!("Expected path {} to not exist", path))
            } else {
                Ok(())
            }
        }
        AssertionDirective::Type { path, name, kind } => {
            let actual = response.resolve(body, path);
            match kind {
                Some(kind) if !kind.matches(&actual) => Err(format!(
                    "Expected type {}, got {}",
                    name,
                    ValueKind::name_of(&actual)
                )),
                Some(_) | None => Ok(()),
            }
        }
        AssertionDirective::Length { path, expected } => {
            let length = sized(&response.resolve(body, path), path)?;
            if length == *expected {
                Ok(())
            } else {
                Err(format!("Expected length {}, got {}", expected, length))
            }
        }
        AssertionDirective::LengthGt { path, expected } => {
            let length = sized(&response.resolve(body, path), path)?;
            if length > *expected {
                Ok(())
            } else {
                Err(format!(
                    "Expected length greater than {}, got {}",
                    expected, length
                ))
            }
        }
        AssertionDirective::LengthLt { path, expected } => {
            let length = sized(&response.resolve(body, path), path)?;
            if length < *expected {
                Ok(())
            } else {
                Err(format!("Expected length less than {}, got {}", expected, length))
            }
        }
        AssertionDirective::StartsWith { path, prefix } => {
            let actual = display_value(&response.resolve(body, path));
            if actual.starts_with(prefix.as_str()) {
                Ok(())
            } else {
                Err(format!("Expected to start with {}, got {}", prefix, actual))
            }
        }
        AssertionDirective::EndsWith { path, suffix } => {
            let actual = display_value(&response.resolve(body, path));
            if actual.ends_with(suffix.as_str()) {
                Ok(())
            } else {
                Err(format!("Expected to end with {}, got {}", suffix, actual))
            }
        }
    }
}

/// `null` doubles as the "absent" sentinel, so a present `null` counts as missing.
fn present(body: &Value, path: &str) -> bool {
    lookup_path(body, path).is_some_and(|value| !value.is_null())
}

/// JSON equality where numbers compare by value (`1 == 1.0`).
fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(left), Value::Number(right)) => {
            left == right || left.as_f64().zip(right.as_f64()).is_some_and(|(l, r)| l == r)
        }
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right.iter())
                    .all(|(l, r)| values_equal(l, r))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left.iter().all(|(key, value)| {
                    right
                        .get(key)
                        .is_some_and(|other| values_equal(value, other))
                })
        }
        (left, right) => left == right,
    }
}

fn compare_number(actual: &Value, bound: &Number, cmp: fn(f64, f64) -> bool) -> bool {
    match (actual.as_f64(), bound.as_f64()) {
        (Some(value), Some(limit)) => cmp(value, limit),
        (Some(_) | None, _) => false,
    }
}

fn sized(value: &Value, path: &str) -> Result<usize, String> {
    match value {
        Value::String(text) => Ok(text.chars().count()),
        Value::Array(items) => Ok(items.len()),
        Value::Object(entries) => Ok(entries.len()),
        Value::Null | Value::Bool(_) | Value::Number(_) => Err(format!(
            "Value at {} has no length (type {})",
            path,
            ValueKind::name_of(value)
        )),
    }
}
