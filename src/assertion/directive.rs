use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::warn;

use crate::error::CaseError;

/// Value kinds accepted by the `type` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Int,
    Float,
    Bool,
    List,
    Dict,
}

impl ValueKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(ValueKind::String),
            "int" => Some(ValueKind::Int),
            "float" => Some(ValueKind::Float),
            "bool" => Some(ValueKind::Bool),
            "list" => Some(ValueKind::List),
            "dict" => Some(ValueKind::Dict),
            _ => None,
        }
    }

    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            ValueKind::String => value.is_string(),
            ValueKind::Int => value.is_i64() || value.is_u64(),
            ValueKind::Float => value.is_f64(),
            ValueKind::Bool => value.is_boolean(),
            ValueKind::List => value.is_array(),
            ValueKind::Dict => value.is_object(),
        }
    }

    /// Name used in failure messages for an arbitrary JSON value.
    #[must_use]
    pub fn name_of(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(number) => {
                if number.is_f64() {
                    "float"
                } else {
                    "int"
                }
            }
            Value::String(_) => "string",
            Value::Array(_) => "list",
            Value::Object(_) => "dict",
        }
    }
}

/// One typed assertion rule. Paths are dotted lookups; see [`super::ResponseView`].
#[derive(Debug, Clone)]
pub enum AssertionDirective {
    Eq { path: String, expected: Value },
    Contains { path: String, needle: String },
    Gt { path: String, bound: Number },
    Lt { path: String, bound: Number },
    StatusCode(u16),
    StatusCodeIn(Vec<u16>),
    JsonPath { path: String, expected: Value },
    Regex { path: String, pattern: Regex },
    Exists(String),
    NotExists(String),
    /// `kind` is `None` for names outside the known set; those always pass.
    Type {
        path: String,
        name: String,
        kind: Option<ValueKind>,
    },
    Length { path: String, expected: usize },
    LengthGt { path: String, expected: usize },
    LengthLt { path: String, expected: usize },
    StartsWith { path: String, prefix: String },
    EndsWith { path: String, suffix: String },
}

impl AssertionDirective {
    /// Decodes a single `key: payload` pair of a directive mapping.
    ///
    /// Returns `Ok(None)` for keys that are not directive names.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload does not have the shape the
    /// directive requires.
    pub fn decode(key: &str, payload: &Value) -> Result<Option<Self>, CaseError> {
        let directive = match key {
            "eq" => {
                let (path, expected) = path_and_value("eq", payload)?;
                AssertionDirective::Eq {
                    path,
                    expected: expected.clone(),
                }
            }
            "contains" => {
                let (path, needle) = path_and_value("contains", payload)?;
                AssertionDirective::Contains {
                    path,
                    needle: display_value(needle),
                }
            }
            "gt" => {
                let (path, bound) = path_and_number("gt", payload)?;
                AssertionDirective::Gt { path, bound }
            }
            "lt" => {
                let (path, bound) = path_and_number("lt", payload)?;
                AssertionDirective::Lt { path, bound }
            }
            "status_code" => AssertionDirective::StatusCode(status_code("status_code", payload)?),
            "status_code_in" => {
                let codes = payload.as_array().ok_or(CaseError::DirectiveShape {
                    kind: "status_code_in",
                    expected: "a list of status codes",
                })?;
                let mut parsed = Vec::with_capacity(codes.len());
                for code in codes {
                    parsed.push(status_code("status_code_in", code)?);
                }
                AssertionDirective::StatusCodeIn(parsed)
            }
            "jsonpath" => {
                let (path, expected) = path_and_value("jsonpath", payload)?;
                AssertionDirective::JsonPath {
                    path,
                    expected: expected.clone(),
                }
            }
            "regex" => {
                let (path, pattern) = path_and_string("regex", payload)?;
                let compiled = Regex::new(&pattern)
                    .map_err(|err| CaseError::InvalidRegex { pattern, source: err })?;
                AssertionDirective::Regex {
                    path,
                    pattern: compiled,
                }
            }
            "exists" => AssertionDirective::Exists(bare_path("exists", payload)?),
            "not_exists" => AssertionDirective::NotExists(bare_path("not_exists", payload)?),
            "type" => {
                let (path, name) = path_and_string("type", payload)?;
                let kind = ValueKind::from_name(&name);
                if kind.is_none() {
                    warn!("Unknown type name '{}' in type directive; it always passes", name);
                }
                AssertionDirective::Type { path, name, kind }
            }
            "length" => {
                let (path, expected) = path_and_length("length", payload)?;
                AssertionDirective::Length { path, expected }
            }
            "length_gt" => {
                let (path, expected) = path_and_length("length_gt", payload)?;
                AssertionDirective::LengthGt { path, expected }
            }
            "length_lt" => {
                let (path, expected) = path_and_length("length_lt", payload)?;
                AssertionDirective::LengthLt { path, expected }
            }
            "startswith" => {
                let (path, prefix) = path_and_value("startswith", payload)?;
                AssertionDirective::StartsWith {
                    path,
                    prefix: display_value(prefix),
                }
            }
            "endswith" => {
                let (path, suffix) = path_and_value("endswith", payload)?;
                AssertionDirective::EndsWith {
                    path,
                    suffix: display_value(suffix),
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(directive))
    }
}

/// Ordered directive list of a case, decoded once when the case is loaded.
///
/// The raw entries are kept for serialization and for keyword scans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>", into = "Vec<Value>")]
pub struct Assertions {
    raw: Vec<Value>,
    directives: Vec<AssertionDirective>,
}

impl Assertions {
    #[must_use]
    pub fn directives(&self) -> &[AssertionDirective] {
        &self.directives
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// True when any raw entry's JSON text contains one of `needles`,
    /// compared case-insensitively.
    #[must_use]
    pub fn mentions_any(&self, needles: &[&str]) -> bool {
        self.raw.iter().any(|entry| {
            let text = entry.to_string().to_lowercase();
            needles.iter().any(|needle| text.contains(needle))
        })
    }
}

impl TryFrom<Vec<Value>> for Assertions {
    type Error = CaseError;

    fn try_from(raw: Vec<Value>) -> Result<Self, Self::Error> {
        let mut directives = Vec::with_capacity(raw.len());
        for entry in &raw {
            let Value::Object(map) = entry else {
                return Err(CaseError::DirectiveNotMapping {
                    found: entry.to_string(),
                });
            };
            for (key, payload) in map {
                match AssertionDirective::decode(key, payload)? {
                    Some(directive) => directives.push(directive),
                    None => warn!("Skipping unknown assertion directive '{}'", key),
                }
            }
        }
        Ok(Self { raw, directives })
    }
}

impl From<Assertions> for Vec<Value> {
    fn from(value: Assertions) -> Self {
        value.raw
    }
}

/// Renders a value the way assertion messages show it: strings unquoted.
#[must_use]
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            value.to_string()
        }
    }
}

fn path_and_value<'payload>(
    kind: &'static str,
    payload: &'payload Value,
) -> Result<(String, &'payload Value), CaseError> {
    let Some([Value::String(path), value]) = payload.as_array().map(Vec::as_slice) else {
        return Err(CaseError::DirectiveShape {
            kind,
            expected: "[path, expected]",
        });
    };
    Ok((path.clone(), value))
}

fn path_and_string(kind: &'static str, payload: &Value) -> Result<(String, String), CaseError> {
    let Some([Value::String(path), Value::String(text)]) = payload.as_array().map(Vec::as_slice)
    else {
        return Err(CaseError::DirectiveShape {
            kind,
            expected: "[path, string]",
        });
    };
    Ok((path.clone(), text.clone()))
}

fn path_and_number(kind: &'static str, payload: &Value) -> Result<(String, Number), CaseError> {
    let Some([Value::String(path), Value::Number(bound)]) = payload.as_array().map(Vec::as_slice)
    else {
        return Err(CaseError::DirectiveShape {
            kind,
            expected: "[path, number]",
        });
    };
    Ok((path.clone(), bound.clone()))
}

fn path_and_length(kind: &'static str, payload: &Value) -> Result<(String, usize), CaseError> {
    let shape = CaseError::DirectiveShape {
        kind,
        expected: "[path, non-negative integer]",
    };
    let Some([Value::String(path), Value::Number(length)]) = payload.as_array().map(Vec::as_slice)
    else {
        return Err(shape);
    };
    let expected_len = length
        .as_u64()
        .and_then(|value| usize::try_from(value).ok())
        .ok_or(shape)?;
    Ok((path.clone(), expected_len))
}

fn bare_path(kind: &'static str, payload: &Value) -> Result<String, CaseError> {
    payload
        .as_str()
        .map(str::to_owned)
        .ok_or(CaseError::DirectiveShape {
            kind,
            expected: "a path string",
        })
}

fn status_code(kind: &'static str, payload: &Value) -> Result<u16, CaseError> {
    payload
        .as_u64()
        .and_then(|code| u16::try_from(code).ok())
        .ok_or(CaseError::DirectiveShape {
            kind,
            expected: "an integer status code",
        })
}
