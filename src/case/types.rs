use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::args::HttpMethod;
use crate::assertion::Assertions;

/// One stored HTTP request template with its assertions.
///
/// The engine only reads cases; every run works on its own clone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCaseSpec {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub headers: Map<String, Value>,
    /// Raw body text. Non-string JSON in a case file is kept as its JSON text.
    #[serde(default, deserialize_with = "body_text")]
    pub body: Option<String>,
    #[serde(default)]
    pub validate: Assertions,
    #[serde(default)]
    pub extract: Vec<Value>,
    #[serde(default)]
    pub variables: Map<String, Value>,
    /// Per-case request timeout in seconds.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl TestCaseSpec {
    #[must_use]
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            format!("case {}", self.id)
        } else {
            format!("case {} ({})", self.id, self.name)
        }
    }
}

fn body_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other @ (Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_))) => {
            Some(other.to_string())
        }
    })
}
