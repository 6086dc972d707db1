use std::borrow::Cow;

use reqwest::header::HeaderMap;
use serde_json::{Map, Value};

pub(super) static NULL: Value = Value::Null;

/// The parts of an HTTP response that special assertion paths read from.
#[derive(Debug, Clone, Default)]
pub struct ResponseView {
    pub status: u16,
    pub headers: Map<String, Value>,
    pub text: String,
}

impl ResponseView {
    #[must_use]
    pub fn new(status: u16, headers: &HeaderMap, text: String) -> Self {
        let mut mapped = Map::new();
        for (name, value) in headers {
            let rendered = String::from_utf8_lossy(value.as_bytes()).into_owned();
            match mapped.get_mut(name.as_str()) {
                Some(Value::String(existing)) => {
                    existing.push_str(", ");
                    existing.push_str(&rendered);
                }
                Some(_) | None => {
                    mapped.insert(name.as_str().to_owned(), Value::String(rendered));
                }
            }
        }
        Self {
            status,
            headers: mapped,
            text,
        }
    }

    /// Resolves `path` against the response: `status_code`, `headers`,
    /// `text` and `content` read the raw response, anything else is a
    /// dotted lookup into `body`. Missing values resolve to `null`.
    #[must_use]
    pub fn resolve<'body>(&self, body: &'body Value, path: &str) -> Cow<'body, Value> {
        match path {
            "status_code" => Cow::Owned(Value::from(self.status)),
            "headers" => Cow::Owned(Value::Object(self.headers.clone())),
            "text" | "content" => Cow::Owned(Value::String(self.text.clone())),
            _ => Cow::Borrowed(lookup_path(body, path).unwrap_or(&NULL)),
        }
    }
}

/// Walks `path` split on `.` through nested objects. Any non-object
/// intermediate or absent key yields `None`.
#[must_use]
pub fn lookup_path<'data>(data: &'data Value, path: &str) -> Option<&'data Value> {
    path.split('.')
        .try_fold(data, |current, key| current.as_object()?.get(key))
}
