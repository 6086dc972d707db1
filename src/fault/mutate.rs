use reqwest::Url;
use serde_json::Value;

use crate::case::TestCaseSpec;

/// Oversized numeric string for `parameter_out_of_bounds`.
pub const OVERSIZED_VALUE: &str = "999999999999999999";
pub const SQL_INJECTION_PAYLOAD: &str = "' OR 1=1 --";

const FORMAT_MARKER: (&str, &str) = ("invalid_format", "true");

/// Copy of `case` with every URL query value and every top-level value of
/// a JSON-object body replaced by `payload`.
#[must_use]
pub fn overwrite_parameters(case: &TestCaseSpec, payload: &str) -> TestCaseSpec {
    let mut mutated = case.clone();
    mutated.url = rewrite_query(&case.url, payload);
    mutated.body = case.body.as_deref().map(|body| rewrite_body(body, payload));
    mutated
}

/// Copy of `case` whose URL carries the `invalid_format=true` marker.
#[must_use]
pub fn with_format_marker(case: &TestCaseSpec) -> TestCaseSpec {
    let mut mutated = case.clone();
    mutated.url = Url::parse(&case.url).map_or_else(
        |_err| {
            let separator = if case.url.contains('?') { '&' } else { '?' };
            format!(
                "{}{}{}={}",
                case.url, separator, FORMAT_MARKER.0, FORMAT_MARKER.1
            )
        },
        |mut parsed| {
            parsed
                .query_pairs_mut()
                .append_pair(FORMAT_MARKER.0, FORMAT_MARKER.1);
            parsed.to_string()
        },
    );
    mutated
}

fn rewrite_query(url: &str, payload: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_owned();
    };
    let keys: Vec<String> = parsed
        .query_pairs()
        .map(|(key, _)| key.into_owned())
        .collect();
    if keys.is_empty() {
        return url.to_owned();
    }
    parsed
        .query_pairs_mut()
        .clear()
        .extend_pairs(keys.iter().map(|key| (key.as_str(), payload)));
    parsed.to_string()
}

fn rewrite_body(body: &str, payload: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(mut fields)) => {
            for value in fields.values_mut() {
                *value = Value::String(payload.to_owned());
            }
            Value::Object(fields).to_string()
        }
        Ok(_) | Err(_) => body.to_owned(),
    }
}
