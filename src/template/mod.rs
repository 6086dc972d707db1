//! `{{name}}` parameter substitution over strings and JSON structures.
use serde_json::{Map, Value};


/// Replaces `{{key}}` placeholders in every string reachable from `value`,
/// descending into arrays and objects in place. Non-string leaves are untouched.
pub fn substitute(value: &mut Value, params: &Map<String, Value>) {
    match value {
        Value::String(text) => {
            if text.contains("{{") {
                *text = render_template(text, params);
            }
        }
        Value::Array(items) => {
            for item in items {
                substitute(item, params);
            }
        }
        Value::Object(entries) => {
            for entry in entries.values_mut() {
                substitute(entry, params);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Single pass over `input`: at each `{{`, a known `{{key}}` token is
/// replaced with the parameter's text, otherwise one brace is copied and the
/// scan moves on. Replacement text is never scanned again.
#[must_use]
pub fn render_template(input: &str, params: &Map<String, Value>) -> String {
    let mut rest = input;
    let mut output = String::with_capacity(input.len());

    while let Some(start) = rest.find("{{") {
        let (before, candidate) = rest.split_at(start);
        output.push_str(before);
        if let Some((param, remaining)) = match_placeholder(candidate, params) {
            output.push_str(&param_text(param));
            rest = remaining;
        } else {
            output.push('{');
            rest = candidate.strip_prefix('{').unwrap_or_default();
        }
    }
    output.push_str(rest);

    output
}

fn match_placeholder<'input, 'params>(
    candidate: &'input str,
    params: &'params Map<String, Value>,
) -> Option<(&'params Value, &'input str)> {
    let inner = candidate.strip_prefix("{{")?;
    params.iter().find_map(|(key, param)| {
        inner
            .strip_prefix(key.as_str())
            .and_then(|after_key| after_key.strip_prefix("}}"))
            .map(|remaining| (param, remaining))
    })
}

fn param_text(param: &Value) -> String {
    match param {
        Value::String(text) => text.clone(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            param.to_string()
        }
    }
}
