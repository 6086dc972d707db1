use super::*;
use crate::error::CaseError;
use serde_json::{Value, json};

fn assertions(raw: Value) -> Result<Assertions, String> {
    serde_json::from_value(raw).map_err(|err| format!("decode failed: {}", err))
}

fn view(status: u16, text: &str) -> ResponseView {
    ResponseView {
        status,
        headers: serde_json::Map::new(),
        text: text.to_owned(),
    }
}

#[test]
fn status_code_mismatch_reports_expected_and_actual() -> Result<(), String> {
    let directives = assertions(json!([{"status_code": 200}]))?;
    let verdict = evaluate(&Value::Null, &view(500, ""), directives.directives());
    if verdict.success {
        return Err("Expected failure".to_owned());
    }
    if verdict.message != "Expected status code 200, got 500" {
        return Err(format!("Unexpected message: {}", verdict.message));
    }
    Ok(())
}

#[test]
fn all_passing_directives_report_success() -> Result<(), String> {
    let body = json!({
        "data": {"id": 7, "name": "widget", "tags": ["a", "b"], "price": 9.5},
        "message": "created ok"
    });
    let directives = assertions(json!([
        {"status_code_in": [200, 201]},
        {"eq": ["data.id", 7.0]},
        {"contains": ["message", "created"]},
        {"gt": ["data.price", 9]},
        {"lt": ["data.price", 10]},
        {"jsonpath": ["data.name", "widget"]},
        {"regex": ["data.name", "^wid"]},
        {"exists": "data.tags"},
        {"not_exists": "data.missing"},
        {"type": ["data.tags", "list"]},
        {"type": ["data.price", "float"]},
        {"length": ["data.tags", 2]},
        {"length_gt": ["data.name", 3]},
        {"length_lt": ["data", 5]},
        {"startswith": ["message", "created"]},
        {"endswith": ["message", "ok"]},
        {"eq": ["status_code", 201]}
    ]))?;
    let verdict = evaluate(&body, &view(201, ""), directives.directives());
    if !verdict.success {
        return Err(format!("Unexpected failure: {}", verdict.message));
    }
    if verdict.message != "All assertions passed" {
        return Err(format!("Unexpected message: {}", verdict.message));
    }
    Ok(())
}

#[test]
fn first_failure_short_circuits() -> Result<(), String> {
    let body = json!({"a": 2, "b": 3});
    let directives = assertions(json!([{"eq": ["a", 1]}, {"eq": ["b", 2]}]))?;
    let verdict = evaluate(&body, &view(200, ""), directives.directives());
    if verdict.message != "Expected 1, got 2" {
        return Err(format!("Unexpected message: {}", verdict.message));
    }
    Ok(())
}

#[test]
fn multi_key_mapping_keeps_key_order() -> Result<(), String> {
    let directives = assertions(json!([{"status_code": 200, "exists": "id"}]))?;
    match directives.directives() {
        [
            AssertionDirective::StatusCode(200),
            AssertionDirective::Exists(path),
        ] if path == "id" => Ok(()),
        other => Err(format!("Unexpected directives: {:?}", other)),
    }
}

#[test]
fn unknown_directive_keys_are_skipped() -> Result<(), String> {
    let directives = assertions(json!([{"frobnicate": 1}, {"status_code": 204}]))?;
    if directives.directives().len() != 1 {
        return Err("Expected only the known directive".to_owned());
    }
    if directives.is_empty() {
        return Err("Raw entries should be kept".to_owned());
    }
    Ok(())
}

#[test]
fn malformed_directives_fail_decoding() -> Result<(), String> {
    for raw in [
        json!([{"eq": "only-path"}]),
        json!([{"gt": ["count", "ten"]}]),
        json!([{"status_code": "200"}]),
        json!([{"length": ["items", -1]}]),
        json!(["status_code"]),
    ] {
        if serde_json::from_value::<Assertions>(raw.clone()).is_ok() {
            return Err(format!("Expected decode failure for {}", raw));
        }
    }
    let invalid_regex = AssertionDirective::decode("regex", &json!(["text", "("]));
    match invalid_regex {
        Err(CaseError::InvalidRegex { pattern, .. }) if pattern == "(" => Ok(()),
        other => Err(format!("Unexpected regex result: {:?}", other.map(|_| ()))),
    }
}

#[test]
fn gt_fails_on_non_numeric_actual() -> Result<(), String> {
    let body = json!({"count": "12"});
    let directives = assertions(json!([{"gt": ["count", 10]}]))?;
    let verdict = evaluate(&body, &view(200, ""), directives.directives());
    if verdict.message != "Expected greater than 10, got 12" || verdict.success {
        return Err(format!("Unexpected verdict: {:?}", verdict));
    }
    Ok(())
}

#[test]
fn missing_path_resolves_to_null() -> Result<(), String> {
    let body = json!({"data": [1, 2]});
    let directives = assertions(json!([{"eq": ["data.0", 1]}]))?;
    let verdict = evaluate(&body, &view(200, ""), directives.directives());
    if verdict.message != "Expected 1, got null" {
        return Err(format!("Unexpected message: {}", verdict.message));
    }
    Ok(())
}

#[test]
fn exists_treats_explicit_null_as_missing() -> Result<(), String> {
    let body = json!({"deleted_at": null});
    let directives = assertions(json!([{"exists": "deleted_at"}]))?;
    let verdict = evaluate(&body, &view(200, ""), directives.directives());
    if verdict.message != "Expected path deleted_at to exist" {
        return Err(format!("Unexpected message: {}", verdict.message));
    }
    let negated = assertions(json!([{"not_exists": "deleted_at"}]))?;
    if !evaluate(&body, &view(200, ""), negated.directives()).success {
        return Err("Expected not_exists to pass for null".to_owned());
    }
    Ok(())
}

#[test]
fn length_of_scalar_is_a_failure() -> Result<(), String> {
    let body = json!({"count": 3});
    let directives = assertions(json!([{"length": ["count", 1]}]))?;
    let verdict = evaluate(&body, &view(200, ""), directives.directives());
    if verdict.success || !verdict.message.contains("has no length") {
        return Err(format!("Unexpected verdict: {:?}", verdict));
    }
    Ok(())
}

#[test]
fn type_mismatch_and_unknown_type_names() -> Result<(), String> {
    let body = json!({"id": 5});
    let directives = assertions(json!([{"type": ["id", "string"]}]))?;
    let verdict = evaluate(&body, &view(200, ""), directives.directives());
    if verdict.message != "Expected type string, got int" {
        return Err(format!("Unexpected message: {}", verdict.message));
    }
    let unknown = assertions(json!([{"type": ["id", "decimal"]}]))?;
    if !evaluate(&body, &view(200, ""), unknown.directives()).success {
        return Err("Unknown type names should pass".to_owned());
    }
    Ok(())
}

#[test]
fn special_paths_read_the_raw_response() -> Result<(), String> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("text/plain"),
    );
    let response = ResponseView::new(200, &headers, "plain body".to_owned());
    let body = Value::String("plain body".to_owned());
    let directives = assertions(json!([
        {"contains": ["text", "plain"]},
        {"contains": ["headers", "text/plain"]},
        {"length": ["content", 10]},
        {"eq": ["headers.content-type", null]}
    ]))?;
    let verdict = evaluate(&body, &response, directives.directives());
    if !verdict.success {
        return Err(format!("Unexpected failure: {}", verdict.message));
    }
    Ok(())
}

#[test]
fn keyword_scan_is_case_insensitive() -> Result<(), String> {
    let directives = assertions(json!([{"eq": ["Error.Code", 400]}]))?;
    if !directives.mentions_any(&["code", "error"]) {
        return Err("Expected keyword match".to_owned());
    }
    if directives.mentions_any(&["circuit", "breaker"]) {
        return Err("Unexpected keyword match".to_owned());
    }
    Ok(())
}
