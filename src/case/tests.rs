use super::{TestCaseSpec, parse_case_file};
use crate::args::HttpMethod;
use crate::error::{AppError, AppResult, CaseError};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn json_case_list_decodes_defaults() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("cases.json");
    std::fs::write(
        &path,
        r#"[
            {"id": 1, "url": "http://localhost/ok", "validate": [{"status_code": 200}]},
            {"id": 2, "name": "create", "method": "post", "url": "http://localhost/items",
             "headers": {"X-Trace": 7}, "body": {"name": "widget"}, "timeout": 5,
             "variables": {"setup": ["seed db"]}}
        ]"#,
    )?;

    let cases = parse_case_file(&path)?;
    let (first, second) = match cases.as_slice() {
        [first, second] => (first, second),
        _ => return Err(AppError::case("Expected two cases")),
    };
    if first.method != HttpMethod::Get || first.body.is_some() {
        return Err(AppError::case("Unexpected defaults on first case"));
    }
    if first.validate.directives().len() != 1 {
        return Err(AppError::case("Expected one directive"));
    }
    if second.method != HttpMethod::Post {
        return Err(AppError::case("Expected POST"));
    }
    if second.body.as_deref() != Some(r#"{"name":"widget"}"#) {
        return Err(AppError::case(format!("Unexpected body: {:?}", second.body)));
    }
    if second.timeout != Some(5) || second.label() != "case 2 (create)" {
        return Err(AppError::case("Unexpected timeout or label"));
    }
    Ok(())
}

#[test]
fn toml_cases_table_decodes() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("cases.toml");
    std::fs::write(
        &path,
        r#"
[[cases]]
id = 3
url = "http://localhost/health"
body = "ping"
validate = [{ status_code_in = [200, 204] }]
"#,
    )?;
    let cases = parse_case_file(&path)?;
    match cases.first() {
        Some(case) if case.id == 3 && case.body.as_deref() == Some("ping") => Ok(()),
        Some(_) | None => Err(AppError::case("Unexpected TOML case")),
    }
}

#[test]
fn duplicate_ids_are_rejected() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("cases.json");
    std::fs::write(
        &path,
        r#"{"cases": [{"id": 1, "url": "http://a"}, {"id": 1, "url": "http://b"}]}"#,
    )?;
    match parse_case_file(&path) {
        Err(AppError::Case(CaseError::DuplicateCaseId { id: 1 })) => Ok(()),
        Err(err) => Err(AppError::case(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::case("Expected duplicate id error")),
    }
}

#[test]
fn malformed_directive_names_the_case() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("cases.json");
    std::fs::write(
        &path,
        r#"[{"id": 1, "url": "http://a", "validate": [{"gt": ["count", "ten"]}]}]"#,
    )?;
    match parse_case_file(&path) {
        Err(AppError::Case(CaseError::ParseCaseFile { reason, .. }))
            if reason.contains("case #0") && reason.contains("gt") =>
        {
            Ok(())
        }
        Err(err) => Err(AppError::case(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::case("Expected decode failure")),
    }
}

#[test]
fn validate_round_trips_as_raw_entries() -> AppResult<()> {
    let case: TestCaseSpec = serde_json::from_value(json!({
        "id": 9,
        "url": "http://a",
        "validate": [{"eq": ["error.code", 0]}]
    }))?;
    let encoded = serde_json::to_value(&case)?;
    if encoded.get("validate") != Some(&json!([{"eq": ["error.code", 0]}])) {
        return Err(AppError::case("Validate entries should serialize unchanged"));
    }
    Ok(())
}
