use std::collections::BTreeSet;
use std::path::Path;

use serde_json::Value;

use crate::error::{AppError, AppResult, CaseError};

use super::TestCaseSpec;

/// Reads a case file: a JSON list of cases, or a JSON/TOML document with
/// a top-level `cases` list.
///
/// # Errors
///
/// Returns an error when the file cannot be read, does not hold a case
/// list, a case fails to decode, or two cases share an id.
pub fn parse_case_file(path: &Path) -> AppResult<Vec<TestCaseSpec>> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::case(CaseError::ReadCaseFile {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let parse_error = |reason: String| {
        AppError::case(CaseError::ParseCaseFile {
            path: path.to_path_buf(),
            reason,
        })
    };

    let document: Value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| parse_error(err.to_string()))?,
        Some(_) | None => {
            serde_json::from_str(&content).map_err(|err| parse_error(err.to_string()))?
        }
    };
    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("cases") {
            Some(Value::Array(entries)) => entries,
            Some(_) | None => return Err(parse_error("expected a 'cases' list".to_owned())),
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            return Err(parse_error("expected a list of cases".to_owned()));
        }
    };

    let mut cases = Vec::with_capacity(entries.len());
    let mut seen = BTreeSet::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let case: TestCaseSpec = serde_json::from_value(entry)
            .map_err(|err| parse_error(format!("case #{}: {}", index, err)))?;
        if !seen.insert(case.id) {
            return Err(AppError::case(CaseError::DuplicateCaseId { id: case.id }));
        }
        cases.push(case);
    }
    Ok(cases)
}
