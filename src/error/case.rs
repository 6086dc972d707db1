use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaseError {
    #[error("Failed to read case file '{path}': {source}")]
    ReadCaseFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse case file '{path}': {reason}")]
    ParseCaseFile { path: PathBuf, reason: String },
    #[error("Duplicate case id {id}.")]
    DuplicateCaseId { id: u64 },
    #[error("Test case not found")]
    NotFound { id: u64 },
    #[error("Directive '{kind}' expects {expected}.")]
    DirectiveShape {
        kind: &'static str,
        expected: &'static str,
    },
    #[error("Directive entry must be a mapping, got {found}.")]
    DirectiveNotMapping { found: String },
    #[error("Invalid regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
