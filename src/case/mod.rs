//! Stored test cases as the engine reads them.
mod file;
mod types;

#[cfg(test)]
mod tests;

pub use file::parse_case_file;
pub use types::TestCaseSpec;
