//! Assertion directives decoded from case files and their evaluation against responses.
mod directive;
mod evaluate;
mod resolve;

#[cfg(test)]
mod tests;

pub use directive::{AssertionDirective, Assertions, ValueKind};
pub use evaluate::{AssertionVerdict, evaluate};
pub use resolve::{ResponseView, lookup_path};
