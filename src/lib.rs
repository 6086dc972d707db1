//! Core library for the `caseforge` CLI.
//!
//! Stored HTTP test cases run three ways: once each with assertions, under
//! bounded concurrency for a fixed duration, or against a set of injected
//! faults that produce a tolerance score. The binary wires these modules
//! to a case file, an execution-record file, and the command line.
pub mod adapters;
pub mod application;
pub mod args;
pub mod assertion;
pub mod case;
pub mod config;
pub mod error;
pub mod executor;
pub mod fault;
pub mod http;
pub mod load;
pub mod metrics;
pub mod template;

#[cfg(test)]
mod test_support;
