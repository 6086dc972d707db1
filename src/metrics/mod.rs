//! Load-run metric accumulation, finalization and host snapshots.
mod accumulator;
mod histogram;
mod host;
mod types;

#[cfg(test)]
mod tests;

pub use accumulator::{LoadAccumulator, RequestSample};
pub use histogram::LatencyHistogram;
pub use host::{HostProbe, StaticHostProbe, SysinfoProbe};
pub use types::{HostSnapshot, LoadMetrics};
