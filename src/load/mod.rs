//! Bounded-concurrency, fixed-duration load generation over a case or an ad-hoc target.
mod generator;
mod ramp;
mod source;


pub use generator::{LoadGenerator, LoadPlan, LoadRun};
pub use ramp::{RampSchedule, RampUp};
pub use source::{CustomTarget, LoadSource};
