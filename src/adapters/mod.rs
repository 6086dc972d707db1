//! Concrete collaborators for the service layer.
mod cases;
mod recorder;


pub use cases::{FileCaseRepository, InMemoryCaseRepository};
pub use recorder::{JsonlRecorder, NoopRecorder};
