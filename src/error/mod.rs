mod app;
mod case;
mod config;
mod http;
mod persist;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use case::CaseError;
pub use config::ConfigError;
pub use http::HttpError;
pub use persist::PersistError;
pub use validation::ValidationError;
