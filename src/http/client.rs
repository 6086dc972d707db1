use reqwest::Client;

use crate::error::{AppError, AppResult, HttpError};

/// Builds the shared client. Timeouts are applied per request.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialised.
pub fn build_client(user_agent: &str) -> AppResult<Client> {
    Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
