use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::assertion::ResponseView;
use crate::error::HttpError;

use super::RequestPlan;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub view: ResponseView,
    /// Decoded JSON, or the raw text as a JSON string when decoding fails.
    pub body: Value,
    pub json: bool,
}

impl HttpResponse {
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.view.status
    }
}

/// Sends `plan` and reads the whole body.
///
/// # Errors
///
/// Returns a classified transport error; non-JSON bodies are not errors.
pub async fn send(client: &Client, plan: &RequestPlan) -> Result<HttpResponse, HttpError> {
    let request = plan.build(client)?;
    let response = client
        .execute(request)
        .await
        .map_err(|err| HttpError::from_transport(err, plan.timeout))?;
    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let text = response.text().await.map_err(|err| {
        if err.is_timeout() {
            HttpError::from_transport(err, plan.timeout)
        } else {
            HttpError::ReadBody { source: err }
        }
    })?;
    let (body, json) = serde_json::from_str::<Value>(&text).map_or_else(
        |_err| (Value::String(text.clone()), false),
        |value| (value, true),
    );
    Ok(HttpResponse {
        view: ResponseView::new(status, &headers, text),
        body,
        json,
    })
}

/// Sends a prebuilt request and drains the body, keeping only the status.
///
/// # Errors
///
/// Returns a classified transport error.
pub async fn send_for_status(
    client: &Client,
    request: reqwest::Request,
    timeout: Duration,
) -> Result<u16, HttpError> {
    let response = client
        .execute(request)
        .await
        .map_err(|err| HttpError::from_transport(err, timeout))?;
    let status = response.status().as_u16();
    response
        .bytes()
        .await
        .map_err(|err| HttpError::from_transport(err, timeout))?;
    Ok(status)
}

