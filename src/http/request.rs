use std::time::Duration;

use reqwest::Client;
use reqwest::Url;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::{Map, Value};

use crate::args::HttpMethod;
use crate::error::HttpError;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// JSON object or array, sent with a JSON content type.
    Json(Value),
    /// Anything else, sent as-is.
    Text(String),
}

impl RequestBody {
    #[must_use]
    pub fn from_text(body: Option<&str>) -> Self {
        match body {
            None => RequestBody::Empty,
            Some("") => RequestBody::Empty,
            Some(text) => match serde_json::from_str::<Value>(text) {
                Ok(value @ (Value::Object(_) | Value::Array(_))) => RequestBody::Json(value),
                Ok(Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)) | Err(_) => {
                    RequestBody::Text(text.to_owned())
                }
            },
        }
    }
}

/// A fully resolved request, ready to be built against a client.
#[derive(Debug, Clone)]
pub struct RequestPlan {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout: Duration,
}

impl RequestPlan {
    /// # Errors
    ///
    /// Returns an error for an unparsable URL or an invalid header.
    pub fn build(&self, client: &Client) -> Result<reqwest::Request, HttpError> {
        let url = Url::parse(&self.url).map_err(|err| HttpError::InvalidUrl {
            url: self.url.clone(),
            source: err,
        })?;
        let mut builder = client
            .request(self.method.to_reqwest(), url)
            .timeout(self.timeout);
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_err| HttpError::InvalidHeader { header: name.clone() })?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_err| HttpError::InvalidHeader { header: name.clone() })?;
            builder = builder.header(header_name, header_value);
        }
        builder = match &self.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Text(text) => builder.body(text.clone()),
        };
        builder
            .build()
            .map_err(|err| HttpError::RequestFailed { source: err })
    }
}

/// Header map with every value rendered as text; strings are taken verbatim.
#[must_use]
pub fn header_pairs(headers: &Map<String, Value>) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let rendered = match value {
                Value::String(text) => text.clone(),
                Value::Null
                | Value::Bool(_)
                | Value::Number(_)
                | Value::Array(_)
                | Value::Object(_) => value.to_string(),
            };
            (name.clone(), rendered)
        })
        .collect()
}
