//! HTTP client construction, request building and response decoding.
mod client;
mod request;
mod response;

#[cfg(test)]
mod tests;

pub use client::build_client;
pub use request::{RequestBody, RequestPlan, header_pairs};
pub use response::{HttpResponse, send, send_for_status};
