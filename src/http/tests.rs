use std::time::Duration;

use serde_json::{Map, Value, json};

use super::{RequestBody, RequestPlan, build_client, header_pairs, send, send_for_status};
use crate::args::HttpMethod;
use crate::error::{AppError, AppResult, HttpError};
use crate::test_support::{MockResponse, run_async_test, spawn_fixed_server, spawn_mock_server};

fn plan(url: String, body: RequestBody) -> RequestPlan {
    RequestPlan {
        method: HttpMethod::Post,
        url,
        headers: vec![("X-Trace".to_owned(), "abc".to_owned())],
        body,
        timeout: Duration::from_secs(5),
    }
}

#[test]
fn body_text_picks_json_only_for_containers() -> Result<(), String> {
    let cases = [
        (None, RequestBody::Empty),
        (Some(""), RequestBody::Empty),
        (Some(r#"{"a":1}"#), RequestBody::Json(json!({"a": 1}))),
        (Some("[1,2]"), RequestBody::Json(json!([1, 2]))),
        (Some("42"), RequestBody::Text("42".to_owned())),
        (Some("name=value"), RequestBody::Text("name=value".to_owned())),
    ];
    for (input, expected) in cases {
        let actual = RequestBody::from_text(input);
        if actual != expected {
            return Err(format!("{:?}: expected {:?}, got {:?}", input, expected, actual));
        }
    }
    Ok(())
}

#[test]
fn header_values_are_rendered_as_text() -> Result<(), String> {
    let mut headers = Map::new();
    headers.insert("Authorization".to_owned(), json!("Bearer t"));
    headers.insert("X-Retry".to_owned(), json!(3));
    headers.insert("X-Flag".to_owned(), json!(true));
    let pairs = header_pairs(&headers);
    let expected = vec![
        ("Authorization".to_owned(), "Bearer t".to_owned()),
        ("X-Retry".to_owned(), "3".to_owned()),
        ("X-Flag".to_owned(), "true".to_owned()),
    ];
    if pairs != expected {
        return Err(format!("Unexpected pairs {:?}", pairs));
    }
    Ok(())
}

#[test]
fn build_rejects_bad_url_and_header() -> AppResult<()> {
    let client = build_client("caseforge-test")?;
    match plan("not a url".to_owned(), RequestBody::Empty).build(&client) {
        Err(HttpError::InvalidUrl { .. }) => {}
        other => {
            return Err(AppError::validation(format!(
                "Expected invalid url, got {:?}",
                other.map(|request| request.url().to_string())
            )));
        }
    }
    let mut bad_header = plan("http://localhost/".to_owned(), RequestBody::Empty);
    bad_header.headers = vec![("bad header".to_owned(), "x".to_owned())];
    match bad_header.build(&client) {
        Err(HttpError::InvalidHeader { header }) if header == "bad header" => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected invalid header, got {:?}",
            other.map(|request| request.url().to_string())
        ))),
    }
}

#[test]
fn send_decodes_json_and_forwards_request_parts() -> AppResult<()> {
    run_async_test(async {
        let server = spawn_fixed_server(MockResponse::json(201, r#"{"id":7}"#)).await?;
        let client = build_client("caseforge-test")?;
        let response = send(
            &client,
            &plan(server.url("/items"), RequestBody::Json(json!({"name": "a"}))),
        )
        .await?;
        if response.status() != 201 || !response.json || response.body != json!({"id": 7}) {
            return Err(AppError::validation(format!(
                "Unexpected response {:?}",
                response.body
            )));
        }
        match server.requests().first() {
            Some(request)
                if request.method == "POST"
                    && request.header("x-trace") == Some("abc")
                    && request
                        .header("content-type")
                        .is_some_and(|value| value.starts_with("application/json"))
                    && request.body == r#"{"name":"a"}"# =>
            {
                Ok(())
            }
            other => Err(AppError::validation(format!("Unexpected request {:?}", other))),
        }
    })
}

#[test]
fn send_keeps_non_json_body_as_text() -> AppResult<()> {
    run_async_test(async {
        let server = spawn_fixed_server(MockResponse::text(200, "plain words")).await?;
        let client = build_client("caseforge-test")?;
        let response = send(&client, &plan(server.url("/"), RequestBody::Empty)).await?;
        if response.json || response.body != Value::String("plain words".to_owned()) {
            return Err(AppError::validation(format!(
                "Unexpected body {:?}",
                response.body
            )));
        }
        if response.view.text != "plain words" {
            return Err(AppError::validation("Raw text must be kept"));
        }
        Ok(())
    })
}

#[test]
fn send_for_status_reports_status_only() -> AppResult<()> {
    run_async_test(async {
        let server =
            spawn_mock_server(|_request| MockResponse::text(404, "missing")).await?;
        let client = build_client("caseforge-test")?;
        let request = plan(server.url("/gone"), RequestBody::Text("x".to_owned())).build(&client)?;
        let status = send_for_status(&client, request, Duration::from_secs(5)).await?;
        if status != 404 {
            return Err(AppError::validation(format!("Expected 404, got {}", status)));
        }
        Ok(())
    })
}
