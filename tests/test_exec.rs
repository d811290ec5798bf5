//! Integration tests for the `exec` subcommand against a mock server
//!
//! The binary runs as a child process; wiremock serves from its own thread.

mod common;

use std::time::Duration;

use common::run;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_exec_get_prints_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hello"))
        .and(header("user-agent", "Mozilla/5.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Hello"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let command = format!("curl '{}/hello' -H 'User-Agent: Mozilla/5.0'", mock_server.uri());
    let response = run(&["exec"], &command);

    assert!(response.success(), "stderr: {}", response.stderr);
    assert_eq!(response.stdout, "Hello");
    assert_eq!(response.stderr, "");
}

#[tokio::test]
async fn test_exec_post_sends_body_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit"))
        .and(header("accept", "application/json"))
        .and(body_string("foo"))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let command = format!(
        "curl '{}/submit' -H 'Accept: application/json' -X POST --data-raw foo",
        mock_server.uri()
    );
    let response = run(&["exec"], &command);

    assert!(response.success(), "stderr: {}", response.stderr);
    assert_eq!(response.stdout, "created");
}

#[tokio::test]
async fn test_exec_fetch_put() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/items/1"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"name":"x"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let code = format!(
        r#"fetch("{}/items/1", {{
  "headers": {{"content-type": "application/json"}},
  "body": "{{\"name\":\"x\"}}",
  "method": "PUT",
  "mode": "cors"
}});"#,
        mock_server.uri()
    );
    let response = run(&["--fetch", "exec"], &code);

    assert!(response.success(), "stderr: {}", response.stderr);
    assert_eq!(response.stdout, "ok");
    assert_eq!(response.warnings(), vec!["mode="]);
}

#[tokio::test]
async fn test_exec_get_flag_moves_data_to_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_string("found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let command = format!("curl '{}/search' -G -d 'q=rust'", mock_server.uri());
    let response = run(&["exec"], &command);

    assert!(response.success(), "stderr: {}", response.stderr);
    assert_eq!(response.stdout, "found");
}

#[tokio::test]
async fn test_exec_http_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&mock_server)
        .await;

    let command = format!("curl '{}/missing'", mock_server.uri());
    let response = run(&["exec"], &command);

    assert_eq!(response.exit_code, 1);
    assert_eq!(response.stdout, "");
    assert_eq!(
        response.stderr,
        format!("Error: HTTP 404 Not Found for url: {}/missing\n", mock_server.uri())
    );
}

#[tokio::test]
async fn test_exec_verbose() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v"))
        .respond_with(ResponseTemplate::new(200).set_body_string("body"))
        .mount(&mock_server)
        .await;

    let command = format!("curl '{}/v' -H 'Accept: */*'", mock_server.uri());
    let response = run(&["exec", "-v"], &command);

    assert!(response.success(), "stderr: {}", response.stderr);
    assert_eq!(response.stdout, "body");
    assert_eq!(
        response.stderr,
        format!("GET {}/v headers={{'Accept': '*/*'}} data=None\nHTTP/1.1 200 OK\n", mock_server.uri())
    );
}

#[tokio::test]
async fn test_exec_decodes_charset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/latin1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"caf\xe9".to_vec(), "text/plain; charset=iso-8859-1"),
        )
        .mount(&mock_server)
        .await;

    let command = format!("curl '{}/latin1'", mock_server.uri());
    let response = run(&["exec"], &command);

    assert!(response.success(), "stderr: {}", response.stderr);
    assert_eq!(response.stdout, "caf\u{e9}");
}

#[tokio::test]
async fn test_exec_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let command = format!("curl '{}/slow'", mock_server.uri());
    let response = run(&["exec", "--timeout", "0.5"], &command);

    assert_eq!(response.exit_code, 1);
    assert!(response.stderr.starts_with("Error: Request error"), "stderr: {}", response.stderr);
}

#[test]
fn test_exec_connection_refused() {
    let response = run(&["exec"], "curl 'http://127.0.0.1:9/'");
    assert_eq!(response.exit_code, 1);
    assert!(response.stderr.starts_with("Error: Request error"), "stderr: {}", response.stderr);
}

#[test]
fn test_exec_parse_error_sends_nothing() {
    let response = run(&["exec"], "curl 'http://127.0.0.1:9/");
    assert_eq!(response.exit_code, 1);
    assert!(response.stderr.starts_with("Error: Unterminated string literal"));
}
