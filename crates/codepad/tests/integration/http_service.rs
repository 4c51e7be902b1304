use std::time::Duration;

use codepad::{ExecutionRequest, ExecutionService, HttpExecutionService, ServiceError};

use super::{closed_url, serve_once, serve_silence};

fn service(url: &str) -> HttpExecutionService {
    HttpExecutionService::new(url, Duration::from_secs(5)).expect("failed to build client")
}

#[tokio::test]
async fn test_sends_form_encoded_request() {
    let server = serve_once(200, r#"{"output":"1\n","error":""}"#).await;

    service(&server.url)
        .execute(&ExecutionRequest::new("print(1)", "py"))
        .await
        .expect("request failed");

    let raw = server.request.await.expect("server saw no request");
    let lower = raw.to_lowercase();
    assert!(raw.starts_with("POST / HTTP/1.1"));
    assert!(lower.contains("content-type: application/x-www-form-urlencoded"));
    assert!(raw.ends_with("code=print%281%29&language=py&input="));
}

#[tokio::test]
async fn test_decodes_output() {
    let server = serve_once(
        200,
        r#"{"timeStamp":1,"status":200,"output":"4\n","error":"","language":"py","info":""}"#,
    )
    .await;

    let response = service(&server.url)
        .execute(&ExecutionRequest::new("print(2 + 2)", "py"))
        .await
        .expect("request failed");

    assert_eq!(response.output, "4\n");
    assert_eq!(response.error, "");
}

#[tokio::test]
async fn test_decodes_error() {
    let server = serve_once(200, r#"{"output":"","error":"SyntaxError: line 3"}"#).await;

    let response = service(&server.url)
        .execute(&ExecutionRequest::new("print(", "py"))
        .await
        .expect("request failed");

    assert_eq!(response.error, "SyntaxError: line 3");
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let server = serve_once(502, "upstream down").await;

    let err = service(&server.url)
        .execute(&ExecutionRequest::new("x", "js"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ServiceError::Status {
            status: 502,
            body: "upstream down".to_owned()
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = serve_once(200, "<html>maintenance</html>").await;

    let err = service(&server.url)
        .execute(&ExecutionRequest::new("x", "js"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Decode(_)));
}

#[tokio::test]
async fn test_mistyped_fields_are_decode_error() {
    let server = serve_once(200, r#"{"output": 42, "error": null}"#).await;

    let err = service(&server.url)
        .execute(&ExecutionRequest::new("x", "js"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Decode(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let url = closed_url().await;

    let err = service(&url)
        .execute(&ExecutionRequest::new("x", "java"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Transport(_)));
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let url = serve_silence().await;
    let service =
        HttpExecutionService::new(url, Duration::from_millis(200)).expect("failed to build client");

    let err = service
        .execute(&ExecutionRequest::new("while True: pass", "py"))
        .await
        .unwrap_err();

    assert_eq!(err, ServiceError::Timeout(Duration::from_millis(200)));
}
