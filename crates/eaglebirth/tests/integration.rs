//! Dispatcher tests against a mockito server

use std::time::Duration;

use eaglebirth::{EagleBirth, ErrorKind, Fields, FileSource, Files, Method, USER_AGENT_VALUE};
use mockito::Matcher;
use serde_json::json;

const API_KEY: &str = "eb_test_integration";

fn client_for(server: &mockito::Server) -> EagleBirth {
    EagleBirth::builder(API_KEY)
        .base_url(server.url())
        .timeout(Duration::from_secs(5))
        .build()
        .expect("Client should build")
}

#[tokio::test]
async fn test_post_sends_credentials_and_json_body() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/app/messaging/email/")
        .match_header("authorization", format!("Bearer {API_KEY}").as_str())
        .match_header("user-agent", USER_AGENT_VALUE)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "email": "ada@example.com",
            "subject": "Hi",
            "message": "Hello"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"ok"}"#)
        .create_async()
        .await;

    let fields = Fields::new()
        .with("email", "ada@example.com")
        .with("subject", "Hi")
        .with("message", "Hello")
        .with("reply_to", None::<String>);

    let response = client_for(&server)
        .dispatch(Method::Post, "/app/messaging/email/", fields, Files::new())
        .await
        .expect("Dispatch should succeed");

    assert_eq!(response, json!({"status": "ok"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_sends_fields_as_query() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/app/storage/file/content/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("path".into(), "docs/a.pdf".into()),
            Matcher::UrlEncoded("token".into(), "t0k".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"content":"abc"}"#)
        .create_async()
        .await;

    let fields = Fields::new()
        .with("path", "docs/a.pdf")
        .with("token", "t0k")
        .with("password", None::<String>);

    let response = client_for(&server)
        .dispatch(
            Method::Get,
            "/app/storage/file/content/",
            fields,
            Files::new(),
        )
        .await
        .expect("Dispatch should succeed");

    assert_eq!(response["content"], "abc");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_files_switch_to_multipart() {
    let mut server = mockito::Server::new_async().await;

    let dir = tempfile::tempdir().expect("Temp dir");
    let path = dir.path().join("report.txt");
    std::fs::write(&path, "file-body-contents").expect("Write temp file");

    let mock = server
        .mock("POST", "/app/storage/file/")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="path""#.to_string()),
            Matcher::Regex("uploads".to_string()),
            Matcher::Regex(r#"name="file"; filename="report.txt""#.to_string()),
            Matcher::Regex("file-body-contents".to_string()),
        ]))
        .with_status(201)
        .with_body(r#"{"file_id":"f_1"}"#)
        .create_async()
        .await;

    let fields = Fields::new().with("path", "uploads");
    let files = Files::new().with("file", FileSource::path(&path));

    let response = client_for(&server)
        .dispatch(Method::Post, "/app/storage/file/", fields, files)
        .await
        .expect("Upload should succeed");

    assert_eq!(response, json!({"file_id": "f_1"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_file_fails_before_sending() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/app/storage/file/")
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("Temp dir");
    let missing = dir.path().join("missing.png");
    let files = Files::new().with("file", FileSource::path(&missing));

    let err = client_for(&server)
        .dispatch(Method::Post, "/app/storage/file/", Fields::new(), files)
        .await
        .expect_err("Missing file should fail");

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(
        err.message(),
        format!("File not found: {}", missing.display())
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_auth_statuses() {
    let mut server = mockito::Server::new_async().await;

    for status in [401, 403] {
        let path = format!("/auth/{status}");
        let mock = server
            .mock("POST", path.as_str())
            .with_status(status)
            .with_body(r#"{"detail":"Invalid API key"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .dispatch(Method::Post, &path, Fields::new(), Files::new())
            .await
            .expect_err("Auth failure expected");

        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.message(), "Invalid API key");
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_rate_limit_reads_retry_after() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/app/messaging/sms/")
        .with_status(429)
        .with_header("retry-after", "30")
        .with_body(r#"{"message":"Too many requests"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .dispatch(
            Method::Post,
            "/app/messaging/sms/",
            Fields::new(),
            Files::new(),
        )
        .await
        .expect_err("Rate limit expected");

    assert_eq!(err.kind(), ErrorKind::RateLimit);
    assert_eq!(err.retry_after(), Some(30));
    assert_eq!(err.message(), "Too many requests");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_other_client_error_is_validation() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/teapot/")
        .with_status(418)
        .with_body("not json")
        .create_async()
        .await;

    let err = client_for(&server)
        .dispatch(Method::Post, "/teapot/", Fields::new(), Files::new())
        .await
        .expect_err("Validation error expected");

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.message(), "API request failed");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/app/users/")
        .with_status(500)
        .with_body(r#"{"message":"Internal failure","trace":"x"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .dispatch(Method::Post, "/app/users/", Fields::new(), Files::new())
        .await
        .expect_err("Server error expected");

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), "Internal failure");
    assert_eq!(
        err.body(),
        Some(r#"{"message":"Internal failure","trace":"x"}"#)
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Bind ephemeral port");
    let port = listener.local_addr().expect("Local addr").port();
    drop(listener);

    let client = EagleBirth::builder(API_KEY)
        .base_url(format!("http://127.0.0.1:{port}"))
        .timeout(Duration::from_secs(2))
        .build()
        .expect("Client should build");

    let err = client
        .dispatch(Method::Post, "/app/users/", Fields::new(), Files::new())
        .await
        .expect_err("Connection should fail");

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.status().is_none());
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/app/users/delete_app_user/")
        .with_status(204)
        .create_async()
        .await;

    let response = client_for(&server)
        .dispatch(
            Method::Post,
            "/app/users/delete_app_user/",
            Fields::new().with("user_id", "u_1"),
            Files::new(),
        )
        .await
        .expect("Dispatch should succeed");

    assert!(response.is_null());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Bind ephemeral port");
    let port = listener.local_addr().expect("Local addr").port();

    // Accept and hold connections without ever answering
    let silent = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client = EagleBirth::builder(API_KEY)
        .base_url(format!("http://127.0.0.1:{port}"))
        .timeout(Duration::from_millis(300))
        .build()
        .expect("Client should build");

    let err = client
        .dispatch(Method::Post, "/app/users/", Fields::new(), Files::new())
        .await
        .expect_err("Request should time out");

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.message(), "no response received");
    silent.abort();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_dispatches_get_their_own_results() {
    const PATH: &str = "/app/code_validation/check_validated_code/";
    let mut server = mockito::Server::new_async().await;

    let mut mocks = Vec::with_capacity(50);
    for i in 0..50 {
        let mock = server
            .mock("POST", PATH)
            .match_body(Matcher::Json(json!({ "code_id": format!("code_{i}") })));
        let mock = if i % 5 == 0 {
            mock.with_status(500)
                .with_body(json!({ "message": format!("failure {i}") }).to_string())
        } else {
            mock.with_status(200)
                .with_body(json!({ "code_id": format!("code_{i}"), "index": i }).to_string())
        };
        mocks.push(mock.expect(1).create_async().await);
    }

    let client = client_for(&server);
    let calls = (0..50).map(|i| {
        let client = client.clone();
        async move {
            let result = client
                .dispatch(
                    Method::Post,
                    PATH,
                    Fields::new().with("code_id", format!("code_{i}")),
                    Files::new(),
                )
                .await;
            (i, result)
        }
    });

    let results = futures::future::join_all(calls).await;

    assert_eq!(results.len(), 50);
    for (i, result) in results {
        if i % 5 == 0 {
            let err = result.expect_err("Every fifth call should fail");
            assert_eq!(err.kind(), ErrorKind::Api, "call {i}");
            assert_eq!(err.status(), Some(500), "call {i}");
            assert_eq!(err.message(), format!("failure {i}"));
        } else {
            let response = result.expect("Call should succeed");
            assert_eq!(
                response,
                json!({ "code_id": format!("code_{i}"), "index": i })
            );
        }
    }
    for mock in mocks {
        mock.assert_async().await;
    }
}
