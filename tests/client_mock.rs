//! Integration tests for RestClient over real HTTP against a mockito server.

use mockito::{Matcher, Server};
use rest_client::{Error, FormUrlEncoded, HttpTransport, RestClient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

#[derive(Debug, Serialize)]
struct Order {
    item: String,
}

fn client_for(server: &Server) -> RestClient {
    RestClient::builder()
        .base_address(format!("{}/", server.url()))
        .request_content_type("application/json")
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
async fn get_as_decodes_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/users/1")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":1,"name":"Ada"}"#)
        .create_async()
        .await;

    let user: User = client_for(&server).get_as("users/1").await.unwrap();
    assert_eq!(
        user,
        User {
            id: 1,
            name: "Ada".to_string()
        }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn untyped_post_returns_503_as_response() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/orders")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({"item": "X"})))
        .with_status(503)
        .with_body("try later")
        .create_async()
        .await;

    let response = client_for(&server)
        .post(
            "orders",
            &Order {
                item: "X".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 503);
    assert_eq!(response.text().await.unwrap(), "try later");
    mock.assert_async().await;
}

#[tokio::test]
async fn typed_call_on_404_is_api_call_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/users/9")
        .with_status(404)
        .with_body("<h1>missing</h1>")
        .create_async()
        .await;

    let err = client_for(&server)
        .delete_as::<User>("users/9")
        .await
        .unwrap_err();
    match err {
        Error::ApiCall { status, reason } => {
            assert_eq!(status, 404);
            assert_eq!(reason, "Not Found");
        }
        other => panic!("expected ApiCall, got {other:?}"),
    }
}

/// Serve one connection with a raw status line, then close.
async fn serve_status_line(status_line: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "{}\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{{}}",
            status_line
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{}/", addr)
}

#[tokio::test]
async fn api_call_error_keeps_server_reason_phrase() {
    let base = serve_status_line("HTTP/1.1 503 Backend Overloaded").await;
    let client = RestClient::builder().base_address(base).build().unwrap();

    let err = client
        .get_as::<serde_json::Value>("status")
        .await
        .unwrap_err();
    match err {
        Error::ApiCall { status, reason } => {
            assert_eq!(status, 503);
            assert_eq!(reason, "Backend Overloaded");
        }
        other => panic!("expected ApiCall, got {other:?}"),
    }
}

#[tokio::test]
async fn injected_reqwest_transport_is_used() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/users/4")
        .match_header("x-tenant", "acme")
        .with_status(200)
        .with_body(r#"{"id":4,"name":"Barbara"}"#)
        .create_async()
        .await;

    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert("x-tenant", reqwest::header::HeaderValue::from_static("acme"));
    let http = reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .unwrap();

    let client = RestClient::builder()
        .base_address(format!("{}/", server.url()))
        .transport(Arc::new(HttpTransport::from_client(http)))
        .build()
        .unwrap();
    let user: User = client.get_as("users/4").await.unwrap();
    assert_eq!(user.name, "Barbara");
    mock.assert_async().await;
}

#[tokio::test]
async fn typed_put_with_unexpected_shape_is_deserialization_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("PUT", "/users/1")
        .with_status(200)
        .with_body(r#"{"id":"not a number"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .put_as::<User, _>(
            "users/1",
            &User {
                id: 1,
                name: "Ada".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Deserialization(_)));
}

#[tokio::test]
async fn bearer_token_reaches_the_server() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/me")
        .match_header("authorization", "Bearer abc123")
        .with_status(200)
        .with_body(r#"{"id":2,"name":"Grace"}"#)
        .create_async()
        .await;

    let mut client = client_for(&server);
    client.set_bearer_token("abc123");
    let user: User = client.get_as("me").await.unwrap();
    assert_eq!(user.name, "Grace");
    mock.assert_async().await;
}

#[tokio::test]
async fn basic_credentials_are_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/secure")
        .match_header("authorization", "Basic dXNlcjpwYXNz")
        .with_status(204)
        .create_async()
        .await;

    let client = RestClient::builder()
        .base_address(format!("{}/", server.url()))
        .user_and_password("user", "pass")
        .build()
        .unwrap();
    let response = client.get("secure").await.unwrap();
    assert_eq!(response.status().as_u16(), 204);
    mock.assert_async().await;
}

#[tokio::test]
async fn form_post_is_sent_verbatim() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/oauth/token")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::Exact("grant_type=password&username=ada".to_string()))
        .with_status(200)
        .with_body(r#"{"id":3,"name":"token"}"#)
        .create_async()
        .await;

    let form = FormUrlEncoded::new([("grant_type", "password"), ("username", "ada")]);
    let user: User = client_for(&server)
        .post_form_as("oauth/token", &form)
        .await
        .unwrap();
    assert_eq!(user.id, 3);
    mock.assert_async().await;
}

#[tokio::test]
async fn json_body_without_configured_content_type_has_no_content_type() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/items/1")
        .match_header("content-type", Matcher::Missing)
        .match_body(Matcher::Exact("[1,2,3]".to_string()))
        .with_status(200)
        .create_async()
        .await;

    let client = RestClient::builder()
        .base_address(format!("{}/", server.url()))
        .build()
        .unwrap();
    client.put("items/1", &[1, 2, 3]).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_base_address_fails_before_any_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = RestClient::builder()
        .request_content_type("application/json")
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn connection_failure_is_a_transport_error() {
    // Port 9 (discard) on localhost is not expected to accept HTTP connections.
    let client = RestClient::builder()
        .base_address("http://127.0.0.1:9/")
        .build()
        .unwrap();
    let err = client.get("anything").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
