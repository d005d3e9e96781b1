//! TyphoonClient against a local mock of the chat-completions API.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};

use typhoon_proxy::config::ProviderConfig;
use typhoon_proxy::error::UpstreamError;
use typhoon_proxy::request::{ChatCompletionRequest, ChatMessage};
use typhoon_proxy::{ChatCompletion, TyphoonClient};

#[derive(Clone)]
struct MockApi
{   status: StatusCode
  , body: String
  , seen: Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>
}

async fn completions(
  State(api): State<MockApi>
, headers: HeaderMap
, Json(payload): Json<serde_json::Value>
) -> (StatusCode, String)
{   let auth = headers.get("authorization")
      .map(|v| v.to_str().unwrap().to_string());
    api.seen.lock().unwrap().push((auth, payload));
    (api.status, api.body.clone())
}

/// Serve the mock on an ephemeral port and return its base URL
async fn spawn_api(api: MockApi) -> String
{   let app = Router::new()
      .route("/v1/chat/completions", post(completions))
      .with_state(api);
    let listener = tokio::net::TcpListener::bind(
      SocketAddr::from(([127, 0, 0, 1], 0))
    ).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

fn mock(status: StatusCode, body: &str) -> MockApi
{   MockApi
    {   status
      , body: body.to_string()
      , seen: Arc::new(Mutex::new(vec![]))
    }
}

fn client(api_base: String) -> TyphoonClient
{   TyphoonClient::new(&ProviderConfig
    {   api_base
      , timeout_secs: Some(5)
    }).unwrap()
}

fn sample_request() -> ChatCompletionRequest
{   ChatCompletionRequest
    {   model: "typhoon-v2.5-30b-a3b-instruct".to_string()
      , messages: vec![
          ChatMessage::system("persona")
        , ChatMessage::user("question")
        ]
      , temperature: 0.7
      , max_tokens: 8192
    }
}

#[tokio::test]
async fn test_sends_bearer_and_returns_first_choice()
{   let api = mock(StatusCode::OK, r#"{
      "id": "chatcmpl-1",
      "choices": [
        {"index": 0, "message": {"role": "assistant", "content": "first"}, "finish_reason": "stop"},
        {"index": 1, "message": {"role": "assistant", "content": "second"}, "finish_reason": "stop"}
      ]
    }"#);
    let seen = api.seen.clone();
    let base = spawn_api(api).await;

    let text = client(base)
      .send_chat_completion("test-key", &sample_request())
      .await
      .unwrap();
    assert_eq!(text, "first");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, payload) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(payload["model"], "typhoon-v2.5-30b-a3b-instruct");
    assert_eq!(payload["max_tokens"], 8192);
    assert_eq!(payload["messages"][0]["role"], "system");
    assert_eq!(payload["messages"][1]["content"], "question");
}

#[tokio::test]
async fn test_non_success_status_is_api_error()
{   let base = spawn_api(mock(
      StatusCode::UNAUTHORIZED
    , r#"{"error":{"message":"bad key"}}"#
    )).await;

    let err = client(base)
      .send_chat_completion("wrong", &sample_request())
      .await
      .unwrap_err();
    match err
    {   UpstreamError::ApiError { status, body } => {
          assert_eq!(status, 401);
          assert!(body.contains("bad key"));
        }
      , other => panic!("unexpected error: {}", other)
    }
}

#[tokio::test]
async fn test_malformed_payload_is_parse_error()
{   let base = spawn_api(mock(StatusCode::OK, "not json")).await;

    let err = client(base)
      .send_chat_completion("k", &sample_request())
      .await
      .unwrap_err();
    assert!(matches!(err, UpstreamError::ParseError(_)));
}

#[tokio::test]
async fn test_empty_choices_and_null_content()
{   let base = spawn_api(mock(StatusCode::OK, r#"{"choices":[]}"#)).await;
    let err = client(base)
      .send_chat_completion("k", &sample_request())
      .await
      .unwrap_err();
    assert_eq!(err, UpstreamError::NoChoicesInResponse);

    let base = spawn_api(mock(
      StatusCode::OK
    , r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#
    )).await;
    let err = client(base)
      .send_chat_completion("k", &sample_request())
      .await
      .unwrap_err();
    assert_eq!(err, UpstreamError::EmptyContent);
}

#[tokio::test]
async fn test_unreachable_host_is_http_error()
{   // Bind then drop to get a port with nothing listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(format!("http://{}/v1", addr))
      .send_chat_completion("k", &sample_request())
      .await
      .unwrap_err();
    assert!(matches!(err, UpstreamError::HttpError(_)));
}
