//! Axum adapter exposing `ProxyHandler` over HTTP

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::Router;
use log::{debug, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::handler::ProxyHandler;

pub const PROXY_PATH: &str = "/api-proxy";
pub const NETLIFY_PROXY_PATH: &str = "/.netlify/functions/api-proxy";
/// Matches the 6 MB request payload cap of the original hosting platform
pub const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Every method and every body reaches the handler so it can
/// answer 405/400 itself
pub fn create_router(handler: Arc<ProxyHandler>) -> Router
{   Router::new()
      .route(PROXY_PATH, any(proxy))
      .route(NETLIFY_PROXY_PATH, any(proxy))
      .route("/health", get(health))
      .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
      .with_state(handler)
}

pub async fn serve(
  handler: Arc<ProxyHandler>
, config: &crate::config::ServerConfig
) -> std::io::Result<()>
{   let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("typhoon-proxy listening on http://{}", addr);
    axum::serve(listener, create_router(handler)).await
}

async fn proxy(
  State(handler): State<Arc<ProxyHandler>>
, method: Method
, body: Result<Bytes, BytesRejection>
) -> Response
{   // Oversized or unreadable bodies count as missing
    let body = match body
    {   Ok(bytes) => {
          debug!("{} {} bytes", method, bytes.len());
          Some(bytes)
        }
      , Err(e) => {
          warn!("{} body rejected: {}", method, e);
          None
        }
    };
    let text = body.as_deref()
      .and_then(|b| std::str::from_utf8(b).ok());
    handler.handle(method.as_str(), text).await.into_response()
}

async fn health() -> &'static str
{   "OK"
}

impl IntoResponse for crate::ProxyResponse
{   fn into_response(self) -> Response
    {   let status = StatusCode::from_u16(self.status_code)
          .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
          status
        , [(header::CONTENT_TYPE, "application/json")]
        , self.body
        ).into_response()
    }
}
