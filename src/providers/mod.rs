//! Chat-completion provider implementations

pub mod typhoon;

pub use typhoon::TyphoonClient;

use crate::error::UpstreamError;
use crate::request::ChatCompletionRequest;

/// Narrow seam in front of the upstream API.
/// Returns the text of the first completion choice.
#[async_trait::async_trait]
pub trait ChatCompletion: Send + Sync
{   async fn send_chat_completion(
      &self
    , api_key: &str
    , request: &ChatCompletionRequest
    ) -> Result<String, UpstreamError>;
}
