use log::{debug, trace, error};
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::error::UpstreamError;
use crate::request::{ChatCompletionRequest, ChatCompletionResponse};

/// Typhoon chat-completion client (OpenAI-compatible API)
#[derive(Debug, Clone)]
pub struct TyphoonClient
{   api_base: String
  , http_client: reqwest::Client
}

impl TyphoonClient
{   pub fn new(config: &ProviderConfig)
      -> Result<Self, UpstreamError>
    {   debug!("Creating TyphoonClient for {}", config.api_base);
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs
        {   builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(|e| {
          error!("Failed to build HTTP client: {}", e);
          UpstreamError::HttpError(e.to_string())
        })?;

        Ok(TyphoonClient
        {   api_base: config.api_base.trim_end_matches('/').to_string()
          , http_client
        })
    }

    fn completions_url(&self) -> String
    {   format!("{}/chat/completions", self.api_base)
    }
}

#[async_trait::async_trait]
impl super::ChatCompletion for TyphoonClient
{   async fn send_chat_completion(
      &self
    , api_key: &str
    , request: &ChatCompletionRequest
    ) -> Result<String, UpstreamError>
    {   debug!("Sending chat completion for model: {}", request.model);
        trace!("Typhoon request: {:?}", request);

        let response = self.http_client
          .post(self.completions_url())
          .bearer_auth(api_key)
          .json(request)
          .send()
          .await
          .map_err(UpstreamError::from)?;

        let status = response.status();
        trace!("Typhoon response status: {}", status);

        if !status.is_success()
        {   let body = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            return Err(UpstreamError::ApiError
            {   status: status.as_u16()
              , body
            });
        }

        let text = response.text().await
          .map_err(UpstreamError::from)?;
        let chat_response: ChatCompletionResponse
          = serde_json::from_str(&text).map_err(|e| {
            UpstreamError::ParseError(e.to_string())
          })?;

        let choice = chat_response.choices.into_iter().next()
          .ok_or(UpstreamError::NoChoicesInResponse)?;
        debug!(
          "Completion finished: {:?}",
          choice.finish_reason
        );
        choice.message.content
          .ok_or(UpstreamError::EmptyContent)
    }
}
