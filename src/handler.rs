use std::sync::Arc;
use log::{debug, trace, error};

use crate::config::{CompletionSettings, KeySource};
use crate::error::ProxyError;
use crate::providers::ChatCompletion;
use crate::request::{
  ChatCompletionRequest, ChatMessage, PromptRequest, ReplyBody
};

/// Validates a prompt request, forwards it upstream with the
/// persona attached, and maps the outcome to a JSON response.
/// Holds no mutable state; share it behind an `Arc`.
pub struct ProxyHandler
{   upstream: Arc<dyn ChatCompletion>
  , key_source: KeySource
  , settings: CompletionSettings
}

impl ProxyHandler
{   pub fn new(
      upstream: Arc<dyn ChatCompletion>
    , key_source: KeySource
    , settings: CompletionSettings
    ) -> Self
    {   debug!("Creating ProxyHandler for model: {}", settings.model);
        ProxyHandler
        {   upstream
          , key_source
          , settings
        }
    }

    /// Handle one request. `body` is `None` when the request had
    /// no body or it was not valid UTF-8.
    pub async fn handle(
      &self
    , method: &str
    , body: Option<&str>
    ) -> crate::ProxyResponse
    {   match self.try_handle(method, body).await
        {   Ok(text) => crate::ProxyResponse::json(
              200
            , &ReplyBody { response: text }
            )
          , Err(e) => {
              if let ProxyError::UpstreamFailure(cause) = &e
              {   error!("API Proxy Error: {}", cause);
              } else
              {   debug!("Rejected request: {}", e);
              }
              e.to_response()
            }
        }
    }

    async fn try_handle(
      &self
    , method: &str
    , body: Option<&str>
    ) -> Result<String, ProxyError>
    {   if method != "POST"
        {   return Err(ProxyError::MethodNotAllowed);
        }

        let prompt = parse_prompt(body)?;

        let api_key = self.key_source.lookup()
          .ok_or(ProxyError::ServerMisconfigured)?;

        let request = self.build_request(prompt);
        trace!("Outbound request: {:?}", request);

        let text = self.upstream
          .send_chat_completion(&api_key, &request)
          .await?;
        Ok(text)
    }

    /// System persona first, then the caller's prompt
    pub fn build_request(&self, prompt: String)
      -> ChatCompletionRequest
    {   ChatCompletionRequest
        {   model: self.settings.model.clone()
          , messages: vec![
              ChatMessage::system(
                self.settings.system_prompt.clone()
              )
            , ChatMessage::user(prompt)
            ]
          , temperature: self.settings.temperature
          , max_tokens: self.settings.max_tokens
        }
    }
}

fn parse_prompt(body: Option<&str>)
  -> Result<String, ProxyError>
{   let body = body.ok_or(ProxyError::InvalidRequest)?;
    let value: serde_json::Value = serde_json::from_str(body)
      .map_err(|e| {
        debug!("Invalid request body: {}", e);
        ProxyError::InvalidRequest
      })?;
    // Derived deserializers also accept arrays; only objects count
    if !value.is_object()
    {   return Err(ProxyError::InvalidRequest);
    }
    let request: PromptRequest = serde_json::from_value(value)
      .map_err(|_| ProxyError::InvalidRequest)?;
    request.prompt_text()
      .map(str::to_string)
      .ok_or(ProxyError::InvalidRequest)
}
