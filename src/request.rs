//! Wire types: the inbound prompt, the outbound chat completion,
//! and the JSON bodies returned to the caller.

use serde::{Deserialize, Serialize};

/// Inbound body. `prompt` stays a raw value so that a non-string
/// prompt is reported as a missing prompt rather than a parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptRequest
{   #[serde(default)]
    pub prompt: Option<serde_json::Value>
}

impl PromptRequest
{   /// The prompt text, if present, a string, and non-empty.
    pub fn prompt_text(&self) -> Option<&str>
    {   match &self.prompt
        {   Some(serde_json::Value::String(s)) if !s.is_empty() => {
              Some(s.as_str())
            }
          , _ => None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

impl ChatMessage
{   pub fn system(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: "system".to_string()
          , content: content.into()
        }
    }

    pub fn user(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: "user".to_string()
          , content: content.into()
        }
    }
}

/// OpenAI-compatible chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub temperature: f32
  , pub max_tokens: usize
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse
{   pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ChoiceMessage
  , #[serde(default)]
    pub finish_reason: Option<String>
}

/// Assistant message in a reply; `content` may be null upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage
{   #[serde(default)]
    pub role: Option<String>
  , #[serde(default)]
    pub content: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyBody
{   pub response: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody
{   pub error: String
}
