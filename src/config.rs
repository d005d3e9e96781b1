//! Configuration for the upstream provider, the completion
//! parameters, and the HTTP listener

use serde::{Deserialize, Serialize};
use log::debug;

pub const TYPHOON_API_BASE: &str
  = "https://api.opentyphoon.ai/v1";
pub const API_KEY_VAR: &str = "TYPHOON_API_KEY";
pub const DEFAULT_MODEL: &str = "typhoon-v2.5-30b-a3b-instruct";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: usize = 8192;
pub const DEFAULT_PORT: u16 = 8888;

/// Persona sent as the system message of every request.
pub const SYSTEM_PROMPT: &str = include_str!("persona.txt");

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig
{   /// API base URL, without the `/chat/completions` suffix
    pub api_base: String
  , /// Request timeout in seconds; `None` keeps reqwest's default (none)
    pub timeout_secs: Option<u64>
}

impl Default for ProviderConfig
{   fn default() -> Self
    {   ProviderConfig
        {   api_base: TYPHOON_API_BASE.to_string()
          , timeout_secs: Some(60)
        }
    }
}

/// Fixed parameters of every outbound chat completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSettings
{   pub model: String
  , pub temperature: f32
  , pub max_tokens: usize
  , pub system_prompt: String
}

impl Default for CompletionSettings
{   fn default() -> Self
    {   CompletionSettings
        {   model: DEFAULT_MODEL.to_string()
          , temperature: DEFAULT_TEMPERATURE
          , max_tokens: DEFAULT_MAX_TOKENS
          , system_prompt: SYSTEM_PROMPT.to_string()
        }
    }
}

/// Where the upstream API key comes from.
/// Looked up on every request, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource
{   /// Read the named environment variable
    Env(String)
  , /// Use a fixed value; `None` behaves like an unset variable
    Fixed(Option<String>)
}

impl KeySource
{   /// The API key, if configured and non-empty
    pub fn lookup(&self) -> Option<String>
    {   let key = match self
        {   KeySource::Env(var) => std::env::var(var).ok()
          , KeySource::Fixed(key) => key.clone()
        };
        key.filter(|k| !k.is_empty())
    }
}

impl Default for KeySource
{   fn default() -> Self
    {   KeySource::Env(API_KEY_VAR.to_string())
    }
}

/// Listener settings for the binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig
{   pub port: u16
}

impl Default for ServerConfig
{   fn default() -> Self
    {   ServerConfig
        {   port: DEFAULT_PORT
        }
    }
}

impl ServerConfig
{   /// Read `PORT`, falling back to the default when unset or invalid
    pub fn from_env() -> Self
    {   let port = std::env::var("PORT").ok()
          .and_then(|p| p.parse().ok())
          .unwrap_or(DEFAULT_PORT);
        debug!("Server port: {}", port);
        ServerConfig { port }
    }
}
