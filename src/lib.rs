pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod handler;
pub mod server;

use serde::Serialize;

pub use handler::ProxyHandler;
pub use providers::{ChatCompletion, TyphoonClient};

/*

typhoon-proxy forwards a caller's prompt, with a fixed persona as the
system message, to the Typhoon chat-completion API and relays the
first choice back as JSON.

  POST /api-proxy {"prompt": "..."}
    -> 200 {"response": "..."}
    -> 400 / 405 / 500 {"error": "..."}

typhoon-proxy/
├── src/
│   ├── lib.rs          # ProxyResponse + re-exports
│   ├── error.rs        # ProxyError / UpstreamError
│   ├── config.rs       # key source, completion + server settings
│   ├── request.rs      # inbound/outbound wire types
│   ├── handler.rs      # ProxyHandler: validate, forward, map
│   ├── providers/      # ChatCompletion trait + Typhoon client
│   ├── server.rs       # axum routes
│   └── main.rs         # binary
└── tests/

*/

/// Platform-neutral response: a status code and a JSON text body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse
{   pub status_code: u16
  , pub body: String
}

impl ProxyResponse
{   pub fn json<T: Serialize>(status_code: u16, body: &T) -> Self
    {   match serde_json::to_string(body)
        {   Ok(body) => ProxyResponse
            {   status_code
              , body
            }
          , Err(e) => {
              log::error!("Failed to serialize response body: {}", e);
              ProxyResponse
              {   status_code: 500
                , body: INTERNAL_ERROR_BODY.to_string()
              }
            }
        }
    }
}

const INTERNAL_ERROR_BODY: &str
  = r#"{"error":"An internal server error occurred."}"#;

/// Build a handler wired to the real Typhoon API with the
/// default settings and `TYPHOON_API_KEY` from the environment.
pub fn default_handler()
  -> Result<ProxyHandler, error::UpstreamError>
{   let client = TyphoonClient::new(
      &config::ProviderConfig::default()
    )?;
    Ok(ProxyHandler::new(
      std::sync::Arc::new(client)
    , config::KeySource::default()
    , config::CompletionSettings::default()
    ))
}
