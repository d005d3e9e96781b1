use std::fmt;

/// Failure while talking to the chat-completion API.
/// Only ever logged; callers see a generic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError
{   /// Transport failure (connect, TLS, reset, ...)
    HttpError(String)
  , /// Request exceeded the client timeout
    Timeout
  , /// API answered with a non-2xx status
    ApiError
    {   status: u16
      , body: String
    }
  , /// Failed to parse API response
    ParseError(String)
  , /// No choices in API response
    NoChoicesInResponse
  , /// First choice carried no message content
    EmptyContent
}

impl fmt::Display for UpstreamError
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   UpstreamError::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , UpstreamError::Timeout => {
              write!(f, "Request timed out")
            }
          , UpstreamError::ApiError { status, body } => {
              write!(f, "API error ({}): {}", status, body)
            }
          , UpstreamError::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , UpstreamError::NoChoicesInResponse => {
              write!(f, "API response contained no choices")
            }
          , UpstreamError::EmptyContent => {
              write!(f, "API response choice had no content")
            }
        }
    }
}

impl std::error::Error for UpstreamError {}

impl From<reqwest::Error> for UpstreamError
{   fn from(e: reqwest::Error) -> Self
    {   if e.is_timeout()
        {   UpstreamError::Timeout
        } else if e.is_decode()
        {   UpstreamError::ParseError(e.to_string())
        } else
        {   UpstreamError::HttpError(e.to_string())
        }
    }
}

/// Terminal outcome of a rejected or failed proxy request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyError
{   /// Anything but POST
    MethodNotAllowed
  , /// Body missing, malformed, or without a usable prompt
    InvalidRequest
  , /// Credential not present in the server environment
    ServerMisconfigured
  , /// Upstream call failed for any reason
    UpstreamFailure(UpstreamError)
}

impl ProxyError
{   pub fn status_code(&self) -> u16
    {   match self
        {   ProxyError::MethodNotAllowed => 405
          , ProxyError::InvalidRequest => 400
          , ProxyError::ServerMisconfigured => 500
          , ProxyError::UpstreamFailure(_) => 500
        }
    }

    /// Message exposed to the caller. Never includes upstream detail.
    pub fn public_message(&self) -> &'static str
    {   match self
        {   ProxyError::MethodNotAllowed => "Method Not Allowed"
          , ProxyError::InvalidRequest => "Prompt is required"
          , ProxyError::ServerMisconfigured =>
              "API key is not configured on the server."
          , ProxyError::UpstreamFailure(_) =>
              "An internal server error occurred."
        }
    }

    pub fn to_response(&self) -> crate::ProxyResponse
    {   crate::ProxyResponse::json(
          self.status_code()
        , &crate::request::ErrorBody
          {   error: self.public_message().to_string()
          }
        )
    }
}

impl fmt::Display for ProxyError
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   ProxyError::UpstreamFailure(e) => {
              write!(f, "Upstream failure: {}", e)
            }
          , other => write!(f, "{}", other.public_message())
        }
    }
}

impl std::error::Error for ProxyError
{   fn source(&self) -> Option<&(dyn std::error::Error + 'static)>
    {   match self
        {   ProxyError::UpstreamFailure(e) => Some(e)
          , _ => None
        }
    }
}

impl From<UpstreamError> for ProxyError
{   fn from(e: UpstreamError) -> Self
    {   ProxyError::UpstreamFailure(e)
    }
}
