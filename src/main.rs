use log::{error, warn};
use std::sync::Arc;

#[tokio::main]
async fn main()
{   env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("info")
    ).init();

    let handler = match typhoon_proxy::default_handler()
    {   Ok(h) => h
      , Err(e) => {
          error!("Failed to initialise proxy: {}", e);
          std::process::exit(1);
        }
    };

    if typhoon_proxy::config::KeySource::default().lookup().is_none()
    {   warn!(
          "{} is not set or empty; requests will be answered with 500",
          typhoon_proxy::config::API_KEY_VAR
        );
    }

    let config = typhoon_proxy::config::ServerConfig::from_env();
    if let Err(e) = typhoon_proxy::server::serve(
      Arc::new(handler)
    , &config
    ).await
    {   error!("Server error: {}", e);
        std::process::exit(1);
    }
}
