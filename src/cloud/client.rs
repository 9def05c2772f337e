use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;

use crate::config::ApiConfig;

/// User agent sent with every storage API request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Create an HTTP client for the storage API.
///
/// The configured request timeout applies to each call separately, so
/// ensure-folder and upload each get the full budget.
pub fn create_http_client(api: &ApiConfig) -> Result<Client> {
    debug!("Creating HTTP client with {:?} request timeout", api.request_timeout());

    Client::builder()
        .timeout(api.request_timeout())
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_http_client() {
        let api = ApiConfig {
            request_timeout_secs: 3,
            ..Default::default()
        };
        assert!(create_http_client(&api).is_ok());
    }

    #[test]
    fn test_user_agent_names_crate() {
        assert!(USER_AGENT.starts_with("report_uploader/"));
    }
}
