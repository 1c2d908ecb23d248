//! HTTP implementation of [`UserSource`] over `reqwest`.

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{FetchError, UserSource, decode_users};
use crate::config::SourceConfig;
use crate::constants::USER_AGENT;
use crate::models::RemoteUser;

/// Fetches users with a single unauthenticated GET.
#[derive(Debug, Clone)]
pub struct HttpUserSource {
    client: reqwest::Client,
    url: String,
}

impl HttpUserSource {
    /// Build a source for the configured endpoint.
    ///
    /// No timeout is applied unless `timeout_secs` is set.
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Transport(error_chain(&e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    async fn fetch_users(&self) -> Result<Vec<RemoteUser>, FetchError> {
        debug!(url = %self.url, "requesting users");

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(error_chain(&e)))?;

        let status = resp.status();
        debug!(%status, "response received");

        let resp = resp
            .error_for_status()
            .map_err(|e| FetchError::Transport(error_chain(&e)))?;

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Transport(error_chain(&e)))?;
        debug!(bytes = body.len(), "response body read");

        decode_users(&body)
    }
}

/// Join an error and its sources into one line, outermost first.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Layer(&'static str, Option<Box<Layer>>);

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.1.as_deref().map(|l| l as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn error_chain_joins_sources() {
        let err = Layer(
            "error sending request",
            Some(Box::new(Layer("connection refused", None))),
        );
        assert_eq!(error_chain(&err), "error sending request: connection refused");
    }

    #[test]
    fn error_chain_skips_repeated_text() {
        let err = Layer("timed out", Some(Box::new(Layer("timed out", None))));
        assert_eq!(error_chain(&err), "timed out");
    }

    #[test]
    fn new_keeps_configured_url() {
        let config = SourceConfig {
            url: "http://127.0.0.1:9/users".to_string(),
            timeout_secs: Some(5),
        };
        let source = HttpUserSource::new(&config).unwrap();
        assert_eq!(source.url, "http://127.0.0.1:9/users");
    }
}
