//! `HEAD`-request size probe backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_LENGTH;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::error::Result;

use super::{parse_content_length, ProbeOutcome, SizeProbe, UnknownReason};

/// Connection settings for [`HttpSizeProbe`].
///
/// No total request timeout is applied; callers bound latency by cancelling
/// the shared token.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            user_agent: concat!("imgvariants/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Probes sizes by issuing `HEAD` requests and reading `Content-Length`.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HttpSizeProbe {
    client: Client,
}

impl HttpSizeProbe {
    /// Build a probe, falling back to a default client if `settings` are rejected.
    pub fn new(settings: &ProbeSettings) -> Self {
        Self::try_new(settings).unwrap_or_else(|e| {
            warn!("Failed to build HTTP client with settings: {}", e);
            Self::with_client(Client::new())
        })
    }

    pub fn try_new(settings: &ProbeSettings) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpSizeProbe {
    fn default() -> Self {
        Self::new(&ProbeSettings::default())
    }
}

#[async_trait]
impl SizeProbe for HttpSizeProbe {
    async fn probe_size(&self, url: &str, cancel: &CancellationToken) -> ProbeOutcome {
        if cancel.is_cancelled() {
            return ProbeOutcome::Unknown(UnknownReason::Cancelled);
        }

        trace!(url = %url, "Sending HEAD probe");

        // Dropping the send future on cancellation aborts the request.
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(url = %url, "Size probe cancelled");
                return ProbeOutcome::Unknown(UnknownReason::Cancelled);
            }
            result = self.client.head(url).send() => result,
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Error fetching image size");
                return ProbeOutcome::Unknown(UnknownReason::Transport(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = %status, "Size probe got non-success status");
            return ProbeOutcome::Unknown(UnknownReason::Unsuccessful(status.as_u16()));
        }

        let outcome = match response.headers().get(CONTENT_LENGTH) {
            None => parse_content_length(None),
            Some(value) => match value.to_str() {
                Ok(raw) => parse_content_length(Some(raw)),
                Err(_) => ProbeOutcome::Unknown(UnknownReason::InvalidLength(
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )),
            },
        };

        if let ProbeOutcome::Unknown(reason) = &outcome {
            debug!(url = %url, reason = %reason, "Size probe returned no size");
        }

        outcome
    }
}
