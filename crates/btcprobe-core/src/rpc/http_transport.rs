use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Url};

use crate::error::RpcError;

use super::connection::{parse_endpoint, AuthMode};
use super::{HttpReply, RpcTransport};

/// Transport-level time limits. These are the only cancellation the client
/// offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcTimeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for RpcTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            request: Duration::from_secs(30),
        }
    }
}

/// JSON-RPC over HTTP(S) POST using `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    url: Url,
    auth: Option<(String, String)>,
}

impl HttpTransport {
    /// Validate the endpoint and capture the connection settings.
    ///
    /// No request is sent here; the first network traffic happens on the
    /// first [`RpcTransport::post`].
    pub fn new(endpoint: &str, auth: &AuthMode, timeouts: RpcTimeouts) -> Result<Self, RpcError> {
        let url = parse_endpoint(endpoint)?;
        let auth = auth.credentials()?;

        let client = reqwest::Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.request)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| RpcError::InvalidConfig(format!("build HTTP client: {e}")))?;

        Ok(Self { client, url, auth })
    }

    /// Endpoint host, for log lines. Never includes credentials or the path,
    /// which some providers use to carry an API token.
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn post(&self, body: String) -> Result<HttpReply, RpcError> {
        let mut builder = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some((ref user, ref pass)) = self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpReply { status, body })
    }
}
