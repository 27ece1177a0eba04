//! Bitcoin Core JSON-RPC client.
//!
//! [`RpcClient`] builds JSON-RPC 2.0 envelopes and decodes replies. The
//! bytes travel through an [`RpcTransport`]; [`HttpTransport`] is the
//! default, and tests substitute `mock::MockTransport`.

mod client;
mod connection;
mod http_transport;
#[cfg(test)]
pub mod mock;
mod protocol;

pub use client::{RpcClient, RpcResponse};
pub use connection::AuthMode;
pub use http_transport::{HttpTransport, RpcTimeouts};

use async_trait::async_trait;

use crate::error::RpcError;

/// Raw HTTP reply as seen by the JSON-RPC layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers one serialized request and returns the reply body.
///
/// Implementations must not retry; connection failures and timeouts map to
/// [`RpcError::Transport`].
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn post(&self, body: String) -> Result<HttpReply, RpcError>;
}
