use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use bitcoin::Amount;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::error::RpcError;

use super::connection::AuthMode;
use super::http_transport::{HttpTransport, RpcTimeouts};
use super::protocol::{decode_reply, JsonRpcRequest};
use super::RpcTransport;

/// The `result` payload of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcResponse {
    pub id: String,
    pub result: serde_json::Value,
}

impl RpcResponse {
    /// Deserialize the result into a concrete type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, RpcError> {
        serde_json::from_value(self.result.clone())
            .map_err(|e| RpcError::Parse(format!("result of request {}: {e}", self.id)))
    }

    pub fn into_result(self) -> serde_json::Value {
        self.result
    }
}

/// Bitcoin Core compatible JSON-RPC client.
///
/// Each [`call`](Self::call) is one request and one reply with no retries.
/// The client holds no per-request state beyond an id counter, so a shared
/// reference can issue calls from several tasks.
pub struct RpcClient {
    transport: Arc<dyn RpcTransport>,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Capture the configuration for an HTTP(S) endpoint with default
    /// timeouts. Does not contact the node.
    pub fn connect(endpoint: &str, auth: AuthMode) -> Result<Self, RpcError> {
        Self::connect_with_timeouts(endpoint, auth, RpcTimeouts::default())
    }

    pub fn connect_with_timeouts(
        endpoint: &str,
        auth: AuthMode,
        timeouts: RpcTimeouts,
    ) -> Result<Self, RpcError> {
        let transport = HttpTransport::new(endpoint, &auth, timeouts)?;
        debug!(
            rpc.host = transport.host(),
            rpc.auth = ?auth,
            "rpc client configured"
        );
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(initial_request_id()),
        }
    }

    fn next_request_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::Relaxed).to_string()
    }

    /// Issue `method(params...)` and return its result.
    pub async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<RpcResponse, RpcError> {
        let id = self.next_request_id();
        debug!(
            rpc.id = %id,
            rpc.method = method,
            rpc.params = params.len(),
            "rpc call"
        );
        let req = JsonRpcRequest {
            jsonrpc: "2.0",
            id: &id,
            method,
            params: &params,
        };
        let body = serde_json::to_string(&req)
            .map_err(|e| RpcError::Protocol(format!("encode JSON-RPC request: {e}")))?;

        let reply = self.transport.post(body).await?;
        debug!(
            rpc.id = %id,
            rpc.method = method,
            status = reply.status,
            body_len = reply.body.len(),
            "rpc response"
        );
        trace!(rpc.id = %id, rpc.method = method, body = %reply.body, "rpc response body");

        let result = decode_reply(&id, &reply)?;
        Ok(RpcResponse { id, result })
    }

    /// Balance reported by the node's `getbalance` for `address`.
    pub async fn get_balance(&self, address: &str) -> Result<Amount, RpcError> {
        let response = self
            .call("getbalance", vec![serde_json::json!(address)])
            .await?;
        parse_btc_amount(&response.result)
    }

    /// Height of the node's best chain.
    pub async fn get_block_count(&self) -> Result<u64, RpcError> {
        let response = self.call("getblockcount", Vec::new()).await?;
        response
            .result
            .as_u64()
            .ok_or_else(|| RpcError::Parse(format!("getblockcount returned {}", response.result)))
    }
}

fn parse_btc_amount(value: &serde_json::Value) -> Result<Amount, RpcError> {
    let btc = value
        .as_f64()
        .ok_or_else(|| RpcError::Parse(format!("expected a numeric balance, got {value}")))?;
    Amount::from_btc(btc).map_err(|e| RpcError::Parse(format!("invalid BTC amount {btc}: {e}")))
}

fn initial_request_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
