use serde::{Deserialize, Deserializer};

use crate::error::RpcError;

use super::HttpReply;

/// Longest body excerpt carried in an error message.
const BODY_EXCERPT_LEN: usize = 256;

#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) id: &'a str,
    pub(super) method: &'a str,
    pub(super) params: &'a [serde_json::Value],
}

#[derive(Deserialize)]
pub(super) struct JsonRpcResponse {
    /// `Some(Null)` when the node sent `"result": null`, `None` when the key
    /// is absent.
    #[serde(default, deserialize_with = "present")]
    pub(super) result: Option<serde_json::Value>,
    #[serde(default)]
    pub(super) error: Option<serde_json::Value>,
    #[serde(default)]
    pub(super) id: Option<serde_json::Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// Decode one HTTP reply into the `result` payload.
///
/// Bitcoin Core answers RPC errors with HTTP 500 and a JSON body, so the body
/// is decoded regardless of status. Only a non-2xx reply whose body is not
/// JSON is treated as a transport failure.
pub(super) fn decode_reply(request_id: &str, reply: &HttpReply) -> Result<serde_json::Value, RpcError> {
    let value: serde_json::Value = match serde_json::from_str(&reply.body) {
        Ok(value) => value,
        Err(_) if !reply.is_success() => {
            return Err(RpcError::Transport(
                format!(
                    "HTTP status {} with non-JSON body: {}",
                    reply.status,
                    excerpt(&reply.body)
                )
                .into(),
            ));
        }
        Err(e) => {
            return Err(RpcError::Protocol(format!(
                "decode JSON-RPC response: {e}; body={}",
                excerpt(&reply.body)
            )));
        }
    };

    if !value.is_object() {
        return Err(RpcError::Protocol(format!(
            "expected a JSON object, got: {}",
            excerpt(&reply.body)
        )));
    }

    let decoded: JsonRpcResponse = serde_json::from_value(value)
        .map_err(|e| RpcError::Protocol(format!("decode JSON-RPC response: {e}")))?;

    if let Some(id) = decoded.id.as_ref().filter(|id| !id.is_null()) {
        if id.as_str() != Some(request_id) {
            return Err(RpcError::Protocol(format!(
                "response id {id} does not match request id \"{request_id}\""
            )));
        }
    }

    if let Some(err) = decoded.error.filter(|err| !err.is_null()) {
        return Err(parse_jsonrpc_error(err));
    }

    decoded.result.ok_or_else(|| {
        RpcError::Protocol("response carries neither `result` nor `error`".to_owned())
    })
}

/// Parse a JSON-RPC error value into a structured `RpcError`.
///
/// JSON-RPC defines errors as `{"code": <int>, "message": <string>}`.
/// If the error value matches that shape, we produce `Remote`; otherwise we
/// fall back to `Protocol` with the raw JSON.
pub(super) fn parse_jsonrpc_error(err: serde_json::Value) -> RpcError {
    #[derive(Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    match serde_json::from_value::<JsonRpcError>(err.clone()) {
        Ok(parsed) => RpcError::Remote {
            code: parsed.code,
            message: parsed.message,
        },
        Err(_) => RpcError::Protocol(format!("non-standard JSON-RPC error: {err}")),
    }
}

fn excerpt(body: &str) -> &str {
    if body.len() <= BODY_EXCERPT_LEN {
        return body;
    }
    let mut end = BODY_EXCERPT_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
