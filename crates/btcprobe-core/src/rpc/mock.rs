use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::RpcError;

use super::{HttpReply, RpcTransport};

enum Canned {
    Result(serde_json::Value),
    Error { code: i64, message: String },
    Raw(HttpReply),
    TransportFailure(String),
}

/// A mock transport for testing. Replays canned replies in order and keeps
/// every request body it was handed, populated via the builder pattern.
///
/// `Result` and `Error` replies echo the id of the request they answer.
pub struct MockTransport {
    replies: Mutex<VecDeque<Canned>>,
    requests: Mutex<Vec<serde_json::Value>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            replies: VecDeque::new(),
        }
    }

    /// Requests seen so far, decoded as JSON.
    pub fn requests(&self) -> Vec<serde_json::Value> {
        self.requests.lock().expect("mock mutex poisoned").clone()
    }
}

pub struct MockTransportBuilder {
    replies: VecDeque<Canned>,
}

impl MockTransportBuilder {
    pub fn with_result(mut self, result: serde_json::Value) -> Self {
        self.replies.push_back(Canned::Result(result));
        self
    }

    pub fn with_error(mut self, code: i64, message: &str) -> Self {
        self.replies.push_back(Canned::Error {
            code,
            message: message.to_owned(),
        });
        self
    }

    pub fn with_raw(mut self, status: u16, body: &str) -> Self {
        self.replies.push_back(Canned::Raw(HttpReply {
            status,
            body: body.to_owned(),
        }));
        self
    }

    pub fn with_transport_failure(mut self, reason: &str) -> Self {
        self.replies
            .push_back(Canned::TransportFailure(reason.to_owned()));
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            replies: Mutex::new(self.replies),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn post(&self, body: String) -> Result<HttpReply, RpcError> {
        let request: serde_json::Value =
            serde_json::from_str(&body).expect("client must send valid JSON");
        let id = request["id"].clone();
        self.requests
            .lock()
            .expect("mock mutex poisoned")
            .push(request);

        let canned = self
            .replies
            .lock()
            .expect("mock mutex poisoned")
            .pop_front()
            .expect("mock ran out of canned replies");

        match canned {
            Canned::Result(result) => Ok(HttpReply {
                status: 200,
                body: serde_json::json!({ "result": result, "error": null, "id": id }).to_string(),
            }),
            Canned::Error { code, message } => Ok(HttpReply {
                status: 500,
                body: serde_json::json!({
                    "result": null,
                    "error": { "code": code, "message": message },
                    "id": id,
                })
                .to_string(),
            }),
            Canned::Raw(reply) => Ok(reply),
            Canned::TransportFailure(reason) => Err(RpcError::Transport(reason.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order_and_records_requests() {
        let mock = MockTransport::builder()
            .with_result(serde_json::json!(1))
            .with_raw(503, "busy")
            .build();

        let first = mock
            .post(r#"{"jsonrpc":"2.0","id":"5","method":"a","params":[]}"#.to_owned())
            .await
            .unwrap();
        assert!(first.body.contains(r#""id":"5""#));

        let second = mock
            .post(r#"{"jsonrpc":"2.0","id":"6","method":"b","params":[]}"#.to_owned())
            .await
            .unwrap();
        assert_eq!(second.status, 503);

        let seen = mock.requests();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1]["method"], "b");
    }
}
