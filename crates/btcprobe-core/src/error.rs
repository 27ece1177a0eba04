/// Failures from key handling and address encoding.
#[derive(Debug, thiserror::Error)]
pub enum DeriveError {
    #[error("entropy source unavailable: {0}")]
    Entropy(String),

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),

    #[error("invalid witness program: version {version} with {length}-byte program")]
    InvalidWitnessProgram { version: u8, length: usize },
}

/// Failures from the JSON-RPC client.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("invalid RPC configuration: {0}")]
    InvalidConfig(String),

    #[error("RPC transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid JSON-RPC response: {0}")]
    Protocol(String),

    #[error("RPC server error {code}: {message}")]
    Remote { code: i64, message: String },

    #[error("unexpected RPC result: {0}")]
    Parse(String),
}

// reqwest puts the request URL in its message; the path may hold an API token.
impl From<reqwest::Error> for RpcError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err.without_url()))
    }
}
