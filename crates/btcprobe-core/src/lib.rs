pub mod address;
pub mod error;
pub mod keys;
pub mod network;
pub mod rpc;

#[cfg(test)]
mod test_util;

pub use address::{Address, AddressEncoder, AddressKind, AddressSet, KeyAddressDeriver};
pub use error::{DeriveError, RpcError};
pub use keys::{EllipticCurveProvider, PrivateKey, PublicKey};
pub use network::{Network, NetworkParams};
pub use rpc::{AuthMode, RpcClient, RpcResponse, RpcTransport};
