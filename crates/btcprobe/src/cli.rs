use std::path::PathBuf;

use btcprobe_core::Network;
use clap::{Args, Parser, Subcommand};

/// Derive Bitcoin keys and addresses, and poke a node over JSON-RPC.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Network whose address encoding rules apply.
    #[arg(long, global = true, default_value = "testnet", env = "BTCPROBE_NETWORK")]
    pub network: Network,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub rpc: RpcArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args)]
pub struct RpcArgs {
    /// Node JSON-RPC URL. Providers that carry an API token in the path
    /// take the full URL here.
    #[arg(
        long,
        global = true,
        default_value = "http://127.0.0.1:8332",
        env = "BTCPROBE_RPC_URL",
        hide_env_values = true
    )]
    pub rpc_url: String,

    /// RPC username (optional; not needed for token-in-URL providers).
    #[arg(long, global = true, env = "BTCPROBE_RPC_USER")]
    pub rpc_user: Option<String>,

    /// RPC password (optional; not needed for token-in-URL providers).
    #[arg(long, global = true, env = "BTCPROBE_RPC_PASS", hide_env_values = true)]
    pub rpc_pass: Option<String>,

    /// Bitcoin Core `.cookie` file, used when no user/pass is given.
    #[arg(long, global = true, env = "BTCPROBE_RPC_COOKIE_FILE")]
    pub rpc_cookie_file: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(
        long,
        global = true,
        default_value = "30",
        env = "BTCPROBE_RPC_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub rpc_timeout_secs: u64,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a fresh private key and print its public key and address.
    Keygen,

    /// Derive the public key and every address type from a private key.
    Derive {
        /// 64 hex characters.
        #[arg(env = "BTCPROBE_SECRET_KEY", hide_env_values = true)]
        secret: String,
    },

    /// Ask the node for the balance of an address.
    Balance { address: String },

    /// Ask the node for its best block height.
    BlockCount,

    /// Send an arbitrary JSON-RPC request.
    Call {
        method: String,

        /// Positional params. Each is parsed as JSON, falling back to a
        /// plain string.
        params: Vec<String>,
    },
}
