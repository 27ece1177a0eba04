mod cli;

use std::time::Duration;

use clap::Parser;
use eyre::{eyre, WrapErr};
use serde_json::json;

use btcprobe_core::rpc::RpcTimeouts;
use btcprobe_core::{AuthMode, KeyAddressDeriver, NetworkParams, PrivateKey, RpcClient, RpcError};

use cli::{Cli, Command, RpcArgs};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Cli::parse();

    // Results go to stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let params = args.network.params();
    let deriver = KeyAddressDeriver::new();

    match args.command {
        Command::Keygen => {
            let key = deriver.generate().context("generate private key")?;
            tracing::info!(network = %args.network, "generated new private key");
            print_key_report(&deriver, &key, &params, args.json)
        }
        Command::Derive { secret } => {
            let key = PrivateKey::from_hex(&secret).context("parse private key")?;
            print_key_report(&deriver, &key, &params, args.json)
        }
        Command::Balance { address } => {
            let client = connect(&args.rpc)?;
            let balance = client
                .get_balance(&address)
                .await
                .map_err(|err| rpc_failure(&args.rpc.rpc_url, err))?;
            if args.json {
                println!(
                    "{}",
                    json!({ "address": address, "balance_sat": balance.to_sat() })
                );
            } else {
                println!("balance: {balance}");
            }
            Ok(())
        }
        Command::BlockCount => {
            let client = connect(&args.rpc)?;
            let height = client
                .get_block_count()
                .await
                .map_err(|err| rpc_failure(&args.rpc.rpc_url, err))?;
            if args.json {
                println!("{}", json!({ "blocks": height }));
            } else {
                println!("blocks: {height}");
            }
            Ok(())
        }
        Command::Call { method, params } => {
            let client = connect(&args.rpc)?;
            let params = params.iter().map(|p| parse_param(p)).collect();
            let response = client
                .call(&method, params)
                .await
                .map_err(|err| rpc_failure(&args.rpc.rpc_url, err))?;
            if args.json {
                println!("{}", response.result);
            } else {
                println!(
                    "message: {}",
                    serde_json::to_string_pretty(&response.result)
                        .context("render RPC result")?
                );
            }
            Ok(())
        }
    }
}

fn print_key_report(
    deriver: &KeyAddressDeriver,
    key: &PrivateKey,
    params: &NetworkParams,
    as_json: bool,
) -> eyre::Result<()> {
    let public = deriver.public_key(key);
    let addresses = deriver
        .derive_all(key, params)
        .context("derive addresses")?;
    let wif = key.to_wif(params).context("encode WIF")?;

    if as_json {
        let report = json!({
            "network": params.network,
            "private_key": key.to_hex(),
            "wif": wif,
            "public_key_uncompressed": hex(&public.serialize_uncompressed()),
            "addresses": addresses,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("render key report")?
        );
        return Ok(());
    }

    println!("network:          {}", params.network);
    println!("private key:      {}", key.to_hex());
    println!("wif:              {wif}");
    println!("public key:       {}", addresses.public_key);
    println!("uncompressed:     {}", hex(&public.serialize_uncompressed()));
    for address in [
        &addresses.p2pkh,
        &addresses.p2sh,
        &addresses.p2wpkh,
        &addresses.p2wsh,
    ] {
        println!("{:<18}{address}", format!("{} address:", address.kind()));
    }
    Ok(())
}

fn connect(rpc: &RpcArgs) -> eyre::Result<RpcClient> {
    let auth = AuthMode::from_parts(
        rpc.rpc_user.as_deref(),
        rpc.rpc_pass.as_deref(),
        rpc.rpc_cookie_file.as_deref(),
    )
    .context("resolve RPC credentials")?;
    let timeouts = RpcTimeouts {
        request: Duration::from_secs(rpc.rpc_timeout_secs),
        ..RpcTimeouts::default()
    };
    RpcClient::connect_with_timeouts(&rpc.rpc_url, auth, timeouts)
        .context("configure RPC client")
}

/// JSON if it parses, a JSON string otherwise, so `call getblockhash 0` and
/// `call getbalance mmKf...` both do what you'd expect.
fn parse_param(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_owned()))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn rpc_failure(rpc_url: &str, err: RpcError) -> eyre::Report {
    let message = format_rpc_error(rpc_url, &err);
    eyre!(message).wrap_err("RPC request failed")
}

fn format_rpc_error(rpc_url: &str, err: &RpcError) -> String {
    // Drop the path (may hold an API token) and any `user:pass@` prefix.
    let authority = rpc_url
        .split("://")
        .nth(1)
        .unwrap_or(rpc_url)
        .split('/')
        .next()
        .unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let mut lines = vec![
        format!("endpoint host `{host}`"),
        format!("RPC error: {err}"),
    ];

    let source_error = err.to_string();
    match err {
        RpcError::Transport(_) if source_error.contains("401") || source_error.contains("403") => {
            lines.push(
                "hint: authentication failed; verify token-in-URL, --rpc-user/--rpc-pass, or --rpc-cookie-file"
                    .into(),
            );
        }
        RpcError::Transport(_) if source_error.contains("404") => {
            lines.push(
                "hint: endpoint path is invalid; verify the full RPC URL including token path"
                    .into(),
            );
        }
        RpcError::Transport(_) => {
            lines.push("hint: request could not be completed; verify URL format, network access, and endpoint reachability".into());
        }
        RpcError::Remote { code: -32601, .. } => {
            lines.push("hint: the node does not expose this method".into());
        }
        RpcError::Remote { code: -18 | -19, .. } => {
            lines.push("hint: wallet RPCs need a loaded wallet on the node".into());
        }
        RpcError::Protocol(_) => {
            lines.push(
                "hint: the endpoint did not answer with JSON-RPC; check that the URL points at a node RPC port"
                    .into(),
            );
        }
        _ => {}
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_param_accepts_json_and_bare_strings() {
        assert_eq!(parse_param("0"), json!(0));
        assert_eq!(parse_param("true"), json!(true));
        assert_eq!(parse_param(r#"{"verbose":1}"#), json!({ "verbose": 1 }));
        assert_eq!(
            parse_param("mmKfHs5ebWW1roeuRQLKe28YXwRLkhhSy2"),
            json!("mmKfHs5ebWW1roeuRQLKe28YXwRLkhhSy2")
        );
    }

    #[test]
    fn hex_is_lowercase() {
        assert_eq!(hex(&[0x04, 0xab, 0x00]), "04ab00");
    }

    #[test]
    fn rpc_error_format_hides_url_path_and_credentials() {
        let err = RpcError::Protocol("bad".into());
        let message = format_rpc_error("https://user:pw@node.example/secret-token", &err);
        assert!(!message.contains("secret-token"));
        assert!(!message.contains("pw"));
        assert!(message.contains("hint: the endpoint did not answer with JSON-RPC"));
    }

    #[test]
    fn rpc_error_format_flags_auth_failures() {
        let err = RpcError::Transport("HTTP status 401 with non-JSON body: ".into());
        let message = format_rpc_error("http://127.0.0.1:8332", &err);
        assert!(message.contains("127.0.0.1:8332"));
        assert!(message.contains("authentication failed"));
    }

    #[test]
    fn rpc_error_format_flags_missing_method() {
        let err = RpcError::Remote {
            code: -32601,
            message: "Method not found".into(),
        };
        let message = format_rpc_error("http://127.0.0.1:8332", &err);
        assert!(message.contains("does not expose this method"));
    }
}
