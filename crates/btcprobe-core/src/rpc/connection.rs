use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::error::RpcError;

/// How the client authenticates against the node.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// No credentials, or credentials carried in the URL itself.
    #[default]
    None,
    Basic {
        user: String,
        pass: String,
    },
    /// Bitcoin Core `.cookie` file holding a single `username:password` line.
    CookieFile(PathBuf),
}

impl AuthMode {
    /// Pick an auth mode from optional CLI-style settings.
    ///
    /// Precedence:
    /// 1. explicit `user` + `pass`
    /// 2. cookie file
    /// 3. no auth
    pub fn from_parts(
        user: Option<&str>,
        pass: Option<&str>,
        cookie_file: Option<&Path>,
    ) -> Result<Self, RpcError> {
        match (user, pass) {
            (Some(u), Some(p)) => {
                return Ok(Self::Basic {
                    user: u.to_owned(),
                    pass: p.to_owned(),
                })
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(RpcError::InvalidConfig(
                    "both rpc user and rpc pass must be set together".to_owned(),
                ));
            }
            (None, None) => {}
        }

        Ok(match cookie_file {
            Some(path) => Self::CookieFile(path.to_owned()),
            None => Self::None,
        })
    }

    /// Resolve to a `(user, pass)` pair, reading the cookie file if needed.
    pub(super) fn credentials(&self) -> Result<Option<(String, String)>, RpcError> {
        match self {
            Self::None => Ok(None),
            Self::Basic { user, pass } => Ok(Some((user.clone(), pass.clone()))),
            Self::CookieFile(path) => read_cookie_file(path).map(Some),
        }
    }
}

// Keep passwords out of logs.
impl fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { user, .. } => f
                .debug_struct("Basic")
                .field("user", user)
                .field("pass", &"<redacted>")
                .finish(),
            Self::CookieFile(path) => f.debug_tuple("CookieFile").field(path).finish(),
        }
    }
}

fn read_cookie_file(cookie_file: &Path) -> Result<(String, String), RpcError> {
    let content = std::fs::read_to_string(cookie_file).map_err(|e| {
        RpcError::InvalidConfig(format!(
            "failed to read rpc cookie file {}: {e}",
            cookie_file.display()
        ))
    })?;
    let line = content
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .ok_or_else(|| {
            RpcError::InvalidConfig(format!(
                "rpc cookie file {} is empty",
                cookie_file.display()
            ))
        })?;

    let (cookie_user, cookie_pass) = line.split_once(':').ok_or_else(|| {
        RpcError::InvalidConfig(format!(
            "rpc cookie file {} must contain `username:password`",
            cookie_file.display()
        ))
    })?;
    if cookie_user.is_empty() || cookie_pass.is_empty() {
        return Err(RpcError::InvalidConfig(format!(
            "rpc cookie file {} must contain non-empty `username:password`",
            cookie_file.display()
        )));
    }

    Ok((cookie_user.to_owned(), cookie_pass.to_owned()))
}

pub(super) fn parse_endpoint(endpoint: &str) -> Result<Url, RpcError> {
    let parsed = Url::parse(endpoint).map_err(|e| {
        RpcError::InvalidConfig(format!(
            "invalid endpoint `{endpoint}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(RpcError::InvalidConfig(format!(
                "unsupported endpoint scheme `{other}`; expected http or https"
            )))
        }
    }
    if parsed.host_str().is_none() {
        return Err(RpcError::InvalidConfig(format!(
            "endpoint `{endpoint}` has no host"
        )));
    }
    Ok(parsed)
}
