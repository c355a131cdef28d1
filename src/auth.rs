//! Credential derivation
//!
//! A client derives its credential once, right after configuration is
//! resolved, and attaches it to every request it sends.

use base64::Engine;
use tracing::debug;

use crate::config::Config;

/// Prefix ntfy uses for access tokens
pub const TOKEN_PREFIX: &str = "tk_";

pub const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// base64 of `user:password`
    Basic(String),
    Bearer(String),
}

impl Credential {
    /// Derive the credential for a resolved configuration.
    ///
    /// User and password together take priority. Otherwise a token is used,
    /// but only when it carries the ntfy token prefix. Anything else yields
    /// no credential.
    pub fn resolve(config: &Config) -> Option<Credential> {
        let user = config.user.as_deref().filter(|u| !u.is_empty());
        let password = config.password.as_deref().filter(|p| !p.is_empty());

        let credential = match (user, password, config.token.as_deref()) {
            (Some(user), Some(password), _) => Some(Credential::Basic(
                base64::engine::general_purpose::STANDARD.encode(format!("{user}:{password}")),
            )),
            (_, _, Some(token)) if token.starts_with(TOKEN_PREFIX) => {
                Some(Credential::Bearer(token.to_string()))
            }
            _ => None,
        };

        debug!(
            kind = credential.as_ref().map(Credential::scheme).unwrap_or("none"),
            "Resolved ntfy credential"
        );
        credential
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            Credential::Basic(_) => "Basic",
            Credential::Bearer(_) => "Bearer",
        }
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        match self {
            Credential::Basic(encoded) => format!("Basic {encoded}"),
            Credential::Bearer(token) => format!("Bearer {token}"),
        }
    }
}
