//! Caller identity resolvers.
//!
//! [`ConfiguredIdentityResolver`] picks the resolver named by `auth.mode`.

pub mod headers;
pub mod signed_token;

use secrecy::SecretString;

use careerguide_core::identity::IdentityResolver;
use careerguide_types::config::{AuthConfig, AuthMode};
use careerguide_types::error::IdentityError;
use careerguide_types::identity::{CallerResolution, RequestCredentials};

use self::headers::TrustedHeaderResolver;
use self::signed_token::SignedTokenResolver;

/// Resolver selected from configuration.
pub enum ConfiguredIdentityResolver {
    SignedToken(SignedTokenResolver),
    TrustedHeaders(TrustedHeaderResolver),
    /// Signed-token mode without a secret: every caller is rejected.
    Misconfigured(String),
}

impl ConfiguredIdentityResolver {
    /// Build from config, reading the signing secret from the process environment.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::from_config_with(config, |var| std::env::var(var).ok())
    }

    pub fn from_config_with<F>(config: &AuthConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match config.mode {
            AuthMode::TrustedHeaders => {
                tracing::info!("Resolving callers from trusted proxy headers");
                Self::TrustedHeaders(TrustedHeaderResolver)
            }
            AuthMode::SignedToken => match lookup(&config.secret_env).filter(|s| !s.is_empty()) {
                Some(secret) => Self::SignedToken(SignedTokenResolver::new(SecretString::from(secret))),
                None => {
                    let err = IdentityError::MissingSecret(config.secret_env.clone());
                    tracing::warn!(error = %err, "All requests will be rejected as unauthenticated");
                    Self::Misconfigured(err.to_string())
                }
            },
        }
    }
}

impl IdentityResolver for ConfiguredIdentityResolver {
    fn resolve_caller(&self, credentials: &RequestCredentials) -> CallerResolution {
        match self {
            Self::SignedToken(resolver) => resolver.resolve_caller(credentials),
            Self::TrustedHeaders(resolver) => resolver.resolve_caller(credentials),
            Self::Misconfigured(reason) => CallerResolution::Unauthenticated(reason.clone()),
        }
    }
}
