//! Identity from headers injected by an authenticating reverse proxy.
//!
//! Only safe when the proxy strips these headers from client requests.

use careerguide_core::identity::IdentityResolver;
use careerguide_types::identity::{CallerResolution, ExternalIdentity, RequestCredentials};

pub const SUBJECT_HEADER: &str = "x-auth-subject";
pub const EMAIL_HEADER: &str = "x-auth-email";
pub const NAME_HEADER: &str = "x-auth-name";

#[derive(Debug, Default, Clone, Copy)]
pub struct TrustedHeaderResolver;

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl IdentityResolver for TrustedHeaderResolver {
    fn resolve_caller(&self, credentials: &RequestCredentials) -> CallerResolution {
        match non_blank(&credentials.forwarded_subject) {
            Some(subject) => CallerResolution::Authenticated(ExternalIdentity {
                subject,
                email: non_blank(&credentials.forwarded_email),
                name: non_blank(&credentials.forwarded_name),
            }),
            None => CallerResolution::Unauthenticated(format!("missing {SUBJECT_HEADER} header")),
        }
    }
}
