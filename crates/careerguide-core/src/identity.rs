//! Caller identity resolution port.
//!
//! The request boundary depends on this trait only, so the identity
//! provider can be swapped without touching handlers or services.

use careerguide_types::identity::{CallerResolution, RequestCredentials};

/// Resolves the caller of a request from its credentials.
///
/// Resolution is local (signature check, header read), so the trait is
/// synchronous. Implementations live in careerguide-infra.
pub trait IdentityResolver: Send + Sync {
    fn resolve_caller(&self, credentials: &RequestCredentials) -> CallerResolution;
}
