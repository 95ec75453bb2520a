//! HMAC-signed bearer tokens.
//!
//! Format: `<payload>.<signature>` where `payload` is base64url (no padding)
//! of the JSON [`TokenClaims`] and `signature` is the lowercase hex
//! HMAC-SHA256 of the payload segment.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use careerguide_core::identity::IdentityResolver;
use careerguide_types::error::IdentityError;
use careerguide_types::identity::{CallerResolution, RequestCredentials, TokenClaims};

type HmacSha256 = Hmac<Sha256>;

/// Sign `claims` with `secret`, producing a bearer token.
pub fn sign_token(secret: &[u8], claims: &TokenClaims) -> Result<String, IdentityError> {
    let json = serde_json::to_vec(claims).map_err(|e| IdentityError::Malformed(e.to_string()))?;
    let payload = URL_SAFE_NO_PAD.encode(json);
    let signature = compute_signature(secret, payload.as_bytes())?;
    Ok(format!("{payload}.{}", hex_encode(&signature)))
}

/// Verify `token` against `secret` and return its claims.
///
/// `now` is unix seconds; a token whose `exp` is at or before `now` is
/// rejected. The signature is checked before the payload is decoded.
pub fn verify_token(secret: &[u8], token: &str, now: i64) -> Result<TokenClaims, IdentityError> {
    let (payload, signature_hex) = token
        .split_once('.')
        .ok_or_else(|| IdentityError::Malformed("expected <payload>.<signature>".to_string()))?;

    let signature = hex_decode(signature_hex).ok_or(IdentityError::BadSignature)?;

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| IdentityError::Malformed(e.to_string()))?;
    mac.update(payload.as_bytes());
    // Constant-time comparison via the hmac crate.
    mac.verify_slice(&signature)
        .map_err(|_| IdentityError::BadSignature)?;

    let json = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| IdentityError::Malformed(format!("payload is not base64url: {e}")))?;
    let claims: TokenClaims = serde_json::from_slice(&json)
        .map_err(|e| IdentityError::Malformed(format!("invalid claims: {e}")))?;

    if claims.sub.trim().is_empty() {
        return Err(IdentityError::Malformed("empty subject".to_string()));
    }
    if claims.exp.is_some_and(|exp| exp <= now) {
        return Err(IdentityError::Expired);
    }

    Ok(claims)
}

fn compute_signature(secret: &[u8], payload: &[u8]) -> Result<Vec<u8>, IdentityError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| IdentityError::Malformed(e.to_string()))?;
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Decode a hex string. `None` on odd length or non-hex input.
fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

/// Encode bytes to a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Resolves callers from `Authorization: Bearer` tokens signed with a shared secret.
///
/// Does NOT derive Debug to keep the secret out of logs.
pub struct SignedTokenResolver {
    secret: SecretString,
}

impl SignedTokenResolver {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }
}

impl IdentityResolver for SignedTokenResolver {
    fn resolve_caller(&self, credentials: &RequestCredentials) -> CallerResolution {
        let Some(token) = credentials.bearer_token.as_deref() else {
            return CallerResolution::Unauthenticated("missing bearer token".to_string());
        };

        match verify_token(self.secret.expose_secret().as_bytes(), token, Self::now()) {
            Ok(claims) => CallerResolution::Authenticated(claims.into()),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
                CallerResolution::Unauthenticated(e.to_string())
            }
        }
    }
}
