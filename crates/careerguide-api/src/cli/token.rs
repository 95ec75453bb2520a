//! `cguide token issue`: mint a signed bearer token for local development.

use careerguide_infra::identity::signed_token::sign_token;
use careerguide_types::config::AppConfig;
use careerguide_types::error::IdentityError;
use careerguide_types::identity::TokenClaims;

/// Claims for a token issued now, expiring after `ttl_secs` if given.
pub fn build_claims(
    subject: String,
    email: Option<String>,
    name: Option<String>,
    ttl_secs: Option<i64>,
    now: i64,
) -> TokenClaims {
    TokenClaims {
        sub: subject,
        email,
        name,
        exp: ttl_secs.map(|ttl| now + ttl),
    }
}

pub fn issue_token(config: &AppConfig, claims: &TokenClaims, json: bool) -> anyhow::Result<()> {
    let secret = std::env::var(&config.auth.secret_env)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| IdentityError::MissingSecret(config.auth.secret_env.clone()))?;

    let token = sign_token(secret.as_bytes(), claims)?;

    if json {
        let out = serde_json::json!({ "token": token, "claims": claims });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{token}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_claims_expiry() {
        let claims = build_claims("u".into(), None, None, Some(60), 1_000);
        assert_eq!(claims.exp, Some(1_060));
        let forever = build_claims("u".into(), None, None, None, 1_000);
        assert!(forever.exp.is_none());
    }
}
