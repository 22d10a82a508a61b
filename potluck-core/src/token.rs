//! Access-token verification.
//!
//! Tokens are HMAC-SHA256 signed JWTs whose claims carry the caller's
//! identity (an email) plus a scope name. The resolver only ever asks one
//! question of this module: "give me the verified claims of this token for
//! this scope".

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use jwt::{SignWithKey, VerifyWithKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::TokenError;

/// Scope name for ordinary API access tokens.
pub const ACCESS_SCOPE: &str = "access";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Email of the authenticated caller.
    pub identity: String,
    pub scope: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signing/verification key shared with the token issuer.
#[derive(Clone)]
pub struct TokenKey(Hmac<Sha256>);

impl TokenKey {
    pub fn new(secret: &[u8]) -> Self {
        // HMAC accepts keys of any length
        Self(Hmac::new_from_slice(secret).expect("HMAC key construction is infallible"))
    }
}

pub fn issue_token(
    identity: &str,
    scope: &str,
    ttl: Duration,
    key: &TokenKey,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let claims = Claims {
        identity: identity.to_string(),
        scope: scope.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };
    Ok(claims.sign_with_key(&key.0)?)
}

/// Verify a token's signature, scope and expiry, returning its claims.
pub fn decode_token(token: &str, scope: &str, key: &TokenKey) -> Result<Claims, TokenError> {
    let claims: Claims = token.verify_with_key(&key.0)?;

    if claims.scope != scope {
        return Err(TokenError::WrongScope(claims.scope));
    }
    if claims.exp < Utc::now().timestamp() {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
