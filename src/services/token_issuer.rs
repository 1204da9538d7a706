//! Token issuer - Stateless bearer credentials.
//!
//! Issues and validates signed JWTs carrying the caller's identity.
//! Tokens are not persisted; the `jti` claim gives each one a unique id
//! so a revocation list could be added later without changing the format.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::domain::User;
use crate::errors::AppResult;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account email
    pub sub: String,
    /// Unique token id
    pub jti: Uuid,
    /// The caller's user id
    pub uid: Uuid,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and validates HS256-signed bearer tokens.
///
/// Constructed once at startup from [`JwtConfig`] and injected wherever
/// tokens are minted or checked.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    expire_days: i64,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // An expired token is rejected at its expiry instant: no clock-skew
        // grace period.
        validation.leeway = 0;
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.issuer]);

        Self {
            encoding_key: EncodingKey::from_secret(config.key_bytes()),
            decoding_key: DecodingKey::from_secret(config.key_bytes()),
            validation,
            issuer: config.issuer.clone(),
            expire_days: config.expire_days,
        }
    }

    /// Mint a signed token for an authenticated user.
    pub fn issue(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.email.clone(),
            jti: Uuid::new_v4(),
            uid: user.id,
            iss: self.issuer.clone(),
            aud: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::days(self.expire_days)).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Verify signature, issuer, audience, and expiry; return the claims.
    pub fn validate(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    const TEST_KEY: &str = "unit-test-signing-key-0123456789abcdef";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&JwtConfig::new(
            "shopcart-tests".to_string(),
            TEST_KEY.to_string(),
            7,
        ))
    }

    fn test_user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "hashed".to_string(),
            lockout_end: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_validate_roundtrip() {
        let issuer = issuer();
        let user = test_user("alice@x.com");

        let token = issuer.issue(&user).unwrap();
        let claims = issuer.validate(&token).unwrap();

        assert_eq!(claims.sub, "alice@x.com");
        assert_eq!(claims.uid, user.id);
        assert_eq!(claims.iss, "shopcart-tests");
        assert_eq!(claims.aud, "shopcart-tests");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_each_token_gets_a_fresh_jti() {
        let issuer = issuer();
        let user = test_user("alice@x.com");

        let first = issuer.validate(&issuer.issue(&user).unwrap()).unwrap();
        let second = issuer.validate(&issuer.issue(&user).unwrap()).unwrap();

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_expired_token_is_rejected_without_grace_period() {
        let issuer = issuer();
        let user = test_user("alice@x.com");
        let now = Utc::now();

        // A few seconds past expiry: still inside the 60s leeway that the
        // jsonwebtoken defaults would have granted.
        let claims = Claims {
            sub: user.email.clone(),
            jti: Uuid::new_v4(),
            uid: user.id,
            iss: "shopcart-tests".to_string(),
            aud: "shopcart-tests".to_string(),
            iat: now.timestamp() - 60,
            exp: now.timestamp() - 5,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_KEY.as_bytes()),
        )
        .unwrap();

        let result = issuer.validate(&token);
        assert!(matches!(result, Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let minting = TokenIssuer::new(&JwtConfig::new(
            "someone-else".to_string(),
            TEST_KEY.to_string(),
            7,
        ));
        let token = minting.issue(&test_user("alice@x.com")).unwrap();

        let result = issuer().validate(&token);
        assert!(matches!(result, Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let minting = TokenIssuer::new(&JwtConfig::new(
            "shopcart-tests".to_string(),
            "some-other-signing-key-0123456789abc".to_string(),
            7,
        ));
        let token = minting.issue(&test_user("alice@x.com")).unwrap();

        let result = issuer().validate(&token);
        assert!(matches!(result, Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let result = issuer().validate("not.a.token");
        assert!(matches!(result, Err(AppError::InvalidToken(_))));
    }
}
