//! Session token issuance and verification.
//!
//! Tokens are compact HS256 JWTs carrying the account identity plus
//! issued-at/expiry timestamps (integer seconds since epoch). Validity is
//! purely a function of signature and expiry; there is no server-side
//! revocation state.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::Account;
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies signed session tokens.
///
/// Holds the signing material captured from [`Config`] at construction;
/// nothing here reads the environment.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_min: i64,
}

impl TokenIssuer {
    /// Create an issuer from the loaded configuration.
    pub fn new(config: &Config) -> Self {
        let mut validation = Validation::default();
        // Expiry is strict `now < exp`; the library default allows 60s leeway
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret_bytes()),
            validation,
            ttl_min: config.jwt_expires_min,
        }
    }

    /// Mint a signed token for an account.
    pub fn issue(&self, account: &Account) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.ttl_min);

        let claims = Claims {
            sub: account.id,
            email: account.email.clone(),
            name: account.name.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::from)
    }

    /// Verify a token and extract its claims.
    ///
    /// Malformed structure, signature mismatch, and expiry all surface as an
    /// explicit `Err` value; verification never panics. Callers cannot
    /// mistake an invalid token for an absent claim.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        // jsonwebtoken still accepts a token during its expiry second; the
        // token is only valid while `now < exp`
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::ExpiredSignature,
            )
            .into());
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_account() -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password_hash: "hashed".to_string(),
            name: "Alice".to_string(),
            phone: None,
            position: None,
            security_code: None,
            created_at: Utc::now(),
        }
    }

    fn issuer(ttl_min: i64) -> TokenIssuer {
        TokenIssuer::new(&Config::for_tests(
            "test-secret-key-for-testing-only-32chars",
            ttl_min,
        ))
    }

    #[test]
    fn round_trip_preserves_claims() {
        let issuer = issuer(60);
        let account = test_account();

        let token = issuer.issue(&account).unwrap();
        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.sub, account.id);
        assert_eq!(claims.email, account.email);
        assert_eq!(claims.name, account.name);
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn expired_token_fails_verification() {
        // Negative TTL puts exp in the past at issuance
        let issuer = issuer(-5);
        let token = issuer.issue(&test_account()).unwrap();

        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn token_is_invalid_at_its_expiry_instant() {
        // Zero TTL puts exp at the issuance second; `now < exp` never holds
        let issuer = issuer(0);
        let token = issuer.issue(&test_account()).unwrap();

        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn tampered_token_fails_verification() {
        let issuer = issuer(60);
        let token = issuer.issue(&test_account()).unwrap();

        // Flip one character of the payload segment
        let mut bytes = token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(issuer.verify(&tampered).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_fails_verification() {
        let issuer_a = issuer(60);
        let issuer_b = TokenIssuer::new(&Config::for_tests(
            "another-secret-key-thats-also-32-chars!!",
            60,
        ));

        let token = issuer_a.issue(&test_account()).unwrap();
        assert!(issuer_b.verify(&token).is_err());
    }

    #[test]
    fn malformed_token_fails_verification() {
        let issuer = issuer(60);
        assert!(issuer.verify("not-a-jwt").is_err());
        assert!(issuer.verify("").is_err());
    }
}
