//! Session token minting and verification.
//!
//! Tokens are stateless bearer credentials: signed claims carrying the user
//! id, name, email, and an expiry. The server never stores them; expiry and
//! signature checks are the only invalidation mechanisms.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use quills_core::UserId;

use super::AuthError;
use crate::models::User;

/// Token lifetime.
const TOKEN_EXPIRY_DAYS: i64 = 7;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    /// Display name at issue time.
    pub name: String,
    /// Normalized email at issue time.
    pub email: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

impl Claims {
    /// The user id these claims identify.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::new(self.sub)
    }
}

/// Signs and verifies session tokens with a shared HS256 secret.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    /// Create a signer from the configured secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Mint a token for a user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenEncoding` if signing fails.
    pub fn mint(&self, user: &User) -> Result<String, AuthError> {
        let exp = (Utc::now() + Duration::days(TOKEN_EXPIRY_DAYS)).timestamp();

        let claims = Claims {
            sub: user.id.as_i64(),
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
            exp,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|_| AuthError::TokenEncoding)
    }

    /// Verify a token and return its claims.
    ///
    /// Expired or tampered tokens fail verification; the caller maps the
    /// error to a 401.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if validation fails.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use quills_core::Email;

    fn signer() -> TokenSigner {
        TokenSigner::new(&SecretString::from("a".repeat(32)))
    }

    fn test_user() -> User {
        User {
            id: UserId::new(7),
            name: "Ada".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let signer = signer();
        let token = signer.mint(&test_user()).unwrap();

        // header.payload.signature
        assert_eq!(token.split('.').count(), 3);

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.name, "Ada");
        assert_eq!(claims.email, "ada@example.com");
        assert!(claims.exp > Utc::now().timestamp());
        assert_eq!(claims.user_id(), UserId::new(7));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let signer = signer();
        assert!(matches!(
            signer.verify("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(signer.verify(""), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = signer().mint(&test_user()).unwrap();
        let other = TokenSigner::new(&SecretString::from("b".repeat(32)));
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expiry_is_about_seven_days_out() {
        let token = signer().mint(&test_user()).unwrap();
        let claims = signer().verify(&token).unwrap();

        let expected = (Utc::now() + Duration::days(TOKEN_EXPIRY_DAYS)).timestamp();
        assert!((claims.exp - expected).abs() < 10);
    }
}
