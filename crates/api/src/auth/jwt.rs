//! Access and refresh tokens for goalboard sessions.
//!
//! Access tokens are short-lived HS256 JWTs issued by `goalboard` and carry
//! only the user id; board roles are looked up per request. Refresh tokens
//! are opaque random strings; only their SHA-256 hash is stored in
//! `user_sessions`.

use chrono::Duration;
use goalboard_core::types::{DbId, Timestamp};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// `iss` claim of every access token this service signs.
pub const ISSUER: &str = "goalboard";

/// Shortest accepted `JWT_SECRET`, in bytes.
const MIN_SECRET_LEN: usize = 32;

/// Clock skew tolerated when checking `exp`, in seconds.
const LEEWAY_SECS: u64 = 5;

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Claims of an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's id.
    pub sub: DbId,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    /// Random per-token id, so two tokens minted in the same second differ.
    pub jti: String,
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`     |
    ///
    /// # Panics
    ///
    /// Panics on a missing or short secret and on non-positive lifetimes.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");

        let config = Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS),
            refresh_token_expiry_days: env_i64(
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            ),
        };
        if let Err(msg) = config.check() {
            panic!("{msg}");
        }
        config
    }

    /// Reject settings that would make every token useless or forgeable.
    pub fn check(&self) -> Result<(), String> {
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(format!("JWT_SECRET must be at least {MIN_SECRET_LEN} bytes"));
        }
        if self.access_token_expiry_mins <= 0 {
            return Err("JWT_ACCESS_EXPIRY_MINS must be positive".into());
        }
        if self.refresh_token_expiry_days <= 0 {
            return Err("JWT_REFRESH_EXPIRY_DAYS must be positive".into());
        }
        Ok(())
    }

    /// Access token lifetime in seconds, as reported to clients.
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid integer")),
        Err(_) => default,
    }
}

/// Sign an access token for `user_id`.
pub fn generate_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        iss: ISSUER.to_string(),
        exp: now + config.access_token_ttl_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, issuer, and expiry of an access token.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);
    validation.leeway = LEEWAY_SECS;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// A freshly minted refresh token. `plaintext` goes to the client, `hash`
/// and `expires_at` into `user_sessions`.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub plaintext: String,
    pub hash: String,
    pub expires_at: Timestamp,
}

/// Mint a refresh token valid for the configured number of days.
pub fn issue_refresh_token(config: &JwtConfig) -> RefreshToken {
    let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    RefreshToken {
        hash: hash_refresh_token(&plaintext),
        expires_at: chrono::Utc::now() + Duration::days(config.refresh_token_expiry_days),
        plaintext,
    }
}

/// SHA-256 hex digest of a refresh token.
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    fn sign(claims: &Claims, config: &JwtConfig) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = test_config();
        let token = generate_access_token(42, &config).expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            iss: ISSUER.to_string(),
            exp: now - 60,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        assert!(validate_token(&sign(&claims, &config), &config).is_err());
    }

    #[test]
    fn test_foreign_issuer_fails() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            iss: "someone-else".to_string(),
            exp: now + 600,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        assert!(validate_token(&sign(&claims, &config), &config).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "another-secret-that-is-also-long-enough".to_string(),
            ..test_config()
        };

        let token = generate_access_token(1, &config_a).expect("token generation should succeed");
        assert!(validate_token(&token, &config_b).is_err());
    }

    #[test]
    fn test_refresh_token_expiry_and_hash() {
        let config = test_config();
        let token = issue_refresh_token(&config);

        assert_eq!(token.hash, hash_refresh_token(&token.plaintext));
        assert_eq!(token.hash.len(), 64);
        assert_eq!(token.plaintext.len(), 64);
        let days = (token.expires_at - chrono::Utc::now()).num_hours() / 24;
        assert!((6..=7).contains(&days));
    }

    #[test]
    fn test_config_check() {
        assert!(test_config().check().is_ok());
        assert!(JwtConfig { secret: "short".into(), ..test_config() }.check().is_err());
        assert!(JwtConfig { access_token_expiry_mins: 0, ..test_config() }.check().is_err());
        assert!(JwtConfig { refresh_token_expiry_days: -1, ..test_config() }.check().is_err());
    }
}
