use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

use super::model::{AuthenticatedUser, Claims};
use crate::core::config::AuthConfig;
use crate::core::error::AppError;

/// Verifies HS256 bearer tokens issued by the external identity service.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    issuer: String,
    leeway: u64,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            leeway: config.jwt_leeway.as_secs(),
        }
    }

    #[cfg(test)]
    fn with_parts(secret: &str, issuer: &str, leeway: std::time::Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            leeway: leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iss"]);
        validation.leeway = self.leeway;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Token subject is not a user id".to_string()))?;

        Ok(AuthenticatedUser {
            user_id,
            roles: claims.roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";
    const ISSUER: &str = "https://auth.test";

    fn sign(claims: &Claims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn valid_claims() -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            iss: ISSUER.to_string(),
            exp: chrono::Utc::now().timestamp() + 3600,
            roles: vec!["donor".to_string()],
        }
    }

    #[test]
    fn test_accepts_valid_token() {
        let validator = JwtValidator::with_parts(SECRET, ISSUER, std::time::Duration::from_secs(0));
        let claims = valid_claims();
        let user = validator.validate_token(&sign(&claims)).unwrap();
        assert_eq!(user.user_id.to_string(), claims.sub);
        assert!(user.is_donor());
        assert!(!user.is_admin());
    }

    #[test]
    fn test_rejects_wrong_issuer() {
        let validator = JwtValidator::with_parts(SECRET, "https://other.test", std::time::Duration::from_secs(0));
        let claims = valid_claims();
        assert!(validator.validate_token(&sign(&claims)).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let validator = JwtValidator::with_parts(SECRET, ISSUER, std::time::Duration::from_secs(0));
        let mut claims = valid_claims();
        claims.exp = chrono::Utc::now().timestamp() - 120;
        assert!(validator.validate_token(&sign(&claims)).is_err());
    }

    #[test]
    fn test_rejects_non_uuid_subject() {
        let validator = JwtValidator::with_parts(SECRET, ISSUER, std::time::Duration::from_secs(0));
        let mut claims = valid_claims();
        claims.sub = "not-a-uuid".to_string();
        assert!(validator.validate_token(&sign(&claims)).is_err());
    }
}
