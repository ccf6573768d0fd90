use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument};

use models::user;

use super::domain::{AuthSession, AuthUser, Claims, LoginInput, RegisterInput};
use super::errors::AuthError;

const PASSWORD_ALGORITHM: &str = "argon2";

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self { jwt_secret: jwt_secret.into(), token_ttl_secs: 24 * 3600 }
    }
}

/// Identity collaborator: registration, credential checks, token issuance.
/// Independent of the web framework.
pub struct AuthService {
    db: DatabaseConnection,
    cfg: AuthConfig,
}

fn to_auth_user(m: &user::Model) -> Result<AuthUser, AuthError> {
    let role = m
        .role()
        .ok_or_else(|| AuthError::Db(format!("user {} has unknown role '{}'", m.id, m.role)))?;
    Ok(AuthUser { id: m.id, email: m.email.clone(), name: m.name.clone(), role })
}

impl AuthService {
    pub fn new(db: DatabaseConnection, cfg: AuthConfig) -> Self {
        Self { db, cfg }
    }

    /// Register a new principal with a hashed password.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        if input.password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        user::validate_email(&input.email)?;
        user::validate_name(&input.name)?;

        if let Some(existing) = user::find_by_email(&self.db, &input.email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let created = user::create(&self.db, &input.email, &input.name, input.role, &hash, PASSWORD_ALGORITHM).await?;
        info!(user_id = %created.id, email = %created.email, role = %created.role, "user_registered");
        to_auth_user(&created)
    }

    /// Authenticate a principal and issue a token.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let found = user::find_by_email(&self.db, &input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&found.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        Argon2::default()
            .verify_password(input.password.as_bytes(), &parsed)
            .map_err(|_| AuthError::Unauthorized)?;

        let user = to_auth_user(&found)?;
        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    pub fn issue_token(&self, user: &AuthUser) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            role: user.role,
            iat: now as usize,
            exp: (now + self.cfg.token_ttl_secs) as usize,
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }
}

/// Verify a bearer token and return its claims. Used by the HTTP
/// middleware; kept here so token semantics live next to issuance.
pub fn decode_token(jwt_secret: &str, token: &str) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::TokenError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::user::Role;
    use uuid::Uuid;

    fn svc_for_tokens() -> AuthService {
        // Token paths never touch the connection
        AuthService::new(DatabaseConnection::default(), AuthConfig::new("test-secret"))
    }

    #[test]
    fn issued_token_round_trips() {
        let svc = svc_for_tokens();
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: "dev@example.com".into(),
            name: "Dev".into(),
            role: Role::Developer,
        };
        let token = svc.issue_token(&user).unwrap();
        let claims = decode_token("test-secret", &token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, Role::Developer);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let svc = svc_for_tokens();
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: "c@example.com".into(),
            name: "C".into(),
            role: Role::Client,
        };
        let token = svc.issue_token(&user).unwrap();
        assert!(decode_token("other-secret", &token).is_err());
    }
}
