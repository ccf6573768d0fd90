use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use uuid::Uuid;

use models::user::Role;
use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::service::{decode_token, AuthConfig, AuthService};

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    pub fn auth_service(&self) -> AuthService {
        AuthService::new(self.db.clone(), AuthConfig::new(self.auth.jwt_secret.clone()))
    }
}

/// Verified principal attached to the request by the bearer middleware.
#[derive(Debug, Clone, Copy)]
pub struct AuthPrincipal {
    pub id: Uuid,
    pub role: Role,
}

/// Capability predicate, checked before any mutation.
pub fn require_role(principal: &AuthPrincipal, role: Role) -> Result<(), JsonApiError> {
    if principal.role != role {
        return Err(JsonApiError::new(
            StatusCode::FORBIDDEN,
            "Forbidden",
            Some(format!("operation requires the {} role", role.as_str())),
        ));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct RegisterOutput {
    pub user_id: Uuid,
}

#[utoipa::path(post, path = "/auth/register", tag = "auth",
    responses(
        (status = 200, description = "Registered"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Conflict")
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<RegisterOutput>, JsonApiError> {
    let user = state.auth_service().register(input).await?;
    Ok(Json(RegisterOutput { user_id: user.id }))
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub token: String,
}

#[utoipa::path(post, path = "/auth/login", tag = "auth",
    responses(
        (status = 200, description = "Logged In"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let session = state.auth_service().login(input).await?;
    let user = session.user;

    let mut cookie = Cookie::new("auth_token", session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(axum_extra::extract::cookie::SameSite::Lax);
    let jar = jar.add(cookie);

    Ok((
        jar,
        Json(LoginOutput {
            user_id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            token: session.token,
        }),
    ))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::from("auth_token"));
    (jar, StatusCode::NO_CONTENT)
}

/// Global middleware: outside the whitelist, every request carries a
/// verified token, either `Authorization: Bearer <token>` or the
/// `auth_token` cookie. The decoded principal lands in request extensions.
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let path = req.uri().path().to_string();
    let method = req.method().clone();

    // Whitelist: health, register/login, API docs, CORS preflight
    if path == "/health"
        || path == "/auth/login"
        || path == "/auth/register"
        || path.starts_with("/docs")
        || path.starts_with("/api-docs")
        || method == axum::http::Method::OPTIONS
    {
        return Ok(next.run(req).await);
    }

    let token = {
        let authz = req
            .headers()
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        if let Some(h) = authz {
            let prefix = "Bearer ";
            if !h.starts_with(prefix) {
                tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(StatusCode::UNAUTHORIZED);
            }
            h[prefix.len()..].to_string()
        } else {
            // Cookie fallback
            let cookie_header = req
                .headers()
                .get(axum::http::header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");

            let mut token_val: Option<String> = None;
            for part in cookie_header.split(';') {
                let kv = part.trim();
                if let Some(rest) = kv.strip_prefix("auth_token=") {
                    token_val = Some(rest.to_string());
                    break;
                }
            }

            match token_val {
                Some(t) if !t.is_empty() => t,
                _ => {
                    tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
                    return Err(StatusCode::UNAUTHORIZED);
                }
            }
        }
    };

    match decode_token(&state.auth.jwt_secret, &token) {
        Ok(claims) => {
            req.extensions_mut().insert(AuthPrincipal { id: claims.sub, role: claims.role });
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(path = %path, err = %e, "token validation failed");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
