//! Auth handlers: login, refresh-token, change-password.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use shopfront_core::config::AuthConfig;

use crate::dto::request::{ChangePasswordRequest, LoginRequest};
use crate::dto::response::{ApiResponse, LoginResponse, RefreshResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<LoginResponse>>)> {
    let outcome = state.auth.login_user(&req.email, &req.password).await?;

    let cookie = refresh_cookie(
        &state.config.auth,
        outcome.tokens.refresh_token,
        state.tokens.refresh_ttl(),
    );

    Ok((
        jar.add(cookie),
        Json(ApiResponse::ok(
            "User logged in successfully!",
            LoginResponse {
                access_token: outcome.tokens.access_token,
                access_expires_at: outcome.tokens.access_expires_at,
                user: outcome.user,
            },
        )),
    ))
}

/// POST /api/v1/auth/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<ApiResponse<RefreshResponse>>)> {
    let presented = jar
        .get(&state.config.auth.refresh_cookie_name)
        .map(|c| c.value().to_owned());

    let pair = state.auth.refresh_token(presented.as_deref())?;

    let cookie = refresh_cookie(&state.config.auth, pair.refresh_token, state.tokens.refresh_ttl());

    Ok((
        jar.add(cookie),
        Json(ApiResponse::ok(
            "Access token is retrieved successfully!",
            RefreshResponse {
                access_token: pair.access_token,
                access_expires_at: pair.access_expires_at,
            },
        )),
    ))
}

/// POST /api/v1/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state
        .auth
        .change_password(&identity, &req.old_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok("Password changed successfully!", ())))
}

/// Builds the refresh cookie carrying `token`.
fn refresh_cookie(config: &AuthConfig, token: String, ttl: chrono::Duration) -> Cookie<'static> {
    Cookie::build((config.refresh_cookie_name.clone(), token))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_cookie_attributes() {
        let config = AuthConfig::default();
        let cookie = refresh_cookie(&config, "tok".to_string(), chrono::Duration::days(7));

        assert_eq!(cookie.name(), "refreshToken");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    }
}
