use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::auth::jwt::{self, Claims, UserDetails};
use crate::config::Config;

/// Authenticated administrator extracted from the bearer token.
///
/// Use this in handlers that require authentication. The user is taken from
/// the token claims; nothing is loaded from the database.
///
/// # Example
/// ```rust,ignore
/// pub async fn groups(current_user: CurrentUser, State(jobs): State<JobService>) -> ApiResult<Vec<String>> {
///     debug!("{} lists job groups", current_user.username);
///     Ok(Json(jobs.list_groups().await?))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: UserDetails,
    pub claims: Claims,
}

impl std::ops::Deref for CurrentUser {
    type Target = UserDetails;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

/// Error type for `CurrentUser` extraction failures.
#[derive(Debug)]
pub enum AuthError {
    /// No Authorization header, wrong scheme, or a token that does not verify
    Unauthorized,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            )
                .into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    Config: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(AuthError::Unauthorized)?;

        let config = Config::from_ref(state);
        let claims = jwt::verify_token(&config, token).map_err(|_| AuthError::Unauthorized)?;
        let user = claims.user().ok_or(AuthError::Unauthorized)?;

        Ok(Self { user, claims })
    }
}
