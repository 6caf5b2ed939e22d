use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use crate::{
    api::{ApiError, ApiResult},
    app::App,
    auth::{renew_token, CurrentUser},
    config::Config,
};

pub fn routes() -> Router<App> {
    Router::new().route("/admin/token/renew", post(renew))
}

#[derive(Debug, Serialize)]
pub struct RenewedToken {
    /// `None` while the presented token is still far from expiring
    pub token: Option<String>,
}

async fn renew(current_user: CurrentUser, State(config): State<Config>) -> ApiResult<RenewedToken> {
    let token = renew_token(&config, &current_user.claims)
        .map_err(|e| ApiError::Internal(format!("Failed to renew token: {e}")))?;

    Ok(Json(RenewedToken { token }))
}
