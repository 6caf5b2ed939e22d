use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::api::json_error::JsonError;

/// JSON request body that has passed its `validator` rules.
///
/// Malformed bodies are rejected with the status axum picks for them,
/// bodies breaking a rule with `400` and the failing fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = JsonError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state).await?;
        body.validate().map_err(JsonError::ValidationError)?;

        Ok(Self(body))
    }
}
