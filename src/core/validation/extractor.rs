//! Axum extractor for validated request bodies

use super::filters::Sanitize;
use crate::core::entity::EntityId;
use crate::core::error::{RequestError, TreatyError, TreatyResult, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

/// Axum extractor that deserializes, sanitizes and validates a JSON body
///
/// Any failure (malformed JSON, missing or mistyped fields, rule violations)
/// is rejected with a 400 [`TreatyError::Validation`].
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_contract(
///     State(state): State<AppState>,
///     Validated(payload): Validated<NewContract>,
/// ) -> TreatyResult<(StatusCode, Json<Contract>)> {
///     // payload is already validated
/// }
/// ```
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Sanitize,
{
    type Rejection = TreatyError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> =
            Json::from_request(req, state)
                .await
                .map_err(|rejection| ValidationError::InvalidJson {
                    message: rejection.body_text(),
                })?;

        let mut value: T = serde_json::from_value(payload)?;
        value.sanitize();
        value.validate()?;

        Ok(Validated(value))
    }
}

/// Parse an id path segment made of ASCII digits only
pub fn parse_entity_id(raw: &str) -> TreatyResult<EntityId> {
    let invalid = || -> TreatyError {
        RequestError::InvalidEntityId {
            value: raw.to_string(),
        }
        .into()
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<EntityId>().map_err(|_| invalid())
}
