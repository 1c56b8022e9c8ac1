use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::errors::ApiError;

/// JSON body extractor that rejects with the API's error envelope
///
/// Malformed JSON, a wrong content type, a body that is not a JSON object,
/// or mistyped fields all become `400 {"error": ...}` instead of axum's
/// plain-text rejections. Derived struct deserializers also accept arrays
/// as positional records, so the object check comes first.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::bad_request(rejection.body_text()))?;

        if !value.is_object() {
            return Err(ApiError::bad_request("Request body must be a JSON object"));
        }

        let parsed = serde_json::from_value(value)
            .map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e)))?;

        Ok(JsonBody(parsed))
    }
}

/// Integer user id taken from the `:id` path segment
///
/// Non-integer ids do not name any user, so they are a 404.
pub struct UserId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::user_not_found())?;

        Ok(UserId(id))
    }
}
