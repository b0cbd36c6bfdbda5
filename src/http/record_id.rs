use crate::http::error::ApiError;
use crate::validation::rules::ID_INVALIDO;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

/// Id of a record taken from the `{id}` path segment. Anything but an unsigned integer is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordId(pub u64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request(ID_INVALIDO))?;
        raw.trim().parse().map(RecordId).map_err(|_| ApiError::bad_request(ID_INVALIDO))
    }
}
