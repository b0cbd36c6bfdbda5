use crate::http::error::ApiError;
use crate::validation::rules::CORPO_INVALIDO;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Form, FromRequest, Request};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// Request body as a JSON value, read from a JSON or a url-encoded form body.
///
/// Form fields arrive as strings, which the number rules accept. A body without a content type is read as an
/// empty object so that validation names the first missing field.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestBody(pub Value);

impl<S> FromRequest<S> for RequestBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(req.headers()) {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state).await.map_err(|rejection| {
                debug!("Rejected form body: {}", rejection.body_text());
                ApiError::bad_request(CORPO_INVALIDO)
            })?;
            let object = fields.into_iter().map(|(field, value)| (field, Value::String(value))).collect();
            return Ok(RequestBody(Value::Object(object)));
        }

        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(RequestBody(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(RequestBody(Value::Object(Map::new()))),
            Err(rejection) => {
                debug!("Rejected JSON body: {}", rejection.body_text());
                Err(ApiError::bad_request(CORPO_INVALIDO))
            }
        }
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}
