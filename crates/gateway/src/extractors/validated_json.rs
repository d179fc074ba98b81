//! Validated request body extractor.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Form, Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use common::AppError;

/// Request body extractor that runs `validator` rules before the handler sees it.
///
/// JSON and urlencoded form bodies are parsed. A request with any other (or
/// no) content type is read as an empty object, so missing fields are reported
/// by the handler's own rules. Malformed bodies and failed rules both become a
/// 400 envelope.
pub struct ValidatedJson<T>(pub T);

/// How a request body is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyFormat {
    Json,
    Form,
    Ignored,
}

impl BodyFormat {
    fn of(headers: &HeaderMap) -> Self {
        let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
            return BodyFormat::Ignored;
        };
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if mime == "application/json" || mime.ends_with("+json") {
            BodyFormat::Json
        } else if mime == "application/x-www-form-urlencoded" {
            BodyFormat::Form
        } else {
            BodyFormat::Ignored
        }
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match BodyFormat::of(req.headers()) {
            BodyFormat::Json => {
                let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
                    tracing::debug!(error = %e, "Rejected JSON body");
                    AppError::validation(e.body_text())
                })?;
                value
            }
            BodyFormat::Form => {
                let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
                    tracing::debug!(error = %e, "Rejected form body");
                    AppError::validation(e.body_text())
                })?;
                value
            }
            BodyFormat::Ignored => {
                let empty = serde_json::Value::Object(Default::default());
                serde_json::from_value(empty).map_err(|e| AppError::validation(e.to_string()))?
            }
        };

        value
            .validate()
            .map_err(|e| AppError::validation(first_message(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Message of the first failed rule (field order is unspecified)
fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref())
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| "Validation failed".to_string())
}
