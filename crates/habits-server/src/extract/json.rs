//! JSON extractor whose rejections are status-only HTTP errors.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// JSON extractor and response wrapper.
///
/// Behaves like [`axum::Json`], but rejects malformed bodies with a
/// body-less `400 Bad Request` and keeps the rejection detail for logs.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Creates a new [`Json`] wrapper around the provided value.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }
}

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extractor = <AxumJson<T> as FromRequest<S>>::from_request(req, state).await;
        extractor.map(|x| Self::new(x.0)).map_err(Into::into)
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ErrorKind::BadRequest
                .with_message("Invalid request data format")
                .with_context(sanitize_error_message(&err.body_text())),
            JsonRejection::JsonSyntaxError(err) => ErrorKind::BadRequest
                .with_message("Invalid JSON syntax in request body")
                .with_context(sanitize_error_message(&err.body_text())),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Invalid content type")
                .with_context("Expected Content-Type: application/json"),
            JsonRejection::BytesRejection(err)
                if err.status() == StatusCode::PAYLOAD_TOO_LARGE =>
            {
                ErrorKind::PayloadTooLarge
                    .with_message("Request body exceeds the size limit")
                    .with_context(sanitize_error_message(&err.body_text()))
            }
            JsonRejection::BytesRejection(err) => ErrorKind::BadRequest
                .with_message("Failed to read request body")
                .with_context(sanitize_error_message(&err.body_text())),
            other => ErrorKind::InternalServerError
                .with_message("Request processing failed")
                .with_context(sanitize_error_message(&other.body_text())),
        }
    }
}

/// Keeps the first lines of a rejection message, capped in length.
fn sanitize_error_message(message: &str) -> String {
    let lines = message.lines().take(3).collect::<Vec<_>>();
    lines.join(" ").chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::header;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        token: String,
    }

    fn request(content_type: &str, body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let req = request("application/json", r#"{"token":"abc"}"#);
        assert!(Json::<Payload>::from_request(req, &()).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_missing_field_as_bad_request() {
        let req = request("application/json", r#"{"other":1}"#);
        let error = Json::<Payload>::from_request(req, &()).await.unwrap_err();
        assert_eq!(error.kind().status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_wrong_content_type() {
        let req = request("text/plain", r#"{"token":"abc"}"#);
        let error = Json::<Payload>::from_request(req, &()).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }
}
