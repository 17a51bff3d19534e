use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Media types the responder emits. All are served as UTF-8.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentType {
    Html,
    Text,
    Json,
}

impl ContentType {
    pub fn as_header(self) -> &'static str {
        match self {
            ContentType::Html => "text/html;charset=UTF-8",
            ContentType::Text => "text/plain;charset=UTF-8",
            ContentType::Json => "application/json;charset=UTF-8",
        }
    }
}

/// Fully rendered answer, independent of the HTTP stack until converted with [`IntoResponse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub content_type: ContentType,
    pub body: String,
}

impl Reply {
    pub fn html(body: impl Into<String>) -> Self {
        Self::ok(ContentType::Html, body)
    }

    pub fn text(body: impl Into<String>) -> Self {
        Self::ok(ContentType::Text, body)
    }

    /// Serializes `value` into a JSON reply.
    pub fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self::ok(ContentType::Json, body),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize json reply");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    content_type: ContentType::Text,
                    body: "failed to render response".to_owned(),
                }
            }
        }
    }

    pub fn not_found(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            content_type: ContentType::Text,
            body: body.into(),
        }
    }

    fn ok(content_type: ContentType, body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            body: body.into(),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, self.content_type.as_header())],
            self.body,
        )
            .into_response()
    }
}
