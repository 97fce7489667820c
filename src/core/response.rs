//! Success envelope shared by every API handler

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Uniform success envelope: `{ "success": true, "data": ..., "message": ... }`
///
/// `data` is omitted entirely when there is nothing to return (e.g. delete).
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    data: Option<T>,
    message: String,
}

#[derive(Serialize)]
struct SuccessBody<'a, T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    message: &'a str,
}

impl<T> ApiResponse<T> {
    /// 200 with data
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            data: Some(data),
            message: message.into(),
        }
    }

    /// 201 with data
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CREATED,
            data: Some(data),
            message: message.into(),
        }
    }
}

impl ApiResponse<()> {
    /// 200 without data
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            data: None,
            message: message.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = SuccessBody {
            success: true,
            data: self.data.as_ref(),
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
