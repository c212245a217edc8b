use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use serde::Serialize;
use stack_string::{StackString, format_sstr};
use std::fmt::Debug;
use thiserror::Error;

use centralconfig_common::errors::ConfigError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("BadRequest: {0}")]
    BadRequest(StackString),
    #[error("config error {0}")]
    ConfigError(#[from] ConfigError),
}

#[derive(Serialize)]
struct ErrorMessage {
    status: u16,
    message: StackString,
}

// impl IntoResponse allows to convert our errors into http responses
// with appropriate data
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::ConfigError(e) => {
                error!("{e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format_sstr!("Internal Server Error, Please try later {e}"),
                )
            }
        };
        let body = ErrorMessage {
            status: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
