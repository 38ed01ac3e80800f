use crate::api::v1::handler::ApiResponse;
use crate::application_port::{AuthError, CatalogError, MediaError};
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    if let Some(code) = err.find::<ApiErrorCode>() {
        let json = warp::reply::json(&ApiResponse::<()>::err(code.clone(), code.to_string()));
        Ok(warp::reply::with_status(json, code.status()))
    } else if err.is_not_found() {
        let json = warp::reply::json(&ApiResponse::<()>::err(
            ApiErrorCode::NotFound,
            ApiErrorCode::NotFound.to_string(),
        ));
        Ok(warp::reply::with_status(json, StatusCode::NOT_FOUND))
    } else if let Some(body_err) = err.find::<warp::filters::body::BodyDeserializeError>() {
        let json = warp::reply::json(&ApiResponse::<()>::err(
            ApiErrorCode::MalformedBody,
            body_err.to_string(),
        ));
        Ok(warp::reply::with_status(json, StatusCode::BAD_REQUEST))
    } else {
        warn!("unhandled rejection: {:?}", err);
        let json = warp::reply::json(&ApiResponse::<()>::err(
            ApiErrorCode::InternalError,
            ApiErrorCode::InternalError.to_string(),
        ));
        Ok(warp::reply::with_status(json, StatusCode::INTERNAL_SERVER_ERROR))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Error, Serialize)]
pub enum ApiErrorCode {
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("User already exists")]
    UserExists,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Unauthorized access")]
    Unauthorized,
    #[error("All fields are required")]
    MissingFields,
    #[error("Transformation quality must be between 1 and 100")]
    InvalidQuality,
    #[error("Malformed request body")]
    MalformedBody,
    #[error("Not found")]
    NotFound,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::MissingCredentials
            | ApiErrorCode::UserExists
            | ApiErrorCode::InvalidCredentials
            | ApiErrorCode::MissingFields
            | ApiErrorCode::InvalidQuality
            | ApiErrorCode::MalformedBody => StatusCode::BAD_REQUEST,
            ApiErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiErrorCode::NotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log the detail, hand the client a generic code.
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("internal error: {}", error);
        ApiErrorCode::InternalError
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<AuthError> for ApiErrorCode {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::MissingCredentials => ApiErrorCode::MissingCredentials,
            AuthError::EmailTaken => ApiErrorCode::UserExists,
            AuthError::InvalidCredentials => ApiErrorCode::InvalidCredentials,
            AuthError::Store(e) | AuthError::InternalError(e) => ApiErrorCode::internal(e),
        }
    }
}

impl From<CatalogError> for ApiErrorCode {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::Unauthorized => ApiErrorCode::Unauthorized,
            CatalogError::MissingField(_) => ApiErrorCode::MissingFields,
            CatalogError::InvalidQuality => ApiErrorCode::InvalidQuality,
            CatalogError::Store(e) | CatalogError::InternalError(e) => ApiErrorCode::internal(e),
        }
    }
}

impl From<MediaError> for ApiErrorCode {
    fn from(error: MediaError) -> Self {
        match error {
            MediaError::InternalError(e) => ApiErrorCode::internal(e),
        }
    }
}
