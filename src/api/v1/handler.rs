use super::error::*;
use crate::application_port::{
    AuthService, CatalogService, CreateVideoInput, LoginInput, MediaAuthService, RegisterInput,
    SessionAuthority, TransformationInput,
};
use crate::domain_model::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{self, reject};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

pub async fn register(
    body: RegisterRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let input = RegisterInput {
        email: body.email,
        password: body.password,
    };
    auth_service
        .register(input)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let response = ApiResponse::ok(RegisterResponse {
        message: "User created successfully".to_owned(),
    });
    Ok(warp::reply::with_status(
        warp::reply::json(&response),
        StatusCode::CREATED,
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub identity: String,
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
}

pub async fn login(
    body: LoginRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let input = LoginInput {
        email: body.email,
        password: body.password,
    };
    let result = auth_service
        .login(input)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let response = LoginResponse {
        identity: result.identity,
        session_id: result.session_id,
        expires_at: result.expires_at,
    };
    Ok(warp::reply::json(&ApiResponse::ok(response)))
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

pub async fn logout(
    assertion: Option<String>,
    session_authority: Arc<dyn SessionAuthority>,
) -> Result<impl warp::Reply, warp::Rejection> {
    if let Some(session_id) = assertion {
        session_authority
            .invalidate(&session_id)
            .await
            .map_err(ApiErrorCode::from)
            .map_err(reject::custom)?;
    }

    Ok(warp::reply::json(&ApiResponse::ok(LogoutResponse {
        message: "Signed out".to_owned(),
    })))
}

pub async fn list_videos(
    catalog_service: Arc<dyn CatalogService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let videos = catalog_service
        .list()
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(videos)))
}

#[derive(Debug, Default, Deserialize)]
pub struct TransformationRequest {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u8>,
}

// Absent string fields deserialize to empty and fail validation in the
// service, so "key missing" and "value empty" produce the same response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    pub transformation: Option<TransformationRequest>,
    pub controls: Option<bool>,
}

pub async fn create_video(
    identity: Identity,
    body: CreateVideoRequest,
    catalog_service: Arc<dyn CatalogService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let input = CreateVideoInput {
        title: body.title,
        description: body.description,
        video_url: body.video_url,
        thumbnail_url: body.thumbnail_url,
        transformation: body.transformation.map(|t| TransformationInput {
            width: t.width,
            height: t.height,
            quality: t.quality,
        }),
        controls: body.controls,
    };

    let video = catalog_service
        .create(&identity, input)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&ApiResponse::ok(video)),
        StatusCode::CREATED,
    ))
}

pub async fn media_credentials(
    media_service: Arc<dyn MediaAuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let credentials = media_service
        .upload_credentials()
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(credentials)))
}
