//! Error taxonomy for the clinic gateway
//! 诊所网关的错误分类
//!
//! Every failure path of the gateway funnels into [`GatewayError`] and is
//! rendered as the single `{"message": "..."}` envelope. Backend outcome
//! codes are mapped onto HTTP statuses in exactly one place so all resource
//! kinds share one client-facing contract.
//! 网关的每个失败路径都汇入[`GatewayError`]，并渲染为唯一的
//! `{"message": "..."}`信封。后端结果码只在一个地方映射到HTTP状态，
//! 因此所有资源类型共享同一个面向客户端的契约。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;
use tonic::Code;
use tracing::error;

/// Standard error response body for every failure / 每个失败的标准错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Clinic gateway error types / 诊所网关错误类型
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Authorization header absent or empty / Authorization头缺失或为空
    #[error("bearer token is missing")]
    MissingToken,

    /// Authorization header present but not `Bearer <token>`
    /// Authorization头存在但不是`Bearer <token>`
    #[error("incorrectly formatted authorization header")]
    MalformedToken,

    /// Query/path/body binding or field constraint failure
    /// 查询/路径/请求体绑定或字段约束失败
    #[error("{0}")]
    BadRequest(String),

    /// Operation listed on the surface but not offered by the backend
    /// 表面上列出但后端不提供的操作
    #[error("endpoint is not yet implemented")]
    NotImplemented,

    /// Backend claimed success but returned a structurally impossible payload
    /// 后端声称成功但返回了结构上不可能的负载
    #[error("invalid response from the server")]
    CorruptResponse,

    /// Backend call failed with a gRPC status / 后端调用以gRPC状态失败
    #[error("backend call failed: {0}")]
    Backend(#[from] tonic::Status),
}

/// Total mapping from backend outcome codes to HTTP status and message.
/// 后端结果码到HTTP状态和消息的全映射。
///
/// Every `tonic::Code` maps to exactly one row; codes without a dedicated
/// row surface as 500 with the backend detail preserved.
/// 每个`tonic::Code`精确映射到一行；没有专用行的码以500显示，
/// 并保留后端详情。
pub fn map_backend_outcome(status: &tonic::Status) -> (StatusCode, String) {
    match status.code() {
        Code::Unauthenticated => (
            StatusCode::UNAUTHORIZED,
            "invalid authentication token".to_string(),
        ),
        Code::PermissionDenied => (
            StatusCode::FORBIDDEN,
            "you are not allowed to do this".to_string(),
        ),
        Code::NotFound => (
            StatusCode::NOT_FOUND,
            "request object is not found".to_string(),
        ),
        Code::InvalidArgument => (
            StatusCode::BAD_REQUEST,
            "invalid request object".to_string(),
        ),
        Code::AlreadyExists => (
            StatusCode::CONFLICT,
            "request object already exists".to_string(),
        ),
        Code::OutOfRange => (
            StatusCode::BAD_REQUEST,
            "request object is out of range".to_string(),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("unknown error occurred: {}", status.message()),
        ),
    }
}

impl GatewayError {
    /// Resolve the HTTP status and user-facing message for this error
    /// 解析此错误的HTTP状态和面向用户的消息
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            GatewayError::MissingToken | GatewayError::MalformedToken => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            GatewayError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            GatewayError::NotImplemented => (StatusCode::NOT_IMPLEMENTED, self.to_string()),
            GatewayError::CorruptResponse => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            GatewayError::Backend(status) => map_backend_outcome(status),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if let GatewayError::Backend(status) = &self {
            error!("backend call failed: {}", status);
        }
        let (status, message) = self.status_and_message();
        (status, Json(ErrorResponse { message })).into_response()
    }
}
