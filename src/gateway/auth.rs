//! Bearer token middleware for the clinic gateway
//! 诊所网关的Bearer令牌中间件
//!
//! The gateway only extracts and forwards the credential; validating it is
//! the backends' responsibility.
//! 网关只提取并转发凭证；验证凭证是后端的责任。

use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use super::error::GatewayError;

/// Opaque bearer credential carried in request extensions.
/// 请求扩展中携带的不透明Bearer凭证。
///
/// Deliberately has no `Debug`/`Display` implementation so the token
/// cannot end up in logs.
/// 故意不实现`Debug`/`Display`，以免令牌进入日志。
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, forwarded verbatim to backends / 原样转发给后端的原始令牌
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Extract the bearer token from an Authorization header value.
/// 从Authorization头值中提取Bearer令牌。
///
/// The header must consist of exactly two space-separated parts with the
/// first being the literal `Bearer`.
/// 头必须由恰好两个以空格分隔的部分组成，第一个必须是字面量`Bearer`。
pub fn extract_bearer_token(header: &str) -> Result<&str, GatewayError> {
    if header.is_empty() {
        return Err(GatewayError::MissingToken);
    }

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(GatewayError::MalformedToken),
    }
}

/// Middleware requiring a bearer token on the request.
/// 要求请求携带Bearer令牌的中间件。
///
/// It DOESN'T check whether the token is valid; on success the credential
/// is stored in the request extensions for the handlers.
/// 它不检查令牌是否有效；成功时凭证存储在请求扩展中供处理器使用。
pub async fn require_bearer(mut request: Request, next: Next) -> Result<Response, GatewayError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let token = extract_bearer_token(header)?.to_owned();
    request.extensions_mut().insert(Credential::new(token));

    Ok(next.run(request).await)
}
