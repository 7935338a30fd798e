//! 安全的请求提取器
//!
//! 路径参数解析失败、或缺少认证信息时直接返回统一格式的错误，
//! 处理程序中无需再做判断。

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use uuid::Uuid;

use crate::errors::PortalError;
use crate::models::auth::AuthContext;

/// 路径中的 `{id}`，必须是 UUID
#[derive(Debug, Clone, Copy)]
pub struct SafeId(pub Uuid);

impl FromRequest for SafeId {
    type Error = PortalError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .get("id")
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .map(SafeId)
            .ok_or_else(|| PortalError::validation("Invalid ID format"));
        ready(parsed)
    }
}

/// 由 RequireJWT 写入请求扩展的调用者身份
impl FromRequest for AuthContext {
    type Error = PortalError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthContext>()
                .copied()
                .ok_or_else(|| PortalError::authentication("Authentication required")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_safe_id_rejects_non_uuid() {
        let req = TestRequest::default()
            .param("id", "123")
            .to_http_request();
        let err = SafeId::extract(&req).await.unwrap_err();
        assert_eq!(err.message(), "Invalid ID format");
    }

    #[actix_web::test]
    async fn test_safe_id_accepts_uuid() {
        let id = Uuid::new_v4();
        let req = TestRequest::default()
            .param("id", id.to_string())
            .to_http_request();
        assert_eq!(SafeId::extract(&req).await.unwrap().0, id);
    }

    #[actix_web::test]
    async fn test_auth_context_from_extensions() {
        let req = TestRequest::default().to_http_request();
        assert!(AuthContext::extract(&req).await.is_err());

        let ctx = AuthContext {
            user_id: Uuid::new_v4(),
            role: UserRole::Student,
        };
        req.extensions_mut().insert(ctx);
        assert_eq!(AuthContext::extract(&req).await.unwrap(), ctx);
    }
}
