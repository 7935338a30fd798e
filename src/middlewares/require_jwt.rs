/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>`，通过后将调用者身份 [`AuthContext`]
 * 写入请求扩展，处理程序直接以 `AuthContext` 作为参数提取。
 *
 * ```rust,ignore
 * web::scope("/api/groups")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_groups))
 *
 * async fn list_groups(ctx: AuthContext) -> ActixResult<HttpResponse> { ... }
 * ```
 *
 * 令牌对应的用户信息会以 `user:{token}` 为键缓存，减少数据库查询。
 * 令牌无效、过期或用户不存在时返回 401。
 */

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::models::auth::AuthContext;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

// 辅助函数：提取并验证 JWT，返回调用者身份
async fn authenticate(req: &ServiceRequest) -> Result<AuthContext, &'static str> {
    let token = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or("No token provided")?;

    let user_id = JwtUtils::verify_token(token).map_err(|_| "Invalid token")?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());
    let cache_key = format!("user:{token}");

    // 先查缓存
    if let Some(cache) = &cache
        && let Some(user) = cache.get_json::<User>(&cache_key).await
        && user.id == user_id
    {
        return Ok(AuthContext::from(&user));
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            "Authentication unavailable"
        })?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to load user {} during authentication: {}", user_id, e);
            "Authentication unavailable"
        })?
        .ok_or("User not found")?;

    if let Some(cache) = &cache {
        cache
            .insert_json(cache_key, &user, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(AuthContext::from(&user))
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // CORS 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                let res = srv.call(req).await?.map_into_left_body();
                return Ok(res);
            }

            match authenticate(&req).await {
                Ok(ctx) => {
                    debug!("JWT authentication successful for ID: {}", ctx.user_id);
                    req.extensions_mut().insert(ctx);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(reason) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        reason
                    );
                    let status = if reason == "Authentication unavailable" {
                        StatusCode::INTERNAL_SERVER_ERROR
                    } else {
                        StatusCode::UNAUTHORIZED
                    };
                    Ok(req.into_response(
                        create_error_response(status, reason).map_into_right_body(),
                    ))
                }
            }
        })
    }
}
