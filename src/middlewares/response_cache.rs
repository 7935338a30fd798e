/*!
 * GET 响应缓存中间件
 *
 * 以 `response:{generation}:{user_id}:{path?query}` 为键缓存成功的 GET 响应体。
 * 不同调用者可见的数据不同，因此键中必须包含调用者 ID，
 * 中间件需放在 RequireJWT 之内。
 *
 * 写操作成功后调用 [`purge_responses`] 切换代际并清空全部响应缓存。
 * 代际在调用下游之前读取，清空之后才写回的旧响应不会再被命中。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode, header::ContentType},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error};
use uuid::Uuid;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::auth::AuthContext;

pub const RESPONSE_CACHE_PREFIX: &str = "response:";

/// 不能以 `response:` 开头，否则会被自身的清理删除
const GENERATION_KEY: &str = "response_generation";

fn response_cache_key(generation: &str, ctx: &AuthContext, req: &ServiceRequest) -> String {
    let uri = req.uri();
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    format!("{RESPONSE_CACHE_PREFIX}{generation}:{}:{}", ctx.user_id, path)
}

fn new_generation() -> String {
    Uuid::new_v4().simple().to_string()
}

/// 当前代际，缺失时生成新值；缓存不可用时返回 None
async fn current_generation(cache: &dyn ObjectCache) -> Option<String> {
    match cache.get_raw(GENERATION_KEY).await {
        CacheResult::Found(generation) => Some(generation),
        CacheResult::NotFound => {
            let generation = new_generation();
            cache
                .insert_raw(GENERATION_KEY.to_string(), generation.clone(), 0)
                .await;
            Some(generation)
        }
        CacheResult::ExistsButNoValue => None,
    }
}

/// 使所有已缓存的 GET 响应失效
pub async fn purge_responses(cache: &dyn ObjectCache) {
    cache
        .insert_raw(GENERATION_KEY.to_string(), new_generation(), 0)
        .await;
    cache.purge_prefix(RESPONSE_CACHE_PREFIX).await;
}

#[derive(Clone)]
pub struct ResponseCache {
    ttl: u64,
}

impl ResponseCache {
    /// 使用配置中的 `cache.response_ttl`
    pub fn new() -> Self {
        Self::with_ttl(AppConfig::get().cache.response_ttl)
    }

    pub fn with_ttl(ttl: u64) -> Self {
        Self { ttl }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for ResponseCache
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ResponseCacheMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ResponseCacheMiddleware {
            service: Rc::new(service),
            ttl: self.ttl,
        }))
    }
}

pub struct ResponseCacheMiddleware<S> {
    service: Rc<S>,
    ttl: u64,
}

impl<S, B> Service<ServiceRequest> for ResponseCacheMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
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
        let ttl = self.ttl;

        Box::pin(async move {
            let cache = req
                .app_data::<web::Data<Arc<dyn ObjectCache>>>()
                .map(|c| c.get_ref().clone());
            let ctx = req.extensions().get::<AuthContext>().copied();

            let (cache, ctx) = match (cache, ctx) {
                (Some(cache), Some(ctx)) if req.method() == Method::GET => (cache, ctx),
                _ => {
                    let res = srv.call(req).await?.map_into_left_body();
                    return Ok(res);
                }
            };

            let Some(generation) = current_generation(cache.as_ref()).await else {
                return Ok(srv.call(req).await?.map_into_left_body());
            };

            let key = response_cache_key(&generation, &ctx, &req);
            if let Some(body) = cache.get_raw(&key).await.found() {
                debug!("Serving cached response for {}", key);
                let response = HttpResponse::Ok()
                    .content_type(ContentType::json())
                    .insert_header(("X-Cache", "HIT"))
                    .body(body);
                return Ok(req.into_response(response).map_into_right_body());
            }

            let res = srv.call(req).await?;
            if res.status() != StatusCode::OK {
                return Ok(res.map_into_left_body());
            }

            let (http_req, res) = res.into_parts();
            let (head, body) = res.into_parts();
            let bytes = match actix_web::body::to_bytes(body).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    let e: Box<dyn std::error::Error> = e.into();
                    error!("Failed to buffer response body for {}: {}", key, e);
                    let response = HttpResponse::InternalServerError()
                        .json(crate::errors::ErrorBody::new("Internal server error"));
                    return Ok(ServiceResponse::new(http_req, response).map_into_right_body());
                }
            };

            match std::str::from_utf8(&bytes) {
                Ok(text) => cache.insert_raw(key, text.to_string(), ttl).await,
                Err(_) => debug!("Skipping non-UTF-8 response for {}", key),
            }

            let response = head.set_body(bytes).map_into_boxed_body();
            Ok(ServiceResponse::new(http_req, response).map_into_right_body())
        })
    }
}
