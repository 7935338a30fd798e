pub mod require_jwt;
pub mod require_role;
pub mod response_cache;

pub use require_jwt::RequireJWT;
pub use require_role::RequireRole;
pub use response_cache::ResponseCache;

use actix_web::{HttpResponse, http::StatusCode};

use crate::errors::ErrorBody;

// 辅助函数：创建 `{ "error": ... }` 错误响应
pub(crate) fn create_error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody::new(message))
}
