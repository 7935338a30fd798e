pub mod assignments;
pub mod auth;
pub mod groups;
pub mod submissions;
pub mod system;
pub mod users;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use groups::GroupService;
pub use submissions::SubmissionService;
pub use system::SystemService;
pub use users::UserService;

use actix_web::{HttpRequest, web};
use std::sync::Arc;
use tracing::error;

use crate::cache::ObjectCache;
use crate::errors::PortalError;
use crate::middlewares::response_cache::purge_responses;
use crate::storage::Storage;

// 从 app_data 中获取存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Result<Arc<dyn Storage>, PortalError> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            PortalError::internal("Storage not configured")
        })
}

pub(crate) fn cache_from_request(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}

/// 写操作成功后清空 GET 响应缓存
pub(crate) async fn invalidate_responses(request: &HttpRequest) {
    if let Some(cache) = cache_from_request(request) {
        purge_responses(cache.as_ref()).await;
    }
}
