use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;
use uuid::Uuid;

use super::GroupService;
use crate::models::MessageResponse;
use crate::services::invalidate_responses;

/// 删除小组，成员关系与作业随之级联删除；小组不存在时同样返回成功
pub async fn delete_group(
    service: &GroupService,
    group_id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if storage.delete_group(group_id).await? {
        invalidate_responses(request).await;
    } else {
        debug!("Delete of missing group {} treated as success", group_id);
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Group deleted")))
}
