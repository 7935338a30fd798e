use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::GroupService;
use crate::errors::PortalError;
use crate::models::groups::{requests::UpdateGroupRequest, responses::GroupResponse};
use crate::services::invalidate_responses;

pub async fn update_group(
    service: &GroupService,
    group_id: Uuid,
    update_data: UpdateGroupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let update = update_data.validate()?;
    let storage = service.get_storage(request)?;

    let group = storage
        .update_group(group_id, update)
        .await?
        .ok_or_else(|| PortalError::not_found("Group not found"))?;
    invalidate_responses(request).await;

    Ok(HttpResponse::Ok().json(GroupResponse {
        message: Some("Group updated".to_string()),
        group,
    }))
}
