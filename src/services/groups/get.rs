use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::GroupService;
use crate::errors::PortalError;
use crate::models::groups::responses::GroupResponse;

pub async fn get_group(
    service: &GroupService,
    group_id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let group = storage
        .get_group_by_id(group_id)
        .await?
        .ok_or_else(|| PortalError::not_found("Group not found"))?;

    Ok(HttpResponse::Ok().json(GroupResponse {
        message: None,
        group,
    }))
}
