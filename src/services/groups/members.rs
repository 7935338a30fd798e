use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;
use uuid::Uuid;

use super::GroupService;
use crate::errors::PortalError;
use crate::models::MessageResponse;
use crate::models::groups::{requests::MemberRequest, responses::GroupMemberListResponse};
use crate::services::invalidate_responses;

pub async fn add_member(
    service: &GroupService,
    group_id: Uuid,
    member: MemberRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user_id = member.validate()?;
    let storage = service.get_storage(request)?;

    if storage.get_group_by_id(group_id).await?.is_none() {
        return Err(PortalError::not_found("Group not found").into());
    }
    if storage.get_user_by_id(user_id).await?.is_none() {
        return Err(PortalError::not_found("User not found").into());
    }

    storage.add_group_member(group_id, user_id).await?;
    invalidate_responses(request).await;
    info!("User {} added to group {}", user_id, group_id);

    Ok(HttpResponse::Ok().json(MessageResponse::new("Member added to group")))
}

pub async fn remove_member(
    service: &GroupService,
    group_id: Uuid,
    member: MemberRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user_id = member.validate()?;
    let storage = service.get_storage(request)?;

    if storage.remove_group_member(group_id, user_id).await? {
        invalidate_responses(request).await;
        info!("User {} removed from group {}", user_id, group_id);
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Member removed from group")))
}

pub async fn list_members(
    service: &GroupService,
    group_id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if storage.get_group_by_id(group_id).await?.is_none() {
        return Err(PortalError::not_found("Group not found").into());
    }
    let members = storage.list_group_members(group_id).await?;

    Ok(HttpResponse::Ok().json(GroupMemberListResponse { members }))
}
