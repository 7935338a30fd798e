use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::errors::PortalError;
use crate::models::assignments::{
    requests::CreateAssignmentRequest, responses::AssignmentResponse,
};
use crate::models::auth::AuthContext;
use crate::services::invalidate_responses;

pub async fn create_assignment(
    service: &AssignmentService,
    ctx: AuthContext,
    assignment_data: CreateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let new_assignment = assignment_data.validate(ctx.user_id)?;
    let storage = service.get_storage(request)?;

    if storage.get_group_by_id(new_assignment.group_id).await?.is_none() {
        return Err(PortalError::not_found("Group not found").into());
    }

    let assignment = storage.create_assignment(new_assignment).await?;
    invalidate_responses(request).await;
    info!(
        "Assignment {} created in group {} by {}",
        assignment.id, assignment.group_id, ctx.user_id
    );

    Ok(HttpResponse::Created().json(AssignmentResponse {
        message: Some("Assignment created".to_string()),
        assignment,
    }))
}
