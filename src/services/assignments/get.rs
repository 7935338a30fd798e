use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;
use uuid::Uuid;

use super::AssignmentService;
use crate::errors::PortalError;
use crate::models::assignments::responses::AssignmentResponse;
use crate::models::auth::AuthContext;

pub async fn get_assignment(
    service: &AssignmentService,
    ctx: AuthContext,
    assignment_id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| PortalError::not_found("Assignment not found"))?;

    // 学生只能查看所在小组的作业
    if !ctx.is_admin() && !storage.is_group_member(assignment.group_id, ctx.user_id).await? {
        info!(
            "User {} denied access to assignment {} outside their groups",
            ctx.user_id, assignment_id
        );
        return Err(PortalError::authorization("Access denied").into());
    }

    Ok(HttpResponse::Ok().json(AssignmentResponse {
        message: None,
        assignment,
    }))
}
