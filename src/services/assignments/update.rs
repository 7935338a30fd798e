use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::AssignmentService;
use crate::errors::PortalError;
use crate::models::assignments::{
    requests::UpdateAssignmentRequest, responses::AssignmentResponse,
};
use crate::services::invalidate_responses;

pub async fn update_assignment(
    service: &AssignmentService,
    assignment_id: Uuid,
    update_data: UpdateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let update = update_data.validate()?;
    let storage = service.get_storage(request)?;

    let assignment = storage
        .update_assignment(assignment_id, update)
        .await?
        .ok_or_else(|| PortalError::not_found("Assignment not found"))?;
    invalidate_responses(request).await;

    Ok(HttpResponse::Ok().json(AssignmentResponse {
        message: Some("Assignment updated".to_string()),
        assignment,
    }))
}
