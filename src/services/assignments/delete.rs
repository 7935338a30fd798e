use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::AssignmentService;
use crate::models::MessageResponse;
use crate::services::invalidate_responses;

pub async fn delete_assignment(
    service: &AssignmentService,
    assignment_id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if storage.delete_assignment(assignment_id).await? {
        invalidate_responses(request).await;
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Assignment deleted")))
}
