use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{SubmissionService, ensure_owner_or_admin, submission_not_found};
use crate::models::auth::AuthContext;
use crate::models::submissions::{
    requests::UpdateSubmissionRequest, responses::SubmissionResponse,
};
use crate::services::invalidate_responses;

pub async fn update_submission(
    service: &SubmissionService,
    ctx: AuthContext,
    submission_id: Uuid,
    update_data: UpdateSubmissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let update = update_data.validate()?;
    let storage = service.get_storage(request)?;

    let existing = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(submission_not_found)?;
    ensure_owner_or_admin(&ctx, &existing)?;

    let submission = storage
        .update_submission(submission_id, update)
        .await?
        .ok_or_else(submission_not_found)?;
    invalidate_responses(request).await;

    Ok(HttpResponse::Ok().json(SubmissionResponse {
        message: Some("Submission updated".to_string()),
        submission,
    }))
}
