use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{SubmissionService, ensure_owner_or_admin, submission_not_found};
use crate::models::auth::AuthContext;
use crate::models::submissions::responses::SubmissionResponse;

pub async fn get_submission(
    service: &SubmissionService,
    ctx: AuthContext,
    submission_id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(submission_not_found)?;
    ensure_owner_or_admin(&ctx, &submission)?;

    Ok(HttpResponse::Ok().json(SubmissionResponse {
        message: None,
        submission,
    }))
}
