use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::errors::PortalError;
use crate::models::auth::AuthContext;
use crate::models::submissions::{
    entities::DUPLICATE_SUBMISSION, requests::CreateSubmissionRequest,
    responses::SubmissionResponse,
};
use crate::services::invalidate_responses;

pub async fn create_submission(
    service: &SubmissionService,
    ctx: AuthContext,
    submission_data: CreateSubmissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let new_submission = submission_data.validate(ctx.user_id)?;
    let storage = service.get_storage(request)?;

    if storage
        .get_assignment_by_id(new_submission.assignment_id)
        .await?
        .is_none()
    {
        return Err(PortalError::not_found("Assignment not found").into());
    }

    // 每个用户对每份作业只能提交一次
    if storage
        .get_submission_by_assignment_and_user(new_submission.assignment_id, ctx.user_id)
        .await?
        .is_some()
    {
        return Err(PortalError::conflict(DUPLICATE_SUBMISSION).into());
    }

    let submission = storage.create_submission(new_submission).await?;
    invalidate_responses(request).await;
    info!(
        "User {} submitted assignment {}",
        ctx.user_id, submission.assignment_id
    );

    Ok(HttpResponse::Created().json(SubmissionResponse {
        message: Some("Submission created".to_string()),
        submission,
    }))
}
