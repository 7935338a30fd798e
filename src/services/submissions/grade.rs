use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;
use uuid::Uuid;

use super::{SubmissionService, submission_not_found};
use crate::models::auth::AuthContext;
use crate::models::submissions::{
    requests::GradeSubmissionRequest, responses::SubmissionResponse,
};
use crate::services::invalidate_responses;

/// 评分，分数按原样保存，不与作业总分比较
pub async fn grade_submission(
    service: &SubmissionService,
    ctx: AuthContext,
    submission_id: Uuid,
    grade_data: GradeSubmissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let grade = grade_data.validate()?;
    let storage = service.get_storage(request)?;

    let submission = storage
        .grade_submission(submission_id, grade)
        .await?
        .ok_or_else(submission_not_found)?;
    invalidate_responses(request).await;
    info!("Submission {} graded by {}", submission.id, ctx.user_id);

    Ok(HttpResponse::Ok().json(SubmissionResponse {
        message: Some("Submission graded".to_string()),
        submission,
    }))
}
