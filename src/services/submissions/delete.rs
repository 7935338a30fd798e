use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{SubmissionService, ensure_owner_or_admin};
use crate::models::MessageResponse;
use crate::models::auth::AuthContext;
use crate::services::invalidate_responses;

/// 删除提交，记录不存在时同样返回成功
pub async fn delete_submission(
    service: &SubmissionService,
    ctx: AuthContext,
    submission_id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Some(existing) = storage.get_submission_by_id(submission_id).await? {
        ensure_owner_or_admin(&ctx, &existing)?;
        if storage.delete_submission(submission_id).await? {
            invalidate_responses(request).await;
        }
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Submission deleted")))
}
