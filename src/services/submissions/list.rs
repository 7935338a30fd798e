use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::RowScope;
use crate::models::auth::AuthContext;
use crate::models::submissions::responses::SubmissionListResponse;

pub async fn list_submissions(
    service: &SubmissionService,
    ctx: AuthContext,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let submissions = storage.list_submissions(RowScope::from(&ctx)).await?;

    Ok(HttpResponse::Ok().json(SubmissionListResponse { submissions }))
}
