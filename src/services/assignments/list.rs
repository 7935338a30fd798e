use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::RowScope;
use crate::models::assignments::responses::AssignmentListResponse;
use crate::models::auth::AuthContext;

/// 管理员看到全部作业，学生只看到所在小组的作业
pub async fn list_assignments(
    service: &AssignmentService,
    ctx: AuthContext,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let assignments = storage.list_assignments(RowScope::from(&ctx)).await?;

    Ok(HttpResponse::Ok().json(AssignmentListResponse { assignments }))
}
