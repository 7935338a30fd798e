use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GroupService;
use crate::models::auth::AuthContext;
use crate::models::groups::{requests::CreateGroupRequest, responses::GroupResponse};
use crate::services::invalidate_responses;

pub async fn create_group(
    service: &GroupService,
    ctx: AuthContext,
    group_data: CreateGroupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let new_group = group_data.validate(ctx.user_id)?;
    let storage = service.get_storage(request)?;

    let group = storage.create_group(new_group).await?;
    invalidate_responses(request).await;
    info!("Group {} created by {}", group.id, ctx.user_id);

    Ok(HttpResponse::Created().json(GroupResponse {
        message: Some("Group created".to_string()),
        group,
    }))
}
