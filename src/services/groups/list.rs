use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GroupService;
use crate::models::groups::responses::GroupListResponse;

pub async fn list_groups(service: &GroupService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let groups = storage.list_groups().await?;

    Ok(HttpResponse::Ok().json(GroupListResponse { groups }))
}
