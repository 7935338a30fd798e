use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::UserService;
use crate::errors::PortalError;
use crate::models::users::responses::UserResponse;

pub async fn get_user(
    service: &UserService,
    user_id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_user_by_id(user_id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(UserResponse { user })),
        None => Err(PortalError::not_found("User not found").into()),
    }
}
