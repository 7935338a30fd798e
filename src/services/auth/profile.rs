use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::errors::PortalError;
use crate::models::auth::AuthContext;
use crate::models::users::responses::UserResponse;

pub async fn handle_profile(
    service: &AuthService,
    ctx: AuthContext,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let user = storage
        .get_user_by_id(ctx.user_id)
        .await?
        .ok_or_else(|| PortalError::not_found("User not found"))?;

    Ok(HttpResponse::Ok().json(UserResponse { user }))
}
