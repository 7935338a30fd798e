use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AuthService;
use crate::errors::PortalError;
use crate::models::auth::{AuthResponse, RegisterRequest};
use crate::models::users::requests::CreateUserRequest;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let valid = register_request.validate()?;
    let storage = service.get_storage(request)?;

    // 1. 邮箱是否已被注册（唯一索引兜底并发注册）
    if storage.get_user_by_email(&valid.email).await?.is_some() {
        return Err(PortalError::conflict("Email already registered").into());
    }

    // 2. 哈希密码并创建用户
    let password_hash = hash_password(&valid.password)?;
    let user = storage
        .create_user(CreateUserRequest {
            name: valid.name,
            email: valid.email,
            password_hash,
            role: valid.role,
        })
        .await?;

    // 3. 签发令牌
    let token = JwtUtils::issue_token(user.id)?;
    info!("User {} registered with role {}", user.email, user.role);

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User registered successfully".to_string(),
        user,
        token,
    }))
}
