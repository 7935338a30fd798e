use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AuthService;
use crate::errors::PortalError;
use crate::models::auth::{AuthResponse, LoginRequest};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (email, password) = login_request.validate()?;
    let storage = service.get_storage(request)?;

    // 用户不存在与密码错误返回相同的提示
    let Some(user) = storage.get_user_by_email(&email).await? else {
        info!("Login failed: unknown email {}", email);
        return Err(PortalError::authentication(INVALID_CREDENTIALS).into());
    };

    if !verify_password(&password, &user.password_hash) {
        info!("Login failed: wrong password for {}", email);
        return Err(PortalError::authentication(INVALID_CREDENTIALS).into());
    }

    let token = JwtUtils::issue_token(user.id)?;
    info!("User {} logged in successfully", user.email);

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".to_string(),
        user,
        token,
    }))
}
