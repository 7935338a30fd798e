use serde::Deserialize;
use ts_rs::TS;

use crate::errors::ValidationErrors;
use crate::models::users::entities::UserRole;
use crate::utils::validate::{is_blank, normalize_email, validate_email, validate_password};

/// 注册请求（来自HTTP请求）
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// 缺省为 student
    #[ts(optional)]
    pub role: Option<String>,
}

/// 校验后的注册信息（密码仍为明文）
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<ValidRegistration, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if is_blank(&self.name) {
            errors.push("name", "Name is required");
        }
        if let Err(msg) = validate_email(&self.email) {
            errors.push("email", msg);
        }
        if let Err(msg) = validate_password(&self.password) {
            errors.push("password", msg);
        }
        let role = match self.role.as_deref().map(str::trim) {
            None | Some("") => UserRole::Student,
            Some(raw) => raw.parse::<UserRole>().unwrap_or_else(|_| {
                errors.push("role", "Role must be admin or student");
                UserRole::Student
            }),
        };

        errors.finish(ValidRegistration {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password,
            role,
        })
    }
}

/// 用户登录请求（来自HTTP请求）
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// 返回规范化后的 (email, password)
    pub fn validate(self) -> Result<(String, String), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(msg) = validate_email(&self.email) {
            errors.push("email", msg);
        }
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }

        errors.finish((normalize_email(&self.email), self.password))
    }
}
