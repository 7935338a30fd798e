use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 未配置或配置无法解析时的令牌有效期（天）
const DEFAULT_EXPIRY_DAYS: i64 = 7;

// JWT Claims 结构体，只携带用户 ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub exp: usize,  // Expiration time (时间戳)
    pub iat: usize,  // Issued at (签发时间)
}

/// 解析有效期字符串：`7d`、`12h`、`30m`、`45s` 或纯秒数
pub fn parse_expiry(value: &str) -> Option<chrono::TimeDelta> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let (number, unit) = match value.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&value[..idx], Some(c)),
        _ => (value, None),
    };
    let amount: i64 = number.trim().parse().ok().filter(|n| *n > 0)?;
    match unit.map(|c| c.to_ascii_lowercase()) {
        None | Some('s') => chrono::TimeDelta::try_seconds(amount),
        Some('m') => chrono::TimeDelta::try_minutes(amount),
        Some('h') => chrono::TimeDelta::try_hours(amount),
        Some('d') => chrono::TimeDelta::try_days(amount),
        Some(_) => None,
    }
}

pub struct JwtUtils;

impl JwtUtils {
    /// 按配置签发令牌
    pub fn issue_token(user_id: Uuid) -> Result<String> {
        let config = AppConfig::get();
        let expiry = parse_expiry(&config.jwt.expire).unwrap_or_else(|| {
            tracing::warn!(
                "Invalid jwt.expire '{}', falling back to 7 days",
                config.jwt.expire
            );
            chrono::TimeDelta::days(DEFAULT_EXPIRY_DAYS)
        });
        Self::issue_token_with(&config.jwt.secret, user_id, expiry)
    }

    /// 校验令牌并返回用户 ID
    pub fn verify_token(token: &str) -> Result<Uuid> {
        Self::verify_token_with(&AppConfig::get().jwt.secret, token)
    }

    pub fn issue_token_with(secret: &str, user_id: Uuid, expiry: chrono::TimeDelta) -> Result<String> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| PortalError::internal(format!("Failed to sign token: {e}")))
    }

    pub fn verify_token_with(secret: &str, token: &str) -> Result<Uuid> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("JWT verification failed: {}", e);
            PortalError::authentication("Invalid token")
        })?;

        Uuid::parse_str(&claims.sub).map_err(|_| PortalError::authentication("Invalid token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_parse_expiry() {
        assert_eq!(parse_expiry("7d"), Some(chrono::TimeDelta::days(7)));
        assert_eq!(parse_expiry("12h"), Some(chrono::TimeDelta::hours(12)));
        assert_eq!(parse_expiry("30m"), Some(chrono::TimeDelta::minutes(30)));
        assert_eq!(parse_expiry("3600"), Some(chrono::TimeDelta::seconds(3600)));
        assert_eq!(parse_expiry("45s"), Some(chrono::TimeDelta::seconds(45)));
        assert_eq!(parse_expiry("0d"), None);
        assert_eq!(parse_expiry("soon"), None);
        assert_eq!(parse_expiry("5w"), None);
        assert_eq!(parse_expiry(""), None);
    }

    #[test]
    fn test_token_maps_back_to_user() {
        let user_id = Uuid::new_v4();
        let token = JwtUtils::issue_token_with(SECRET, user_id, chrono::TimeDelta::hours(1)).unwrap();
        assert_eq!(JwtUtils::verify_token_with(SECRET, &token).unwrap(), user_id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token =
            JwtUtils::issue_token_with(SECRET, Uuid::new_v4(), chrono::TimeDelta::hours(1)).unwrap();
        let err = JwtUtils::verify_token_with("other-secret", &token).unwrap_err();
        assert_eq!(err.message(), "Invalid token");
    }

    #[test]
    fn test_expired_token_rejected() {
        // 超过 jsonwebtoken 默认 60 秒的时钟偏差容忍
        let token =
            JwtUtils::issue_token_with(SECRET, Uuid::new_v4(), chrono::TimeDelta::seconds(-120))
                .unwrap();
        assert!(JwtUtils::verify_token_with(SECRET, &token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(JwtUtils::verify_token_with(SECRET, "not.a.jwt").is_err());
    }
}
