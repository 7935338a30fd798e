use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::users::entities::{User, UserRole};

/// 已认证的调用者
///
/// 由 JWT 中间件在校验令牌后写入请求扩展，处理程序通过提取器获取，
/// 并显式传递给服务与存储层。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// 是否为资源所有者或管理员
    pub fn owns_or_admin(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}

impl From<&User> for AuthContext {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
        }
    }
}
