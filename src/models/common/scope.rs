use uuid::Uuid;

use crate::models::auth::entities::AuthContext;
use crate::models::users::entities::UserRole;

/// 列表查询的行级可见范围
///
/// 管理员可见全部记录；学生只能看到与自己相关的记录。
/// “相关”的含义由具体查询决定：作业按小组成员关系过滤，提交按作者过滤。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowScope {
    All,
    Caller(Uuid),
}

impl RowScope {
    pub fn for_caller(ctx: &AuthContext) -> Self {
        match ctx.role {
            UserRole::Admin => RowScope::All,
            UserRole::Student => RowScope::Caller(ctx.user_id),
        }
    }

    /// 受限时返回调用者 ID
    pub fn restricted_to(&self) -> Option<Uuid> {
        match self {
            RowScope::All => None,
            RowScope::Caller(id) => Some(*id),
        }
    }
}

impl From<&AuthContext> for RowScope {
    fn from(ctx: &AuthContext) -> Self {
        Self::for_caller(ctx)
    }
}
