use super::entities::User;
use serde::Serialize;
use ts_rs::TS;

/// 单个用户 `{ user }`，用于个人资料与管理员查询
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserResponse {
    pub user: User,
}

/// 全部用户 `{ users }`，按注册时间倒序
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListResponse {
    pub users: Vec<User>,
}
