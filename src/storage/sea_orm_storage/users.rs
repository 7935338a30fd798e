//! 用户存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, read_error, write_error};
use crate::entity::now_timestamp;
use crate::entity::users::{ActiveModel, Column, Entity as Users, Model};
use crate::errors::Result;
use crate::models::users::{entities::User, requests::CreateUserRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(req.name),
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            created_at: Set(now_timestamp()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Email already registered", "Failed to create user"))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: Uuid) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(read_error("Failed to query user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(read_error("Failed to query user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 列出全部用户（按注册时间倒序）
    pub async fn list_users_impl(&self) -> Result<Vec<User>> {
        let users = Users::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(read_error("Failed to list users"))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 用户总数
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(read_error("Failed to count users"))
    }

    /// 批量查询用户，供列表补全姓名等展示字段
    pub(super) async fn users_by_ids(&self, ids: Vec<Uuid>) -> Result<HashMap<Uuid, Model>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let users = Users::find()
            .filter(Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(read_error("Failed to query users"))?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}
