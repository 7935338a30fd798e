//! 小组与成员存储操作

use std::collections::{HashMap, HashSet};

use super::{SeaOrmStorage, read_error, update_outcome, write_error};
use crate::entity::group_members::{
    ActiveModel as MemberActiveModel, Column as MemberColumn, Entity as GroupMembers,
};
use crate::entity::groups::{ActiveModel, Column, Entity as Groups};
use crate::entity::{advance_timestamp, now_timestamp};
use crate::errors::{PortalError, Result};
use crate::models::groups::{
    entities::{Group, GroupMember},
    requests::{NewGroup, UpdateGroupRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建小组
    pub async fn create_group_impl(&self, req: NewGroup) -> Result<Group> {
        let now = now_timestamp();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(req.name),
            description: Set(req.description),
            created_by: Set(req.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Group already exists", "Failed to create group"))?;

        Ok(result.into_group())
    }

    /// 通过 ID 获取小组（附带创建者姓名与邮箱）
    pub async fn get_group_by_id_impl(&self, id: Uuid) -> Result<Option<Group>> {
        let Some(model) = Groups::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(read_error("Failed to query group"))?
        else {
            return Ok(None);
        };

        let creator = self.get_user_by_id_impl(model.created_by).await?;
        let mut group = model.into_group();
        if let Some(creator) = creator {
            group.creator_name = Some(creator.name);
            group.creator_email = Some(creator.email);
        }
        Ok(Some(group))
    }

    /// 列出全部小组（附带创建者姓名与成员数）
    pub async fn list_groups_impl(&self) -> Result<Vec<Group>> {
        let models = Groups::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(read_error("Failed to list groups"))?;

        if models.is_empty() {
            return Ok(Vec::new());
        }

        let group_ids: Vec<Uuid> = models.iter().map(|g| g.id).collect();
        let creator_ids: Vec<Uuid> = models
            .iter()
            .map(|g| g.created_by)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let creators = self.users_by_ids(creator_ids).await?;

        let counts: HashMap<Uuid, i64> = GroupMembers::find()
            .select_only()
            .column(MemberColumn::GroupId)
            .column_as(MemberColumn::UserId.count(), "member_count")
            .filter(MemberColumn::GroupId.is_in(group_ids))
            .group_by(MemberColumn::GroupId)
            .into_tuple::<(Uuid, i64)>()
            .all(&self.db)
            .await
            .map_err(read_error("Failed to count group members"))?
            .into_iter()
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let creator_name = creators.get(&m.created_by).map(|u| u.name.clone());
                let member_count = counts.get(&m.id).copied().unwrap_or(0);
                let mut group = m.into_group();
                group.creator_name = creator_name;
                group.member_count = Some(member_count);
                group
            })
            .collect())
    }

    /// 更新小组信息，未提供的字段保持原值
    pub async fn update_group_impl(
        &self,
        id: Uuid,
        update: UpdateGroupRequest,
    ) -> Result<Option<Group>> {
        // 先检查小组是否存在
        let Some(existing) = Groups::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(read_error("Failed to query group"))?
        else {
            return Ok(None);
        };

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(advance_timestamp(existing.updated_at)),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        let updated = update_outcome(
            model.update(&self.db).await,
            "Group already exists",
            "Failed to update group",
        )?;
        if updated.is_none() {
            return Ok(None);
        }

        self.get_group_by_id_impl(id).await
    }

    /// 删除小组，成员与作业随外键级联删除
    pub async fn delete_group_impl(&self, id: Uuid) -> Result<bool> {
        let result = Groups::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(read_error("Failed to delete group"))?;

        Ok(result.rows_affected > 0)
    }

    /// 添加成员
    pub async fn add_group_member_impl(&self, group_id: Uuid, user_id: Uuid) -> Result<()> {
        if self.is_group_member_impl(group_id, user_id).await? {
            return Err(PortalError::conflict("User is already a member of this group"));
        }

        let model = MemberActiveModel {
            group_id: Set(group_id),
            user_id: Set(user_id),
            joined_at: Set(now_timestamp()),
        };

        GroupMembers::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                write_error(
                    e,
                    "User is already a member of this group",
                    "Failed to add group member",
                )
            })?;

        Ok(())
    }

    /// 移除成员
    pub async fn remove_group_member_impl(&self, group_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = GroupMembers::delete_by_id((group_id, user_id))
            .exec(&self.db)
            .await
            .map_err(read_error("Failed to remove group member"))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出小组成员（按加入时间倒序）
    pub async fn list_group_members_impl(&self, group_id: Uuid) -> Result<Vec<GroupMember>> {
        let memberships = GroupMembers::find()
            .filter(MemberColumn::GroupId.eq(group_id))
            .order_by_desc(MemberColumn::JoinedAt)
            .all(&self.db)
            .await
            .map_err(read_error("Failed to list group members"))?;

        let users = self
            .users_by_ids(memberships.iter().map(|m| m.user_id).collect())
            .await?;

        Ok(memberships
            .into_iter()
            .filter_map(|m| {
                users.get(&m.user_id).map(|u| GroupMember {
                    id: u.id,
                    name: u.name.clone(),
                    email: u.email.clone(),
                    joined_at: crate::entity::to_datetime(m.joined_at),
                })
            })
            .collect())
    }

    /// 用户是否为小组成员
    pub async fn is_group_member_impl(&self, group_id: Uuid, user_id: Uuid) -> Result<bool> {
        let count = GroupMembers::find()
            .filter(MemberColumn::GroupId.eq(group_id))
            .filter(MemberColumn::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(read_error("Failed to query group membership"))?;

        Ok(count > 0)
    }
}
