//! 作业存储操作

use std::collections::{HashMap, HashSet};

use super::{SeaOrmStorage, read_error, update_outcome, write_error};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments, Model};
use crate::entity::{advance_timestamp, now_timestamp, to_timestamp};
use crate::entity::group_members::{Column as MemberColumn, Entity as GroupMembers};
use crate::entity::groups::{Column as GroupColumn, Entity as Groups};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::Result;
use crate::models::{
    RowScope,
    assignments::{
        entities::Assignment,
        requests::{AssignmentUpdate, NewAssignment},
    },
};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, req: NewAssignment) -> Result<Assignment> {
        let now = now_timestamp();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(to_timestamp(req.due_date)),
            total_marks: Set(req.total_marks),
            group_id: Set(req.group_id),
            created_by: Set(req.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Assignment already exists", "Failed to create assignment"))?;

        let mut enriched = self.enrich_assignments(vec![result]).await?;
        Ok(enriched.remove(0))
    }

    /// 通过 ID 获取作业（附带小组名、创建者姓名与提交数）
    pub async fn get_assignment_by_id_impl(&self, id: Uuid) -> Result<Option<Assignment>> {
        let Some(model) = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(read_error("Failed to query assignment"))?
        else {
            return Ok(None);
        };

        Ok(self.enrich_assignments(vec![model]).await?.pop())
    }

    /// 按可见范围列出作业（按截止时间倒序）
    pub async fn list_assignments_impl(&self, scope: RowScope) -> Result<Vec<Assignment>> {
        let mut select = Assignments::find();

        // 学生只能看到自己所在小组的作业
        if let Some(user_id) = scope.restricted_to() {
            select = select.filter(
                Column::GroupId.in_subquery(
                    Query::select()
                        .column(MemberColumn::GroupId)
                        .from(GroupMembers)
                        .and_where(MemberColumn::UserId.eq(user_id))
                        .to_owned(),
                ),
            );
        }

        let models = select
            .order_by_desc(Column::DueDate)
            .all(&self.db)
            .await
            .map_err(read_error("Failed to list assignments"))?;

        self.enrich_assignments(models).await
    }

    /// 更新作业，未提供的字段保持原值
    pub async fn update_assignment_impl(
        &self,
        id: Uuid,
        update: AssignmentUpdate,
    ) -> Result<Option<Assignment>> {
        let Some(existing) = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(read_error("Failed to query assignment"))?
        else {
            return Ok(None);
        };

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(advance_timestamp(existing.updated_at)),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(to_timestamp(due_date));
        }
        if let Some(total_marks) = update.total_marks {
            model.total_marks = Set(total_marks);
        }

        let updated = update_outcome(
            model.update(&self.db).await,
            "Assignment already exists",
            "Failed to update assignment",
        )?;
        if updated.is_none() {
            return Ok(None);
        }

        self.get_assignment_by_id_impl(id).await
    }

    /// 删除作业，提交随外键级联删除
    pub async fn delete_assignment_impl(&self, id: Uuid) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(read_error("Failed to delete assignment"))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量补全展示字段，保持输入顺序
    async fn enrich_assignments(&self, models: Vec<Model>) -> Result<Vec<Assignment>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = models.iter().map(|a| a.id).collect();
        let group_ids: Vec<Uuid> = models
            .iter()
            .map(|a| a.group_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let creator_ids: Vec<Uuid> = models
            .iter()
            .map(|a| a.created_by)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let group_names: HashMap<Uuid, String> = Groups::find()
            .select_only()
            .column(GroupColumn::Id)
            .column(GroupColumn::Name)
            .filter(GroupColumn::Id.is_in(group_ids))
            .into_tuple::<(Uuid, String)>()
            .all(&self.db)
            .await
            .map_err(read_error("Failed to query groups"))?
            .into_iter()
            .collect();

        let creators = self.users_by_ids(creator_ids).await?;

        let submission_counts: HashMap<Uuid, i64> = Submissions::find()
            .select_only()
            .column(SubmissionColumn::AssignmentId)
            .column_as(SubmissionColumn::Id.count(), "submission_count")
            .filter(SubmissionColumn::AssignmentId.is_in(ids))
            .group_by(SubmissionColumn::AssignmentId)
            .into_tuple::<(Uuid, i64)>()
            .all(&self.db)
            .await
            .map_err(read_error("Failed to count submissions"))?
            .into_iter()
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let group_name = group_names.get(&m.group_id).cloned();
                let creator_name = creators.get(&m.created_by).map(|u| u.name.clone());
                let submission_count = submission_counts.get(&m.id).copied().unwrap_or(0);
                let mut assignment = m.into_assignment();
                assignment.group_name = group_name;
                assignment.creator_name = creator_name;
                assignment.submission_count = Some(submission_count);
                assignment
            })
            .collect())
    }
}
