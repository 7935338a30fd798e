//! 提交存储操作

use std::collections::{HashMap, HashSet};

use super::{SeaOrmStorage, read_error, update_outcome, write_error};
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions, Model};
use crate::entity::{advance_timestamp, now_timestamp};
use crate::errors::Result;
use crate::models::{
    RowScope,
    submissions::{
        entities::{DUPLICATE_SUBMISSION, Submission, SubmissionStatus},
        requests::{NewSubmission, SubmissionGrade, UpdateSubmissionRequest},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建提交，(assignment_id, user_id) 唯一索引兜底并发重复提交
    pub async fn create_submission_impl(&self, req: NewSubmission) -> Result<Submission> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            assignment_id: Set(req.assignment_id),
            user_id: Set(req.user_id),
            content: Set(req.content),
            file_url: Set(req.file_url),
            status: Set(SubmissionStatus::Submitted.to_string()),
            marks_obtained: Set(None),
            feedback: Set(None),
            submitted_at: Set(now_timestamp()),
            graded_at: Set(None),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, DUPLICATE_SUBMISSION, "Failed to create submission"))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交（附带作业标题、学生姓名与邮箱）
    pub async fn get_submission_by_id_impl(&self, id: Uuid) -> Result<Option<Submission>> {
        let Some(model) = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(read_error("Failed to query submission"))?
        else {
            return Ok(None);
        };

        Ok(self.enrich_submissions(vec![model]).await?.pop())
    }

    pub async fn get_submission_by_assignment_and_user_impl(
        &self,
        assignment_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(read_error("Failed to query submission"))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 按可见范围列出提交（按提交时间倒序）
    pub async fn list_submissions_impl(&self, scope: RowScope) -> Result<Vec<Submission>> {
        let mut select = Submissions::find();

        // 学生只能看到自己的提交
        if let Some(user_id) = scope.restricted_to() {
            select = select.filter(Column::UserId.eq(user_id));
        }

        let models = select
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(read_error("Failed to list submissions"))?;

        self.enrich_submissions(models).await
    }

    /// 更新提交内容，未提供的字段保持原值，提交时间刷新
    pub async fn update_submission_impl(
        &self,
        id: Uuid,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>> {
        let Some(existing) = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(read_error("Failed to query submission"))?
        else {
            return Ok(None);
        };

        let mut model = ActiveModel {
            id: Set(id),
            submitted_at: Set(advance_timestamp(existing.submitted_at)),
            ..Default::default()
        };

        if let Some(content) = update.content {
            model.content = Set(content);
        }
        if let Some(file_url) = update.file_url {
            model.file_url = Set(Some(file_url));
        }

        let updated = update_outcome(
            model.update(&self.db).await,
            DUPLICATE_SUBMISSION,
            "Failed to update submission",
        )?;
        if updated.is_none() {
            return Ok(None);
        }

        self.get_submission_by_id_impl(id).await
    }

    /// 评分：写入分数与评语，状态置为 graded 并记录评分时间
    pub async fn grade_submission_impl(
        &self,
        id: Uuid,
        grade: SubmissionGrade,
    ) -> Result<Option<Submission>> {
        let Some(existing) = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(read_error("Failed to query submission"))?
        else {
            return Ok(None);
        };

        let model = ActiveModel {
            id: Set(id),
            marks_obtained: Set(grade.marks_obtained),
            feedback: Set(grade.feedback),
            status: Set(SubmissionStatus::Graded.to_string()),
            graded_at: Set(Some(
                existing
                    .graded_at
                    .map_or_else(now_timestamp, advance_timestamp),
            )),
            ..Default::default()
        };

        let updated = update_outcome(
            model.update(&self.db).await,
            DUPLICATE_SUBMISSION,
            "Failed to grade submission",
        )?;
        if updated.is_none() {
            return Ok(None);
        }

        self.get_submission_by_id_impl(id).await
    }

    /// 删除提交
    pub async fn delete_submission_impl(&self, id: Uuid) -> Result<bool> {
        let result = Submissions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(read_error("Failed to delete submission"))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量补全作业标题、总分与学生信息
    async fn enrich_submissions(&self, models: Vec<Model>) -> Result<Vec<Submission>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let assignment_ids: Vec<Uuid> = models
            .iter()
            .map(|s| s.assignment_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let user_ids: Vec<Uuid> = models
            .iter()
            .map(|s| s.user_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let assignments: HashMap<Uuid, (String, i32)> = Assignments::find()
            .select_only()
            .column(AssignmentColumn::Id)
            .column(AssignmentColumn::Title)
            .column(AssignmentColumn::TotalMarks)
            .filter(AssignmentColumn::Id.is_in(assignment_ids))
            .into_tuple::<(Uuid, String, i32)>()
            .all(&self.db)
            .await
            .map_err(read_error("Failed to query assignments"))?
            .into_iter()
            .map(|(id, title, marks)| (id, (title, marks)))
            .collect();

        let students = self.users_by_ids(user_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let assignment = assignments.get(&m.assignment_id).cloned();
                let student = students.get(&m.user_id);
                let student_name = student.map(|u| u.name.clone());
                let student_email = student.map(|u| u.email.clone());
                let mut submission = m.into_submission();
                if let Some((title, marks)) = assignment {
                    submission.assignment_title = Some(title);
                    submission.total_marks = Some(marks);
                }
                submission.student_name = student_name;
                submission.student_email = student_email;
                submission
            })
            .collect())
    }
}
