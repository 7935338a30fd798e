use std::sync::Arc;

use uuid::Uuid;

use crate::models::{
    RowScope,
    assignments::{
        entities::Assignment,
        requests::{AssignmentUpdate, NewAssignment},
    },
    groups::{
        entities::{Group, GroupMember},
        requests::{NewGroup, UpdateGroupRequest},
    },
    submissions::{
        entities::Submission,
        requests::{NewSubmission, SubmissionGrade, UpdateSubmissionRequest},
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 数据访问接口
///
/// 更新方法在记录不存在时返回 `Ok(None)`；删除方法返回是否实际删除了记录，
/// 删除不存在的记录不是错误。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，邮箱重复时返回 Conflict
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出全部用户
    async fn list_users(&self) -> Result<Vec<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 小组管理方法
    async fn create_group(&self, group: NewGroup) -> Result<Group>;
    // 包含创建者姓名与邮箱
    async fn get_group_by_id(&self, id: Uuid) -> Result<Option<Group>>;
    // 包含创建者姓名与成员数，按创建时间倒序
    async fn list_groups(&self) -> Result<Vec<Group>>;
    async fn update_group(&self, id: Uuid, update: UpdateGroupRequest) -> Result<Option<Group>>;
    async fn delete_group(&self, id: Uuid) -> Result<bool>;

    /// 小组成员管理方法
    // 重复加入返回 Conflict
    async fn add_group_member(&self, group_id: Uuid, user_id: Uuid) -> Result<()>;
    async fn remove_group_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool>;
    // 按加入时间倒序
    async fn list_group_members(&self, group_id: Uuid) -> Result<Vec<GroupMember>>;
    async fn is_group_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool>;

    /// 作业管理方法
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: Uuid) -> Result<Option<Assignment>>;
    // 学生只能看到所在小组的作业，按截止时间倒序
    async fn list_assignments(&self, scope: RowScope) -> Result<Vec<Assignment>>;
    async fn update_assignment(
        &self,
        id: Uuid,
        update: AssignmentUpdate,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: Uuid) -> Result<bool>;

    /// 提交管理方法
    // 同一用户对同一作业重复提交返回 Conflict
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission>;
    async fn get_submission_by_id(&self, id: Uuid) -> Result<Option<Submission>>;
    async fn get_submission_by_assignment_and_user(
        &self,
        assignment_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Submission>>;
    // 学生只能看到自己的提交，按提交时间倒序
    async fn list_submissions(&self, scope: RowScope) -> Result<Vec<Submission>>;
    async fn update_submission(
        &self,
        id: Uuid,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>>;
    async fn grade_submission(
        &self,
        id: Uuid,
        grade: SubmissionGrade,
    ) -> Result<Option<Submission>>;
    async fn delete_submission(&self, id: Uuid) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
