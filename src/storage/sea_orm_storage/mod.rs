//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod groups;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并执行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout_secs: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout_secs).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout_secs).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| PortalError::database_operation(format!("Migration failed: {e}")))?;

        info!("SeaORM storage ready, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortalError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存库随连接关闭而消失，只保留一个常驻连接
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(pool_size.max(1))
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .connect_with(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("SQLite connect failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout_secs))
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("Database connect failed: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PortalError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite:, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

/// 写操作错误映射：唯一约束冲突映射为 Conflict，其余为数据库错误
pub(crate) fn write_error(err: DbErr, conflict_message: &str, context: &str) -> PortalError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => PortalError::conflict(conflict_message),
        _ => PortalError::database_operation(format!("{context}: {err}")),
    }
}

/// 更新结果映射，行在检查后被并发删除时视为不存在
pub(crate) fn update_outcome<T>(
    result: std::result::Result<T, DbErr>,
    conflict_message: &str,
    context: &str,
) -> Result<Option<T>> {
    match result {
        Ok(model) => Ok(Some(model)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(err) => Err(write_error(err, conflict_message, context)),
    }
}

/// 读操作错误映射
pub(crate) fn read_error(context: &'static str) -> impl FnOnce(DbErr) -> PortalError {
    move |err| PortalError::database_operation(format!("{context}: {err}"))
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.list_users_impl().await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 小组模块
    async fn create_group(&self, group: NewGroup) -> Result<Group> {
        self.create_group_impl(group).await
    }

    async fn get_group_by_id(&self, id: Uuid) -> Result<Option<Group>> {
        self.get_group_by_id_impl(id).await
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        self.list_groups_impl().await
    }

    async fn update_group(&self, id: Uuid, update: UpdateGroupRequest) -> Result<Option<Group>> {
        self.update_group_impl(id, update).await
    }

    async fn delete_group(&self, id: Uuid) -> Result<bool> {
        self.delete_group_impl(id).await
    }

    async fn add_group_member(&self, group_id: Uuid, user_id: Uuid) -> Result<()> {
        self.add_group_member_impl(group_id, user_id).await
    }

    async fn remove_group_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool> {
        self.remove_group_member_impl(group_id, user_id).await
    }

    async fn list_group_members(&self, group_id: Uuid) -> Result<Vec<GroupMember>> {
        self.list_group_members_impl(group_id).await
    }

    async fn is_group_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool> {
        self.is_group_member_impl(group_id, user_id).await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, id: Uuid) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments(&self, scope: RowScope) -> Result<Vec<Assignment>> {
        self.list_assignments_impl(scope).await
    }

    async fn update_assignment(
        &self,
        id: Uuid,
        update: AssignmentUpdate,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: Uuid) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // 提交模块
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission> {
        self.create_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, id: Uuid) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission_by_assignment_and_user(
        &self,
        assignment_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_assignment_and_user_impl(assignment_id, user_id)
            .await
    }

    async fn list_submissions(&self, scope: RowScope) -> Result<Vec<Submission>> {
        self.list_submissions_impl(scope).await
    }

    async fn update_submission(
        &self,
        id: Uuid,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>> {
        self.update_submission_impl(id, update).await
    }

    async fn grade_submission(
        &self,
        id: Uuid,
        grade: SubmissionGrade,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(id, grade).await
    }

    async fn delete_submission(&self, id: Uuid) -> Result<bool> {
        self.delete_submission_impl(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_outcome_treats_vanished_row_as_missing() {
        let outcome = update_outcome::<u8>(Err(DbErr::RecordNotUpdated), "dup", "Failed");
        assert!(matches!(outcome, Ok(None)));

        assert!(matches!(update_outcome(Ok(7u8), "dup", "Failed"), Ok(Some(7))));
    }

    #[test]
    fn test_update_outcome_keeps_other_errors_internal() {
        let err = update_outcome::<u8>(
            Err(DbErr::Custom("disk I/O error".into())),
            "dup",
            "Failed to update group",
        )
        .unwrap_err();
        assert_eq!(err.code(), "E005");
        assert!(err.message().starts_with("Failed to update group"));
    }

    #[actix_web::test]
    async fn test_update_after_delete_reports_missing() {
        let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5).await.unwrap();
        let admin = storage
            .create_user_impl(crate::models::users::requests::CreateUserRequest {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                password_hash: "hash".into(),
                role: crate::models::users::entities::UserRole::Admin,
            })
            .await
            .unwrap();
        let group = storage
            .create_group_impl(NewGroup {
                name: "Compilers".into(),
                description: None,
                created_by: admin.id,
            })
            .await
            .unwrap();

        assert!(storage.delete_group_impl(group.id).await.unwrap());
        let updated = storage
            .update_group_impl(group.id, UpdateGroupRequest::default())
            .await
            .unwrap();
        assert!(updated.is_none());
    }
}
