pub mod create;
pub mod delete;
pub mod detail;
pub mod grade;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::errors::PortalError;
use crate::models::auth::AuthContext;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, GradeSubmissionRequest, UpdateSubmissionRequest,
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>, PortalError> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 提交作业
    pub async fn create_submission(
        &self,
        ctx: AuthContext,
        submission_data: CreateSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, ctx, submission_data, request).await
    }

    // 提交列表（学生只看到自己的）
    pub async fn list_submissions(
        &self,
        ctx: AuthContext,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, ctx, request).await
    }

    // 提交详情
    pub async fn get_submission(
        &self,
        ctx: AuthContext,
        submission_id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, ctx, submission_id, request).await
    }

    // 更新提交
    pub async fn update_submission(
        &self,
        ctx: AuthContext,
        submission_id: Uuid,
        update_data: UpdateSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_submission(self, ctx, submission_id, update_data, request).await
    }

    // 评分
    pub async fn grade_submission(
        &self,
        ctx: AuthContext,
        submission_id: Uuid,
        grade_data: GradeSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, ctx, submission_id, grade_data, request).await
    }

    // 删除提交
    pub async fn delete_submission(
        &self,
        ctx: AuthContext,
        submission_id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, ctx, submission_id, request).await
    }
}

// 非所有者且非管理员时拒绝访问
fn ensure_owner_or_admin(ctx: &AuthContext, submission: &Submission) -> Result<(), PortalError> {
    if ctx.owns_or_admin(submission.user_id) {
        Ok(())
    } else {
        info!(
            "User {} denied access to submission {} owned by {}",
            ctx.user_id, submission.id, submission.user_id
        );
        Err(PortalError::authorization("Access denied"))
    }
}

fn submission_not_found() -> PortalError {
    PortalError::not_found("Submission not found")
}
