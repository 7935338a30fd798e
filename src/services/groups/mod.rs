pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod members;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::PortalError;
use crate::models::auth::AuthContext;
use crate::models::groups::requests::{CreateGroupRequest, MemberRequest, UpdateGroupRequest};
use crate::storage::Storage;

pub struct GroupService {
    storage: Option<Arc<dyn Storage>>,
}

impl GroupService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>, PortalError> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 创建小组
    pub async fn create_group(
        &self,
        ctx: AuthContext,
        group_data: CreateGroupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_group(self, ctx, group_data, request).await
    }

    // 小组列表
    pub async fn list_groups(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_groups(self, request).await
    }

    // 小组详情
    pub async fn get_group(&self, group_id: Uuid, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_group(self, group_id, request).await
    }

    // 更新小组
    pub async fn update_group(
        &self,
        group_id: Uuid,
        update_data: UpdateGroupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_group(self, group_id, update_data, request).await
    }

    // 删除小组
    pub async fn delete_group(
        &self,
        group_id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_group(self, group_id, request).await
    }

    // 添加成员
    pub async fn add_member(
        &self,
        group_id: Uuid,
        member: MemberRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::add_member(self, group_id, member, request).await
    }

    // 移除成员
    pub async fn remove_member(
        &self,
        group_id: Uuid,
        member: MemberRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::remove_member(self, group_id, member, request).await
    }

    // 成员列表
    pub async fn list_members(
        &self,
        group_id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::list_members(self, group_id, request).await
    }
}
