use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::AuthContext;
use crate::models::groups::requests::{CreateGroupRequest, MemberRequest, UpdateGroupRequest};
use crate::models::users::entities::UserRole;
use crate::services::GroupService;
use crate::utils::SafeId;

// 懒加载的全局 GroupService 实例
static GROUP_SERVICE: Lazy<GroupService> = Lazy::new(GroupService::new_lazy);

// HTTP处理程序
pub async fn create_group(
    req: HttpRequest,
    ctx: AuthContext,
    group_data: web::Json<CreateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .create_group(ctx, group_data.into_inner(), &req)
        .await
}

pub async fn list_groups(req: HttpRequest) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.list_groups(&req).await
}

pub async fn get_group(req: HttpRequest, group_id: SafeId) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.get_group(group_id.0, &req).await
}

pub async fn update_group(
    req: HttpRequest,
    group_id: SafeId,
    update_data: web::Json<UpdateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .update_group(group_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_group(req: HttpRequest, group_id: SafeId) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.delete_group(group_id.0, &req).await
}

pub async fn add_member(
    req: HttpRequest,
    group_id: SafeId,
    member: web::Json<MemberRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .add_member(group_id.0, member.into_inner(), &req)
        .await
}

pub async fn remove_member(
    req: HttpRequest,
    group_id: SafeId,
    member: web::Json<MemberRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .remove_member(group_id.0, member.into_inner(), &req)
        .await
}

pub async fn list_members(req: HttpRequest, group_id: SafeId) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.list_members(group_id.0, &req).await
}

// 配置路由
pub fn configure_group_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/groups")
            .wrap(middlewares::ResponseCache::new())
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_groups))
                    .route(
                        web::post()
                            .to(create_group)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_group))
                    .route(
                        web::put()
                            .to(update_group)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_group)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/members")
                    .route(web::get().to(list_members))
                    .route(
                        web::post()
                            .to(add_member)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(remove_member)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
