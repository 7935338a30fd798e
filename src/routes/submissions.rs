use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::AuthContext;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, GradeSubmissionRequest, UpdateSubmissionRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;
use crate::utils::SafeId;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// HTTP处理程序
pub async fn create_submission(
    req: HttpRequest,
    ctx: AuthContext,
    submission_data: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(ctx, submission_data.into_inner(), &req)
        .await
}

pub async fn list_submissions(req: HttpRequest, ctx: AuthContext) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_submissions(ctx, &req).await
}

pub async fn get_submission(
    req: HttpRequest,
    ctx: AuthContext,
    submission_id: SafeId,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(ctx, submission_id.0, &req)
        .await
}

pub async fn update_submission(
    req: HttpRequest,
    ctx: AuthContext,
    submission_id: SafeId,
    update_data: web::Json<UpdateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .update_submission(ctx, submission_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_submission(
    req: HttpRequest,
    ctx: AuthContext,
    submission_id: SafeId,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .delete_submission(ctx, submission_id.0, &req)
        .await
}

pub async fn grade_submission(
    req: HttpRequest,
    ctx: AuthContext,
    submission_id: SafeId,
    grade_data: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_submission(ctx, submission_id.0, grade_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/submissions")
            .wrap(middlewares::ResponseCache::new())
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_submissions))
                    .route(web::post().to(create_submission)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_submission))
                    .route(web::put().to(update_submission))
                    .route(web::delete().to(delete_submission)),
            )
            .service(
                web::resource("/{id}/grade")
                    .route(web::post().to(grade_submission))
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
            ),
    );
}
