pub mod assignments;
pub mod auth;
pub mod groups;
pub mod submissions;
pub mod system;
pub mod users;

pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use groups::configure_group_routes;
pub use submissions::configure_submission_routes;
pub use system::{configure_system_routes, not_found};
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_system_routes)
        .configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_group_routes)
        .configure(configure_assignment_routes)
        .configure(configure_submission_routes);
}
