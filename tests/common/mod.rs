//! 集成测试公共设施：内存 SQLite 存储 + Moka 缓存 + 完整路由

#![allow(dead_code, unused_macros)]

use std::sync::Arc;

use actix_web::web;
use student_group_portal::cache::ObjectCache;
use student_group_portal::cache::object_cache::moka::MokaCacheWrapper;
use student_group_portal::storage::Storage;
use student_group_portal::storage::sea_orm_storage::SeaOrmStorage;

pub struct TestState {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

pub async fn test_state() -> TestState {
    let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
        .await
        .expect("in-memory database");
    TestState {
        storage: Arc::new(storage),
        cache: Arc::new(MokaCacheWrapper::with_settings(1_000, 300)),
    }
}

pub fn data(state: &TestState) -> (web::Data<Arc<dyn Storage>>, web::Data<Arc<dyn ObjectCache>>) {
    (
        web::Data::new(state.storage.clone()),
        web::Data::new(state.cache.clone()),
    )
}

/// 解析响应中的 RFC 3339 时间字段
pub fn timestamp(value: &serde_json::Value) -> chrono::DateTime<chrono::FixedOffset> {
    let text = value.as_str().expect("timestamp string");
    chrono::DateTime::parse_from_rfc3339(text).expect("RFC 3339 timestamp")
}

/// 构建完整应用，返回 `(service, TestState)`
macro_rules! test_app {
    () => {{
        let state = common::test_state().await;
        let (storage, cache) = common::data(&state);
        let app = actix_web::test::init_service(
            actix_web::App::new()
                .app_data(storage)
                .app_data(cache)
                .configure(student_group_portal::configure_app)
                .default_service(actix_web::web::to(student_group_portal::routes::not_found)),
        )
        .await;
        (app, state)
    }};
}

/// 发送请求，返回 `(StatusCode, serde_json::Value)`
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body = actix_web::test::read_body(resp).await;
        let json: serde_json::Value =
            serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }};
}

/// 带 Bearer 令牌的请求构造
macro_rules! authed {
    ($method:ident, $uri:expr, $token:expr) => {
        actix_web::test::TestRequest::$method()
            .uri(&$uri)
            .insert_header(("Authorization", format!("Bearer {}", $token)))
    };
}

/// 注册用户，返回 `(token, user_id)`
macro_rules! register {
    ($app:expr, $name:expr, $email:expr, $role:expr) => {{
        let (status, body) = send!(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(serde_json::json!({
                    "name": $name,
                    "email": $email,
                    "password": "password123",
                    "role": $role,
                }))
        );
        assert_eq!(status, actix_web::http::StatusCode::CREATED, "{body}");
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }};
}

/// 管理员创建小组，返回小组 ID
macro_rules! create_group {
    ($app:expr, $token:expr, $name:expr) => {{
        let (status, body) = send!(
            $app,
            authed!(post, "/api/groups", $token)
                .set_json(serde_json::json!({ "name": $name, "description": "study group" }))
        );
        assert_eq!(status, actix_web::http::StatusCode::CREATED, "{body}");
        body["group"]["id"].as_str().unwrap().to_string()
    }};
}

/// 管理员在小组中创建作业，返回作业 ID
macro_rules! create_assignment {
    ($app:expr, $token:expr, $group_id:expr, $title:expr, $due:expr) => {{
        let (status, body) = send!(
            $app,
            authed!(post, "/api/assignments", $token).set_json(serde_json::json!({
                "title": $title,
                "description": "read chapter 1",
                "due_date": $due,
                "total_marks": 50,
                "group_id": $group_id,
            }))
        );
        assert_eq!(status, actix_web::http::StatusCode::CREATED, "{body}");
        body["assignment"]["id"].as_str().unwrap().to_string()
    }};
}

/// 管理员将用户加入小组
macro_rules! add_member {
    ($app:expr, $token:expr, $group_id:expr, $user_id:expr) => {{
        let (status, body) = send!(
            $app,
            authed!(post, format!("/api/groups/{}/members", $group_id), $token)
                .set_json(serde_json::json!({ "user_id": $user_id }))
        );
        assert_eq!(status, actix_web::http::StatusCode::OK, "{body}");
    }};
}
