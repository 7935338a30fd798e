#[macro_use]
mod common;

use actix_web::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[actix_web::test]
async fn students_cannot_manage_groups() {
    let (app, _state) = test_app!();
    let (student, _) = register!(app, "Sam", "sam@example.com", "student");

    let (status, body) = send!(
        app,
        authed!(post, "/api/groups", student).set_json(json!({ "name": "Hackers" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");

    // 普通成员仍可浏览小组
    let (status, body) = send!(app, authed!(get, "/api/groups", student));
    assert_eq!(status, StatusCode::OK);
    assert!(body["groups"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn group_detail_and_list_are_enriched() {
    let (app, _state) = test_app!();
    let (admin, admin_id) = register!(app, "Ada", "ada@example.com", "admin");
    let (_, student_id) = register!(app, "Sam", "sam@example.com", "student");
    let group_id = create_group!(app, admin, "Compilers");
    add_member!(app, admin, group_id, student_id);

    let (status, body) = send!(app, authed!(get, format!("/api/groups/{group_id}"), admin));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["group"]["name"], "Compilers");
    assert_eq!(body["group"]["created_by"], admin_id.as_str());
    assert_eq!(body["group"]["creator_name"], "Ada");
    assert_eq!(body["group"]["creator_email"], "ada@example.com");

    let (status, body) = send!(app, authed!(get, "/api/groups", admin));
    assert_eq!(status, StatusCode::OK);
    let groups = body["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["member_count"], 1);
    assert_eq!(groups[0]["creator_name"], "Ada");
}

#[actix_web::test]
async fn groups_are_listed_newest_first() {
    let (app, _state) = test_app!();
    let (admin, _) = register!(app, "Ada", "ada@example.com", "admin");
    let first = create_group!(app, admin, "Compilers");
    let second = create_group!(app, admin, "Databases");
    let third = create_group!(app, admin, "Networks");

    let (status, body) = send!(app, authed!(get, "/api/groups", admin));
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["groups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![third.as_str(), second.as_str(), first.as_str()]);
}

#[actix_web::test]
async fn partial_group_update_keeps_other_fields() {
    let (app, _state) = test_app!();
    let (admin, _) = register!(app, "Ada", "ada@example.com", "admin");
    let group_id = create_group!(app, admin, "Compilers");

    let (_, before) = send!(app, authed!(get, format!("/api/groups/{group_id}"), admin));

    let (status, body) = send!(
        app,
        authed!(put, format!("/api/groups/{group_id}"), admin)
            .set_json(json!({ "name": "Advanced Compilers" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Group updated");
    assert_eq!(body["group"]["name"], "Advanced Compilers");
    assert_eq!(body["group"]["description"], before["group"]["description"]);
    assert_eq!(body["group"]["created_at"], before["group"]["created_at"]);

    let previous = common::timestamp(&body["group"]["updated_at"]);
    let (status, body) = send!(
        app,
        authed!(put, format!("/api/groups/{group_id}"), admin).set_json(json!({}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["group"]["name"], "Advanced Compilers");
    assert!(common::timestamp(&body["group"]["updated_at"]) > previous);

    let (status, body) = send!(
        app,
        authed!(put, format!("/api/groups/{}", Uuid::new_v4()), admin)
            .set_json(json!({ "name": "Ghost" }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Group not found");
}

#[actix_web::test]
async fn deleting_a_missing_group_succeeds() {
    let (app, _state) = test_app!();
    let (admin, _) = register!(app, "Ada", "ada@example.com", "admin");
    let group_id = create_group!(app, admin, "Compilers");

    for id in [group_id.clone(), Uuid::new_v4().to_string(), group_id.clone()] {
        let (status, body) = send!(app, authed!(delete, format!("/api/groups/{id}"), admin));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Group deleted");
    }

    let (status, _) = send!(app, authed!(get, format!("/api/groups/{group_id}"), admin));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn membership_lifecycle() {
    let (app, _state) = test_app!();
    let (admin, _) = register!(app, "Ada", "ada@example.com", "admin");
    let (_, sam) = register!(app, "Sam", "sam@example.com", "student");
    let group_id = create_group!(app, admin, "Compilers");
    let members_uri = format!("/api/groups/{group_id}/members");

    add_member!(app, admin, group_id, sam);

    // 重复加入
    let (status, body) = send!(
        app,
        authed!(post, members_uri, admin).set_json(json!({ "user_id": sam }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User is already a member of this group");

    // 不存在的用户
    let (status, body) = send!(
        app,
        authed!(post, members_uri, admin).set_json(json!({ "user_id": Uuid::new_v4() }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");

    // 不存在的小组
    let (status, body) = send!(
        app,
        authed!(post, format!("/api/groups/{}/members", Uuid::new_v4()), admin)
            .set_json(json!({ "user_id": sam }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Group not found");

    // 非法 user_id
    let (status, body) = send!(
        app,
        authed!(post, members_uri, admin).set_json(json!({ "user_id": "abc" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["message"], "Valid user ID is required");

    let (status, body) = send!(app, authed!(get, members_uri, admin));
    assert_eq!(status, StatusCode::OK);
    let members = body["members"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["id"], sam.as_str());
    assert_eq!(members[0]["name"], "Sam");
    assert!(members[0]["joined_at"].is_string());

    for _ in 0..2 {
        let (status, body) = send!(
            app,
            authed!(delete, members_uri, admin).set_json(json!({ "user_id": sam }))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Member removed from group");
    }

    let (_, body) = send!(app, authed!(get, members_uri, admin));
    assert!(body["members"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn malformed_requests_are_rejected() {
    let (app, _state) = test_app!();
    let (admin, _) = register!(app, "Ada", "ada@example.com", "admin");

    let (status, body) = send!(app, authed!(get, "/api/groups/123", admin));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid ID format");

    let (status, body) = send!(
        app,
        authed!(post, "/api/groups", admin)
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{ not json")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send!(
        app,
        authed!(post, "/api/groups", admin).set_json(json!({ "name": "   " }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "name");
}
