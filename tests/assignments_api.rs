#[macro_use]
mod common;

use actix_web::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[actix_web::test]
async fn students_only_see_assignments_of_their_groups() {
    let (app, _state) = test_app!();
    let (admin, _) = register!(app, "Ada", "ada@example.com", "admin");
    let (student, student_id) = register!(app, "Sam", "sam@example.com", "student");

    let mine = create_group!(app, admin, "Mine");
    let other = create_group!(app, admin, "Other");
    add_member!(app, admin, mine, student_id);

    let visible = create_assignment!(app, admin, mine, "Visible", "2030-01-15");
    let hidden = create_assignment!(app, admin, other, "Hidden", "2030-02-15");

    let (status, body) = send!(app, authed!(get, "/api/assignments", student));
    assert_eq!(status, StatusCode::OK);
    let assignments = body["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0]["id"], visible.as_str());
    assert_eq!(assignments[0]["group_name"], "Mine");
    assert_eq!(assignments[0]["creator_name"], "Ada");
    assert_eq!(assignments[0]["submission_count"], 0);

    // 管理员看到全部，按截止时间倒序
    let (status, body) = send!(app, authed!(get, "/api/assignments", admin));
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["assignments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![hidden.as_str(), visible.as_str()]);

    let (status, _) = send!(app, authed!(get, format!("/api/assignments/{visible}"), student));
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send!(app, authed!(get, format!("/api/assignments/{hidden}"), student));
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");
}

#[actix_web::test]
async fn membership_changes_are_reflected_immediately() {
    let (app, _state) = test_app!();
    let (admin, _) = register!(app, "Ada", "ada@example.com", "admin");
    let (student, student_id) = register!(app, "Sam", "sam@example.com", "student");
    let group = create_group!(app, admin, "Late joiners");
    create_assignment!(app, admin, group, "Essay", "2030-01-15T09:30:00Z");

    let (_, body) = send!(app, authed!(get, "/api/assignments", student));
    assert!(body["assignments"].as_array().unwrap().is_empty());

    add_member!(app, admin, group, student_id);

    let (_, body) = send!(app, authed!(get, "/api/assignments", student));
    assert_eq!(body["assignments"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn assignment_defaults_and_validation() {
    let (app, _state) = test_app!();
    let (admin, _) = register!(app, "Ada", "ada@example.com", "admin");
    let (student, _) = register!(app, "Sam", "sam@example.com", "student");
    let group = create_group!(app, admin, "Compilers");

    let (status, body) = send!(
        app,
        authed!(post, "/api/assignments", admin).set_json(json!({
            "title": "Parser",
            "due_date": "2030-03-01",
            "group_id": group,
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Assignment created");
    assert_eq!(body["assignment"]["total_marks"], 100);
    assert_eq!(body["assignment"]["due_date"], "2030-03-01T00:00:00Z");

    let (status, body) = send!(
        app,
        authed!(post, "/api/assignments", admin).set_json(json!({
            "title": "",
            "due_date": "someday",
            "total_marks": -5,
            "group_id": "nope",
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "due_date", "total_marks", "group_id"]);

    // 类型错误的分数同样按字段报告
    for marks in [json!("abc"), json!(12.5)] {
        let (status, body) = send!(
            app,
            authed!(post, "/api/assignments", admin).set_json(json!({
                "title": "Parser",
                "due_date": "2030-03-01",
                "total_marks": marks,
                "group_id": group,
            }))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "total_marks");
        assert_eq!(body["errors"][0]["message"], "Total marks must be positive");
    }

    let (status, body) = send!(
        app,
        authed!(post, "/api/assignments", admin).set_json(json!({
            "title": "Orphan",
            "due_date": "2030-03-01",
            "group_id": Uuid::new_v4(),
        }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Group not found");

    let (status, _) = send!(
        app,
        authed!(post, "/api/assignments", student).set_json(json!({
            "title": "Sneaky",
            "due_date": "2030-03-01",
            "group_id": group,
        }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn partial_assignment_update_keeps_other_fields() {
    let (app, _state) = test_app!();
    let (admin, _) = register!(app, "Ada", "ada@example.com", "admin");
    let group = create_group!(app, admin, "Compilers");
    let id = create_assignment!(app, admin, group, "Lexer", "2030-01-15");
    let uri = format!("/api/assignments/{id}");

    let (_, before) = send!(app, authed!(get, uri, admin));

    let (status, body) = send!(
        app,
        authed!(put, uri, admin).set_json(json!({ "total_marks": 80 }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Assignment updated");
    let after = &body["assignment"];
    assert_eq!(after["total_marks"], 80);
    for field in ["title", "description", "due_date", "group_id", "created_by", "created_at"] {
        assert_eq!(after[field], before["assignment"][field], "{field} changed");
    }

    // 空更新只推进 updated_at
    let (status, body) = send!(app, authed!(put, uri, admin).set_json(json!({})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assignment"]["title"], "Lexer");
    assert_eq!(body["assignment"]["total_marks"], 80);
    assert!(
        common::timestamp(&body["assignment"]["updated_at"])
            > common::timestamp(&after["updated_at"])
    );

    let (status, body) = send!(
        app,
        authed!(put, format!("/api/assignments/{}", Uuid::new_v4()), admin)
            .set_json(json!({ "title": "Ghost" }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Assignment not found");
}

#[actix_web::test]
async fn deleting_an_assignment_is_idempotent() {
    let (app, _state) = test_app!();
    let (admin, _) = register!(app, "Ada", "ada@example.com", "admin");
    let group = create_group!(app, admin, "Compilers");
    let id = create_assignment!(app, admin, group, "Lexer", "2030-01-15");

    for _ in 0..2 {
        let (status, body) = send!(app, authed!(delete, format!("/api/assignments/{id}"), admin));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Assignment deleted");
    }

    let (status, _) = send!(app, authed!(get, format!("/api/assignments/{id}"), admin));
    assert_eq!(status, StatusCode::NOT_FOUND);
}
