#[macro_use]
mod common;

use actix_web::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

/// 创建管理员、两名学生、一个小组和一份作业
macro_rules! classroom {
    ($app:expr) => {{
        let (admin, _) = register!($app, "Ada", "ada@example.com", "admin");
        let (alice, alice_id) = register!($app, "Alice", "alice@example.com", "student");
        let (bob, bob_id) = register!($app, "Bob", "bob@example.com", "student");
        let group = create_group!($app, admin, "Compilers");
        add_member!($app, admin, group, alice_id);
        add_member!($app, admin, group, bob_id);
        let assignment = create_assignment!($app, admin, group, "Lexer", "2030-01-15");
        (admin, alice, bob, assignment)
    }};
}

macro_rules! submit {
    ($app:expr, $token:expr, $assignment:expr, $content:expr) => {{
        send!(
            $app,
            authed!(post, "/api/submissions", $token).set_json(json!({
                "assignment_id": $assignment,
                "content": $content,
                "file_url": "https://example.com/answer.pdf",
            }))
        )
    }};
}

#[actix_web::test]
async fn duplicate_submission_is_rejected_without_mutation() {
    let (app, _state) = test_app!();
    let (_, alice, _, assignment) = classroom!(app);

    let (status, body) = submit!(app, alice, assignment, "first answer");
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Submission created");
    assert_eq!(body["submission"]["status"], "submitted");
    let id = body["submission"]["id"].as_str().unwrap().to_string();

    let (status, body) = submit!(app, alice, assignment, "second answer");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Already submitted. Use update instead.");

    let (status, body) = send!(app, authed!(get, format!("/api/submissions/{id}"), alice));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submission"]["content"], "first answer");
}

#[actix_web::test]
async fn submitting_to_a_missing_assignment_is_not_found() {
    let (app, _state) = test_app!();
    let (_, alice, _, _) = classroom!(app);

    let (status, body) = submit!(app, alice, Uuid::new_v4(), "answer");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Assignment not found");

    let (status, body) = send!(
        app,
        authed!(post, "/api/submissions", alice).set_json(json!({
            "assignment_id": "x",
            "content": "",
            "file_url": "ftp://nope",
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn students_only_see_their_own_submissions() {
    let (app, _state) = test_app!();
    let (admin, alice, bob, assignment) = classroom!(app);

    let (_, body) = submit!(app, alice, assignment, "alice answer");
    let alice_submission = body["submission"]["id"].as_str().unwrap().to_string();
    submit!(app, bob, assignment, "bob answer");

    let (status, body) = send!(app, authed!(get, "/api/submissions", alice));
    assert_eq!(status, StatusCode::OK);
    let submissions = body["submissions"].as_array().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0]["content"], "alice answer");
    assert_eq!(submissions[0]["assignment_title"], "Lexer");
    assert_eq!(submissions[0]["total_marks"], 50);
    assert_eq!(submissions[0]["student_name"], "Alice");

    let (_, body) = send!(app, authed!(get, "/api/submissions", admin));
    assert_eq!(body["submissions"].as_array().unwrap().len(), 2);

    let (status, body) = send!(
        app,
        authed!(get, format!("/api/submissions/{alice_submission}"), bob)
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");

    let (status, body) = send!(
        app,
        authed!(get, format!("/api/submissions/{alice_submission}"), admin)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submission"]["student_email"], "alice@example.com");
}

#[actix_web::test]
async fn only_owner_or_admin_may_update_or_delete() {
    let (app, _state) = test_app!();
    let (admin, alice, bob, assignment) = classroom!(app);

    let (_, body) = submit!(app, alice, assignment, "draft");
    let id = body["submission"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/submissions/{id}");

    let (status, _) = send!(
        app,
        authed!(put, uri, bob).set_json(json!({ "content": "vandalised" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send!(app, authed!(delete, uri, bob));
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 只改 content，file_url 保持不变
    let (status, body) = send!(
        app,
        authed!(put, uri, alice).set_json(json!({ "content": "final" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Submission updated");
    assert_eq!(body["submission"]["content"], "final");
    assert_eq!(body["submission"]["file_url"], "https://example.com/answer.pdf");

    let (status, body) = send!(
        app,
        authed!(put, uri, admin).set_json(json!({ "file_url": "https://example.com/v2.pdf" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submission"]["content"], "final");
    assert_eq!(body["submission"]["file_url"], "https://example.com/v2.pdf");

    // 空更新只刷新提交时间
    let previous = common::timestamp(&body["submission"]["submitted_at"]);
    let (status, body) = send!(app, authed!(put, uri, alice).set_json(json!({})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submission"]["content"], "final");
    assert!(common::timestamp(&body["submission"]["submitted_at"]) > previous);

    for _ in 0..2 {
        let (status, body) = send!(app, authed!(delete, uri, alice));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Submission deleted");
    }

    let (status, body) = send!(app, authed!(get, uri, alice));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Submission not found");
}

#[actix_web::test]
async fn grading_is_admin_only_and_visible_to_owner() {
    let (app, _state) = test_app!();
    let (admin, alice, _, assignment) = classroom!(app);

    let (_, body) = submit!(app, alice, assignment, "answer");
    let id = body["submission"]["id"].as_str().unwrap().to_string();
    assert!(body["submission"]["graded_at"].is_null());

    // 学生先读一次，确认评分后不会读到缓存的旧数据
    let (_, body) = send!(app, authed!(get, format!("/api/submissions/{id}"), alice));
    assert_eq!(body["submission"]["status"], "submitted");

    let (status, _) = send!(
        app,
        authed!(post, format!("/api/submissions/{id}/grade"), alice)
            .set_json(json!({ "marks_obtained": 50, "feedback": "self-graded" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        authed!(post, format!("/api/submissions/{id}/grade"), admin)
            .set_json(json!({ "marks_obtained": "excellent" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "marks_obtained");

    // 分数超过总分也照常保存
    let (status, body) = send!(
        app,
        authed!(post, format!("/api/submissions/{id}/grade"), admin)
            .set_json(json!({ "marks_obtained": 72.5, "feedback": "Great work" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Submission graded");

    let (status, body) = send!(app, authed!(get, format!("/api/submissions/{id}"), alice));
    assert_eq!(status, StatusCode::OK);
    let submission = &body["submission"];
    assert_eq!(submission["status"], "graded");
    assert_eq!(submission["marks_obtained"], 72.5);
    assert_eq!(submission["feedback"], "Great work");
    assert!(submission["graded_at"].is_string());

    let (status, body) = send!(
        app,
        authed!(post, format!("/api/submissions/{}/grade", Uuid::new_v4()), admin)
            .set_json(json!({ "marks_obtained": 1 }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Submission not found");
}
