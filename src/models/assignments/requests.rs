use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use ts_rs::TS;
use uuid::Uuid;

use super::entities::DEFAULT_TOTAL_MARKS;
use crate::errors::ValidationErrors;
use crate::utils::validate::{is_blank, parse_due_date, parse_integer, parse_uuid};

// 作业创建请求
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    #[ts(optional)]
    pub description: Option<String>,
    /// ISO 8601
    pub due_date: String,
    /// 原样接收，类型错误也报告为字段错误
    #[ts(optional, as = "Option<i32>")]
    pub total_marks: Option<Value>,
    pub group_id: String,
}

/// 持久化新作业所需的字段
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub total_marks: i32,
    pub group_id: Uuid,
    pub created_by: Uuid,
}

fn check_total_marks(errors: &mut ValidationErrors, marks: Option<&Value>) -> Option<i32> {
    let marks = marks?;
    match parse_integer(marks).and_then(|m| i32::try_from(m).ok()) {
        Some(m) if m >= 0 => Some(m),
        _ => {
            errors.push("total_marks", "Total marks must be positive");
            None
        }
    }
}

impl CreateAssignmentRequest {
    pub fn validate(self, created_by: Uuid) -> Result<NewAssignment, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if is_blank(&self.title) {
            errors.push("title", "Title is required");
        }
        let due_date = parse_due_date(&self.due_date);
        if due_date.is_none() {
            errors.push("due_date", "Valid due date is required");
        }
        let total_marks = check_total_marks(&mut errors, self.total_marks.as_ref());
        let group_id = parse_uuid(&self.group_id);
        if group_id.is_none() {
            errors.push("group_id", "Valid group ID is required");
        }

        errors.finish(NewAssignment {
            title: self.title.trim().to_string(),
            description: self.description,
            due_date: due_date.unwrap_or_default(),
            total_marks: total_marks.unwrap_or(DEFAULT_TOTAL_MARKS),
            group_id: group_id.unwrap_or_default(),
            created_by,
        })
    }
}

// 作业更新请求（来自HTTP请求）
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    #[ts(optional)]
    pub title: Option<String>,
    #[ts(optional)]
    pub description: Option<String>,
    #[ts(optional)]
    pub due_date: Option<String>,
    #[ts(optional, as = "Option<i32>")]
    pub total_marks: Option<Value>,
}

/// 校验后的作业更新，`None` 表示保持原值
#[derive(Debug, Clone, Default)]
pub struct AssignmentUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub total_marks: Option<i32>,
}

impl UpdateAssignmentRequest {
    pub fn validate(self) -> Result<AssignmentUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.title.as_deref().is_some_and(is_blank) {
            errors.push("title", "Title cannot be empty");
        }
        let due_date = match self.due_date.as_deref() {
            Some(raw) => {
                let parsed = parse_due_date(raw);
                if parsed.is_none() {
                    errors.push("due_date", "Valid due date is required");
                }
                parsed
            }
            None => None,
        };
        let total_marks = check_total_marks(&mut errors, self.total_marks.as_ref());

        errors.finish(AssignmentUpdate {
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description,
            due_date,
            total_marks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(title: &str, due: &str, marks: Option<i64>, group: &str) -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            title: title.into(),
            description: None,
            due_date: due.into(),
            total_marks: marks.map(Value::from),
            group_id: group.into(),
        }
    }

    #[test]
    fn test_total_marks_defaults_to_100() {
        let group = Uuid::new_v4();
        let valid = create("Essay", "2025-09-01", None, &group.to_string())
            .validate(Uuid::new_v4())
            .unwrap();
        assert_eq!(valid.total_marks, 100);
        assert_eq!(valid.group_id, group);
    }

    #[test]
    fn test_invalid_fields_reported() {
        let err = create("", "soon", Some(-5), "abc")
            .validate(Uuid::new_v4())
            .unwrap_err();
        let messages: Vec<&str> = err.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Title is required",
                "Valid due date is required",
                "Total marks must be positive",
                "Valid group ID is required",
            ]
        );
    }

    #[test]
    fn test_zero_marks_allowed() {
        let valid = create("Quiz", "2025-09-01T10:00:00Z", Some(0), &Uuid::new_v4().to_string())
            .validate(Uuid::new_v4())
            .unwrap();
        assert_eq!(valid.total_marks, 0);
    }

    #[test]
    fn test_mistyped_marks_reported_per_field() {
        let group = Uuid::new_v4().to_string();
        for raw in [serde_json::json!("abc"), serde_json::json!(12.5), serde_json::json!(false)] {
            let mut request = create("Quiz", "2025-09-01", None, &group);
            request.total_marks = Some(raw);
            let err = request.validate(Uuid::new_v4()).unwrap_err();
            assert_eq!(err.errors.len(), 1);
            assert_eq!(err.errors[0].field, "total_marks");
        }

        let mut request = create("Quiz", "2025-09-01", None, &group);
        request.total_marks = Some(serde_json::json!("40"));
        assert_eq!(request.validate(Uuid::new_v4()).unwrap().total_marks, 40);

        let err = UpdateAssignmentRequest {
            total_marks: Some(serde_json::json!("many")),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.errors[0].field, "total_marks");
    }

    #[test]
    fn test_partial_update_keeps_unset_fields() {
        let update = UpdateAssignmentRequest {
            title: Some("New".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(update.title.as_deref(), Some("New"));
        assert!(update.due_date.is_none());
        assert!(update.total_marks.is_none());
    }
}
