use serde::Deserialize;
use serde_json::Value;
use ts_rs::TS;
use uuid::Uuid;

use crate::errors::ValidationErrors;
use crate::utils::validate::{is_blank, parse_number, parse_uuid, validate_url};

// 提交创建请求
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub assignment_id: String,
    pub content: String,
    #[ts(optional)]
    pub file_url: Option<String>,
}

/// 持久化新提交所需的字段
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub assignment_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub file_url: Option<String>,
}

fn check_file_url(errors: &mut ValidationErrors, file_url: &Option<String>) {
    if let Some(url) = file_url.as_deref()
        && let Err(msg) = validate_url(url)
    {
        errors.push("file_url", msg);
    }
}

impl CreateSubmissionRequest {
    pub fn validate(self, user_id: Uuid) -> Result<NewSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let assignment_id = parse_uuid(&self.assignment_id);
        if assignment_id.is_none() {
            errors.push("assignment_id", "Valid assignment ID is required");
        }
        if is_blank(&self.content) {
            errors.push("content", "Content is required");
        }
        check_file_url(&mut errors, &self.file_url);

        errors.finish(NewSubmission {
            assignment_id: assignment_id.unwrap_or_default(),
            user_id,
            content: self.content,
            file_url: self.file_url.map(|u| u.trim().to_string()),
        })
    }
}

// 提交更新请求，未提供的字段保持原值
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct UpdateSubmissionRequest {
    #[ts(optional)]
    pub content: Option<String>,
    #[ts(optional)]
    pub file_url: Option<String>,
}

impl UpdateSubmissionRequest {
    pub fn validate(self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.content.as_deref().is_some_and(is_blank) {
            errors.push("content", "Content cannot be empty");
        }
        check_file_url(&mut errors, &self.file_url);
        errors.finish(Self {
            content: self.content,
            file_url: self.file_url.map(|u| u.trim().to_string()),
        })
    }
}

// 评分请求，分数不与作业总分比较
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    #[ts(optional, as = "Option<f64>")]
    pub marks_obtained: Option<Value>,
    #[ts(optional)]
    pub feedback: Option<String>,
}

/// 校验后的评分
#[derive(Debug, Clone, Default)]
pub struct SubmissionGrade {
    pub marks_obtained: Option<f64>,
    pub feedback: Option<String>,
}

impl GradeSubmissionRequest {
    pub fn validate(self) -> Result<SubmissionGrade, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let marks_obtained = match self.marks_obtained.as_ref() {
            Some(raw) => {
                let parsed = parse_number(raw);
                if parsed.is_none() {
                    errors.push("marks_obtained", "Marks must be a number");
                }
                parsed
            }
            None => None,
        };

        errors.finish(SubmissionGrade {
            marks_obtained,
            feedback: self.feedback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_marks_must_be_numeric() {
        let err = GradeSubmissionRequest {
            marks_obtained: Some(serde_json::json!("lots")),
            feedback: Some("ok".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.errors[0].field, "marks_obtained");

        let grade = GradeSubmissionRequest {
            marks_obtained: Some(serde_json::json!(72.5)),
            feedback: None,
        }
        .validate()
        .unwrap();
        assert_eq!(grade.marks_obtained, Some(72.5));
        assert!(GradeSubmissionRequest::default().validate().unwrap().marks_obtained.is_none());
    }

    #[test]
    fn test_create_submission_validation() {
        let err = CreateSubmissionRequest {
            assignment_id: "x".into(),
            content: " ".into(),
            file_url: Some("not a url".into()),
        }
        .validate(Uuid::new_v4())
        .unwrap_err();
        let messages: Vec<&str> = err.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Valid assignment ID is required",
                "Content is required",
                "Valid file URL required",
            ]
        );
    }

    #[test]
    fn test_create_submission_ok() {
        let assignment = Uuid::new_v4();
        let user = Uuid::new_v4();
        let valid = CreateSubmissionRequest {
            assignment_id: assignment.to_string(),
            content: "my answer".into(),
            file_url: None,
        }
        .validate(user)
        .unwrap();
        assert_eq!(valid.assignment_id, assignment);
        assert_eq!(valid.user_id, user);
    }

    #[test]
    fn test_update_rejects_bad_url_only_when_present() {
        assert!(UpdateSubmissionRequest::default().validate().is_ok());
        assert!(
            UpdateSubmissionRequest {
                content: None,
                file_url: Some("ftp://x".into()),
            }
            .validate()
            .is_err()
        );
    }
}
