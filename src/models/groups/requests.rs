use serde::Deserialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::errors::ValidationErrors;
use crate::utils::validate::{is_blank, parse_uuid};

// 小组创建请求
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct CreateGroupRequest {
    pub name: String,
    #[ts(optional)]
    pub description: Option<String>,
}

/// 持久化新小组所需的字段
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub name: String,
    pub description: Option<String>,
    pub created_by: Uuid,
}

impl CreateGroupRequest {
    pub fn validate(self, created_by: Uuid) -> Result<NewGroup, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if is_blank(&self.name) {
            errors.push("name", "Group name is required");
        }
        errors.finish(NewGroup {
            name: self.name.trim().to_string(),
            description: self.description,
            created_by,
        })
    }
}

// 小组更新请求，未提供的字段保持原值
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct UpdateGroupRequest {
    #[ts(optional)]
    pub name: Option<String>,
    #[ts(optional)]
    pub description: Option<String>,
}

impl UpdateGroupRequest {
    pub fn validate(self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.as_deref().is_some_and(is_blank) {
            errors.push("name", "Group name cannot be empty");
        }
        errors.finish(Self {
            name: self.name.map(|n| n.trim().to_string()),
            description: self.description,
        })
    }
}

// 成员增删请求
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct MemberRequest {
    pub user_id: String,
}

impl MemberRequest {
    pub fn validate(self) -> Result<Uuid, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let user_id = parse_uuid(&self.user_id);
        if user_id.is_none() {
            errors.push("user_id", "Valid user ID is required");
        }
        errors.finish(user_id.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_name_required() {
        let err = CreateGroupRequest {
            name: "   ".into(),
            description: None,
        }
        .validate(Uuid::new_v4())
        .unwrap_err();
        assert_eq!(err.errors[0].message, "Group name is required");
    }

    #[test]
    fn test_empty_update_is_valid() {
        let update = UpdateGroupRequest::default().validate().unwrap();
        assert!(update.name.is_none());
        assert!(update.description.is_none());
    }

    #[test]
    fn test_member_request_needs_uuid() {
        assert!(MemberRequest { user_id: "7".into() }.validate().is_err());
        let id = Uuid::new_v4();
        assert_eq!(
            MemberRequest {
                user_id: id.to_string()
            }
            .validate()
            .unwrap(),
            id
        );
    }
}
