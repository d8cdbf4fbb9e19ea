//! Reusable notification template model.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::channel::{Category, Channel, Priority};

/// A named variable a template may reference as `{{key}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVariable {
    pub key: String,
    pub label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// A reusable title/message pattern with named placeholders.
///
/// Every `{{key}}` referenced in the title or message templates should
/// correspond to a declared variable; this is not enforced at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationTemplate {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub channel: Channel,
    pub title_template: String,
    pub message_template: String,
    pub variables: Vec<TemplateVariable>,
    pub allowed_channels: Vec<Channel>,
    pub priority: Priority,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Creation payload for `POST /notifications/templates`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTemplateRequest {
    #[validate(custom(function = "shared::validation::validate_template_name"))]
    pub name: String,

    pub category: Category,

    pub channel: Channel,

    #[validate(custom(function = "shared::validation::validate_title"))]
    pub title_template: String,

    #[validate(length(min = 1, message = "Message template must not be empty"))]
    pub message_template: String,

    #[serde(default)]
    pub variables: Vec<TemplateVariable>,

    #[serde(default)]
    pub allowed_channels: Vec<Channel>,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

fn default_active() -> bool {
    true
}

/// Partial update payload for `PUT /notifications/templates/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTemplateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<TemplateVariable>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_channels: Option<Vec<Channel>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_template_request_defaults() {
        let json = r#"{
            "name": "project_assigned",
            "category": "project",
            "channel": "in_app",
            "title_template": "Assigned to {{project}}",
            "message_template": "{{assignee}} joined {{project}}"
        }"#;

        let request: CreateTemplateRequest = serde_json::from_str(json).unwrap();
        assert!(request.is_active);
        assert!(request.variables.is_empty());
        assert_eq!(request.priority, Priority::Normal);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_template_request_rejects_bad_name() {
        let json = r#"{
            "name": "Project Assigned",
            "category": "project",
            "channel": "in_app",
            "title_template": "t",
            "message_template": "m"
        }"#;

        let request: CreateTemplateRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_template_request_partial() {
        let json = r#"{"is_active": false}"#;
        let request: UpdateTemplateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.is_active, Some(false));
        assert!(request.title_template.is_none());

        let serialized = serde_json::to_string(&request).unwrap();
        assert_eq!(serialized, r#"{"is_active":false}"#);
    }

    #[test]
    fn test_variable_default_skipped_when_absent() {
        let variable = TemplateVariable {
            key: "project".to_string(),
            label: "Project name".to_string(),
            required: true,
            default: None,
        };
        let json = serde_json::to_string(&variable).unwrap();
        assert!(!json.contains("default"));
    }
}
