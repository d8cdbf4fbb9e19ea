//! Notification domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::channel::{Category, Channel, Priority};

/// Server-side delivery status of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationStatus::Pending => write!(f, "pending"),
            NotificationStatus::Sent => write!(f, "sent"),
            NotificationStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A delivered or pending message.
///
/// Created server-side when a send request is accepted. The client only ever
/// mutates the read flag; `sent_at` is set by the server when `status`
/// becomes `sent`, and `retry_count` moves only on delivery failure and
/// resubmission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub channel: Channel,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub status: NotificationStatus,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub retry_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub recipients: Vec<i64>,
    pub is_read: bool,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for `POST /notifications/send`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendNotificationRequest {
    #[validate(custom(function = "shared::validation::validate_title"))]
    pub title: String,

    #[validate(length(min = 1, message = "Message must not be empty"))]
    pub message: String,

    #[validate(custom(function = "shared::validation::validate_recipients"))]
    pub recipients: Vec<i64>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Request payload for `POST /notifications/send-template`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendTemplateRequest {
    #[validate(custom(function = "shared::validation::validate_template_name"))]
    pub template_name: String,

    #[validate(custom(function = "shared::validation::validate_recipients"))]
    pub recipients: Vec<i64>,

    #[serde(default)]
    pub data: std::collections::HashMap<String, String>,
}

/// Query parameters for `GET /notifications`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NotificationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread: Option<bool>,
}

impl NotificationQuery {
    /// Query for unread notifications only.
    pub fn unread_only() -> Self {
        Self {
            unread: Some(true),
            ..Self::default()
        }
    }
}

/// Aggregate counts from `GET /notifications/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationStats {
    pub total: u64,
    pub sent: u64,
    pub pending: u64,
    pub failed: u64,
    pub unread: u64,
}
