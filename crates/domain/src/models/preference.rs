//! Per-user, per-category delivery preference model.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::channel::{Category, Channel};

/// How often notifications in a category are delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryFrequency {
    #[default]
    Immediate,
    Daily,
    Weekly,
    Never,
}

impl std::fmt::Display for DeliveryFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryFrequency::Immediate => write!(f, "immediate"),
            DeliveryFrequency::Daily => write!(f, "daily"),
            DeliveryFrequency::Weekly => write!(f, "weekly"),
            DeliveryFrequency::Never => write!(f, "never"),
        }
    }
}

/// Frequency as it appears in the upsert payload: `{ "type": "daily" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencySpec {
    #[serde(rename = "type")]
    pub kind: DeliveryFrequency,
}

impl From<DeliveryFrequency> for FrequencySpec {
    fn from(kind: DeliveryFrequency) -> Self {
        Self { kind }
    }
}

/// Time-of-day window during which delivery is deferred.
///
/// Wire format is `"HH:MM"` for both boundaries. The window is half-open
/// `[start, end)` and wraps past midnight when `end < start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuietHours {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl QuietHours {
    /// Whether the given time-of-day falls inside the window.
    ///
    /// A window with `start == end` is empty.
    pub fn contains(&self, t: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= t && t < self.end
        } else {
            t >= self.start || t < self.end
        }
    }
}

/// `"HH:MM"` serde adapter for `NaiveTime`.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M").map_err(serde::de::Error::custom)
    }
}

/// Per-user, per-category delivery configuration.
///
/// Exactly one record exists per (user, category) pair; a missing record
/// implies [`NotificationPreference::default_for`]. The client never deletes
/// a preference, only deactivates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPreference {
    pub id: i64,
    pub user_id: i64,
    pub category: Category,
    pub channels: Vec<Channel>,
    pub frequency: DeliveryFrequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_hours: Option<QuietHours>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_settings: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl NotificationPreference {
    /// The documented default applied when no record exists for a
    /// (user, category) pair: email + in-app, immediate, no quiet hours,
    /// active. The synthetic record carries `id = 0`.
    pub fn default_for(user_id: i64, category: Category) -> Self {
        Self {
            id: 0,
            user_id,
            category,
            channels: vec![Channel::Email, Channel::InApp],
            frequency: DeliveryFrequency::Immediate,
            quiet_hours: None,
            is_active: true,
            custom_settings: None,
            updated_at: None,
        }
    }

    /// Whether the given channel is enabled for this preference.
    pub fn channel_enabled(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }
}

/// Upsert payload for `PUT /notifications/preferences`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePreferenceRequest {
    pub category: Category,
    pub channels: Vec<Channel>,
    pub frequency: FrequencySpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_hours: Option<QuietHours>,
    pub is_active: bool,
}
