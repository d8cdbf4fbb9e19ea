//! Channel, category and priority registries.
//!
//! Static lookup tables mirroring the server's option-enum endpoints.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing a registry enum from its wire form.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} value: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Delivery channel for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Push,
    Sms,
    InApp,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Email, Channel::Push, Channel::Sms, Channel::InApp];

    /// Human-readable display label.
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Email => "Email",
            Channel::Push => "Push",
            Channel::Sms => "SMS",
            Channel::InApp => "In-app",
        }
    }

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Push => "push",
            Channel::Sms => "sms",
            Channel::InApp => "in_app",
        }
    }

    /// Key-to-label map, same shape as `GET /notifications/channels`.
    pub fn labels() -> BTreeMap<&'static str, &'static str> {
        Self::ALL.iter().map(|c| (c.as_str(), c.label())).collect()
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Channel::Email),
            "push" => Ok(Channel::Push),
            "sms" => Ok(Channel::Sms),
            "in_app" => Ok(Channel::InApp),
            other => Err(ParseEnumError {
                kind: "channel",
                value: other.to_string(),
            }),
        }
    }
}

/// Business-domain grouping of notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    System,
    Project,
    Finance,
    Hr,
    Device,
    Contract,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::System,
        Category::Project,
        Category::Finance,
        Category::Hr,
        Category::Device,
        Category::Contract,
    ];

    /// Human-readable display label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::System => "System",
            Category::Project => "Projects",
            Category::Finance => "Finance",
            Category::Hr => "Human Resources",
            Category::Device => "Devices",
            Category::Contract => "Contracts",
        }
    }

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::System => "system",
            Category::Project => "project",
            Category::Finance => "finance",
            Category::Hr => "hr",
            Category::Device => "device",
            Category::Contract => "contract",
        }
    }

    /// Key-to-label map, same shape as `GET /notifications/categories`.
    pub fn labels() -> BTreeMap<&'static str, &'static str> {
        Self::ALL.iter().map(|c| (c.as_str(), c.label())).collect()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Category::System),
            "project" => Ok(Category::Project),
            "finance" => Ok(Category::Finance),
            "hr" => Ok(Category::Hr),
            "device" => Ok(Category::Device),
            "contract" => Ok(Category::Contract),
            other => Err(ParseEnumError {
                kind: "category",
                value: other.to_string(),
            }),
        }
    }
}

/// Delivery priority of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Normal,
        Priority::High,
        Priority::Urgent,
    ];

    /// Human-readable display label.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Normal => "Normal",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// Key-to-label map, same shape as `GET /notifications/priorities`.
    pub fn labels() -> BTreeMap<&'static str, &'static str> {
        Self::ALL.iter().map(|p| (p.as_str(), p.label())).collect()
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(ParseEnumError {
                kind: "priority",
                value: other.to_string(),
            }),
        }
    }
}
