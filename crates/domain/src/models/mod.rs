//! Domain models for TeamDesk notifications.

pub mod channel;
pub mod notification;
pub mod preference;
pub mod template;

pub use channel::{Category, Channel, ParseEnumError, Priority};
pub use notification::{
    Notification, NotificationQuery, NotificationStats, NotificationStatus,
    SendNotificationRequest, SendTemplateRequest,
};
pub use preference::{
    DeliveryFrequency, FrequencySpec, NotificationPreference, QuietHours, UpdatePreferenceRequest,
};
pub use template::{
    CreateTemplateRequest, NotificationTemplate, TemplateVariable, UpdateTemplateRequest,
};
