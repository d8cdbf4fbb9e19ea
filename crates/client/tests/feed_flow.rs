//! End-to-end exercises of the client-side notification flow that do not
//! require a live server: feed load/read-state semantics, preference
//! resolution against a loaded preference set, and template rendering for
//! an outgoing templated send.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};

use domain::models::{
    Category, Channel, DeliveryFrequency, Notification, NotificationStatus, NotificationTemplate,
    Priority, SendTemplateRequest, TemplateVariable,
};
use domain::services::{placeholders, render, resolve_delivery, DeliveryDecision};
use teamdesk_notify::feed::Feed;
use teamdesk_notify::parse::{parse_preference_list, Parsed};
use validator::Validate;

fn notification(id: i64, category: Category, is_read: bool) -> Notification {
    Notification {
        id,
        channel: Channel::InApp,
        title: format!("notification {}", id),
        message: "body".to_string(),
        data: None,
        status: NotificationStatus::Sent,
        priority: Priority::Normal,
        scheduled_at: None,
        sent_at: Some(Utc::now()),
        retry_count: 0,
        error_message: None,
        recipients: vec![1],
        is_read,
        category,
        action_url: None,
        metadata: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn reload_with_different_filter_replaces_everything() {
    let feed = Feed::new();

    // First load: unread-only view.
    feed.replace(vec![
        notification(1, Category::Project, false),
        notification(2, Category::System, false),
    ]);
    assert_eq!(feed.unread_count(), 2);

    // Second load: unfiltered view from the server, overlapping ids plus
    // records the first load never saw. Nothing from the first load may
    // survive on its own.
    feed.replace(vec![
        notification(2, Category::System, true),
        notification(3, Category::Finance, false),
    ]);

    assert_eq!(feed.len(), 2);
    assert!(feed.get(1).is_none());
    assert!(feed.get(2).unwrap().is_read);
    assert_eq!(feed.unread_count(), 1);
}

#[test]
fn optimistic_mark_all_then_revert_round_trips() {
    let feed = Feed::new();
    feed.replace(vec![
        notification(1, Category::Project, true),
        notification(2, Category::Project, false),
        notification(3, Category::Hr, false),
    ]);

    let receipts = feed.mark_all_read(Some(Category::Project));
    assert_eq!(feed.unread_count(), 1);

    // Server rejection: compensating action restores the exact prior state.
    feed.revert(&receipts);
    assert!(feed.get(1).unwrap().is_read);
    assert!(!feed.get(2).unwrap().is_read);
    assert!(!feed.get(3).unwrap().is_read);
}

#[test]
fn loaded_preferences_drive_delivery_decisions() {
    // Preferences as they arrive from the server, in the nested envelope.
    let body = serde_json::json!({
        "data": { "preferences": [
            {
                "id": 11,
                "user_id": 7,
                "category": "project",
                "channels": ["push"],
                "frequency": "immediate",
                "quiet_hours": { "start": "22:00", "end": "08:00" },
                "is_active": true
            },
            {
                "id": 12,
                "user_id": 7,
                "category": "finance",
                "channels": ["email"],
                "frequency": "never",
                "is_active": true
            }
        ]}
    });

    let prefs = match parse_preference_list(body) {
        Parsed::Ok(prefs) => prefs,
        Parsed::Malformed(raw) => panic!("unexpected envelope: {}", raw),
    };

    let project = domain::services::effective_preference(&prefs, 7, Category::Project);
    let during_quiet = Utc.with_ymd_and_hms(2026, 5, 4, 23, 30, 0).unwrap();
    let after_quiet = Utc.with_ymd_and_hms(2026, 5, 4, 9, 0, 0).unwrap();

    assert!(matches!(
        resolve_delivery(&project, Channel::Push, during_quiet),
        DeliveryDecision::Deferred { .. }
    ));
    assert_eq!(
        resolve_delivery(&project, Channel::Push, after_quiet),
        DeliveryDecision::Deliver
    );
    // Channel not enabled for this category.
    assert!(matches!(
        resolve_delivery(&project, Channel::Email, after_quiet),
        DeliveryDecision::Suppressed { .. }
    ));

    // No record for HR: the documented default applies.
    let hr = domain::services::effective_preference(&prefs, 7, Category::Hr);
    assert_eq!(hr.channels, vec![Channel::Email, Channel::InApp]);
    assert_eq!(hr.frequency, DeliveryFrequency::Immediate);
    assert_eq!(
        resolve_delivery(&hr, Channel::Email, after_quiet),
        DeliveryDecision::Deliver
    );
}

#[test]
fn templated_send_renders_and_validates() {
    let template = NotificationTemplate {
        id: 3,
        name: "contract_expiring".to_string(),
        category: Category::Contract,
        channel: Channel::Email,
        title_template: "Contract {{contract}} expires soon".to_string(),
        message_template: "Contract {{contract}} with {{party}} expires on {{date}}.".to_string(),
        variables: vec![
            TemplateVariable {
                key: "contract".to_string(),
                label: "Contract number".to_string(),
                required: true,
                default: None,
            },
            TemplateVariable {
                key: "party".to_string(),
                label: "Counterparty".to_string(),
                required: false,
                default: Some("the counterparty".to_string()),
            },
            TemplateVariable {
                key: "date".to_string(),
                label: "Expiry date".to_string(),
                required: true,
                default: None,
            },
        ],
        allowed_channels: vec![Channel::Email, Channel::InApp],
        priority: Priority::High,
        is_active: true,
        metadata: None,
    };

    // Every placeholder in the template is declared.
    let title_keys = placeholders(&template.title_template);
    let message_keys = placeholders(&template.message_template);
    let declared: Vec<&str> = template.variables.iter().map(|v| v.key.as_str()).collect();
    for key in title_keys.iter().chain(message_keys.iter()) {
        assert!(declared.contains(&key.as_str()));
    }

    let mut data = HashMap::new();
    data.insert("contract".to_string(), "C-2210".to_string());
    data.insert("date".to_string(), "2026-09-01".to_string());

    let rendered = render(&template, &data);
    assert_eq!(rendered.title, "Contract C-2210 expires soon");
    assert_eq!(
        rendered.message,
        "Contract C-2210 with the counterparty expires on 2026-09-01."
    );
    assert!(placeholders(&rendered.message).is_empty());

    // The corresponding wire request passes validation.
    let request = SendTemplateRequest {
        template_name: template.name.clone(),
        recipients: vec![1, 2],
        data,
    };
    assert!(request.validate().is_ok());
}
