//! Envelope parsing for drifting server response shapes.
//!
//! The notification endpoints have been observed returning the same payload
//! under different envelopes (`{data: [...]}` vs a bare array; preferences
//! additionally under `{data: {preferences: [...]}}`). Each drifting shape
//! gets one explicit parsing function with a tagged result, so schema drift
//! surfaces as [`Parsed::Malformed`] instead of silently coercing to an
//! empty list.

use domain::models::{Notification, NotificationPreference, NotificationTemplate};
use serde_json::Value;

/// Result of parsing a response body against the known envelope shapes.
#[derive(Debug)]
pub enum Parsed<T> {
    Ok(T),
    /// None of the known shapes matched; carries the raw body.
    Malformed(Value),
}

fn parse_items<T: serde::de::DeserializeOwned>(items: Value, raw: Value) -> Parsed<Vec<T>> {
    match serde_json::from_value(items) {
        Ok(list) => Parsed::Ok(list),
        Err(_) => Parsed::Malformed(raw),
    }
}

/// Parse a notification list: `{ "data": [...] }` or a bare array.
pub fn parse_notification_list(raw: Value) -> Parsed<Vec<Notification>> {
    let items = match &raw {
        Value::Array(_) => raw.clone(),
        Value::Object(map) => match map.get("data") {
            Some(data @ Value::Array(_)) => data.clone(),
            _ => return Parsed::Malformed(raw),
        },
        _ => return Parsed::Malformed(raw),
    };
    parse_items(items, raw)
}

/// Parse a template list: `{ "data": [...] }` or a bare array.
pub fn parse_template_list(raw: Value) -> Parsed<Vec<NotificationTemplate>> {
    let items = match &raw {
        Value::Array(_) => raw.clone(),
        Value::Object(map) => match map.get("data") {
            Some(data @ Value::Array(_)) => data.clone(),
            _ => return Parsed::Malformed(raw),
        },
        _ => return Parsed::Malformed(raw),
    };
    parse_items(items, raw)
}

/// Parse a preference list.
///
/// Known shapes: `{ "data": { "preferences": [...] } }`,
/// `{ "preferences": [...] }`, or a bare array.
pub fn parse_preference_list(raw: Value) -> Parsed<Vec<NotificationPreference>> {
    let items = match &raw {
        Value::Array(_) => raw.clone(),
        Value::Object(map) => {
            if let Some(prefs @ Value::Array(_)) = map.get("preferences") {
                prefs.clone()
            } else if let Some(Value::Object(data)) = map.get("data") {
                match data.get("preferences") {
                    Some(prefs @ Value::Array(_)) => prefs.clone(),
                    _ => return Parsed::Malformed(raw),
                }
            } else {
                return Parsed::Malformed(raw);
            }
        }
        _ => return Parsed::Malformed(raw),
    };
    parse_items(items, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn preference_json() -> Value {
        json!({
            "id": 1,
            "user_id": 7,
            "category": "project",
            "channels": ["email"],
            "frequency": "immediate",
            "is_active": true
        })
    }

    fn notification_json() -> Value {
        json!({
            "id": 5,
            "channel": "in_app",
            "title": "t",
            "message": "m",
            "status": "sent",
            "priority": "normal",
            "recipients": [7],
            "is_read": false,
            "category": "system",
            "created_at": "2026-05-02T09:30:00Z",
            "updated_at": "2026-05-02T09:30:00Z"
        })
    }

    #[test]
    fn test_notification_list_enveloped_and_bare() {
        let enveloped = json!({"data": [notification_json()]});
        assert!(matches!(
            parse_notification_list(enveloped),
            Parsed::Ok(ref list) if list.len() == 1
        ));

        let bare = json!([notification_json()]);
        assert!(matches!(
            parse_notification_list(bare),
            Parsed::Ok(ref list) if list.len() == 1
        ));
    }

    #[test]
    fn test_notification_list_rejects_unknown_envelope() {
        let odd = json!({"items": [notification_json()]});
        assert!(matches!(parse_notification_list(odd), Parsed::Malformed(_)));

        assert!(matches!(
            parse_notification_list(json!("nope")),
            Parsed::Malformed(_)
        ));
    }

    #[test]
    fn test_preference_list_all_observed_shapes() {
        let nested = json!({"data": {"preferences": [preference_json()]}});
        assert!(matches!(
            parse_preference_list(nested),
            Parsed::Ok(ref list) if list.len() == 1
        ));

        let flat = json!({"preferences": [preference_json()]});
        assert!(matches!(
            parse_preference_list(flat),
            Parsed::Ok(ref list) if list.len() == 1
        ));

        let bare = json!([preference_json()]);
        assert!(matches!(
            parse_preference_list(bare),
            Parsed::Ok(ref list) if list.len() == 1
        ));
    }

    #[test]
    fn test_preference_list_drift_fails_loudly() {
        // A plausible-but-new envelope must not coerce to an empty list.
        let drifted = json!({"data": {"items": [preference_json()]}});
        match parse_preference_list(drifted) {
            Parsed::Malformed(raw) => {
                assert!(raw.get("data").is_some());
            }
            Parsed::Ok(_) => panic!("expected malformed"),
        }
    }

    #[test]
    fn test_bad_element_is_malformed_not_dropped() {
        let bad = json!({"data": [{"id": "not-a-number"}]});
        assert!(matches!(parse_notification_list(bad), Parsed::Malformed(_)));
    }

    #[test]
    fn test_empty_lists_are_ok() {
        assert!(matches!(
            parse_preference_list(json!([])),
            Parsed::Ok(ref list) if list.is_empty()
        ));
        assert!(matches!(
            parse_template_list(json!({"data": []})),
            Parsed::Ok(ref list) if list.is_empty()
        ));
    }
}
