//! Delivery resolution for notification preferences.
//!
//! Decides, for a (preference, channel, timestamp) triple, whether a
//! notification is delivered now, deferred, batched for a digest, or
//! suppressed. All times are interpreted as UTC.

use chrono::{DateTime, Duration, Timelike, Utc};

use crate::models::{Category, Channel, DeliveryFrequency, NotificationPreference};

/// Outcome of resolving a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryDecision {
    /// Deliver immediately.
    Deliver,
    /// Quiet hours are in effect; deliver at `until` at the earliest.
    Deferred { until: DateTime<Utc> },
    /// The preference requests a daily or weekly digest. No digest
    /// scheduler exists; callers treat this as "not now".
    Batched { frequency: DeliveryFrequency },
    /// Delivery is suppressed indefinitely.
    Suppressed { reason: SuppressReason },
}

/// Why a delivery was suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// The preference record is deactivated.
    Inactive,
    /// The channel is not in the enabled-channels set.
    ChannelDisabled,
    /// The frequency is `never`.
    FrequencyNever,
}

impl std::fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inactive => write!(f, "inactive"),
            Self::ChannelDisabled => write!(f, "channel_disabled"),
            Self::FrequencyNever => write!(f, "frequency_never"),
        }
    }
}

/// Resolve whether a notification should be delivered on `channel` at `at`.
///
/// Check order:
/// 1. deactivated preference → suppressed
/// 2. channel not enabled → suppressed
/// 3. inside the quiet-hours window → deferred until the window ends
/// 4. frequency: `immediate` delivers, `daily`/`weekly` batch, `never`
///    suppresses
pub fn resolve_delivery(
    pref: &NotificationPreference,
    channel: Channel,
    at: DateTime<Utc>,
) -> DeliveryDecision {
    if !pref.is_active {
        return DeliveryDecision::Suppressed {
            reason: SuppressReason::Inactive,
        };
    }

    if !pref.channel_enabled(channel) {
        return DeliveryDecision::Suppressed {
            reason: SuppressReason::ChannelDisabled,
        };
    }

    if let Some(window) = pref.quiet_hours {
        let time_of_day = at.time();
        if window.contains(time_of_day) {
            return DeliveryDecision::Deferred {
                until: quiet_hours_end(at, window.start, window.end),
            };
        }
    }

    match pref.frequency {
        DeliveryFrequency::Immediate => DeliveryDecision::Deliver,
        DeliveryFrequency::Daily | DeliveryFrequency::Weekly => DeliveryDecision::Batched {
            frequency: pref.frequency,
        },
        DeliveryFrequency::Never => DeliveryDecision::Suppressed {
            reason: SuppressReason::FrequencyNever,
        },
    }
}

/// Next eligible delivery time for a timestamp inside the quiet-hours
/// window: the end boundary on the same day, or on the following day for
/// the pre-midnight side of a wrapped window.
fn quiet_hours_end(
    at: DateTime<Utc>,
    start: chrono::NaiveTime,
    end: chrono::NaiveTime,
) -> DateTime<Utc> {
    let time_of_day = at.time();
    let same_day_end = at
        .date_naive()
        .and_time(end)
        .and_utc();

    if start <= end {
        // Same-day window; the caller established time_of_day < end.
        same_day_end
    } else if time_of_day.num_seconds_from_midnight() >= start.num_seconds_from_midnight() {
        // Pre-midnight side of a wrapped window.
        same_day_end + Duration::days(1)
    } else {
        same_day_end
    }
}

/// Find the preference governing (user, category), falling back to the
/// documented default when no record exists. An unrecognized category
/// simply has no record and receives the default; there is no error path.
pub fn effective_preference(
    prefs: &[NotificationPreference],
    user_id: i64,
    category: Category,
) -> NotificationPreference {
    prefs
        .iter()
        .find(|p| p.user_id == user_id && p.category == category)
        .cloned()
        .unwrap_or_else(|| NotificationPreference::default_for(user_id, category))
}
