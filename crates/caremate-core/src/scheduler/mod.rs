//! Task reminder scheduling.
//!
//! Maps a task's due date plus a user-chosen lead time onto a single absolute
//! trigger instant and registers it with the notification delivery service.
//! The scheduler owns no state of its own: the delivery service's pending
//! table, addressed by id, is the only persistent side effect, so every
//! operation here is a pure request against that table.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::delivery::{NotificationDelivery, NotificationPayload, PendingNotification};
use crate::error::SchedulingError;

mod calming;
pub use calming::{CalmingConfig, CALMING_ID_PREFIX, CALMING_PHRASES};

/// Lead time before the due instant at which a reminder fires.
///
/// The picker in the app offers exactly these choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTime {
    OneMinute,
    ThreeMinutes,
    FiveMinutes,
    TenMinutes,
    FifteenMinutes,
    TwentyMinutes,
    ThirtyMinutes,
    FortyFiveMinutes,
    OneHour,
}

impl LeadTime {
    pub const ALL: [LeadTime; 9] = [
        LeadTime::OneMinute,
        LeadTime::ThreeMinutes,
        LeadTime::FiveMinutes,
        LeadTime::TenMinutes,
        LeadTime::FifteenMinutes,
        LeadTime::TwentyMinutes,
        LeadTime::ThirtyMinutes,
        LeadTime::FortyFiveMinutes,
        LeadTime::OneHour,
    ];

    pub fn minutes(self) -> i64 {
        match self {
            LeadTime::OneMinute => 1,
            LeadTime::ThreeMinutes => 3,
            LeadTime::FiveMinutes => 5,
            LeadTime::TenMinutes => 10,
            LeadTime::FifteenMinutes => 15,
            LeadTime::TwentyMinutes => 20,
            LeadTime::ThirtyMinutes => 30,
            LeadTime::FortyFiveMinutes => 45,
            LeadTime::OneHour => 60,
        }
    }

    pub fn from_minutes(minutes: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|lead| lead.minutes() == minutes)
    }
}

/// A request to remind about one task or event.
///
/// `id` is caller-assigned and stable per logical reminder: the task's own
/// identifier. Scheduling the same id again replaces the earlier
/// registration; completing or deleting the task cancels it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// The task's due instant. The trigger fires `lead` minutes before it.
    pub target_at: DateTime<Utc>,
    pub lead: LeadTime,
}

/// Outcome of a successful `schedule` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scheduled {
    /// The trigger was registered with the delivery service.
    Registered { fire_at: DateTime<Utc> },
    /// The trigger instant had already passed; nothing was registered.
    /// Reminders whose lead time has elapsed are dropped, not fired late.
    DroppedPastDue,
}

/// Schedules task reminders against an injected delivery service.
pub struct ReminderScheduler {
    delivery: Arc<dyn NotificationDelivery>,
}

impl ReminderScheduler {
    pub fn new(delivery: Arc<dyn NotificationDelivery>) -> Self {
        Self { delivery }
    }

    /// Register a reminder `lead` minutes before `target_at`, replacing any
    /// earlier registration under the same id.
    ///
    /// A trigger instant at or before now is dropped silently and reported
    /// as [`Scheduled::DroppedPastDue`]. Delivery refusal surfaces as a
    /// [`SchedulingError`] and is never retried.
    pub fn schedule(&self, request: &ReminderRequest) -> Result<Scheduled, SchedulingError> {
        let fire_at = request.target_at - Duration::minutes(request.lead.minutes());
        if fire_at <= Utc::now() {
            return Ok(Scheduled::DroppedPastDue);
        }

        // The delivery service does not auto-replace ids.
        self.delivery.cancel(&request.id);
        self.delivery.register(&PendingNotification {
            id: request.id.clone(),
            fire_at,
            payload: NotificationPayload {
                title: request.title.clone(),
                body: format!("Coming up in {} min", request.lead.minutes()),
                actionable: request.phone.is_some(),
                phone: request.phone.clone(),
            },
        })?;
        Ok(Scheduled::Registered { fire_at })
    }

    /// Remove a pending reminder. Unknown ids are not an error.
    pub fn cancel(&self, id: &str) {
        self.delivery.cancel(id);
    }

    /// Fire a one-shot warning that `contact_name` was already called today.
    ///
    /// Each warning gets a fresh id, so it never collides with or cancels
    /// other reminders. Returns the generated id.
    pub fn warn_duplicate_call(
        &self,
        contact_name: &str,
        phone: Option<&str>,
    ) -> Result<String, SchedulingError> {
        let id = format!("dupcall-{}", Uuid::new_v4());
        self.delivery.register(&PendingNotification {
            id: id.clone(),
            // Delivery services reject strictly-past instants; one second out
            // is effectively immediate.
            fire_at: Utc::now() + Duration::seconds(1),
            payload: NotificationPayload {
                title: format!("You already called {contact_name} today"),
                body: "Tap to call anyway.".to_string(),
                actionable: phone.is_some(),
                phone: phone.map(str::to_string),
            },
        })?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::InMemoryDelivery;
    use crate::error::DeliveryError;

    fn scheduler() -> (Arc<InMemoryDelivery>, ReminderScheduler) {
        let delivery = Arc::new(InMemoryDelivery::new());
        let scheduler = ReminderScheduler::new(delivery.clone());
        (delivery, scheduler)
    }

    fn request(id: &str, target_at: DateTime<Utc>, lead: LeadTime) -> ReminderRequest {
        ReminderRequest {
            id: id.to_string(),
            title: "Take medication".to_string(),
            phone: None,
            target_at,
            lead,
        }
    }

    #[test]
    fn schedule_registers_lead_minutes_before_target() {
        let (delivery, scheduler) = scheduler();
        let target = Utc::now() + Duration::hours(2);

        let outcome = scheduler
            .schedule(&request("t1", target, LeadTime::FifteenMinutes))
            .unwrap();

        let expected = target - Duration::minutes(15);
        assert_eq!(outcome, Scheduled::Registered { fire_at: expected });
        assert_eq!(delivery.pending("t1").unwrap().fire_at, expected);
    }

    #[test]
    fn past_due_trigger_is_dropped_silently() {
        let (delivery, scheduler) = scheduler();

        // Target already in the past.
        let outcome = scheduler
            .schedule(&request("t1", Utc::now() - Duration::hours(1), LeadTime::FiveMinutes))
            .unwrap();
        assert_eq!(outcome, Scheduled::DroppedPastDue);

        // Target in the future, but the lead time has already elapsed.
        let outcome = scheduler
            .schedule(&request("t2", Utc::now() + Duration::minutes(2), LeadTime::FiveMinutes))
            .unwrap();
        assert_eq!(outcome, Scheduled::DroppedPastDue);

        assert!(delivery.pending_ids().is_empty());
    }

    #[test]
    fn rescheduling_same_id_replaces_prior_registration() {
        let (delivery, scheduler) = scheduler();
        let target = Utc::now() + Duration::hours(2);

        scheduler
            .schedule(&request("t1", target, LeadTime::FiveMinutes))
            .unwrap();
        scheduler
            .schedule(&request("t1", target, LeadTime::ThirtyMinutes))
            .unwrap();

        assert_eq!(delivery.pending_ids(), vec!["t1"]);
        assert_eq!(
            delivery.pending("t1").unwrap().fire_at,
            target - Duration::minutes(30)
        );
    }

    #[test]
    fn cancel_is_idempotent() {
        let (delivery, scheduler) = scheduler();
        let target = Utc::now() + Duration::hours(1);

        scheduler
            .schedule(&request("t1", target, LeadTime::OneMinute))
            .unwrap();
        scheduler.cancel("t1");
        scheduler.cancel("t1");
        scheduler.cancel("never-scheduled");

        assert!(delivery.pending_ids().is_empty());
    }

    #[test]
    fn refusal_surfaces_as_scheduling_error() {
        let (delivery, scheduler) = scheduler();
        delivery.set_permitted(false);

        let err = scheduler
            .schedule(&request("t1", Utc::now() + Duration::hours(1), LeadTime::FiveMinutes))
            .unwrap_err();
        assert_eq!(
            err,
            SchedulingError::NotScheduled(DeliveryError::PermissionDenied)
        );

        // The scheduler stays usable once permission returns.
        delivery.set_permitted(true);
        scheduler
            .schedule(&request("t1", Utc::now() + Duration::hours(1), LeadTime::FiveMinutes))
            .unwrap();
        assert_eq!(delivery.pending_ids(), vec!["t1"]);
    }

    #[test]
    fn duplicate_call_warning_gets_fresh_id() {
        let (delivery, scheduler) = scheduler();

        let first = scheduler.warn_duplicate_call("Maria", Some("+39055123456")).unwrap();
        let second = scheduler.warn_duplicate_call("Maria", Some("+39055123456")).unwrap();

        assert_ne!(first, second);
        assert_eq!(delivery.pending_ids().len(), 2);

        let pending = delivery.pending(&first).unwrap();
        assert!(pending.payload.actionable);
        assert_eq!(pending.payload.phone.as_deref(), Some("+39055123456"));
        assert!(pending.fire_at > Utc::now() - Duration::seconds(1));
    }

    #[test]
    fn lead_time_round_trips_through_minutes() {
        for lead in LeadTime::ALL {
            assert_eq!(LeadTime::from_minutes(lead.minutes()), Some(lead));
        }
        assert_eq!(LeadTime::from_minutes(7), None);
        assert_eq!(
            LeadTime::ALL.map(LeadTime::minutes),
            [1, 3, 5, 10, 15, 20, 30, 45, 60]
        );
    }
}
