//! Integration tests for reminder scheduling.
//!
//! Exercises the full workflow against the in-memory delivery backend:
//! task reminders, calming batches, and duplicate-call warnings all sharing
//! one pending table, plus the user-action hand-off on delivery.

use std::sync::Arc;

use chrono::{Duration, Utc};

use caremate_core::events::ACTION_CALL;
use caremate_core::{
    CalmingConfig, InMemoryDelivery, LeadTime, NotificationDelivery, ReminderAction,
    ReminderRequest, ReminderScheduler, Scheduled, CALMING_ID_PREFIX,
};

fn scheduler() -> (Arc<InMemoryDelivery>, ReminderScheduler) {
    let delivery = Arc::new(InMemoryDelivery::new());
    let scheduler = ReminderScheduler::new(delivery.clone());
    (delivery, scheduler)
}

fn task_request(id: &str, phone: Option<&str>) -> ReminderRequest {
    ReminderRequest {
        id: id.to_string(),
        title: "Doctor appointment".to_string(),
        phone: phone.map(str::to_string),
        target_at: Utc::now() + Duration::hours(3),
        lead: LeadTime::ThirtyMinutes,
    }
}

#[test]
fn stopping_calming_leaves_task_reminders_pending() {
    let (delivery, scheduler) = scheduler();

    scheduler.schedule(&task_request("t1", None)).unwrap();
    let calming = scheduler
        .start_calming_sequence(&CalmingConfig {
            count: 3,
            ..CalmingConfig::default()
        })
        .unwrap();
    assert_eq!(calming.len(), 3);
    assert_eq!(delivery.pending_ids().len(), 4);

    scheduler.stop_calming_sequence();

    assert_eq!(delivery.pending_ids(), vec!["t1"]);
    assert!(delivery
        .pending_ids()
        .iter()
        .all(|id| !id.starts_with(CALMING_ID_PREFIX)));
}

#[test]
fn due_date_change_is_cancel_then_reschedule() {
    let (delivery, scheduler) = scheduler();
    let mut request = task_request("t1", None);

    scheduler.schedule(&request).unwrap();
    let first_fire = delivery.pending("t1").unwrap().fire_at;

    // The task moves an hour later; the caller re-schedules under the same id.
    request.target_at += Duration::hours(1);
    let outcome = scheduler.schedule(&request).unwrap();

    assert_eq!(delivery.pending_ids(), vec!["t1"]);
    let second_fire = delivery.pending("t1").unwrap().fire_at;
    assert_eq!(second_fire - first_fire, Duration::hours(1));
    assert_eq!(outcome, Scheduled::Registered { fire_at: second_fire });

    // Completing the task cancels it.
    scheduler.cancel("t1");
    assert!(delivery.pending_ids().is_empty());
}

#[test]
fn past_due_task_never_reaches_the_delivery_service() {
    let (delivery, scheduler) = scheduler();
    let request = ReminderRequest {
        target_at: Utc::now() + Duration::minutes(10),
        lead: LeadTime::FifteenMinutes,
        ..task_request("t1", None)
    };

    assert_eq!(scheduler.schedule(&request).unwrap(), Scheduled::DroppedPastDue);
    assert!(delivery.pending_ids().is_empty());
}

#[test]
fn delivered_reminder_hands_phone_to_call_action() {
    let (delivery, scheduler) = scheduler();

    scheduler
        .schedule(&task_request("t1", Some("+39055123456")))
        .unwrap();
    let pending = delivery.pending("t1").unwrap();
    assert!(pending.payload.actionable);

    // The host receives the user action and decodes it.
    let action = ReminderAction::from_user_action(ACTION_CALL, &pending.payload);
    assert_eq!(
        action,
        Some(ReminderAction::Call {
            phone: "+39055123456".to_string()
        })
    );

    // Pure hand-off: the pending table is untouched.
    assert_eq!(delivery.pending_ids(), vec!["t1"]);
}

#[test]
fn duplicate_call_warnings_never_collide_with_other_reminders() {
    let (delivery, scheduler) = scheduler();

    scheduler.schedule(&task_request("t1", None)).unwrap();
    scheduler.start_calming_sequence(&CalmingConfig::default()).unwrap();

    let warn_a = scheduler.warn_duplicate_call("Maria", Some("+39055123456")).unwrap();
    let warn_b = scheduler.warn_duplicate_call("Giulio", None).unwrap();
    assert_ne!(warn_a, warn_b);

    // 1 task + 3 calming + 2 warnings.
    assert_eq!(delivery.pending_ids().len(), 6);

    // Stopping calming touches neither task reminders nor warnings.
    scheduler.stop_calming_sequence();
    let mut remaining = delivery.pending_ids();
    remaining.sort();
    let mut expected = vec![warn_a, warn_b, "t1".to_string()];
    expected.sort();
    assert_eq!(remaining, expected);
}
