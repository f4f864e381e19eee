//! User-action hand-off from delivered notifications.
//!
//! When the delivery service reports that the user interacted with a
//! delivered reminder, the host decodes the (action id, payload) pair here.
//! This is a pure data hand-off: the pending table is untouched.

use serde::{Deserialize, Serialize};

use crate::delivery::NotificationPayload;

/// Action identifier the host registers for the call button.
pub const ACTION_CALL: &str = "call";
/// Action identifier for plain dismissal.
pub const ACTION_DISMISS: &str = "dismiss";

/// A decoded user interaction with a delivered reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReminderAction {
    /// The user tapped the call button. Carries the phone number embedded in
    /// the payload so the caller can initiate the call.
    Call { phone: String },
    /// The user dismissed the notification.
    Dismissed,
}

impl ReminderAction {
    /// Decode a delivery-service user action. Returns `None` for unknown
    /// action ids, or for a call action on a payload without a phone number.
    pub fn from_user_action(action_id: &str, payload: &NotificationPayload) -> Option<Self> {
        match action_id {
            ACTION_CALL => payload
                .phone
                .clone()
                .map(|phone| ReminderAction::Call { phone }),
            ACTION_DISMISS => Some(ReminderAction::Dismissed),
            _ => None,
        }
    }
}
