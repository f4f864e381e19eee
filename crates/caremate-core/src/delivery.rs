//! Notification delivery seam.
//!
//! The platform notification center lives behind [`NotificationDelivery`].
//! The scheduler is handed one shared handle at construction; tests and
//! headless hosts substitute [`InMemoryDelivery`]. The pending-request table
//! held by the backend, addressed by id, is the only scheduling state in the
//! system.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DeliveryError;

/// What the delivery service shows when a trigger fires, and what it hands
/// back when the user interacts with the delivered item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    /// Whether the delivered item carries a "call" action button.
    pub actionable: bool,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A row in the delivery service's pending-request table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingNotification {
    pub id: String,
    pub fire_at: DateTime<Utc>,
    pub payload: NotificationPayload,
}

/// Every notification delivery backend implements this trait.
///
/// Registrations are keyed by id. Backends do not auto-replace: callers that
/// reuse an id must cancel first. Cancelling an unknown id is a no-op.
pub trait NotificationDelivery: Send + Sync {
    /// Register a pending notification for delivery at its `fire_at`.
    fn register(&self, request: &PendingNotification) -> Result<(), DeliveryError>;

    /// Remove a pending registration. Unknown ids are ignored.
    fn cancel(&self, id: &str);

    /// Ids of all currently pending registrations.
    fn pending_ids(&self) -> Vec<String>;

    /// Look up a pending registration by id.
    fn pending(&self, id: &str) -> Option<PendingNotification>;

    /// Cancel every pending registration whose id matches `predicate`,
    /// leaving the rest untouched.
    fn cancel_where(&self, predicate: &dyn Fn(&str) -> bool) {
        for id in self.pending_ids() {
            if predicate(&id) {
                self.cancel(&id);
            }
        }
    }
}

/// In-memory delivery backend.
///
/// Keeps the pending table in a `BTreeMap` so listing order is stable. Used
/// by the test suite and by hosts that route delivery themselves.
pub struct InMemoryDelivery {
    pending: Mutex<BTreeMap<String, PendingNotification>>,
    permitted: AtomicBool,
}

impl InMemoryDelivery {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(BTreeMap::new()),
            permitted: AtomicBool::new(true),
        }
    }

    /// Simulate the user granting or revoking notification permission.
    /// While revoked, registrations fail with [`DeliveryError::PermissionDenied`].
    pub fn set_permitted(&self, permitted: bool) {
        self.permitted.store(permitted, Ordering::SeqCst);
    }
}

impl Default for InMemoryDelivery {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationDelivery for InMemoryDelivery {
    fn register(&self, request: &PendingNotification) -> Result<(), DeliveryError> {
        if !self.permitted.load(Ordering::SeqCst) {
            return Err(DeliveryError::PermissionDenied);
        }
        self.pending
            .lock()
            .unwrap()
            .insert(request.id.clone(), request.clone());
        Ok(())
    }

    fn cancel(&self, id: &str) {
        self.pending.lock().unwrap().remove(id);
    }

    fn pending_ids(&self) -> Vec<String> {
        self.pending.lock().unwrap().keys().cloned().collect()
    }

    fn pending(&self, id: &str) -> Option<PendingNotification> {
        self.pending.lock().unwrap().get(id).cloned()
    }
}
