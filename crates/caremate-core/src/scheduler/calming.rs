//! Periodic calming reminders.
//!
//! A calming sequence is a fire-and-forget batch: `count` one-shot reminders
//! spaced `interval_minutes` apart, each carrying a shared id prefix so the
//! whole batch can be stopped together without touching task reminders.
//! Phrase selection is uniform over a fixed pool; seed the config to make it
//! reproducible.

use chrono::{Duration, Utc};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ReminderScheduler;
use crate::delivery::{NotificationPayload, PendingNotification};
use crate::error::SchedulingError;

/// Shared id prefix for calming reminders. Stop scans pending ids for it.
pub const CALMING_ID_PREFIX: &str = "calming-";

/// The phrase pool for calming notifications.
pub const CALMING_PHRASES: [&str; 6] = [
    "Take a slow, deep breath.",
    "Everything is okay. You are safe at home.",
    "Relax your shoulders and unclench your jaw.",
    "You are doing just fine today.",
    "Close your eyes and rest for a moment.",
    "Breathe in... hold... and breathe out.",
];

/// Configuration for one calming sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CalmingConfig {
    /// Minutes between reminders, clamped to [1, 120].
    pub interval_minutes: i64,
    /// Fire the first reminder one minute from now instead of a full
    /// interval out.
    pub start_immediately: bool,
    /// Number of reminders in the batch (at least 1).
    pub count: usize,
    /// Random seed for reproducible phrase selection (None = random).
    pub seed: Option<u64>,
}

impl Default for CalmingConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 10,
            start_immediately: false,
            count: 3,
            seed: None,
        }
    }
}

impl ReminderScheduler {
    /// Schedule a batch of calming reminders. Returns the generated ids in
    /// firing order.
    ///
    /// On delivery refusal the error is returned at once; reminders
    /// registered before the refusal stay pending until
    /// [`Self::stop_calming_sequence`] clears them.
    pub fn start_calming_sequence(
        &self,
        config: &CalmingConfig,
    ) -> Result<Vec<String>, SchedulingError> {
        let interval = config.interval_minutes.clamp(1, 120);
        let count = config.count.max(1);
        let mut rng = match config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };

        let now = Utc::now();
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            let offset = if config.start_immediately {
                1 + i as i64 * interval
            } else {
                (i as i64 + 1) * interval
            };
            let phrase = CALMING_PHRASES[rng.gen_range(0..CALMING_PHRASES.len())];
            let id = format!("{CALMING_ID_PREFIX}{}", Uuid::new_v4());
            self.delivery.register(&PendingNotification {
                id: id.clone(),
                fire_at: now + Duration::minutes(offset),
                payload: NotificationPayload {
                    title: "A moment of calm".to_string(),
                    body: phrase.to_string(),
                    actionable: false,
                    phone: None,
                },
            })?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Cancel every pending calming reminder, leaving task reminders and
    /// warnings untouched.
    pub fn stop_calming_sequence(&self) {
        self.delivery
            .cancel_where(&|id| id.starts_with(CALMING_ID_PREFIX));
    }
}
