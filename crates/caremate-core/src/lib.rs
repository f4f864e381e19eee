//! # Caremate Core Library
//!
//! This library provides the core scheduling and analytics logic for the
//! Caremate caregiving companion. The mobile shell is a thin presentation
//! layer over this crate: it renders views, forwards task mutations and
//! finished game sessions here, and owns the platform notification center
//! behind the [`NotificationDelivery`] trait.
//!
//! ## Architecture
//!
//! - **Scheduler**: converts a task's due date and a user-chosen lead time
//!   into a single absolute trigger instant, and manages the parallel stream
//!   of calming reminders and duplicate-call warnings
//! - **Stats**: buckets completed Guess Who sessions into civil days in one
//!   fixed reference zone and answers daily, monthly, and trend queries
//! - **Config**: TOML-based configuration (reference zone, calming defaults)
//!
//! ## Key Components
//!
//! - [`ReminderScheduler`]: schedule/cancel task reminders and calming batches
//! - [`GameStatsAnalyzer`]: day, window, and trend aggregates over sessions
//! - [`NotificationDelivery`]: seam to the platform notification center
//! - [`Config`]: application configuration management

pub mod config;
pub mod delivery;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod session;
pub mod stats;

pub use config::Config;
pub use delivery::{
    InMemoryDelivery, NotificationDelivery, NotificationPayload, PendingNotification,
};
pub use error::{ConfigError, CoreError, DeliveryError, SchedulingError};
pub use events::ReminderAction;
pub use scheduler::{
    CalmingConfig, LeadTime, ReminderRequest, ReminderScheduler, Scheduled, CALMING_ID_PREFIX,
};
pub use session::{InMemorySessionStore, SessionRecord, SessionStore};
pub use stats::{AggregateStats, DayWindows, GameStatsAnalyzer, TrendMetric, TrendPoint, Window};
