//! Core error types for caremate-core.
//!
//! This module defines the error hierarchy using thiserror. Scheduling
//! failures are reported to the immediate caller as values and never
//! escalated to a process-level fault.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for caremate-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Reminder scheduling errors
    #[error("Scheduling error: {0}")]
    Scheduling(#[from] SchedulingError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the notification delivery service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The user has not granted notification permission
    #[error("Notification permission denied")]
    PermissionDenied,

    /// The delivery service refused the registration
    #[error("Registration refused: {0}")]
    Refused(String),
}

/// Reminder scheduling errors.
///
/// Non-fatal: a failed registration leaves the scheduler usable and is never
/// retried by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// The delivery service did not accept the registration
    #[error("Reminder not scheduled: {0}")]
    NotScheduled(#[from] DeliveryError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
