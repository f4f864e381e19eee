//! Statistics module for Caremate
//!
//! Rolling-window analytics over completed Guess Who sessions: civil-day
//! bucketing in one fixed reference zone, daily and monthly aggregates, and
//! per-day trend series for chart rendering.

mod game_stats;
mod windows;

pub use game_stats::{AggregateStats, GameStatsAnalyzer, TrendMetric, TrendPoint};
pub use windows::{DayWindows, Window, DEFAULT_REFERENCE_ZONE};
