//! Guess Who session analytics.
//!
//! Rolling-window aggregates over completed sessions: what happened on one
//! civil day, totals for a trailing window, and per-day trend series for
//! chart rendering. Windows come from [`DayWindows`]; records are anchored
//! by their finish instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionRecord;
use crate::stats::windows::{DayWindows, Window};

/// Aggregate statistics over a window. Derived per query, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub session_count: u32,
    pub total_attempts: u64,
    pub average_duration_seconds: f64,
    /// Mean per-session `correct / total_rounds`. Zero-round sessions are
    /// excluded from this mean; they still count everywhere else.
    pub average_score_ratio: f64,
}

/// Which value a trend series carries per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    AvgScore,
    TotalAttempts,
}

/// One day in a trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub day_start: DateTime<Utc>,
    pub value: f64,
}

/// Analytics over completed Guess Who sessions.
#[derive(Debug, Clone, Copy)]
pub struct GameStatsAnalyzer {
    windows: DayWindows,
}

impl GameStatsAnalyzer {
    /// Analyzer anchored to the default reference zone.
    pub fn new() -> Self {
        Self {
            windows: DayWindows::new(),
        }
    }

    /// Analyzer over a specific day-window calculator.
    pub fn with_windows(windows: DayWindows) -> Self {
        Self { windows }
    }

    pub fn windows(&self) -> &DayWindows {
        &self.windows
    }

    /// Sessions finishing on the civil day containing `day`, chronological
    /// by finish instant.
    pub fn sessions_on(
        &self,
        day: DateTime<Utc>,
        records: &[SessionRecord],
    ) -> Vec<SessionRecord> {
        let window = Window {
            from: self.windows.day_start(day),
            to: self.windows.next_day_start(day),
        };
        let mut out: Vec<SessionRecord> = records
            .iter()
            .filter(|record| window.contains(record.finished_at))
            .cloned()
            .collect();
        out.sort_by_key(|record| record.finished_at);
        out
    }

    /// Aggregate every well-formed session finishing inside `window`.
    ///
    /// Zero-record windows are valid and produce zero-valued stats;
    /// malformed records are skipped, never an error.
    pub fn aggregate(&self, records: &[SessionRecord], window: &Window) -> AggregateStats {
        let mut stats = AggregateStats::default();
        let mut duration_sum = 0.0;
        let mut ratio_sum = 0.0;
        let mut ratio_count = 0u32;

        for record in records {
            if !record.is_well_formed() || !window.contains(record.finished_at) {
                continue;
            }
            stats.session_count += 1;
            stats.total_attempts += u64::from(record.total_attempts);
            duration_sum += record.duration_seconds();
            if let Some(ratio) = record.score_ratio() {
                ratio_sum += ratio;
                ratio_count += 1;
            }
        }

        if stats.session_count > 0 {
            stats.average_duration_seconds = duration_sum / f64::from(stats.session_count);
        }
        if ratio_count > 0 {
            stats.average_score_ratio = ratio_sum / f64::from(ratio_count);
        }
        stats
    }

    /// Aggregate for the civil day containing `now`.
    pub fn daily_stats(&self, now: DateTime<Utc>, records: &[SessionRecord]) -> AggregateStats {
        self.aggregate(records, &self.windows.trailing_window(1, now))
    }

    /// Aggregate for the trailing 30 civil days, today included.
    pub fn monthly_stats(&self, now: DateTime<Utc>, records: &[SessionRecord]) -> AggregateStats {
        self.aggregate(records, &self.windows.trailing_window(30, now))
    }

    /// One point per civil day in the trailing window, chronological. Days
    /// with no sessions are emitted with value 0 so chart axes stay stable.
    pub fn per_day_trend(
        &self,
        records: &[SessionRecord],
        days: u32,
        now: DateTime<Utc>,
        metric: TrendMetric,
    ) -> Vec<TrendPoint> {
        let window = self.windows.trailing_window(days, now);
        self.windows
            .day_starts(&window)
            .into_iter()
            .map(|day_start| {
                let day = Window {
                    from: day_start,
                    to: self.windows.next_day_start(day_start),
                };
                let value = self.day_value(records, &day, metric);
                TrendPoint { day_start, value }
            })
            .collect()
    }

    fn day_value(&self, records: &[SessionRecord], day: &Window, metric: TrendMetric) -> f64 {
        let in_day = records
            .iter()
            .filter(|record| record.is_well_formed() && day.contains(record.finished_at));
        match metric {
            TrendMetric::AvgScore => {
                let mut sum = 0.0;
                let mut count = 0u32;
                for record in in_day {
                    if let Some(ratio) = record.score_ratio() {
                        sum += ratio;
                        count += 1;
                    }
                }
                if count > 0 {
                    sum / f64::from(count)
                } else {
                    0.0
                }
            }
            TrendMetric::TotalAttempts => in_day
                .map(|record| f64::from(record.total_attempts))
                .sum(),
        }
    }
}

impl Default for GameStatsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
