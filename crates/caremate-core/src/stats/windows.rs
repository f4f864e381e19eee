//! Civil-day window math in a fixed reference zone.
//!
//! All day-boundary arithmetic is anchored to one named zone so aggregates
//! stay reproducible when the device travels or changes locale mid-history.
//! Buckets are half-open `[day_start, next_day_start)` pairs computed from
//! civil midnights, so DST-transition days (23h or 25h long) still map every
//! instant to exactly one bucket.

use chrono::{DateTime, Days, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Reference zone used when none is configured.
pub const DEFAULT_REFERENCE_ZONE: Tz = chrono_tz::Europe::Rome;

/// Half-open window `[from, to)` in absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Window {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant < self.to
    }
}

/// Civil-day boundary calculator for one fixed reference zone.
#[derive(Debug, Clone, Copy)]
pub struct DayWindows {
    zone: Tz,
}

impl DayWindows {
    pub fn new() -> Self {
        Self {
            zone: DEFAULT_REFERENCE_ZONE,
        }
    }

    pub fn with_zone(zone: Tz) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Civil-day floor: the midnight, in the reference zone, of the day
    /// containing `instant`.
    pub fn day_start(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        self.civil_midnight(instant.with_timezone(&self.zone).date_naive())
    }

    /// The following civil midnight. One calendar day after
    /// [`Self::day_start`], which is 24h except on DST-transition days.
    pub fn next_day_start(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let date = instant.with_timezone(&self.zone).date_naive() + Days::new(1);
        self.civil_midnight(date)
    }

    /// Trailing window of `days` civil days ending with, and including, the
    /// day containing `now`. Today is the last bucket; tomorrow's midnight
    /// is the exclusive upper bound.
    pub fn trailing_window(&self, days: u32, now: DateTime<Utc>) -> Window {
        let days = days.max(1);
        let today = now.with_timezone(&self.zone).date_naive();
        let first = today - Days::new(u64::from(days) - 1);
        Window {
            from: self.civil_midnight(first),
            to: self.civil_midnight(today + Days::new(1)),
        }
    }

    /// Chronological civil-day starts covering `window`.
    pub fn day_starts(&self, window: &Window) -> Vec<DateTime<Utc>> {
        let mut starts = Vec::new();
        let mut date = window.from.with_timezone(&self.zone).date_naive();
        loop {
            let start = self.civil_midnight(date);
            if start >= window.to {
                break;
            }
            starts.push(start);
            date = date + Days::new(1);
        }
        starts
    }

    fn civil_midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        let naive = date.and_time(NaiveTime::MIN);
        match self.zone.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            // Fall-back transition: midnight occurs twice; the earlier one
            // keeps buckets contiguous.
            LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
            // Spring-forward transition: midnight was skipped; the day begins
            // at the first valid instant after the gap.
            LocalResult::None => {
                let mut probe = naive;
                loop {
                    probe += chrono::Duration::minutes(30);
                    if let Some(dt) = self.zone.from_local_datetime(&probe).earliest() {
                        return dt.with_timezone(&Utc);
                    }
                }
            }
        }
    }
}

impl Default for DayWindows {
    fn default() -> Self {
        Self::new()
    }
}
