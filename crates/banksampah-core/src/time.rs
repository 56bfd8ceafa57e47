//! Date ranges for report filtering
//!
//! All calendar arithmetic is done on UTC days. Front-ends that want local
//! days convert timestamps before handing records to the engine.

use banksampah_config::TimeRange;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Start of the "all data" window, 2000-01-01T00:00:00Z
pub const ALL_DATA_EPOCH_SECS: i64 = 946_684_800;

/// Lookback windows offered by the dashboard
pub const SUPPORTED_LOOKBACK_DAYS: [u32; 3] = [7, 14, 30];

/// First instant of the "all data" window
pub fn reporting_epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(ALL_DATA_EPOCH_SECS, 0)
        .single()
        .unwrap_or_default()
}

/// 00:00:00.000 of a day
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

/// 23:59:59.999 of a day
pub fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    start_of_day(day) + Duration::days(1) - Duration::milliseconds(1)
}

/// Validated "last N days" window length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackDays(u32);

impl LookbackDays {
    pub fn get(&self) -> u32 {
        self.0
    }
}

/// Window preset, resolved against a clock by [`DateRange::from_preset`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    Today,
    /// The last N calendar days, today included
    LastDays(LookbackDays),
    All,
}

impl RangePreset {
    /// "Last N days" preset; N must be one of the dashboard windows
    pub fn last_days(days: u32) -> CoreResult<Self> {
        if SUPPORTED_LOOKBACK_DAYS.contains(&days) {
            Ok(RangePreset::LastDays(LookbackDays(days)))
        } else {
            Err(CoreError::InvalidPreset {
                preset: format!("last {} days", days),
            })
        }
    }
}

impl TryFrom<TimeRange> for RangePreset {
    type Error = CoreError;

    fn try_from(range: TimeRange) -> Result<Self, Self::Error> {
        match range {
            TimeRange::Today => Ok(RangePreset::Today),
            TimeRange::All => Ok(RangePreset::All),
            TimeRange::Custom => Err(CoreError::MissingCustomRange),
            other => match other.lookback_days() {
                Some(days) => RangePreset::last_days(days),
                None => Err(CoreError::InvalidPreset {
                    preset: other.to_string(),
                }),
            },
        }
    }
}

/// Inclusive time window `[start, end]`
///
/// Constructors reject `start > end`; a range never holds reversed bounds.
/// Deserialization goes through [`DateRange::new`] as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDateRange")]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Unchecked wire form of [`DateRange`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = CoreError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Custom range from two instants
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::InvalidRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// Range covering whole calendar days `start..=end`
    pub fn days(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            start: start_of_day(start),
            end: end_of_day(end),
        })
    }

    /// Resolve a preset against `now`; both bounds land on day boundaries
    pub fn from_preset(preset: RangePreset, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let start = match preset {
            RangePreset::Today => start_of_day(today),
            RangePreset::LastDays(days) => {
                let back = i64::from(days.get()) - 1;
                start_of_day(today - Duration::days(back))
            }
            RangePreset::All => reporting_epoch().min(start_of_day(today)),
        };
        Self {
            start,
            end: end_of_day(today),
        }
    }

    /// Resolve a configured time range; `Custom` needs explicit dates
    pub fn from_time_range(
        range: TimeRange,
        custom: Option<(NaiveDate, NaiveDate)>,
        now: DateTime<Utc>,
    ) -> CoreResult<Self> {
        match (range, custom) {
            (_, Some((start, end))) => Self::days(start, end),
            (TimeRange::Custom, None) => Err(CoreError::MissingCustomRange),
            (preset, None) => Ok(Self::from_preset(RangePreset::try_from(preset)?, now)),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn start_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_day(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Check if an instant falls inside the range (both ends inclusive)
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        *at >= self.start && *at <= self.end
    }

    /// Number of calendar days touched by the range
    pub fn day_count(&self) -> usize {
        ((self.end_day() - self.start_day()).num_days() + 1) as usize
    }

    /// Every calendar day from the start day to the end day, ascending
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_day();
        self.start_day().iter_days().take_while(move |d| *d <= end)
    }

    /// Human-readable description
    pub fn description(&self) -> String {
        if self.start_day() == self.end_day() {
            self.start_day().to_string()
        } else {
            format!("{} to {}", self.start_day(), self.end_day())
        }
    }
}

// ==================== Tests ====================
