//! Time bucketing strategies for dashboard series
//!
//! Each strategy maps a timestamp to one key of a fixed, ordered universe.
//! The universes are label tables rather than branching code; their order
//! is the canonical display order of the series.
//!
//! ## Time zone
//!
//! Day-of-week, day-of-month and month boundaries depend on the time zone.
//! Timestamps are stored in UTC and converted to the bucketer's configured
//! fixed offset (`analytics.utc_offset_minutes`, UTC by default) before the
//! calendar fields are read.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day-of-week labels, Sunday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Dim", "Lun", "Mar", "Mer", "Jeu", "Ven", "Sam"];

/// Five-day ranges of the month; the 31st falls into the last range
pub const MONTH_RANGE_LABELS: [&str; 6] = ["1-5", "6-10", "11-15", "16-20", "21-25", "26-30"];

/// Month labels, January first
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Juin", "Juil", "Août", "Sep", "Oct", "Nov", "Déc",
];

/// Width of a range-of-month bucket in days
const RANGE_WIDTH: u32 = 5;

/// Last day covered by the range-of-month universe
const LAST_RANGE_DAY: u32 = 30;

/// Bucketing strategy behind each dashboard series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BucketStrategy {
    /// Day of week (weekly view)
    Weekly,
    /// Five-day range of the month (monthly view)
    Monthly,
    /// Calendar month (yearly view)
    Yearly,
}

impl BucketStrategy {
    pub const ALL: [BucketStrategy; 3] = [
        BucketStrategy::Weekly,
        BucketStrategy::Monthly,
        BucketStrategy::Yearly,
    ];

    /// Ordered, complete key universe used for dense filling
    pub fn universe(&self) -> &'static [&'static str] {
        match self {
            BucketStrategy::Weekly => &WEEKDAY_LABELS,
            BucketStrategy::Monthly => &MONTH_RANGE_LABELS,
            BucketStrategy::Yearly => &MONTH_LABELS,
        }
    }

    pub fn universe_size(&self) -> usize {
        self.universe().len()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BucketStrategy::Weekly => "Day of week",
            BucketStrategy::Monthly => "Day of month",
            BucketStrategy::Yearly => "Month",
        }
    }
}

impl fmt::Display for BucketStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BucketStrategy::Weekly => "weekly",
            BucketStrategy::Monthly => "monthly",
            BucketStrategy::Yearly => "yearly",
        };
        f.write_str(name)
    }
}

/// A bucket label together with its position in the canonical universe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    pub index: usize,
    pub label: &'static str,
}

/// First day of the five-day range containing `day`, after clamping to 30
///
/// # Examples
/// ```
/// use storefront_analytics::analysis::time_bucketer::range_start;
/// assert_eq!(range_start(1), 1);
/// assert_eq!(range_start(14), 11);
/// assert_eq!(range_start(31), 26);
/// ```
pub fn range_start(day: u32) -> u32 {
    let day = day.clamp(1, LAST_RANGE_DAY);
    ((day - 1) / RANGE_WIDTH) * RANGE_WIDTH + 1
}

/// `"{start}-{end}"` label of the range containing `day`
///
/// # Examples
/// ```
/// use storefront_analytics::analysis::time_bucketer::range_label;
/// assert_eq!(range_label(5), "1-5");
/// assert_eq!(range_label(30), "26-30");
/// assert_eq!(range_label(31), "26-30");
/// ```
pub fn range_label(day: u32) -> String {
    let start = range_start(day);
    let end = (start + RANGE_WIDTH - 1).min(LAST_RANGE_DAY);
    format!("{}-{}", start, end)
}

/// Maps timestamps to bucket keys in a configured time zone
#[derive(Debug, Clone, Copy)]
pub struct TimeBucketer {
    offset: FixedOffset,
}

impl Default for TimeBucketer {
    fn default() -> Self {
        Self::utc()
    }
}

impl TimeBucketer {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Position of `timestamp` in the strategy's universe
    pub fn bucket_index(&self, strategy: BucketStrategy, timestamp: DateTime<Utc>) -> usize {
        let local = timestamp.with_timezone(&self.offset);
        match strategy {
            BucketStrategy::Weekly => local.weekday().num_days_from_sunday() as usize,
            BucketStrategy::Monthly => ((range_start(local.day()) - 1) / RANGE_WIDTH) as usize,
            BucketStrategy::Yearly => local.month0() as usize,
        }
    }

    pub fn bucket_key(&self, strategy: BucketStrategy, timestamp: DateTime<Utc>) -> BucketKey {
        let index = self.bucket_index(strategy, timestamp);
        BucketKey {
            index,
            label: strategy.universe()[index],
        }
    }
}
