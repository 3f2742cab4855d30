//! Launch countdown arithmetic
//!
//! Turns a fixed target instant and a sampled "now" into whole days, hours,
//! minutes and seconds, and classifies the remaining time into a
//! [`CountdownStatus`]. Everything here is pure except [`Countdown`], which
//! only remembers that launch has been reached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default launch instant used when no override is compiled in
pub const DEFAULT_LAUNCH_AT: &str = "2026-03-15T00:00:00Z";

/// Build-time override for the launch instant.
///
/// Read with `option_env!` so the server render and the hydrated client
/// count down to the same instant.
pub const LAUNCH_AT_ENV: &str = "LEAKHUNTERX_LAUNCH_AT";

/// Nominal period between two countdown ticks (milliseconds)
pub const TICK_INTERVAL_MS: u32 = 1_000;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Below this much remaining time a same-day launch reads as "today"
const DUE_TODAY_SECS: i64 = 12 * SECONDS_PER_HOUR;

/// Below this much remaining time the launch reads as "tomorrow"
const DUE_TOMORROW_SECS: i64 = SECONDS_PER_DAY;

/// Errors raised while reading a launch instant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CountdownError {
    #[error("Invalid launch instant '{input}': {reason}")]
    InvalidTarget { input: String, reason: String },
}

/// Parse an RFC 3339 / ISO-8601 timestamp into a UTC target instant
pub fn parse_target(input: &str) -> Result<DateTime<Utc>, CountdownError> {
    DateTime::parse_from_rfc3339(input.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CountdownError::InvalidTarget {
            input: input.to_string(),
            reason: e.to_string(),
        })
}

/// The launch instant for this build.
///
/// Falls back to [`DEFAULT_LAUNCH_AT`] when the override is missing; an
/// override that does not parse is reported as an error so the caller can
/// decide how loudly to complain.
pub fn launch_target() -> Result<DateTime<Utc>, CountdownError> {
    parse_target(option_env!("LEAKHUNTERX_LAUNCH_AT").unwrap_or(DEFAULT_LAUNCH_AT))
}

/// The built-in default launch instant
pub fn default_launch_target() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(DEFAULT_LAUNCH_EPOCH_SECS, 0).unwrap_or_default()
}

/// `2026-03-15T00:00:00Z` as a unix timestamp
const DEFAULT_LAUNCH_EPOCH_SECS: i64 = 1_773_532_800;

/// Whole-unit breakdown of a non-negative duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeRemaining {
    pub const ZERO: TimeRemaining = TimeRemaining {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Decompose a number of whole seconds; negative input clamps to zero
    pub fn from_total_seconds(total: i64) -> Self {
        let total = total.max(0);
        Self {
            days: (total / SECONDS_PER_DAY) as u64,
            hours: ((total % SECONDS_PER_DAY) / SECONDS_PER_HOUR) as u8,
            minutes: ((total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u8,
            seconds: (total % SECONDS_PER_MINUTE) as u8,
        }
    }

    /// Total whole seconds represented by this breakdown
    pub fn total_seconds(&self) -> i64 {
        self.days as i64 * SECONDS_PER_DAY
            + self.hours as i64 * SECONDS_PER_HOUR
            + self.minutes as i64 * SECONDS_PER_MINUTE
            + self.seconds as i64
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Units in display order with their labels
    pub fn units(&self) -> [(CountdownUnit, u64); 4] {
        [
            (CountdownUnit::Days, self.days),
            (CountdownUnit::Hours, self.hours as u64),
            (CountdownUnit::Minutes, self.minutes as u64),
            (CountdownUnit::Seconds, self.seconds as u64),
        ]
    }
}

/// Remaining time from `now` until `target`, floored to whole seconds
pub fn time_remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
    let millis = (target - now).num_milliseconds();
    // Floor division; the clamp in from_total_seconds handles the past.
    TimeRemaining::from_total_seconds(millis.div_euclid(1_000))
}

/// One column of the countdown display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl CountdownUnit {
    pub fn label(&self) -> &'static str {
        match self {
            CountdownUnit::Days => "Days",
            CountdownUnit::Hours => "Hours",
            CountdownUnit::Minutes => "Minutes",
            CountdownUnit::Seconds => "Seconds",
        }
    }

    /// Tailwind gradient for the digits of this unit
    pub fn gradient(&self) -> &'static str {
        match self {
            CountdownUnit::Days => "from-blue-400 to-cyan-400",
            CountdownUnit::Hours => "from-purple-400 to-pink-400",
            CountdownUnit::Minutes => "from-green-400 to-emerald-400",
            CountdownUnit::Seconds => "from-amber-400 to-orange-400",
        }
    }
}

/// Pad a unit value to at least two digits (`7` -> `07`, `123` stays `123`)
pub fn pad2(value: u64) -> String {
    format!("{:02}", value)
}

/// Coarse classification of the remaining time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownStatus {
    CountingDown,
    DueTomorrow,
    DueToday,
    Launched,
}

impl CountdownStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CountdownStatus::CountingDown => "Launching soon",
            CountdownStatus::DueTomorrow => "Launching tomorrow",
            CountdownStatus::DueToday => "Launching today",
            CountdownStatus::Launched => "We're live",
        }
    }

    pub fn is_launched(&self) -> bool {
        matches!(self, CountdownStatus::Launched)
    }
}

/// A single clock reading and everything derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownSample {
    pub now: DateTime<Utc>,
    pub remaining: TimeRemaining,
    pub status: CountdownStatus,
}

/// Classify remaining time using the same reading the digits came from.
///
/// All-zero digits always read as launched, including the last partial
/// second before the target.
pub fn classify(
    target: DateTime<Utc>,
    now: DateTime<Utc>,
    remaining: &TimeRemaining,
) -> CountdownStatus {
    let total = remaining.total_seconds();
    if remaining.is_zero() {
        CountdownStatus::Launched
    } else if total < DUE_TODAY_SECS && target.date_naive() == now.date_naive() {
        CountdownStatus::DueToday
    } else if total < DUE_TOMORROW_SECS {
        CountdownStatus::DueTomorrow
    } else {
        CountdownStatus::CountingDown
    }
}

/// Sample the countdown at `now` without any latching
pub fn sample(target: DateTime<Utc>, now: DateTime<Utc>) -> CountdownSample {
    let remaining = time_remaining(target, now);
    CountdownSample {
        now,
        remaining,
        status: classify(target, now, &remaining),
    }
}

/// Countdown towards a fixed instant.
///
/// Once a tick observes the launch, every later tick reports
/// [`CountdownStatus::Launched`] with zero remaining time, even if the clock
/// reading goes backwards.
#[derive(Debug, Clone)]
pub struct Countdown {
    target: DateTime<Utc>,
    launched: bool,
}

impl Countdown {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self {
            target,
            launched: false,
        }
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    pub fn has_launched(&self) -> bool {
        self.launched
    }

    /// Sample the clock once and publish digits and status from that reading
    pub fn tick(&mut self, now: DateTime<Utc>) -> CountdownSample {
        if self.launched {
            return CountdownSample {
                now,
                remaining: TimeRemaining::ZERO,
                status: CountdownStatus::Launched,
            };
        }

        let sample = sample(self.target, now);
        if sample.status.is_launched() {
            self.launched = true;
        }
        sample
    }
}
