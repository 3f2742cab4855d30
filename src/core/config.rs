//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

/// Signups shown on top of the stored count ("850+ developers waiting")
pub const DEFAULT_DISPLAY_OFFSET: u64 = 850;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of stored waitlist signups
    /// Unset, empty or unparseable means unbounded
    pub waitlist_capacity: Option<u64>,

    /// Added to every waitlist total shown to visitors
    pub waitlist_display_offset: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("WAITLIST_CAPACITY").ok().as_deref(),
            std::env::var("WAITLIST_DISPLAY_OFFSET").ok().as_deref(),
        )
    }

    /// Build a config from raw variable values
    pub fn from_values(capacity: Option<&str>, display_offset: Option<&str>) -> Self {
        Self {
            waitlist_capacity: capacity.and_then(parse_count),
            waitlist_display_offset: display_offset
                .and_then(parse_count)
                .unwrap_or(DEFAULT_DISPLAY_OFFSET),
        }
    }

    /// Check if the waitlist has a capacity limit
    pub fn has_capacity_limit(&self) -> bool {
        self.waitlist_capacity.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_count(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}
