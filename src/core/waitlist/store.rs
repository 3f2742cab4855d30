//! In-memory waitlist storage
//!
//! Entries are keyed by normalised email so a repeated signup returns the
//! original place in line instead of a new one. Positions come from an
//! atomic counter; the map and counter together need no extra locking.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use super::{JoinResponse, WaitlistError, WaitlistStats, normalize_email, validate_email};

/// One signup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub id: Uuid,
    /// Email as submitted (trimmed, original case)
    pub email: String,
    pub joined_at: DateTime<Utc>,
    /// 1-based position among stored entries
    pub position: u64,
}

/// Shared waitlist state, cheap to clone
#[derive(Debug, Clone)]
pub struct WaitlistStore {
    entries: Arc<DashMap<String, WaitlistEntry>>,
    next_position: Arc<AtomicU64>,
    capacity: Option<u64>,
    display_offset: u64,
}

impl WaitlistStore {
    /// `capacity` bounds stored entries (`None` = unbounded). `display_offset`
    /// is added to every total and position shown to visitors.
    pub fn new(capacity: Option<u64>, display_offset: u64) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            next_position: Arc::new(AtomicU64::new(0)),
            capacity,
            display_offset,
        }
    }

    /// Add `email` to the waitlist, or return its existing entry
    pub fn join(&self, email: &str) -> Result<JoinResponse, WaitlistError> {
        let email = validate_email(email)?;
        let key = normalize_email(&email);

        let (entry, created) = match self.entries.entry(key) {
            Entry::Occupied(existing) => (existing.get().clone(), false),
            Entry::Vacant(slot) => {
                let position = self.reserve_position()?;
                let entry = WaitlistEntry {
                    id: Uuid::new_v4(),
                    email,
                    joined_at: Utc::now(),
                    position,
                };
                slot.insert(entry.clone());
                (entry, true)
            }
        };

        Ok(JoinResponse {
            position: entry.position + self.display_offset,
            total: self.total(),
            created,
        })
    }

    /// Claim the next position unless the list is full
    fn reserve_position(&self) -> Result<u64, WaitlistError> {
        let capacity = self.capacity;
        self.next_position
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |taken| match capacity {
                Some(cap) if taken >= cap => None,
                _ => Some(taken + 1),
            })
            .map(|taken| taken + 1)
            .map_err(|_| WaitlistError::Full)
    }

    /// Look up an entry by email, ignoring case and surrounding whitespace
    pub fn get(&self, email: &str) -> Option<WaitlistEntry> {
        self.entries
            .get(&normalize_email(email))
            .map(|entry| entry.value().clone())
    }

    /// Number of stored signups
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Displayed waitlist size
    pub fn total(&self) -> u64 {
        self.next_position.load(Ordering::SeqCst) + self.display_offset
    }

    pub fn stats(&self) -> WaitlistStats {
        WaitlistStats {
            total: self.total(),
        }
    }
}

impl Default for WaitlistStore {
    fn default() -> Self {
        Self::new(None, 0)
    }
}
