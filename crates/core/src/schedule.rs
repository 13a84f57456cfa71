//! Schedule entity snapshots and the shared time-overlap predicate.
//!
//! These are the read-only values the conflict engine and the enrollment
//! guard operate on. They are deliberately separate from the row types in
//! `camp-db` so the engine has no persistence dependency.
//!
//! Id sets (`enrolled_person_ids`, `assigned_staff_ids`, ...) are kept as
//! `Vec` in insertion order so audit output is deterministic for a given
//! input. Duplicate ids inside a set are ignored.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Overlap predicate
// ---------------------------------------------------------------------------

/// Half-open interval overlap: `[start1, end1)` and `[start2, end2)`.
///
/// Windows that only touch at an endpoint (`end1 == start2`) do not overlap.
pub fn overlaps(start1: Timestamp, end1: Timestamp, start2: Timestamp, end2: Timestamp) -> bool {
    start1 < end2 && start2 < end1
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A time-boxed activity bound to a room, with enrolled campers and assigned staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub room_id: DbId,
    pub capacity: i32,
    #[serde(default)]
    pub assigned_staff_ids: Vec<DbId>,
    #[serde(default)]
    pub enrolled_person_ids: Vec<DbId>,
    #[serde(default)]
    pub required_certifications: Vec<String>,
}

impl Event {
    /// Number of distinct enrolled people.
    pub fn enrolled_count(&self) -> usize {
        self.enrolled_person_ids.iter().collect::<HashSet<_>>().len()
    }

    pub fn is_enrolled(&self, person_id: DbId) -> bool {
        self.enrolled_person_ids.contains(&person_id)
    }

    /// `true` once enrollment has reached (or already exceeds) capacity.
    pub fn is_full(&self) -> bool {
        self.enrolled_count() as i64 >= i64::from(self.capacity)
    }

    /// `true` if enrollment strictly exceeds capacity.
    pub fn is_overcapacity(&self) -> bool {
        self.enrolled_count() as i64 > i64::from(self.capacity)
    }

    /// Whether this event's window overlaps `other`'s (see [`overlaps`]).
    pub fn overlaps(&self, other: &Event) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }
}

/// A camper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: DbId,
    pub name: String,
}

/// A staff member and the certifications they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub certifications: Vec<String>,
}

/// A location that hosts events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: DbId,
    pub name: String,
    pub capacity: i32,
}

/// A named roster of campers (e.g. a cabin), used to drive bulk enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub member_ids: Vec<DbId>,
}

impl Group {
    /// Resolve member ids against the roster, in member order.
    ///
    /// Ids with no matching person are skipped, as are repeated ids.
    pub fn resolve_members(&self, people: &[Person]) -> Vec<Person> {
        let mut seen = HashSet::new();
        self.member_ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| people.iter().find(|p| p.id == *id).cloned())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything the engine reads, owned by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    pub events: Vec<Event>,
    pub people: Vec<Person>,
    pub staff: Vec<StaffMember>,
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl ScheduleSnapshot {
    pub fn event(&self, id: DbId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn event_mut(&mut self, id: DbId) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    pub fn person(&self, id: DbId) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn group(&self, id: DbId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that an event window is non-empty (`start < end`).
///
/// The conflict engine assumes this holds; write paths enforce it.
pub fn validate_event_window(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if start < end {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Event start ({start}) must be before end ({end})"
        )))
    }
}

/// Validate that a room or event capacity is non-negative.
pub fn validate_capacity(capacity: i32) -> Result<(), CoreError> {
    if capacity < 0 {
        return Err(CoreError::Validation(format!(
            "Capacity must be >= 0, got {capacity}"
        )));
    }
    Ok(())
}

/// Validate that a display name or title is not blank.
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
