//! Event entity model and DTOs.

use camp_core::schedule;
use camp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `events` table, with its enrollment aggregated from
/// `event_enrollments` in enrollment order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub room_id: DbId,
    pub capacity: i32,
    pub assigned_staff_ids: Vec<DbId>,
    pub required_certifications: Vec<String>,
    pub enrolled_person_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new event. Enrollment is managed separately.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub room_id: DbId,
    pub capacity: i32,
    #[serde(default)]
    pub assigned_staff_ids: Vec<DbId>,
    #[serde(default)]
    pub required_certifications: Vec<String>,
}

/// DTO for updating an existing event. All fields are optional; list fields
/// replace the stored list when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub room_id: Option<DbId>,
    pub capacity: Option<i32>,
    pub assigned_staff_ids: Option<Vec<DbId>>,
    pub required_certifications: Option<Vec<String>>,
}

impl From<Event> for schedule::Event {
    fn from(row: Event) -> Self {
        Self {
            id: row.id,
            title: row.title,
            start: row.starts_at,
            end: row.ends_at,
            room_id: row.room_id,
            capacity: row.capacity,
            assigned_staff_ids: row.assigned_staff_ids,
            enrolled_person_ids: row.enrolled_person_ids,
            required_certifications: row.required_certifications,
        }
    }
}
