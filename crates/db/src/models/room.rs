//! Room entity model and DTOs.

use camp_core::schedule;
use camp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub name: String,
    pub capacity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new room.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoom {
    pub name: String,
    pub capacity: i32,
}

/// DTO for updating an existing room. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoom {
    pub name: Option<String>,
    pub capacity: Option<i32>,
}

impl From<Room> for schedule::Room {
    fn from(row: Room) -> Self {
        Self {
            id: row.id,
            name: row.name,
            capacity: row.capacity,
        }
    }
}
