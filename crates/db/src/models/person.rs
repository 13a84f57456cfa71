//! Person (camper) entity model and DTOs.

use camp_core::schedule;
use camp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `people` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new person.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePerson {
    pub name: String,
}

/// DTO for updating an existing person.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePerson {
    pub name: Option<String>,
}

impl From<Person> for schedule::Person {
    fn from(row: Person) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}
