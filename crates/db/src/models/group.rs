//! Camper group model and DTOs.

use camp_core::schedule;
use camp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `camper_groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Group {
    pub id: DbId,
    pub name: String,
    pub member_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new group.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroup {
    pub name: String,
    #[serde(default)]
    pub member_ids: Vec<DbId>,
}

impl From<Group> for schedule::Group {
    fn from(row: Group) -> Self {
        Self {
            id: row.id,
            name: row.name,
            member_ids: row.member_ids,
        }
    }
}
