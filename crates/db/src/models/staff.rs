//! Staff member entity model and DTOs.

use camp_core::schedule;
use camp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `staff_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StaffMember {
    pub id: DbId,
    pub name: String,
    pub certifications: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new staff member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStaffMember {
    pub name: String,
    /// Defaults to no certifications if omitted.
    #[serde(default)]
    pub certifications: Vec<String>,
}

/// DTO for updating an existing staff member.
///
/// `certifications`, when present, replaces the whole list.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStaffMember {
    pub name: Option<String>,
    pub certifications: Option<Vec<String>>,
}

impl From<StaffMember> for schedule::StaffMember {
    fn from(row: StaffMember) -> Self {
        Self {
            id: row.id,
            name: row.name,
            certifications: row.certifications,
        }
    }
}
