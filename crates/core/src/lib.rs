//! Camp scheduling domain: entity snapshots, the schedule audit, the
//! enrollment guard and the enrollment coordinator.
//!
//! This crate has zero internal deps so it can be used by the persistence
//! layer, the API server and any future CLI tooling alike.

pub mod conflicts;
pub mod coordinator;
pub mod error;
pub mod guard;
pub mod schedule;
pub mod store;
pub mod types;

pub use conflicts::{detect_conflicts, Conflict, ConflictKind};
pub use coordinator::{BulkEnrollmentSummary, EnrollmentCoordinator};
pub use guard::{can_enroll, EnrollmentDecision};
pub use store::{EnrollmentStore, MemoryEnrollmentStore};
