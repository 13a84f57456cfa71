//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod enrollment_repo;
pub mod event_repo;
pub mod group_repo;
pub mod person_repo;
pub mod room_repo;
pub mod staff_repo;

pub use enrollment_repo::EnrollmentRepo;
pub use event_repo::EventRepo;
pub use group_repo::GroupRepo;
pub use person_repo::PersonRepo;
pub use room_repo::RoomRepo;
pub use staff_repo::StaffRepo;
