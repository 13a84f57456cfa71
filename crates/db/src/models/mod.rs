//! Row types and DTOs, one module per table.

pub mod event;
pub mod group;
pub mod person;
pub mod room;
pub mod staff;
