pub mod conflict;
pub mod enrollment;
pub mod event;
pub mod group;
pub mod person;
pub mod room;
pub mod staff;
