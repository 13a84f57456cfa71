//! Loads the full schedule the conflict engine audits.

use camp_core::schedule::ScheduleSnapshot;

use crate::repositories::{EventRepo, GroupRepo, PersonRepo, RoomRepo, StaffRepo};
use crate::DbPool;

/// Read every room, person, staff member, group and event into a snapshot.
///
/// The collections are read with separate queries and without a
/// transaction, so a concurrent writer can make the snapshot slightly
/// inconsistent. The audit only promises consistency with what it was given.
pub async fn load_snapshot(pool: &DbPool) -> Result<ScheduleSnapshot, sqlx::Error> {
    let events = EventRepo::list(pool).await?;
    let people = PersonRepo::list(pool).await?;
    let staff = StaffRepo::list(pool).await?;
    let rooms = RoomRepo::list(pool).await?;
    let groups = GroupRepo::list(pool).await?;

    tracing::debug!(
        events = events.len(),
        people = people.len(),
        staff = staff.len(),
        rooms = rooms.len(),
        groups = groups.len(),
        "Loaded schedule snapshot"
    );

    Ok(ScheduleSnapshot {
        events: events.into_iter().map(Into::into).collect(),
        people: people.into_iter().map(Into::into).collect(),
        staff: staff.into_iter().map(Into::into).collect(),
        rooms: rooms.into_iter().map(Into::into).collect(),
        groups: groups.into_iter().map(Into::into).collect(),
    })
}
