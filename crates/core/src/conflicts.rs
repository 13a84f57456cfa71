//! Schedule audit: detects every scheduling rule currently violated in a snapshot.
//!
//! [`detect_conflicts`] is a pure, wholesale recomputation. It never fails;
//! ids that reference a missing room, person or staff member simply
//! contribute nothing. Findings are returned in pass order:
//!
//! 1. event overcapacity
//! 2. room overcapacity (overlapping events sharing a room)
//! 3. camper double-booking
//! 4. staff double-booking
//! 5. missing staff certifications
//!
//! Within a pass, resources are visited in first-appearance order and pairs in
//! event order, so the output is reproducible for a given input ordering.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schedule::{Event, Person, Room, StaffMember};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Conflict types
// ---------------------------------------------------------------------------

/// Discriminant of a [`Conflict`], used for filtering and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    EventOvercapacity,
    RoomOvercapacity,
    #[serde(alias = "child_double_booked")]
    CamperDoubleBooked,
    StaffDoubleBooked,
    MissingCertification,
}

impl ConflictKind {
    /// Wire name, matching the `type` tag of the serialized conflict.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EventOvercapacity => "event_overcapacity",
            Self::RoomOvercapacity => "room_overcapacity",
            Self::CamperDoubleBooked => "camper_double_booked",
            Self::StaffDoubleBooked => "staff_double_booked",
            Self::MissingCertification => "missing_certification",
        }
    }
}

/// One violated scheduling rule. Derived on every audit and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Conflict {
    /// An event has more people enrolled than its own capacity.
    EventOvercapacity {
        event_id: DbId,
        enrolled_person_ids: Vec<DbId>,
        capacity: i32,
        message: String,
    },
    /// Two overlapping events in one room jointly exceed the room's capacity.
    RoomOvercapacity {
        room_id: DbId,
        event_ids: [DbId; 2],
        combined_enrolled: usize,
        capacity: i32,
        message: String,
    },
    /// A camper is enrolled in two overlapping events.
    #[serde(alias = "child_double_booked")]
    CamperDoubleBooked {
        person_id: DbId,
        event_ids: [DbId; 2],
        message: String,
    },
    /// A staff member is assigned to two overlapping events.
    StaffDoubleBooked {
        staff_id: DbId,
        event_ids: [DbId; 2],
        message: String,
    },
    /// The staff assigned to an event lack one or more required certifications.
    MissingCertification {
        event_id: DbId,
        missing: Vec<String>,
        staff_ids: Vec<DbId>,
        message: String,
    },
}

impl Conflict {
    pub fn kind(&self) -> ConflictKind {
        match self {
            Self::EventOvercapacity { .. } => ConflictKind::EventOvercapacity,
            Self::RoomOvercapacity { .. } => ConflictKind::RoomOvercapacity,
            Self::CamperDoubleBooked { .. } => ConflictKind::CamperDoubleBooked,
            Self::StaffDoubleBooked { .. } => ConflictKind::StaffDoubleBooked,
            Self::MissingCertification { .. } => ConflictKind::MissingCertification,
        }
    }

    /// Human-readable description, suitable for display as-is.
    pub fn message(&self) -> &str {
        match self {
            Self::EventOvercapacity { message, .. }
            | Self::RoomOvercapacity { message, .. }
            | Self::CamperDoubleBooked { message, .. }
            | Self::StaffDoubleBooked { message, .. }
            | Self::MissingCertification { message, .. } => message,
        }
    }

    /// The primary entity the conflict concerns (event, room, person or staff id).
    pub fn entity_id(&self) -> DbId {
        match self {
            Self::EventOvercapacity { event_id, .. }
            | Self::MissingCertification { event_id, .. } => *event_id,
            Self::RoomOvercapacity { room_id, .. } => *room_id,
            Self::CamperDoubleBooked { person_id, .. } => *person_id,
            Self::StaffDoubleBooked { staff_id, .. } => *staff_id,
        }
    }

    /// Ids involved in the conflict.
    ///
    /// Event ids for room and double-booking conflicts, enrolled person ids
    /// for event overcapacity, assigned staff ids for missing certifications.
    pub fn conflicting_ids(&self) -> Vec<DbId> {
        match self {
            Self::EventOvercapacity {
                enrolled_person_ids,
                ..
            } => enrolled_person_ids.clone(),
            Self::RoomOvercapacity { event_ids, .. }
            | Self::CamperDoubleBooked { event_ids, .. }
            | Self::StaffDoubleBooked { event_ids, .. } => event_ids.to_vec(),
            Self::MissingCertification { staff_ids, .. } => staff_ids.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Audit
// ---------------------------------------------------------------------------

/// Compute every conflict present in the given snapshot.
///
/// Returns an empty list for empty input.
pub fn detect_conflicts(
    events: &[Event],
    people: &[Person],
    staff: &[StaffMember],
    rooms: &[Room],
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    check_event_capacity(events, &mut conflicts);
    check_room_capacity(events, rooms, &mut conflicts);
    check_camper_double_booking(events, people, &mut conflicts);
    check_staff_double_booking(events, staff, &mut conflicts);
    check_certifications(events, staff, &mut conflicts);

    conflicts
}

fn check_event_capacity(events: &[Event], out: &mut Vec<Conflict>) {
    for event in events.iter().filter(|e| e.is_overcapacity()) {
        out.push(Conflict::EventOvercapacity {
            event_id: event.id,
            enrolled_person_ids: event.enrolled_person_ids.clone(),
            capacity: event.capacity,
            message: format!(
                "\"{}\" has {} enrolled but capacity is {}",
                event.title,
                event.enrolled_count(),
                event.capacity
            ),
        });
    }
}

fn check_room_capacity(events: &[Event], rooms: &[Room], out: &mut Vec<Conflict>) {
    let by_room = group_events_by(events, |e| vec![e.room_id]);

    for (room_id, bucket) in &by_room {
        let Some(room) = rooms.iter().find(|r| r.id == *room_id) else {
            continue;
        };
        for (a, b) in overlapping_pairs(bucket) {
            let combined = a.enrolled_count() + b.enrolled_count();
            if combined as i64 > i64::from(room.capacity) {
                out.push(Conflict::RoomOvercapacity {
                    room_id: room.id,
                    event_ids: [a.id, b.id],
                    combined_enrolled: combined,
                    capacity: room.capacity,
                    message: format!(
                        "{} is over capacity: \"{}\" and \"{}\" overlap with {} people (capacity {})",
                        room.name, a.title, b.title, combined, room.capacity
                    ),
                });
            }
        }
    }
}

fn check_camper_double_booking(events: &[Event], people: &[Person], out: &mut Vec<Conflict>) {
    let by_person = group_events_by(events, |e| e.enrolled_person_ids.clone());

    for (person_id, bucket) in &by_person {
        let name = people
            .iter()
            .find(|p| p.id == *person_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("#{person_id}"));
        for (a, b) in overlapping_pairs(bucket) {
            out.push(Conflict::CamperDoubleBooked {
                person_id: *person_id,
                event_ids: [a.id, b.id],
                message: format!(
                    "{name} is double-booked in \"{}\" and \"{}\"",
                    a.title, b.title
                ),
            });
        }
    }
}

fn check_staff_double_booking(events: &[Event], staff: &[StaffMember], out: &mut Vec<Conflict>) {
    let by_staff = group_events_by(events, |e| e.assigned_staff_ids.clone());

    for (staff_id, bucket) in &by_staff {
        let name = staff
            .iter()
            .find(|s| s.id == *staff_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("#{staff_id}"));
        for (a, b) in overlapping_pairs(bucket) {
            out.push(Conflict::StaffDoubleBooked {
                staff_id: *staff_id,
                event_ids: [a.id, b.id],
                message: format!(
                    "Staff member {name} is double-booked in \"{}\" and \"{}\"",
                    a.title, b.title
                ),
            });
        }
    }
}

fn check_certifications(events: &[Event], staff: &[StaffMember], out: &mut Vec<Conflict>) {
    for event in events.iter().filter(|e| !e.required_certifications.is_empty()) {
        let held: HashSet<&str> = event
            .assigned_staff_ids
            .iter()
            .filter_map(|id| staff.iter().find(|s| s.id == *id))
            .flat_map(|s| s.certifications.iter().map(String::as_str))
            .collect();

        let mut seen = HashSet::new();
        let missing: Vec<String> = event
            .required_certifications
            .iter()
            .filter(|cert| !held.contains(cert.as_str()))
            .filter(|cert| seen.insert(cert.as_str()))
            .cloned()
            .collect();

        if missing.is_empty() {
            continue;
        }

        out.push(Conflict::MissingCertification {
            event_id: event.id,
            message: format!(
                "\"{}\" is missing required certifications: {}",
                event.title,
                missing.join(", ")
            ),
            missing,
            staff_ids: event.assigned_staff_ids.clone(),
        });
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Group events under each resource id returned by `keys`, preserving
/// first-appearance order. An event is listed at most once per resource.
fn group_events_by<F>(events: &[Event], keys: F) -> IndexMap<DbId, Vec<&Event>>
where
    F: Fn(&Event) -> Vec<DbId>,
{
    let mut groups: IndexMap<DbId, Vec<&Event>> = IndexMap::new();
    for event in events {
        for key in keys(event) {
            let bucket = groups.entry(key).or_default();
            if !bucket.iter().any(|e| e.id == event.id) {
                bucket.push(event);
            }
        }
    }
    groups
}

/// Every `(i < j)` pair in `bucket` whose windows overlap.
fn overlapping_pairs<'a>(bucket: &[&'a Event]) -> Vec<(&'a Event, &'a Event)> {
    let mut pairs = Vec::new();
    for (i, a) in bucket.iter().enumerate() {
        for b in &bucket[i + 1..] {
            if a.overlaps(b) {
                pairs.push((*a, *b));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timestamp;
    use chrono::{TimeZone, Utc};

    fn at(hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 7, 1, hour, 0, 0).unwrap()
    }

    fn event(id: DbId, title: &str, start: u32, end: u32) -> Event {
        Event {
            id,
            title: title.to_string(),
            start: at(start),
            end: at(end),
            room_id: 1,
            capacity: 10,
            assigned_staff_ids: vec![],
            enrolled_person_ids: vec![],
            required_certifications: vec![],
        }
    }

    fn room(id: DbId, capacity: i32) -> Room {
        Room {
            id,
            name: format!("Room {id}"),
            capacity,
        }
    }

    fn staff(id: DbId, name: &str, certs: &[&str]) -> StaffMember {
        StaffMember {
            id,
            name: name.to_string(),
            certifications: certs.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn empty_input_yields_no_conflicts() {
        assert!(detect_conflicts(&[], &[], &[], &[]).is_empty());
    }

    // -----------------------------------------------------------------------
    // Event overcapacity
    // -----------------------------------------------------------------------

    #[test]
    fn event_at_capacity_is_fine() {
        let mut e = event(1, "Archery", 9, 10);
        e.capacity = 2;
        e.enrolled_person_ids = vec![1, 2];
        assert!(detect_conflicts(&[e], &[], &[], &[]).is_empty());
    }

    #[test]
    fn event_over_capacity_by_one() {
        let mut e = event(1, "Archery", 9, 10);
        e.capacity = 2;
        e.enrolled_person_ids = vec![1, 2, 3];
        let conflicts = detect_conflicts(&[e], &[], &[], &[]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind(), ConflictKind::EventOvercapacity);
        assert_eq!(conflicts[0].entity_id(), 1);
        assert_eq!(conflicts[0].conflicting_ids(), vec![1, 2, 3]);
        assert!(conflicts[0].message().contains("Archery"));
    }

    // -----------------------------------------------------------------------
    // Room overcapacity
    // -----------------------------------------------------------------------

    fn two_half_full_events() -> Vec<Event> {
        let mut a = event(1, "Pottery", 9, 11);
        a.enrolled_person_ids = vec![1, 2];
        let mut b = event(2, "Painting", 10, 12);
        b.enrolled_person_ids = vec![3, 4];
        vec![a, b]
    }

    #[test]
    fn overlapping_events_jointly_overflow_room() {
        let conflicts = detect_conflicts(&two_half_full_events(), &[], &[], &[room(1, 3)]);
        assert_eq!(conflicts.len(), 1);
        assert_matches::assert_matches!(
            &conflicts[0],
            Conflict::RoomOvercapacity { room_id: 1, event_ids: [1, 2], combined_enrolled: 4, .. }
        );
    }

    #[test]
    fn room_with_enough_capacity_is_fine() {
        let conflicts = detect_conflicts(&two_half_full_events(), &[], &[], &[room(1, 4)]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn non_overlapping_events_share_room_freely() {
        let mut events = two_half_full_events();
        events[1].start = at(11);
        events[1].end = at(12);
        assert!(detect_conflicts(&events, &[], &[], &[room(1, 3)]).is_empty());
    }

    #[test]
    fn unknown_room_contributes_nothing() {
        assert!(detect_conflicts(&two_half_full_events(), &[], &[], &[room(2, 1)]).is_empty());
    }

    // -----------------------------------------------------------------------
    // Double-booking
    // -----------------------------------------------------------------------

    #[test]
    fn camper_in_overlapping_events_is_double_booked() {
        let mut a = event(1, "Swim", 9, 11);
        a.enrolled_person_ids = vec![5];
        let mut b = event(2, "Hike", 10, 12);
        b.room_id = 2;
        b.enrolled_person_ids = vec![5];
        let people = vec![Person {
            id: 5,
            name: "Ada".to_string(),
        }];

        let conflicts = detect_conflicts(&[a, b], &people, &[], &[]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind(), ConflictKind::CamperDoubleBooked);
        assert_eq!(conflicts[0].entity_id(), 5);
        assert_eq!(conflicts[0].conflicting_ids(), vec![1, 2]);
        assert!(conflicts[0].message().starts_with("Ada"));
    }

    #[test]
    fn back_to_back_events_are_not_double_booked() {
        let mut a = event(1, "Swim", 9, 10);
        a.enrolled_person_ids = vec![5];
        let mut b = event(2, "Hike", 10, 11);
        b.enrolled_person_ids = vec![5];
        assert!(detect_conflicts(&[a, b], &[], &[], &[]).is_empty());
    }

    #[test]
    fn repeated_enrollment_in_one_event_is_not_a_double_booking() {
        let mut a = event(1, "Swim", 9, 10);
        a.enrolled_person_ids = vec![5, 5];
        assert!(detect_conflicts(&[a], &[], &[], &[]).is_empty());
    }

    #[test]
    fn unknown_camper_falls_back_to_id_label() {
        let mut a = event(1, "Swim", 9, 11);
        a.enrolled_person_ids = vec![42];
        let mut b = event(2, "Hike", 10, 12);
        b.enrolled_person_ids = vec![42];
        let conflicts = detect_conflicts(&[a, b], &[], &[], &[]);
        assert!(conflicts[0].message().starts_with("#42"));
    }

    #[test]
    fn shared_staff_on_overlapping_events_is_double_booked() {
        let mut a = event(1, "Swim", 9, 11);
        a.assigned_staff_ids = vec![3];
        let mut b = event(2, "Hike", 10, 12);
        b.assigned_staff_ids = vec![3];
        let conflicts = detect_conflicts(&[a, b], &[], &[staff(3, "Sam", &[])], &[]);
        assert_eq!(conflicts.len(), 1);
        assert_matches::assert_matches!(
            &conflicts[0],
            Conflict::StaffDoubleBooked { staff_id: 3, event_ids: [1, 2], .. }
        );
    }

    #[test]
    fn three_way_overlap_reports_each_pair() {
        let events: Vec<Event> = (1..=3)
            .map(|id| {
                let mut e = event(id, &format!("Session {id}"), 9, 12);
                e.assigned_staff_ids = vec![3];
                e
            })
            .collect();
        let conflicts = detect_conflicts(&events, &[], &[], &[]);
        let pairs: Vec<Vec<DbId>> = conflicts.iter().map(|c| c.conflicting_ids()).collect();
        assert_eq!(pairs, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);
    }

    // -----------------------------------------------------------------------
    // Certifications
    // -----------------------------------------------------------------------

    #[test]
    fn missing_certifications_reported_once_per_event() {
        let mut e = event(1, "Climbing", 9, 10);
        e.required_certifications = vec!["First Aid".into(), "Belay".into(), "Lifeguard".into()];
        e.assigned_staff_ids = vec![3, 99];
        let conflicts = detect_conflicts(&[e], &[], &[staff(3, "Sam", &["First Aid"])], &[]);

        assert_eq!(conflicts.len(), 1);
        assert_matches::assert_matches!(
            &conflicts[0],
            Conflict::MissingCertification { event_id: 1, missing, staff_ids, .. }
                if missing == &vec!["Belay".to_string(), "Lifeguard".to_string()]
                    && staff_ids == &vec![3, 99]
        );
        assert!(conflicts[0].message().contains("Belay, Lifeguard"));
    }

    #[test]
    fn certifications_union_across_staff() {
        let mut e = event(1, "Climbing", 9, 10);
        e.required_certifications = vec!["First Aid".into(), "Belay".into()];
        e.assigned_staff_ids = vec![3, 4];
        let roster = vec![staff(3, "Sam", &["First Aid"]), staff(4, "Kim", &["Belay"])];
        assert!(detect_conflicts(&[e], &[], &roster, &[]).is_empty());
    }

    #[test]
    fn no_staff_means_every_certification_is_missing() {
        let mut e = event(1, "Climbing", 9, 10);
        e.required_certifications = vec!["Belay".into()];
        let conflicts = detect_conflicts(&[e], &[], &[], &[]);
        assert_eq!(conflicts.len(), 1);
        assert!(conflicts[0].conflicting_ids().is_empty());
    }

    // -----------------------------------------------------------------------
    // Ordering and serialization
    // -----------------------------------------------------------------------

    #[test]
    fn passes_are_reported_in_order() {
        let mut a = event(1, "Swim", 9, 11);
        a.capacity = 1;
        a.enrolled_person_ids = vec![5, 6];
        a.assigned_staff_ids = vec![3];
        a.required_certifications = vec!["Lifeguard".into()];
        let mut b = event(2, "Hike", 10, 12);
        b.enrolled_person_ids = vec![5];
        b.assigned_staff_ids = vec![3];

        let kinds: Vec<ConflictKind> = detect_conflicts(&[a, b], &[], &[], &[room(1, 2)])
            .iter()
            .map(Conflict::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ConflictKind::EventOvercapacity,
                ConflictKind::RoomOvercapacity,
                ConflictKind::CamperDoubleBooked,
                ConflictKind::StaffDoubleBooked,
                ConflictKind::MissingCertification,
            ]
        );
    }

    #[test]
    fn serializes_with_type_tag() {
        let conflict = Conflict::StaffDoubleBooked {
            staff_id: 3,
            event_ids: [1, 2],
            message: "clash".to_string(),
        };
        let json = serde_json::to_value(&conflict).unwrap();
        assert_eq!(json["type"], ConflictKind::StaffDoubleBooked.as_str());
        assert_eq!(json["event_ids"], serde_json::json!([1, 2]));
    }

    #[test]
    fn accepts_child_double_booked_alias() {
        let json = serde_json::json!({
            "type": "child_double_booked",
            "person_id": 5,
            "event_ids": [1, 2],
            "message": "clash",
        });
        let conflict: Conflict = serde_json::from_value(json).unwrap();
        assert_eq!(conflict.kind(), ConflictKind::CamperDoubleBooked);
    }
}
