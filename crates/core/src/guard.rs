//! Prospective enrollment guard.
//!
//! [`can_enroll`] is advisory: it only recommends. Every write path that adds
//! a camper to an event must consult it before persisting.

use serde::{Deserialize, Serialize};

use crate::schedule::Event;
use crate::types::DbId;

/// Rejection reason when the target event has no free places.
pub const REASON_FULL_CAPACITY: &str = "Event is at full capacity";

/// Outcome of [`can_enroll`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentDecision {
    pub can_enroll: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EnrollmentDecision {
    pub fn allowed() -> Self {
        Self {
            can_enroll: true,
            reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            can_enroll: false,
            reason: Some(reason.into()),
        }
    }
}

/// Decide whether `person_id` may be enrolled in `event`.
///
/// Checks run in order and the first failure wins:
/// 1. capacity (`enrolled >= capacity` rejects, whatever the camper's other bookings)
/// 2. any *other* event in `all_events` the camper is enrolled in that overlaps `event`
pub fn can_enroll(event: &Event, person_id: DbId, all_events: &[Event]) -> EnrollmentDecision {
    if event.is_full() {
        return EnrollmentDecision::rejected(REASON_FULL_CAPACITY);
    }

    let clash = all_events
        .iter()
        .filter(|other| other.id != event.id)
        .filter(|other| other.is_enrolled(person_id))
        .find(|other| other.overlaps(event));

    match clash {
        Some(other) => EnrollmentDecision::rejected(format!(
            "Already enrolled in \"{}\" at an overlapping time",
            other.title
        )),
        None => EnrollmentDecision::allowed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timestamp;
    use chrono::{TimeZone, Utc};

    fn at(hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 7, 2, hour, 0, 0).unwrap()
    }

    fn event(id: DbId, title: &str, start: u32, end: u32, capacity: i32) -> Event {
        Event {
            id,
            title: title.to_string(),
            start: at(start),
            end: at(end),
            room_id: id,
            capacity,
            assigned_staff_ids: vec![],
            enrolled_person_ids: vec![],
            required_certifications: vec![],
        }
    }

    #[test]
    fn open_event_without_clash_is_allowed() {
        let target = event(1, "Canoe", 9, 10, 5);
        let decision = can_enroll(&target, 7, &[target.clone()]);
        assert_eq!(decision, EnrollmentDecision::allowed());
    }

    #[test]
    fn full_event_is_rejected_regardless_of_other_bookings() {
        let mut target = event(1, "Canoe", 9, 10, 2);
        target.enrolled_person_ids = vec![1, 2];
        let decision = can_enroll(&target, 7, &[target.clone()]);
        assert!(!decision.can_enroll);
        assert_eq!(decision.reason.as_deref(), Some(REASON_FULL_CAPACITY));
    }

    #[test]
    fn capacity_checked_before_overlap() {
        let mut target = event(1, "Canoe", 9, 10, 1);
        target.enrolled_person_ids = vec![1];
        let mut other = event(2, "Crafts", 9, 10, 5);
        other.enrolled_person_ids = vec![7];
        let decision = can_enroll(&target, 7, &[target.clone(), other]);
        assert_eq!(decision.reason.as_deref(), Some(REASON_FULL_CAPACITY));
    }

    #[test]
    fn overlapping_booking_names_other_event() {
        let target = event(1, "Canoe", 9, 11, 5);
        let mut other = event(2, "Crafts", 10, 12, 5);
        other.enrolled_person_ids = vec![7];
        let decision = can_enroll(&target, 7, &[target.clone(), other]);
        assert!(!decision.can_enroll);
        assert!(decision.reason.unwrap().contains("Crafts"));
    }

    #[test]
    fn touching_booking_is_allowed() {
        let target = event(1, "Canoe", 9, 10, 5);
        let mut other = event(2, "Crafts", 10, 11, 5);
        other.enrolled_person_ids = vec![7];
        assert!(can_enroll(&target, 7, &[target.clone(), other]).can_enroll);
    }

    #[test]
    fn target_event_itself_is_not_a_clash() {
        let mut target = event(1, "Canoe", 9, 10, 5);
        target.enrolled_person_ids = vec![7];
        assert!(can_enroll(&target, 7, &[target.clone()]).can_enroll);
    }

    #[test]
    fn other_campers_bookings_are_irrelevant() {
        let target = event(1, "Canoe", 9, 11, 5);
        let mut other = event(2, "Crafts", 10, 12, 5);
        other.enrolled_person_ids = vec![8];
        assert!(can_enroll(&target, 7, &[target.clone(), other]).can_enroll);
    }

    #[test]
    fn allowed_decision_omits_reason_when_serialized() {
        let json = serde_json::to_value(EnrollmentDecision::allowed()).unwrap();
        assert_eq!(json, serde_json::json!({ "can_enroll": true }));
    }
}
