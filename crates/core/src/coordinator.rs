//! Enrollment orchestration shared by every write path that adds or removes a
//! camper from an event.
//!
//! The coordinator owns a [`ScheduleSnapshot`], consults the guard before
//! writing, persists through an [`EnrollmentStore`], mirrors the write into
//! its in-memory snapshot and then recomputes the full audit.
//!
//! Bulk enrollment validates every pending candidate concurrently against the
//! snapshot as it was when the batch started. Sibling approvals in the same
//! batch are not visible to each other, so a batch validated near a capacity
//! boundary can admit more campers than capacity allows. The audit reports
//! the resulting `event_overcapacity` afterwards.

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::conflicts::{detect_conflicts, Conflict};
use crate::error::CoreError;
use crate::guard::{can_enroll, EnrollmentDecision};
use crate::schedule::{Person, ScheduleSnapshot};
use crate::store::EnrollmentStore;
use crate::types::DbId;

/// Result of a bulk or group enrollment.
///
/// Partial success is the normal outcome: individual candidates fail, the
/// batch never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkEnrollmentSummary {
    /// Candidates now enrolled, including those that already were.
    pub enrolled: usize,
    /// One `"<name>: <reason>"` entry per failed candidate.
    pub errors: Vec<String>,
    /// Number of candidates considered.
    pub total: usize,
    pub message: String,
}

/// Enrollment write paths over a schedule snapshot.
pub struct EnrollmentCoordinator<S> {
    store: S,
    snapshot: ScheduleSnapshot,
    conflicts: Vec<Conflict>,
}

impl<S: EnrollmentStore> EnrollmentCoordinator<S> {
    /// Build a coordinator and run the initial audit.
    pub fn new(store: S, snapshot: ScheduleSnapshot) -> Self {
        let mut coordinator = Self {
            store,
            snapshot,
            conflicts: Vec::new(),
        };
        coordinator.recompute();
        coordinator
    }

    pub fn snapshot(&self) -> &ScheduleSnapshot {
        &self.snapshot
    }

    /// Conflicts from the most recent audit.
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run the guard for `person_id` against `event_id` without writing anything.
    pub fn check(&self, event_id: DbId, person_id: DbId) -> Result<EnrollmentDecision, CoreError> {
        let event = self.snapshot.event(event_id).ok_or(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        })?;
        Ok(can_enroll(event, person_id, &self.snapshot.events))
    }

    /// Enroll one camper.
    ///
    /// Enrolling a camper who is already enrolled is a no-op. A guard
    /// rejection becomes [`CoreError::Conflict`] carrying the reason, and
    /// nothing is written.
    pub async fn enroll(&mut self, event_id: DbId, person_id: DbId) -> Result<(), CoreError> {
        let event = self.snapshot.event(event_id).ok_or(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        })?;
        if self.snapshot.person(person_id).is_none() {
            return Err(CoreError::NotFound {
                entity: "Person",
                id: person_id,
            });
        }
        if event.is_enrolled(person_id) {
            tracing::debug!(event_id, person_id, "Camper already enrolled, nothing to do");
            return Ok(());
        }

        let decision = can_enroll(event, person_id, &self.snapshot.events);
        if !decision.can_enroll {
            let reason = decision
                .reason
                .unwrap_or_else(|| "Enrollment rejected".to_string());
            tracing::info!(event_id, person_id, %reason, "Enrollment rejected by guard");
            return Err(CoreError::Conflict(reason));
        }

        self.store.persist_enrollment(event_id, person_id).await?;

        if let Some(event) = self.snapshot.event_mut(event_id) {
            event.enrolled_person_ids.push(person_id);
        }
        tracing::info!(event_id, person_id, "Camper enrolled");

        self.recompute();
        Ok(())
    }

    /// Remove one camper from an event. Removing a camper who is not enrolled
    /// is a no-op.
    pub async fn unenroll(&mut self, event_id: DbId, person_id: DbId) -> Result<(), CoreError> {
        let event = self.snapshot.event(event_id).ok_or(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        })?;
        if !event.is_enrolled(person_id) {
            tracing::debug!(event_id, person_id, "Camper not enrolled, nothing to remove");
            return Ok(());
        }

        self.store.remove_enrollment(event_id, person_id).await?;

        if let Some(event) = self.snapshot.event_mut(event_id) {
            event.enrolled_person_ids.retain(|id| *id != person_id);
        }
        tracing::info!(event_id, person_id, "Camper unenrolled");

        self.recompute();
        Ok(())
    }

    /// Enroll a list of candidates into one event.
    ///
    /// Already-enrolled candidates count as successes and are neither
    /// re-validated nor re-persisted. The rest are validated and persisted
    /// concurrently against the pre-batch snapshot; failures (guard rejection
    /// or a store error) are reported in `errors` and never abort the batch.
    pub async fn bulk_enroll(
        &mut self,
        event_id: DbId,
        candidates: &[Person],
    ) -> Result<BulkEnrollmentSummary, CoreError> {
        let event = self
            .snapshot
            .event(event_id)
            .ok_or(CoreError::NotFound {
                entity: "Event",
                id: event_id,
            })?
            .clone();

        let total = candidates.len();
        let pending: Vec<&Person> = candidates
            .iter()
            .filter(|p| !event.is_enrolled(p.id))
            .collect();

        let all_events = &self.snapshot.events;
        let store = &self.store;
        let outcomes = join_all(pending.into_iter().map(|person| {
            let event = &event;
            async move {
                let decision = can_enroll(event, person.id, all_events);
                if !decision.can_enroll {
                    let reason = decision.reason.unwrap_or_default();
                    return Err(format!("{}: {reason}", person.name));
                }
                store
                    .persist_enrollment(event.id, person.id)
                    .await
                    .map_err(|e| format!("{}: {e}", person.name))?;
                Ok(person.id)
            }
        }))
        .await;

        let mut approved = Vec::new();
        let mut errors = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(person_id) => approved.push(person_id),
                Err(error) => {
                    tracing::warn!(event_id, %error, "Bulk enrollment candidate failed");
                    errors.push(error);
                }
            }
        }

        if let Some(target) = self.snapshot.event_mut(event_id) {
            for person_id in approved {
                if !target.is_enrolled(person_id) {
                    target.enrolled_person_ids.push(person_id);
                }
            }
        }
        self.recompute();

        let enrolled = total - errors.len();
        tracing::info!(
            event_id,
            enrolled,
            failed = errors.len(),
            total,
            "Bulk enrollment finished"
        );

        Ok(BulkEnrollmentSummary {
            enrolled,
            message: summary_message(enrolled, total),
            errors,
            total,
        })
    }

    /// Enroll every resolvable member of a group. See [`Self::bulk_enroll`].
    pub async fn enroll_group(
        &mut self,
        event_id: DbId,
        group_id: DbId,
    ) -> Result<BulkEnrollmentSummary, CoreError> {
        let group = self.snapshot.group(group_id).ok_or(CoreError::NotFound {
            entity: "Group",
            id: group_id,
        })?;
        let candidates = group.resolve_members(&self.snapshot.people);
        self.bulk_enroll(event_id, &candidates).await
    }

    fn recompute(&mut self) {
        let s = &self.snapshot;
        self.conflicts = detect_conflicts(&s.events, &s.people, &s.staff, &s.rooms);
        tracing::debug!(count = self.conflicts.len(), "Schedule audit recomputed");
    }
}

/// Full-success or partial-success sentence for a bulk enrollment.
fn summary_message(enrolled: usize, total: usize) -> String {
    let failed = total - enrolled;
    match (total, failed) {
        (0, _) => "No campers to enroll".to_string(),
        (_, 0) => format!("Enrolled all {total} campers"),
        _ => format!(
            "Enrolled {enrolled} of {total} campers, {failed} could not be enrolled due to conflicts"
        ),
    }
}
