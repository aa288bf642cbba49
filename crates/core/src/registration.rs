//! Nested batch registration form.
//!
//! A batch registration edits every semester of a batch at once: each
//! semester gets a start/end date and an ordered list of subject slots,
//! each slot independently picking a subject from the shared catalog (or
//! nothing yet). The form is an arena of [`SemesterEntry`] keyed by
//! semester id plus an explicit display order. All edits go through the
//! pure [`reduce`] function.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{format_ymd, parse_date};
use crate::error::CoreError;
use crate::models::Semester;
use crate::types::DbId;
use crate::validation::FieldErrors;

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Stable identity of a subject slot, unique within one form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey(u32);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectSlot {
    pub key: SlotKey,
    /// `None` until the user picks a subject.
    pub subject_id: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemesterEntry {
    pub id: DbId,
    pub title: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub slots: Vec<SubjectSlot>,
}

impl SemesterEntry {
    fn slot_index(&self, key: SlotKey) -> Result<usize, CoreError> {
        self.slots.iter().position(|s| s.key == key).ok_or_else(|| {
            CoreError::Validation(format!(
                "Semester {} has no subject slot {}",
                self.id, key.0
            ))
        })
    }

    /// Selected subject ids in slot order.
    pub fn selected_subjects(&self) -> Vec<DbId> {
        self.slots.iter().filter_map(|s| s.subject_id).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    entries: HashMap<DbId, SemesterEntry>,
    order: Vec<DbId>,
    next_slot: u32,
}

/// One user edit on the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistrationAction {
    SetStartDate {
        semester_id: DbId,
        date: Option<NaiveDate>,
    },
    SetEndDate {
        semester_id: DbId,
        date: Option<NaiveDate>,
    },
    /// Append an empty slot at the end of the semester's list.
    AddSubjectSlot { semester_id: DbId },
    SelectSubject {
        semester_id: DbId,
        slot: SlotKey,
        subject_id: DbId,
    },
    ClearSubject { semester_id: DbId, slot: SlotKey },
    RemoveSubjectSlot { semester_id: DbId, slot: SlotKey },
    /// Move a slot to position `to` (0-based) within its semester.
    MoveSubjectSlot {
        semester_id: DbId,
        slot: SlotKey,
        to: usize,
    },
}

impl RegistrationForm {
    /// Build the form from a batch's semesters.
    ///
    /// Unparseable dates are left unset. Subjects already attached to a
    /// semester become pre-selected slots.
    pub fn seed(semesters: &[Semester]) -> Self {
        let mut form = Self::default();
        for semester in semesters {
            if form.entries.contains_key(&semester.id) {
                continue;
            }
            let slots = semester
                .subjects
                .iter()
                .map(|subject| SubjectSlot {
                    key: form.alloc_slot(),
                    subject_id: Some(subject.id),
                })
                .collect();
            form.order.push(semester.id);
            form.entries.insert(
                semester.id,
                SemesterEntry {
                    id: semester.id,
                    title: semester.title.clone(),
                    start_date: semester.start_date.as_deref().and_then(parse_date),
                    end_date: semester.end_date.as_deref().and_then(parse_date),
                    slots,
                },
            );
        }
        form
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn entry(&self, semester_id: DbId) -> Option<&SemesterEntry> {
        self.entries.get(&semester_id)
    }

    /// Entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = &SemesterEntry> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Check date ordering for every semester.
    ///
    /// Errors are keyed `semesters.{index}.end_date` by display position.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();
        for (index, entry) in self.entries().enumerate() {
            if let (Some(start), Some(end)) = (entry.start_date, entry.end_date) {
                if end < start {
                    errors.insert(
                        format!("semesters.{index}.end_date"),
                        "End date cannot be before start date",
                    );
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidForm(errors))
        }
    }

    /// Flatten into the body of `POST /batch/{id}/details`.
    pub fn to_payload(&self) -> RegistrationPayload {
        RegistrationPayload {
            semesters: self
                .entries()
                .map(|entry| SemesterPayload {
                    id: entry.id,
                    start_date: entry.start_date.map(format_ymd),
                    end_date: entry.end_date.map(format_ymd),
                    subject_ids: entry.selected_subjects(),
                })
                .collect(),
        }
    }

    fn alloc_slot(&mut self) -> SlotKey {
        let key = SlotKey(self.next_slot);
        self.next_slot += 1;
        key
    }

    fn entry_mut(&mut self, semester_id: DbId) -> Result<&mut SemesterEntry, CoreError> {
        self.entries
            .get_mut(&semester_id)
            .ok_or(CoreError::NotFound {
                entity: "semester",
                id: semester_id,
            })
    }
}

// ---------------------------------------------------------------------------
// Reducer
// ---------------------------------------------------------------------------

/// Apply `action` to `form`, returning the updated form.
///
/// The input is never modified. Unknown semesters or slots and an
/// out-of-range move target are errors.
pub fn reduce(
    form: &RegistrationForm,
    action: RegistrationAction,
) -> Result<RegistrationForm, CoreError> {
    let mut next = form.clone();
    match action {
        RegistrationAction::SetStartDate { semester_id, date } => {
            next.entry_mut(semester_id)?.start_date = date;
        }
        RegistrationAction::SetEndDate { semester_id, date } => {
            next.entry_mut(semester_id)?.end_date = date;
        }
        RegistrationAction::AddSubjectSlot { semester_id } => {
            // Check the semester before allocating so a failed add leaves
            // the key counter alone.
            next.entry_mut(semester_id)?;
            let key = next.alloc_slot();
            next.entry_mut(semester_id)?.slots.push(SubjectSlot {
                key,
                subject_id: None,
            });
        }
        RegistrationAction::SelectSubject {
            semester_id,
            slot,
            subject_id,
        } => {
            let entry = next.entry_mut(semester_id)?;
            let index = entry.slot_index(slot)?;
            entry.slots[index].subject_id = Some(subject_id);
        }
        RegistrationAction::ClearSubject { semester_id, slot } => {
            let entry = next.entry_mut(semester_id)?;
            let index = entry.slot_index(slot)?;
            entry.slots[index].subject_id = None;
        }
        RegistrationAction::RemoveSubjectSlot { semester_id, slot } => {
            let entry = next.entry_mut(semester_id)?;
            let index = entry.slot_index(slot)?;
            entry.slots.remove(index);
        }
        RegistrationAction::MoveSubjectSlot {
            semester_id,
            slot,
            to,
        } => {
            let entry = next.entry_mut(semester_id)?;
            let from = entry.slot_index(slot)?;
            if to >= entry.slots.len() {
                return Err(CoreError::Validation(format!(
                    "Cannot move subject slot to position {to}; semester {semester_id} has {} slots",
                    entry.slots.len()
                )));
            }
            let moved = entry.slots.remove(from);
            entry.slots.insert(to, moved);
        }
    }
    Ok(next)
}

// ---------------------------------------------------------------------------
// Wire payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationPayload {
    pub semesters: Vec<SemesterPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterPayload {
    pub id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub subject_ids: Vec<DbId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Subject;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn semester(id: DbId, start: Option<&str>, end: Option<&str>, subjects: &[DbId]) -> Semester {
        Semester {
            id,
            title: format!("Semester {id}"),
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
            batch_id: Some(7),
            subjects: subjects
                .iter()
                .map(|&sid| Subject {
                    id: sid,
                    code: None,
                    title: format!("Subject {sid}"),
                    total_internal_marks: None,
                    internal_passing_marks: None,
                    total_external_marks: None,
                    external_passing_marks: None,
                })
                .collect(),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add_slot(form: &RegistrationForm, semester_id: DbId) -> (RegistrationForm, SlotKey) {
        let form = reduce(form, RegistrationAction::AddSubjectSlot { semester_id }).unwrap();
        let key = form.entry(semester_id).unwrap().slots.last().unwrap().key;
        (form, key)
    }

    fn select(form: &RegistrationForm, semester_id: DbId, slot: SlotKey, subject_id: DbId) -> RegistrationForm {
        reduce(
            form,
            RegistrationAction::SelectSubject {
                semester_id,
                slot,
                subject_id,
            },
        )
        .unwrap()
    }

    fn slot_subjects(form: &RegistrationForm, semester_id: DbId) -> Vec<Option<DbId>> {
        form.entry(semester_id)
            .unwrap()
            .slots
            .iter()
            .map(|s| s.subject_id)
            .collect()
    }

    // -- seeding -------------------------------------------------------------

    #[test]
    fn seed_preserves_order_dates_and_existing_subjects() {
        let form = RegistrationForm::seed(&[
            semester(2, Some("2024-07-01T00:00:00Z"), None, &[]),
            semester(1, Some("2024-01-01"), Some("2024-06-01"), &[10, 11]),
        ]);
        let ids: Vec<_> = form.entries().map(|e| e.id).collect();
        assert_eq!(ids, [2, 1]);
        let first = form.entry(2).unwrap();
        assert_eq!(first.start_date, Some(ymd(2024, 7, 1)));
        assert_eq!(first.end_date, None);
        assert_eq!(slot_subjects(&form, 1), [Some(10), Some(11)]);
    }

    #[test]
    fn seed_ignores_duplicate_semesters_and_bad_dates() {
        let form = RegistrationForm::seed(&[
            semester(1, Some("soon"), None, &[]),
            semester(1, Some("2024-01-01"), None, &[]),
        ]);
        assert_eq!(form.len(), 1);
        assert_eq!(form.entry(1).unwrap().start_date, None);
    }

    // -- payload -------------------------------------------------------------

    #[test]
    fn payload_formats_dates_and_drops_unselected_slots() {
        let form = RegistrationForm::seed(&[semester(1, None, None, &[])]);
        let form = reduce(
            &form,
            RegistrationAction::SetStartDate {
                semester_id: 1,
                date: Some(ymd(2024, 1, 1)),
            },
        )
        .unwrap();
        let form = reduce(
            &form,
            RegistrationAction::SetEndDate {
                semester_id: 1,
                date: Some(ymd(2024, 6, 1)),
            },
        )
        .unwrap();
        let (form, a) = add_slot(&form, 1);
        let (form, b) = add_slot(&form, 1);
        let (form, _unselected) = add_slot(&form, 1);
        let form = select(&form, 1, a, 10);
        let form = select(&form, 1, b, 11);

        let payload = serde_json::to_value(form.to_payload()).unwrap();
        assert_eq!(
            payload,
            json!({"semesters": [{
                "id": 1,
                "start_date": "2024-01-01",
                "end_date": "2024-06-01",
                "subject_ids": [10, 11]
            }]})
        );
    }

    #[test]
    fn payload_omits_unset_dates() {
        let form = RegistrationForm::seed(&[semester(4, None, None, &[3])]);
        let payload = serde_json::to_value(form.to_payload()).unwrap();
        assert_eq!(payload, json!({"semesters": [{"id": 4, "subject_ids": [3]}]}));
    }

    // -- reducer -------------------------------------------------------------

    #[test]
    fn reduce_does_not_touch_input() {
        let form = RegistrationForm::seed(&[semester(1, None, None, &[])]);
        let before = form.clone();
        let (_next, _) = add_slot(&form, 1);
        assert_eq!(form, before);
    }

    #[test]
    fn unknown_semester_is_rejected() {
        let form = RegistrationForm::seed(&[semester(1, None, None, &[])]);
        let err = reduce(&form, RegistrationAction::AddSubjectSlot { semester_id: 99 }).unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "semester", id: 99 });
    }

    #[test]
    fn unknown_slot_is_rejected() {
        let form = RegistrationForm::seed(&[semester(1, None, None, &[]), semester(2, None, None, &[])]);
        let (form, key) = add_slot(&form, 1);
        let err = reduce(
            &form,
            RegistrationAction::SelectSubject {
                semester_id: 2,
                slot: key,
                subject_id: 5,
            },
        )
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn slot_keys_stay_unique_after_removal() {
        let form = RegistrationForm::seed(&[semester(1, None, None, &[])]);
        let (form, a) = add_slot(&form, 1);
        let form = reduce(&form, RegistrationAction::RemoveSubjectSlot { semester_id: 1, slot: a }).unwrap();
        let (form, b) = add_slot(&form, 1);
        assert_ne!(a, b);
        assert_eq!(form.entry(1).unwrap().slots.len(), 1);
    }

    #[test]
    fn clear_and_move_keep_order_explicit() {
        let form = RegistrationForm::seed(&[semester(1, None, None, &[10, 11, 12])]);
        let keys: Vec<_> = form.entry(1).unwrap().slots.iter().map(|s| s.key).collect();

        let form = reduce(
            &form,
            RegistrationAction::MoveSubjectSlot {
                semester_id: 1,
                slot: keys[2],
                to: 0,
            },
        )
        .unwrap();
        assert_eq!(slot_subjects(&form, 1), [Some(12), Some(10), Some(11)]);

        let form = reduce(&form, RegistrationAction::ClearSubject { semester_id: 1, slot: keys[0] }).unwrap();
        assert_eq!(slot_subjects(&form, 1), [Some(12), None, Some(11)]);
        assert_eq!(form.to_payload().semesters[0].subject_ids, [12, 11]);
    }

    #[test]
    fn move_out_of_range_is_rejected() {
        let form = RegistrationForm::seed(&[semester(1, None, None, &[10])]);
        let key = form.entry(1).unwrap().slots[0].key;
        let err = reduce(
            &form,
            RegistrationAction::MoveSubjectSlot {
                semester_id: 1,
                slot: key,
                to: 1,
            },
        )
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    // -- validation ----------------------------------------------------------

    #[test]
    fn end_before_start_is_invalid() {
        let form = RegistrationForm::seed(&[
            semester(1, Some("2024-01-01"), Some("2024-06-01"), &[]),
            semester(2, Some("2024-07-01"), Some("2024-06-30"), &[]),
        ]);
        let err = form.validate().unwrap_err();
        assert_matches!(err, CoreError::InvalidForm(fields) => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields.get("semesters.1.end_date"), Some("End date cannot be before start date"));
        });
    }

    #[test]
    fn missing_dates_pass_validation() {
        let form = RegistrationForm::seed(&[semester(1, None, Some("2024-06-01"), &[])]);
        assert!(form.validate().is_ok());
    }
}
