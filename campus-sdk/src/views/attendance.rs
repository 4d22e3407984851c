//! Attendance view: single-entry marking, per-student history, and the
//! bulk batch form.

use chrono::{Local, NaiveDate};

use campus_common::capabilities::Capability;
use campus_common::records::{
    AttendanceEntry, AttendanceRecord, AttendanceStatus, AttendanceUpdate, BulkAttendance,
    BulkAttendanceOutcome, BulkAttendanceRecord, ServerMessage, Student,
};

use super::{check_entry, AccessDenied};
use crate::errors::{RequestError, Result};
use crate::gateway::{surface_message, ApiGateway};
use crate::router::View;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The single-entry form. Defaults to (today, Present, empty subject);
/// editing an existing record pre-fills it and suppresses the student
/// selector, since the record already knows its student.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceForm {
    /// Class date.
    pub date: NaiveDate,
    /// Status to record.
    pub status: AttendanceStatus,
    /// Subject.
    pub subject: String,
    editing: Option<i64>,
}

impl Default for AttendanceForm {
    fn default() -> Self {
        AttendanceForm {
            date: today(),
            status: AttendanceStatus::Present,
            subject: String::new(),
            editing: None,
        }
    }
}

impl AttendanceForm {
    /// The record id being edited, if any.
    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    /// True while editing an existing record.
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

/// The bulk batch: one date and subject, plus a set of per-student
/// statuses assembled before a single submit. Entries keep insertion
/// order so the submitted request lists students as they were ticked.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkAttendanceForm {
    /// Class date shared by the batch.
    pub date: NaiveDate,
    /// Subject shared by the batch.
    pub subject: String,
    records: Vec<BulkAttendanceRecord>,
}

impl Default for BulkAttendanceForm {
    fn default() -> Self {
        BulkAttendanceForm {
            date: today(),
            subject: String::new(),
            records: Vec::new(),
        }
    }
}

impl BulkAttendanceForm {
    /// Tick or untick a student. Ticking adds an entry with the default
    /// `Present` status; unticking removes the entry entirely, leaving the
    /// batch exactly as it was before the student was added.
    pub fn toggle(&mut self, student_id: i64) {
        if let Some(pos) = self.records.iter().position(|r| r.student_id == student_id) {
            self.records.remove(pos);
        } else {
            self.records.push(BulkAttendanceRecord {
                student_id,
                status: AttendanceStatus::Present,
            });
        }
    }

    /// Change the status of a student already in the batch. A student not
    /// in the batch is left alone; this never inserts.
    pub fn set_status(&mut self, student_id: i64, status: AttendanceStatus) {
        if let Some(record) = self
            .records
            .iter_mut()
            .find(|r| r.student_id == student_id)
        {
            record.status = status;
        }
    }

    /// Whether the student is currently in the batch.
    pub fn contains(&self, student_id: i64) -> bool {
        self.records.iter().any(|r| r.student_id == student_id)
    }

    /// The status staged for a student, if they are in the batch.
    pub fn status_of(&self, student_id: i64) -> Option<AttendanceStatus> {
        self.records
            .iter()
            .find(|r| r.student_id == student_id)
            .map(|r| r.status)
    }

    /// Staged entries, in tick order.
    pub fn records(&self) -> &[BulkAttendanceRecord] {
        &self.records
    }

    /// Number of staged entries.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The Attendance screen.
#[derive(Debug)]
pub struct AttendanceView {
    gateway: ApiGateway,
    students: Vec<Student>,
    selected_student: Option<i64>,
    history: Vec<AttendanceRecord>,
    form: AttendanceForm,
    bulk: Option<BulkAttendanceForm>,
    error: Option<String>,
}

impl AttendanceView {
    /// Open the view, re-checking the `view_data` capability.
    pub fn open(gateway: &ApiGateway) -> Result<Self, AccessDenied> {
        check_entry(gateway.session(), View::Attendance)?;
        Ok(AttendanceView {
            gateway: gateway.clone(),
            students: Vec::new(),
            selected_student: None,
            history: Vec::new(),
            form: AttendanceForm::default(),
            bulk: None,
            error: None,
        })
    }

    /// Fetch the student list the selectors draw from. A failed read logs
    /// and leaves the list empty.
    pub async fn refresh(&mut self) {
        match self.gateway.get_json("/students").await {
            Ok(students) => self.students = students,
            Err(err) => tracing::debug!(%err, "error loading students"),
        }
    }

    /// Students available for selection.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// The per-student history last fetched (empty until a student is
    /// selected; the history fetch is deferred until then).
    pub fn history(&self) -> &[AttendanceRecord] {
        &self.history
    }

    /// The currently selected student, if any.
    pub fn selected_student(&self) -> Option<i64> {
        self.selected_student
    }

    /// The single-entry form state.
    pub fn form(&self) -> &AttendanceForm {
        &self.form
    }

    /// Mutable access to the single-entry form fields.
    pub fn form_mut(&mut self) -> &mut AttendanceForm {
        &mut self.form
    }

    /// The bulk form, when it is open.
    pub fn bulk(&self) -> Option<&BulkAttendanceForm> {
        self.bulk.as_ref()
    }

    /// Mutable bulk form access while it is open.
    pub fn bulk_mut(&mut self) -> Option<&mut BulkAttendanceForm> {
        self.bulk.as_mut()
    }

    /// The form-level error message to display, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether to offer marking/editing controls at all.
    pub fn can_manage(&self) -> bool {
        self.gateway
            .session()
            .has_permission(&Capability::manage_attendance())
    }

    /// The student selector is hidden while editing a record: the record
    /// already identifies its student.
    pub fn student_selector_enabled(&self) -> bool {
        !self.form.is_editing()
    }

    /// Select a student (or clear the selection) and load their history.
    pub async fn select_student(&mut self, student_id: Option<i64>) {
        self.selected_student = student_id;
        match student_id {
            Some(id) => self.reload_history(id).await,
            None => self.history.clear(),
        }
    }

    async fn reload_history(&mut self, student_id: i64) {
        match self
            .gateway
            .get_json(&format!("/attendance/student/{student_id}"))
            .await
        {
            Ok(history) => self.history = history,
            Err(err) => tracing::debug!(%err, "error loading attendance history"),
        }
    }

    /// Pre-fill the single-entry form from an existing record and switch
    /// it to edit mode. Clears the student selection (the selector is
    /// suppressed until the edit finishes or is cancelled).
    pub fn begin_edit(&mut self, record: &AttendanceRecord) {
        self.form = AttendanceForm {
            date: record.date,
            status: record.status,
            subject: record.subject.clone(),
            editing: Some(record.id),
        };
        self.selected_student = None;
        self.history.clear();
        self.bulk = None;
        self.error = None;
    }

    /// Abandon an edit: restore the form to its defaults (today's date,
    /// `Present`, empty subject) without issuing any request.
    pub fn cancel_edit(&mut self) {
        self.form = AttendanceForm::default();
        self.error = None;
    }

    /// Submit the single-entry form. In edit mode this updates the record;
    /// otherwise it marks attendance for the selected student. On success
    /// the form resets to defaults and the history reloads (in program
    /// order, after the mark completes).
    pub async fn mark(&mut self) -> Result<()> {
        self.error = None;

        if let Some(id) = self.form.editing {
            let body = AttendanceUpdate {
                date: self.form.date,
                status: self.form.status,
                subject: self.form.subject.clone(),
            };
            match self
                .gateway
                .put_json::<_, ServerMessage>(&format!("/attendance/{id}"), &body)
                .await
            {
                Ok(_) => {
                    self.form = AttendanceForm::default();
                    if let Some(student) = self.selected_student {
                        self.reload_history(student).await;
                    }
                    Ok(())
                }
                Err(err) => {
                    self.error = Some(surface_message(&err, "Error updating attendance"));
                    Err(err)
                }
            }
        } else {
            let Some(student_id) = self.selected_student else {
                let message = "Please select a student".to_string();
                self.error = Some(message.clone());
                return Err(RequestError::Validation { message }.into());
            };
            let body = AttendanceEntry {
                student_id,
                date: self.form.date,
                status: self.form.status,
                subject: self.form.subject.clone(),
            };
            match self
                .gateway
                .post_json::<_, ServerMessage>("/attendance", &body)
                .await
            {
                Ok(_) => {
                    self.form = AttendanceForm::default();
                    self.reload_history(student_id).await;
                    Ok(())
                }
                Err(err) => {
                    self.error = Some(surface_message(&err, "Error marking attendance"));
                    Err(err)
                }
            }
        }
    }

    /// Delete a record. Requires the user's explicit confirmation; without
    /// it no request is issued and `false` is returned.
    pub async fn delete(&mut self, id: i64, confirmed: bool) -> Result<bool> {
        if !confirmed {
            return Ok(false);
        }
        match self.gateway.delete(&format!("/attendance/{id}")).await {
            Ok(_) => {
                if let Some(student) = self.selected_student {
                    self.reload_history(student).await;
                }
                Ok(true)
            }
            Err(err) => {
                self.error = Some(surface_message(&err, "Error deleting attendance record"));
                Err(err)
            }
        }
    }

    /// Switch to the bulk form (fresh batch). Cancels any edit in progress
    /// and clears the student selection, as the two entry modes are
    /// mutually exclusive.
    pub fn open_bulk(&mut self) {
        self.bulk = Some(BulkAttendanceForm::default());
        self.form = AttendanceForm::default();
        self.selected_student = None;
        self.history.clear();
        self.error = None;
    }

    /// Close the bulk form, discarding the staged batch. No request.
    pub fn cancel_bulk(&mut self) {
        self.bulk = None;
        self.error = None;
    }

    /// Submit the staged batch as one request.
    ///
    /// The batch is taken out of the form *before* the request is issued,
    /// so a duplicate rapid submit finds an empty batch and is refused
    /// client-side instead of double-posting; on failure the batch is put
    /// back so the user can retry. On success the bulk form closes and its
    /// state resets.
    pub async fn submit_bulk(&mut self) -> Result<BulkAttendanceOutcome> {
        self.error = None;
        let Some(bulk) = self.bulk.as_mut() else {
            let message = "The bulk form is not open".to_string();
            return Err(RequestError::Validation { message }.into());
        };

        if bulk.is_empty() {
            let message = "Please mark attendance for at least one student".to_string();
            self.error = Some(message.clone());
            return Err(RequestError::Validation { message }.into());
        }

        let records = std::mem::take(&mut bulk.records);
        let body = BulkAttendance {
            date: bulk.date,
            subject: bulk.subject.clone(),
            records,
        };

        match self
            .gateway
            .post_json::<_, BulkAttendanceOutcome>("/attendance/bulk", &body)
            .await
        {
            Ok(outcome) => {
                self.bulk = None;
                Ok(outcome)
            }
            Err(err) => {
                if let Some(bulk) = self.bulk.as_mut() {
                    bulk.records = body.records;
                }
                self.error = Some(surface_message(&err, "Error marking bulk attendance"));
                Err(err)
            }
        }
    }
}
