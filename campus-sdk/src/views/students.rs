//! Student roster view.

use campus_common::capabilities::Capability;
use campus_common::records::{ServerMessage, Student, StudentDraft};

use super::{check_entry, AccessDenied};
use crate::errors::Result;
use crate::gateway::{surface_message, ApiGateway};
use crate::router::View;

/// Create/edit buffer for the student form.
#[derive(Debug, Clone, Default)]
pub struct StudentForm {
    /// Row id of the student being edited; `None` means creating.
    pub editing: Option<i64>,
    /// The fields as currently entered.
    pub draft: StudentDraft,
    /// Whether the form is shown at all.
    pub open: bool,
}

/// The Students screen: list the roster, add/edit/delete students.
#[derive(Debug)]
pub struct StudentsView {
    gateway: ApiGateway,
    roster: Vec<Student>,
    form: StudentForm,
    error: Option<String>,
}

impl StudentsView {
    /// Open the view, re-checking the `view_data` capability.
    pub fn open(gateway: &ApiGateway) -> Result<Self, AccessDenied> {
        check_entry(gateway.session(), View::Students)?;
        Ok(StudentsView {
            gateway: gateway.clone(),
            roster: Vec::new(),
            form: StudentForm::default(),
            error: None,
        })
    }

    /// Fetch the roster. A failed read logs and leaves the list empty
    /// rather than raising; the view simply shows nothing.
    pub async fn refresh(&mut self) {
        match self.gateway.get_json("/students").await {
            Ok(students) => self.roster = students,
            Err(err) => tracing::debug!(%err, "error loading students"),
        }
    }

    /// The last successfully fetched roster.
    pub fn roster(&self) -> &[Student] {
        &self.roster
    }

    /// Fetch a single student row, for the detail panel.
    pub async fn fetch_student(&self, id: i64) -> Result<Student> {
        self.gateway.get_json(&format!("/students/{id}")).await
    }

    /// The form-level error message to display, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current form state.
    pub fn form(&self) -> &StudentForm {
        &self.form
    }

    /// Whether to offer the Add/Edit/Delete controls. Mutations remain
    /// server-enforced either way.
    pub fn can_manage(&self) -> bool {
        self.gateway
            .session()
            .has_permission(&Capability::manage_students())
    }

    /// Mutable access to the draft fields while the form is open.
    pub fn draft_mut(&mut self) -> &mut StudentDraft {
        &mut self.form.draft
    }

    /// Open an empty form for a new student.
    pub fn begin_create(&mut self) {
        self.form = StudentForm {
            editing: None,
            draft: StudentDraft::default(),
            open: true,
        };
        self.error = None;
    }

    /// Open the form pre-filled from an existing student.
    pub fn begin_edit(&mut self, student: &Student) {
        self.form = StudentForm {
            editing: Some(student.id),
            draft: StudentDraft::from(student),
            open: true,
        };
        self.error = None;
    }

    /// Close the form and discard the buffer. No request is issued.
    pub fn cancel(&mut self) {
        self.form = StudentForm::default();
        self.error = None;
    }

    /// Submit the form: `PUT` when editing, `POST` when creating. On
    /// success the buffer is cleared and the roster re-fetched; on failure
    /// the server message is recorded and local state stays put.
    pub async fn submit(&mut self) -> Result<()> {
        self.error = None;
        let outcome = match self.form.editing {
            Some(id) => {
                self.gateway
                    .put_json::<_, ServerMessage>(&format!("/students/{id}"), &self.form.draft)
                    .await
            }
            None => {
                // The create response carries an extra `id` field; the
                // acknowledgement message is all the view needs.
                self.gateway
                    .post_json::<_, ServerMessage>("/students", &self.form.draft)
                    .await
            }
        };

        match outcome {
            Ok(_) => {
                self.form = StudentForm::default();
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                let fallback = if self.form.editing.is_some() {
                    "Error updating student"
                } else {
                    "Error creating student"
                };
                self.error = Some(surface_message(&err, fallback));
                Err(err)
            }
        }
    }

    /// Delete a student. Destructive, so the caller must pass the user's
    /// explicit confirmation; without it no request is issued and `false`
    /// is returned.
    pub async fn delete(&mut self, id: i64, confirmed: bool) -> Result<bool> {
        if !confirmed {
            return Ok(false);
        }
        match self.gateway.delete(&format!("/students/{id}")).await {
            Ok(_) => {
                self.refresh().await;
                Ok(true)
            }
            Err(err) => {
                self.error = Some(surface_message(&err, "Error deleting student"));
                Err(err)
            }
        }
    }
}
