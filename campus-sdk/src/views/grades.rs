//! Grades view: grade entry and per-student history.

use chrono::{Local, NaiveDate};

use campus_common::capabilities::Capability;
use campus_common::records::{GradeDraft, GradeRecord, GradeUpdate, ServerMessage, Student};

use super::{check_entry, AccessDenied};
use crate::errors::{RequestError, Result};
use crate::gateway::{surface_message, ApiGateway};
use crate::router::View;

/// The grade entry form. Scores start unset rather than at a misleading
/// zero; submit refuses until both are filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeForm {
    /// Subject.
    pub subject: String,
    /// Assignment name.
    pub assignment: String,
    /// Points scored.
    pub score: Option<f64>,
    /// Maximum points.
    pub max_score: Option<f64>,
    /// Assignment date.
    pub date: NaiveDate,
    editing: Option<i64>,
}

impl Default for GradeForm {
    fn default() -> Self {
        GradeForm {
            subject: String::new(),
            assignment: String::new(),
            score: None,
            max_score: None,
            date: Local::now().date_naive(),
            editing: None,
        }
    }
}

impl GradeForm {
    /// The record id being edited, if any.
    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    /// True while editing an existing record.
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

/// The Grades screen.
#[derive(Debug)]
pub struct GradesView {
    gateway: ApiGateway,
    students: Vec<Student>,
    selected_student: Option<i64>,
    history: Vec<GradeRecord>,
    form: GradeForm,
    error: Option<String>,
}

impl GradesView {
    /// Open the view, re-checking the `view_data` capability.
    pub fn open(gateway: &ApiGateway) -> Result<Self, AccessDenied> {
        check_entry(gateway.session(), View::Grades)?;
        Ok(GradesView {
            gateway: gateway.clone(),
            students: Vec::new(),
            selected_student: None,
            history: Vec::new(),
            form: GradeForm::default(),
            error: None,
        })
    }

    /// Fetch the student list. A failed read logs and leaves it empty.
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

    /// The grade history last fetched for the selected student.
    pub fn history(&self) -> &[GradeRecord] {
        &self.history
    }

    /// The currently selected student, if any.
    pub fn selected_student(&self) -> Option<i64> {
        self.selected_student
    }

    /// The form state.
    pub fn form(&self) -> &GradeForm {
        &self.form
    }

    /// Mutable access to the form fields.
    pub fn form_mut(&mut self) -> &mut GradeForm {
        &mut self.form
    }

    /// The form-level error message to display, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether to offer add/edit/delete controls.
    pub fn can_manage(&self) -> bool {
        self.gateway
            .session()
            .has_permission(&Capability::manage_grades())
    }

    /// The student selector is hidden while editing a record.
    pub fn student_selector_enabled(&self) -> bool {
        !self.form.is_editing()
    }

    /// Select a student (or clear the selection) and load their grades.
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
            .get_json(&format!("/grades/student/{student_id}"))
            .await
        {
            Ok(history) => self.history = history,
            Err(err) => tracing::debug!(%err, "error loading grades history"),
        }
    }

    /// Pre-fill the form from an existing grade and switch to edit mode.
    pub fn begin_edit(&mut self, grade: &GradeRecord) {
        self.form = GradeForm {
            subject: grade.subject.clone(),
            assignment: grade.assignment.clone(),
            score: Some(grade.score),
            max_score: Some(grade.max_score),
            date: grade.date,
            editing: Some(grade.id),
        };
        self.selected_student = None;
        self.history.clear();
        self.error = None;
    }

    /// Abandon an edit: restore the form defaults without issuing any
    /// request.
    pub fn cancel_edit(&mut self) {
        self.form = GradeForm::default();
        self.error = None;
    }

    /// Submit the form: update when editing, otherwise add a grade for the
    /// selected student. On success the form resets and the history
    /// reloads after the write completes.
    pub async fn submit(&mut self) -> Result<()> {
        self.error = None;

        let (Some(score), Some(max_score)) = (self.form.score, self.form.max_score) else {
            let message = "Score and max score are required".to_string();
            self.error = Some(message.clone());
            return Err(RequestError::Validation { message }.into());
        };

        if let Some(id) = self.form.editing {
            let body = GradeUpdate {
                subject: self.form.subject.clone(),
                assignment: self.form.assignment.clone(),
                score,
                max_score,
                date: self.form.date,
            };
            match self
                .gateway
                .put_json::<_, ServerMessage>(&format!("/grades/{id}"), &body)
                .await
            {
                Ok(_) => {
                    self.form = GradeForm::default();
                    if let Some(student) = self.selected_student {
                        self.reload_history(student).await;
                    }
                    Ok(())
                }
                Err(err) => {
                    self.error = Some(surface_message(&err, "Error updating grade"));
                    Err(err)
                }
            }
        } else {
            let Some(student_id) = self.selected_student else {
                let message = "Please select a student".to_string();
                self.error = Some(message.clone());
                return Err(RequestError::Validation { message }.into());
            };
            let body = GradeDraft {
                student_id,
                subject: self.form.subject.clone(),
                assignment: self.form.assignment.clone(),
                score,
                max_score,
                date: self.form.date,
            };
            match self
                .gateway
                .post_json::<_, ServerMessage>("/grades", &body)
                .await
            {
                Ok(_) => {
                    self.form = GradeForm::default();
                    self.reload_history(student_id).await;
                    Ok(())
                }
                Err(err) => {
                    self.error = Some(surface_message(&err, "Error adding grade"));
                    Err(err)
                }
            }
        }
    }

    /// Delete a grade. Requires explicit confirmation; without it no
    /// request is issued and `false` is returned.
    pub async fn delete(&mut self, id: i64, confirmed: bool) -> Result<bool> {
        if !confirmed {
            return Ok(false);
        }
        match self.gateway.delete(&format!("/grades/{id}")).await {
            Ok(_) => {
                if let Some(student) = self.selected_student {
                    self.reload_history(student).await;
                }
                Ok(true)
            }
            Err(err) => {
                self.error = Some(surface_message(&err, "Error deleting grade"));
                Err(err)
            }
        }
    }
}
