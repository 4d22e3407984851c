//! Remote-owned resource records.
//!
//! Everything here mirrors a JSON shape the backend produces or consumes.
//! The client holds these only as transient, non-authoritative caches: the
//! visible list is the last successful fetch, nothing more.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// A student as listed by `GET /students`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Backend row id. Attendance and grade records reference this.
    pub id: i64,
    /// School-assigned student identifier (e.g. `STU-1042`).
    pub student_id: String,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Class/group label.
    pub class_name: String,
}

/// Fields for creating or updating a student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentDraft {
    /// School-assigned student identifier.
    pub student_id: String,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Class/group label.
    pub class_name: String,
}

impl From<&Student> for StudentDraft {
    fn from(student: &Student) -> Self {
        StudentDraft {
            student_id: student.student_id.clone(),
            name: student.name.clone(),
            email: student.email.clone(),
            class_name: student.class_name.clone(),
        }
    }
}

/// Attendance status. Wire values are capitalized (`"Present"` etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Attended.
    Present,
    /// Did not attend.
    Absent,
    /// Attended late.
    Late,
}

/// One attendance record from `GET /attendance/student/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Backend row id.
    pub id: i64,
    /// Class date.
    pub date: NaiveDate,
    /// Recorded status.
    pub status: AttendanceStatus,
    /// Subject the class belonged to.
    pub subject: String,
}

/// Body for `POST /attendance` (single mark).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// Student row id.
    pub student_id: i64,
    /// Class date.
    pub date: NaiveDate,
    /// Status to record.
    pub status: AttendanceStatus,
    /// Subject.
    pub subject: String,
}

/// Body for `PUT /attendance/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceUpdate {
    /// Class date.
    pub date: NaiveDate,
    /// Status to record.
    pub status: AttendanceStatus,
    /// Subject.
    pub subject: String,
}

/// One entry of a bulk attendance submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAttendanceRecord {
    /// Student row id.
    pub student_id: i64,
    /// Status to record for that student.
    pub status: AttendanceStatus,
}

/// Body for `POST /attendance/bulk`: one date and subject applied to a
/// batch of per-student statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAttendance {
    /// Class date shared by the whole batch.
    pub date: NaiveDate,
    /// Subject shared by the whole batch.
    pub subject: String,
    /// Per-student statuses.
    pub records: Vec<BulkAttendanceRecord>,
}

/// Response of `POST /attendance/bulk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAttendanceOutcome {
    /// Human-readable summary from the server.
    pub message: String,
    /// Student row ids the server recorded.
    #[serde(default)]
    pub created: Vec<i64>,
    /// Per-record failures, if any.
    #[serde(default)]
    pub errors: Vec<BulkAttendanceError>,
}

/// One failed entry within a bulk attendance submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAttendanceError {
    /// The student the failure relates to, when known.
    pub student_id: Option<i64>,
    /// Server-provided reason.
    pub error: String,
}

/// One grade record from `GET /grades/student/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    /// Backend row id.
    pub id: i64,
    /// Subject.
    pub subject: String,
    /// Assignment name.
    pub assignment: String,
    /// Points scored.
    pub score: f64,
    /// Maximum points.
    pub max_score: f64,
    /// Server-computed percentage (0 when `max_score` is 0).
    pub percentage: f64,
    /// Assignment date.
    pub date: NaiveDate,
}

/// Body for `POST /grades`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeDraft {
    /// Student row id.
    pub student_id: i64,
    /// Subject.
    pub subject: String,
    /// Assignment name.
    pub assignment: String,
    /// Points scored.
    pub score: f64,
    /// Maximum points.
    pub max_score: f64,
    /// Assignment date.
    pub date: NaiveDate,
}

/// Body for `PUT /grades/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeUpdate {
    /// Subject.
    pub subject: String,
    /// Assignment name.
    pub assignment: String,
    /// Points scored.
    pub score: f64,
    /// Maximum points.
    pub max_score: f64,
    /// Assignment date.
    pub date: NaiveDate,
}

/// A staff account as listed by `GET /users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend account id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Assigned role.
    pub role: Role,
}

/// Fields for creating (`POST /auth/register`) or updating
/// (`PUT /users/{id}`) a staff account. On update the server ignores an
/// empty password and keeps the existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// New password; empty means "keep current" on update.
    pub password: String,
    /// Role to assign.
    pub role: Role,
}

impl Default for UserDraft {
    fn default() -> Self {
        UserDraft {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            role: Role::Viewer,
        }
    }
}

/// A role definition as listed by `GET /roles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleInfo {
    /// Backend row id.
    pub id: i64,
    /// Role name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
}

/// One row of `GET /analytics/attendance-summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummaryRow {
    /// School-assigned student identifier.
    pub student_id: String,
    /// Full name.
    pub student_name: String,
    /// Class/group label.
    pub class_name: String,
    /// Classes recorded in the filtered range.
    pub total_classes: u32,
    /// Of those, how many were `Present`.
    pub present_count: u32,
    /// Percentage of classes attended (0 when no classes).
    pub attendance_rate: f64,
}

/// One row of `GET /analytics/grades-summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradesSummaryRow {
    /// School-assigned student identifier.
    pub student_id: String,
    /// Full name.
    pub student_name: String,
    /// Class/group label.
    pub class_name: String,
    /// Assignments graded in the filtered range.
    pub total_assignments: u32,
    /// Mean percentage across those assignments.
    pub average_grade: f64,
}

/// The backend's uniform `{"message": ...}` body, returned by most
/// mutations and by every validation/business error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerMessage {
    /// The message text, surfaced verbatim to the user.
    pub message: String,
}
