//! Dashboard: aggregate analytics and CSV exports.

use chrono::NaiveDate;

use campus_common::capabilities::Capability;
use campus_common::records::{AttendanceSummaryRow, GradesSummaryRow};

use super::{check_entry, AccessDenied};
use crate::errors::Result;
use crate::gateway::ApiGateway;
use crate::router::View;

/// Date-range and subject filters applied to both summaries. Unset
/// filters are simply omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsFilters {
    /// Earliest date to include.
    pub start_date: Option<NaiveDate>,
    /// Latest date to include.
    pub end_date: Option<NaiveDate>,
    /// Restrict to one subject.
    pub subject: Option<String>,
}

impl AnalyticsFilters {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(start) = self.start_date {
            query.push(("start_date", start.to_string()));
        }
        if let Some(end) = self.end_date {
            query.push(("end_date", end.to_string()));
        }
        if let Some(subject) = &self.subject {
            if !subject.is_empty() {
                query.push(("subject", subject.clone()));
            }
        }
        query
    }
}

/// Which collection to export as a downloadable file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// The student roster.
    Students,
    /// All attendance records.
    Attendance,
    /// All grade records.
    Grades,
}

impl ExportKind {
    fn path(&self) -> &'static str {
        match self {
            ExportKind::Students => "/export/students",
            ExportKind::Attendance => "/export/attendance",
            ExportKind::Grades => "/export/grades",
        }
    }

    /// Suggested file name for the download.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportKind::Students => "students.csv",
            ExportKind::Attendance => "attendance.csv",
            ExportKind::Grades => "grades.csv",
        }
    }
}

/// The Dashboard screen.
#[derive(Debug)]
pub struct DashboardView {
    gateway: ApiGateway,
    /// Filters applied on the next [`Self::load`].
    pub filters: AnalyticsFilters,
    attendance: Vec<AttendanceSummaryRow>,
    grades: Vec<GradesSummaryRow>,
    error: Option<String>,
}

impl DashboardView {
    /// Open the view, re-checking the `view_analytics` capability.
    pub fn open(gateway: &ApiGateway) -> Result<Self, AccessDenied> {
        check_entry(gateway.session(), View::Dashboard)?;
        Ok(DashboardView {
            gateway: gateway.clone(),
            filters: AnalyticsFilters::default(),
            attendance: Vec::new(),
            grades: Vec::new(),
            error: None,
        })
    }

    /// Fetch both summaries under the current filters: attendance first,
    /// then grades, in program order. Failed reads log and leave the
    /// affected table as it was.
    pub async fn load(&mut self) {
        let query = self.filters.to_query();
        match self
            .gateway
            .get_json_query("/analytics/attendance-summary", &query)
            .await
        {
            Ok(rows) => self.attendance = rows,
            Err(err) => tracing::debug!(%err, "error loading attendance summary"),
        }
        match self
            .gateway
            .get_json_query("/analytics/grades-summary", &query)
            .await
        {
            Ok(rows) => self.grades = rows,
            Err(err) => tracing::debug!(%err, "error loading grades summary"),
        }
    }

    /// Attendance summary rows from the last successful load.
    pub fn attendance_summary(&self) -> &[AttendanceSummaryRow] {
        &self.attendance
    }

    /// Grades summary rows from the last successful load.
    pub fn grades_summary(&self) -> &[GradesSummaryRow] {
        &self.grades
    }

    /// The error message to display, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether to offer the export buttons (`view_data` gates the export
    /// endpoints server-side).
    pub fn can_export(&self) -> bool {
        self.gateway
            .session()
            .has_permission(&Capability::view_data())
    }

    /// Download one collection as raw file bytes (CSV as produced by the
    /// server).
    pub async fn export(&mut self, kind: ExportKind) -> Result<Vec<u8>> {
        match self.gateway.get_bytes(kind.path()).await {
            Ok(bytes) => Ok(bytes),
            Err(err) => {
                self.error = Some("Error exporting data".to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_filters_produce_an_empty_query() {
        assert!(AnalyticsFilters::default().to_query().is_empty());
    }

    #[test]
    fn filters_map_to_the_backend_parameter_names() {
        let filters = AnalyticsFilters {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            subject: Some("Mathematics".to_string()),
        };
        assert_eq!(
            filters.to_query(),
            vec![
                ("start_date", "2024-01-01".to_string()),
                ("end_date", "2024-01-31".to_string()),
                ("subject", "Mathematics".to_string()),
            ]
        );
    }

    #[test]
    fn empty_subject_is_not_sent() {
        let filters = AnalyticsFilters {
            subject: Some(String::new()),
            ..Default::default()
        };
        assert!(filters.to_query().is_empty());
    }
}
