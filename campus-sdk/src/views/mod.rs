//! Feature-view controllers: one fetch/render/mutate loop per screen.
//!
//! Each controller is opened on entry to its view and dropped on exit.
//! Opening re-checks the view's required capability (defense in depth
//! behind the router's navigation filtering) and starts from empty state,
//! so every visit begins with a fresh fetch; dropping the controller
//! discards any response that would otherwise arrive for a view the user
//! has already left. Mutations clear their edit buffer only on success and
//! then re-fetch the affected collection; failures record the server's
//! message without touching local state.

mod attendance;
mod dashboard;
mod grades;
mod students;
mod users;

pub use attendance::{AttendanceForm, AttendanceView, BulkAttendanceForm};
pub use dashboard::{AnalyticsFilters, DashboardView, ExportKind};
pub use grades::{GradeForm, GradesView};
pub use students::{StudentForm, StudentsView};
pub use users::{UserForm, UsersView};

use campus_common::capabilities::Capability;

use crate::router::View;
use crate::session::SessionStore;

/// Rendered instead of a feature view when the signed-in user lacks the
/// view's required capability (a stale UI can navigate past the filtered
/// entries; the view itself must not trust that filtering).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("access denied: {view:?} requires the `{capability}` capability")]
pub struct AccessDenied {
    /// The view that refused to open.
    pub view: View,
    /// The capability it requires.
    pub capability: Capability,
}

/// Shared entry check for view constructors.
fn check_entry(session: &SessionStore, view: View) -> Result<(), AccessDenied> {
    let capability = view.required_capability();
    if session.has_permission(&capability) {
        Ok(())
    } else {
        Err(AccessDenied { view, capability })
    }
}
