//! The navigation state machine over the five feature views.

use campus_common::capabilities::Capability;

use crate::session::SessionStore;

/// One resource-scoped screen. Navigation is free between all views the
/// signed-in user can access; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Analytics summaries and exports.
    Dashboard,
    /// Student roster.
    Students,
    /// Attendance marking and history.
    Attendance,
    /// Grade entry and history.
    Grades,
    /// Staff account management (admin only).
    Users,
}

impl View {
    /// All views, in navigation order.
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Students,
        View::Attendance,
        View::Grades,
        View::Users,
    ];

    /// The capability a user must hold for this view's navigation entry
    /// to be offered. Admins pass every check through the role bypass.
    pub fn required_capability(&self) -> Capability {
        match self {
            View::Dashboard => Capability::view_analytics(),
            View::Students | View::Attendance | View::Grades => Capability::view_data(),
            View::Users => Capability::admin(),
        }
    }

    /// Navigation label.
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Students => "Students",
            View::Attendance => "Attendance",
            View::Grades => "Grades",
            View::Users => "Users",
        }
    }
}

/// What the user is looking at: the login screen when signed out,
/// otherwise one of the five views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Unauthenticated entry screen.
    Login,
    /// An authenticated feature view.
    View(View),
}

/// Navigation was refused because the user lacks the view's capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("navigation to {view:?} requires the `{capability}` capability")]
pub struct NavigationDenied {
    /// The refused target.
    pub view: View,
    /// What it would have required.
    pub capability: Capability,
}

/// Maps navigation selections to screens, filtered by the authorization
/// predicate.
///
/// The router never stores who is signed in; it consults the shared
/// [`SessionStore`] on every read. That is what makes a gateway-side
/// session clear (after a 401 anywhere) immediately surface here as the
/// login screen, regardless of which view issued the call.
#[derive(Debug, Clone)]
pub struct Router {
    session: SessionStore,
    current: View,
}

impl Router {
    /// A router starting at the Dashboard, the initial view after login.
    pub fn new(session: SessionStore) -> Self {
        Router {
            session,
            current: View::Dashboard,
        }
    }

    /// The screen to render right now. Signed out always means login,
    /// whether never signed in, logged out, or invalidated by the gateway.
    pub fn screen(&self) -> Screen {
        if self.session.is_authenticated() {
            Screen::View(self.current)
        } else {
            Screen::Login
        }
    }

    /// The current view position (meaningful only when authenticated).
    pub fn current(&self) -> View {
        self.current
    }

    /// The navigation entries to offer: views whose required capability
    /// the signed-in user holds. Empty when signed out.
    pub fn available_views(&self) -> Vec<View> {
        View::ALL
            .into_iter()
            .filter(|view| self.session.has_permission(&view.required_capability()))
            .collect()
    }

    /// Move to `view`, refusing targets the user lacks the capability
    /// for. Filtering the offered entries is not enough on its own: a
    /// stale UI can still ask, so the check repeats here, and the feature
    /// views re-check once more on entry.
    pub fn navigate(&mut self, view: View) -> Result<(), NavigationDenied> {
        let capability = view.required_capability();
        if !self.session.has_permission(&capability) {
            return Err(NavigationDenied { view, capability });
        }
        self.current = view;
        Ok(())
    }

    /// Sign out: clear the session and reset the position so the next
    /// login lands on the Dashboard.
    pub fn logout(&mut self) {
        self.session.clear();
        self.current = View::Dashboard;
    }
}
