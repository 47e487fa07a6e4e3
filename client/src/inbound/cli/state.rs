//! Application state owned by the controller.

use crate::domain::{StoryList, User};

/// Everything the front end knows between actions.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Current story list; `None` until fetched or while unavailable.
    pub stories: Option<StoryList>,
    /// Signed-in user; `None` when logged out.
    pub user: Option<User>,
}

impl AppState {
    /// Whether a user is signed in.
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Forget the signed-in user.
    pub fn log_out(&mut self) {
        self.user = None;
    }
}
