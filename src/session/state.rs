use crate::models::User;
use crate::mvi::StoreState;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Signed-in identity, if any.
    pub user: Option<User>,
    pub message: Option<String>,
    pub is_loading: bool,
    pub is_success: bool,
    pub is_error: bool,
}

impl StoreState for SessionState {}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}
