use crate::mvi::Reducer;

use super::intent::SessionIntent;
use super::state::SessionState;

/// Reducer for the session. Persistence happens in the store.
pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SessionIntent::Started => {
                state.is_loading = true;
                state.is_success = false;
                state.is_error = false;
            }

            SessionIntent::SignedIn { user, message } => {
                state.user = Some(user);
                state.message = message;
                state.is_loading = false;
                state.is_success = true;
            }

            SessionIntent::Registered { message } => {
                state.message = message;
                state.is_loading = false;
                state.is_success = true;
            }

            SessionIntent::SignedOut => {
                state = SessionState::default();
            }

            SessionIntent::IdentityPatched { patch } => {
                if let Some(user) = state.user.as_mut() {
                    user.merge(&patch);
                }
            }

            SessionIntent::Failed { message } => {
                state.message = Some(message);
                state.is_loading = false;
                state.is_success = false;
                state.is_error = true;
            }
        }
        state
    }
}
