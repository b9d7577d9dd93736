use crate::models::{User, UserPatch};
use crate::mvi::Intent;

#[derive(Debug)]
pub enum SessionIntent {
    /// Login or registration request issued.
    Started,

    /// The server accepted the credentials.
    SignedIn { user: User, message: Option<String> },

    /// The server created the account. Registration does not sign in.
    Registered { message: Option<String> },

    /// Identity dropped locally.
    SignedOut,

    /// Local-only edit of the current identity.
    IdentityPatched { patch: UserPatch },

    Failed { message: String },
}

impl Intent for SessionIntent {}
