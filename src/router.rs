//! Route table and access guard.

use std::fmt;

use crate::models::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Admin,
    Device { id: String },
    Borrowings,
    NewPost { device_id: String },
    Payment { borrowing_id: String },
}

impl Route {
    /// Matches a path such as `/device/abc`. Trailing slashes are ignored;
    /// unknown paths and empty ids yield `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["admin"] => Route::Admin,
            ["borrowings"] => Route::Borrowings,
            ["device", id] => Route::Device { id: id.to_string() },
            ["newpost", id] => Route::NewPost {
                device_id: id.to_string(),
            },
            ["payment", id] => Route::Payment {
                borrowing_id: id.to_string(),
            },
            _ => return None,
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Admin => "/admin".to_string(),
            Route::Borrowings => "/borrowings".to_string(),
            Route::Device { id } => format!("/device/{id}"),
            Route::NewPost { device_id } => format!("/newpost/{device_id}"),
            Route::Payment { borrowing_id } => format!("/payment/{borrowing_id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
}

/// Decides whether `user` may open `route`.
pub fn guard(route: &Route, user: Option<&User>) -> Access {
    let signed_in = user.is_some();
    let admin = user.is_some_and(User::is_admin);
    let allowed = match route {
        Route::Home | Route::Device { .. } => true,
        Route::Login | Route::Register => !signed_in,
        Route::Admin => admin,
        Route::Borrowings => signed_in && !admin,
        Route::NewPost { .. } | Route::Payment { .. } => signed_in,
    };
    if allowed {
        return Access::Allow;
    }
    match route {
        Route::NewPost { .. } | Route::Payment { .. } => Access::Redirect(Route::Login),
        _ => Access::Redirect(Route::Home),
    }
}
