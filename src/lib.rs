//! Client-side state layer of the equipment-borrowing system.
//!
//! Resource stores cache the server's collections, the session store keeps
//! the signed-in identity, and every mutation goes through a validation
//! schema first. See [`context::AppContext`] for the entry point.

pub mod api;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod location;
pub mod logging;
pub mod models;
pub mod mvi;
pub mod precondition;
pub mod resources;
pub mod router;
pub mod session;
pub mod store;
pub mod validation;
