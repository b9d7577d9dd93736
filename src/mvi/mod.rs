//! Model-View-Intent primitives shared by every store.
//!
//! ```text
//! operation ──→ Intent ──→ Reducer ──→ State ──→ subscribers
//!     ↑                                              │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! - **State**: snapshot of one slice of client state
//! - **Intent**: lifecycle event of an operation (started, succeeded, failed)
//! - **Reducer**: pure function folding an intent into the next state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::StoreState;
