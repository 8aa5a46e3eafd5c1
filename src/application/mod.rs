//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! it owns the platform data, the session and the UI state, and persists
//! after every mutation.

pub mod state;

pub use state::*;
