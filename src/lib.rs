//! YAN Portal - Membership Platform Library
//!
//! Membership application wizard, admin review board and audit trail for the
//! YAN membership platform, with a terminal front end built on ratatui.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
