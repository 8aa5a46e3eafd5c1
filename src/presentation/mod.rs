//! Presentation layer handling terminal UI and user input.
//!
//! This module manages the terminal user interface using ratatui,
//! maps keyboard input onto portal workflows, and renders each page.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
