//! Infrastructure layer providing external service integrations.
//!
//! This module contains the key-value storage backends, document
//! persistence, configuration, logging setup and CSV export.

pub mod store;
pub mod persistence;
pub mod config;
pub mod logging;
pub mod export;

pub use store::*;
pub use persistence::*;
pub use config::*;
pub use logging::*;
pub use export::*;
