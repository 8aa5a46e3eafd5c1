pub mod models;
pub mod errors;
pub mod audit;
pub mod wizard;
pub mod review;
pub mod catalog;
pub mod directory;
pub mod access;
pub mod seed;

pub use models::*;
pub use errors::*;
pub use audit::*;
pub use wizard::*;
pub use review::*;
pub use catalog::*;
pub use directory::*;
pub use access::*;
pub use seed::*;
