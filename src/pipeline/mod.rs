//! Pipeline module - loading, auditing, aggregation and ranking

pub mod aggregate;
pub mod analysis;
pub mod error;
pub mod label;
pub mod loader;
pub mod missing;
pub mod ranking;

pub use aggregate::*;
pub use analysis::*;
pub use error::*;
pub use label::*;
pub use loader::*;
pub use missing::*;
pub use ranking::*;
