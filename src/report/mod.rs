//! Report module - rendering and exporting analysis results

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
