//! eegdiff: Label Group Comparison Library
//!
//! Loads a labelled table of numeric features (EEG channel readings),
//! audits missing values, summarises every feature per label group and
//! ranks features by the difference in group means.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
