//! CLI library components for the bank transaction merger.

pub mod logging;
pub mod pipeline;
