//! CLI library components for the metadata reconciler.

pub mod logging;
pub mod pipeline;
