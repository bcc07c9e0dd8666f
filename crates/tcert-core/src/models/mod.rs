//! Data models shared across the pipeline.

pub mod config;
pub mod lines;
pub mod record;
pub mod report;
