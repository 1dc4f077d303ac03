//! Infrastructure layer - Store implementations and logging

pub mod cache;
pub mod logging;
