//! CLI library components for the Disease Support Finder client.

pub mod logging;
pub mod render;
pub mod session;
