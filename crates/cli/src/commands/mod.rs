//! Command implementations for envstage.

pub mod check;
pub mod files;
