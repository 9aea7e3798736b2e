//! Utilities shared by the Kaiwa crates.

pub mod logger;
pub mod time;
