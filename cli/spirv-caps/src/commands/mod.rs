//! CLI command implementations.

pub mod extensions;
pub mod features;
pub mod resolve;
