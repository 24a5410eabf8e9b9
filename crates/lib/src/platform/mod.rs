//! Platform-specific locations for configuration and data.

pub mod paths;
