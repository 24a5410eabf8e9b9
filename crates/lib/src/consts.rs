//! Shared constants.

/// Application name, used for configuration and data directories.
pub const APP_NAME: &str = "vlab";

/// Default Scientific Code Marketplace endpoint.
pub const DEFAULT_SCM_URL: &str = "http://ec2-54-206-9-187.ap-southeast-2.compute.amazonaws.com/scm";

/// Default HTTP connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default HTTP read timeout in seconds.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the catalogue base URL.
pub const ENV_SCM_URL: &str = "VLAB_SCM_URL";

/// Environment variable overriding the configured providers (comma-separated).
pub const ENV_PROVIDERS: &str = "VLAB_PROVIDERS";
