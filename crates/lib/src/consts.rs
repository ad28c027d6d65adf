/// Application name, used for data directories.
pub const APP_NAME: &str = "automat";

/// Environment variable overriding the data root.
pub const ROOT_ENV_VAR: &str = "AUTOMAT_ROOT";

/// Reserved variable name that always expands to the build root.
pub const BUILD_ROOT_VAR: &str = "BUILD_ROOT";

/// Length of the hex-encoded build fingerprint (SHA-256).
pub const FINGERPRINT_HEX_LEN: usize = 64;
