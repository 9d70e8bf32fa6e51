//! Launch configuration for the standalone binary

use std::path::PathBuf;

/// Configuration resolved from the environment
///
/// The binary takes no flags; everything comes from two variables:
/// - `SECRET_MOCK_SOCKET`: socket path (default: `$TMPDIR/secret-mock.sock`)
/// - `SECRET_MOCK_QUIET`: `1`/`true` silences the console logger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Where `listen()` binds
    pub socket_path: PathBuf,
    /// Use a no-op logger instead of the console one
    pub quiet: bool,
}

impl ServiceConfig {
    /// Default socket path in the platform temp directory
    pub fn default_socket_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push("secret-mock.sock");
        path
    }

    /// Read configuration from the environment
    pub fn from_env() -> Self {
        let socket_path = std::env::var_os("SECRET_MOCK_SOCKET")
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_socket_path);

        let quiet = std::env::var("SECRET_MOCK_QUIET")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self { socket_path, quiet }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            socket_path: Self::default_socket_path(),
            quiet: false,
        }
    }
}
