/// Session errors
/// Failures of the companion connection. Commands flatten these into strings at the IPC boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The companion binary could not be resolved or started
    #[error("{0}")]
    Spawn(String),

    /// Writing to the companion's stdin failed
    #[error("{0}")]
    Write(String),

    /// No companion process is attached to the session
    #[error("companion process is not connected")]
    NotConnected,

    /// Killing the companion on exit failed
    #[error("failed to stop companion: {0}")]
    Shutdown(String),
}

impl From<tauri_plugin_shell::Error> for SessionError {
    fn from(err: tauri_plugin_shell::Error) -> Self {
        SessionError::Spawn(err.to_string())
    }
}
