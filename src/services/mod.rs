/// Services module
/// Session logic: line protocol, transcript, companion process, webview rendering.
/// Kept apart from the commands module so it can be tested without a running app.

pub mod companion;
pub mod protocol;
pub mod session;
pub mod transcript;
pub mod webview;

pub use session::{CompanionEvent, SessionManager};
