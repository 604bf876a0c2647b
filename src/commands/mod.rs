/// Commands module
/// Tauri IPC handlers: the boundary between the webview and the session controller.

pub mod session;
