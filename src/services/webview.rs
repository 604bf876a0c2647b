/// Webview renderer
/// Forwards session updates to the frontend as Tauri events.

use crate::models::{Status, StatusPayload, TranscriptEntry};
use crate::services::session::SessionView;
use tauri::{AppHandle, Emitter};

pub const TRANSCRIPT_APPEND_EVENT: &str = "transcript-append";
pub const STATUS_CHANGED_EVENT: &str = "status-changed";
pub const INPUT_CLEARED_EVENT: &str = "input-cleared";

pub struct WebviewView {
    app: AppHandle,
}

impl WebviewView {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl SessionView for WebviewView {
    fn append(&self, entry: &TranscriptEntry) {
        if let Err(e) = self.app.emit(TRANSCRIPT_APPEND_EVENT, entry) {
            log::warn!("[Webview] Failed to emit entry {}: {}", entry.id, e);
        }
    }

    fn status(&self, status: Status, seq: u64) {
        if let Err(e) = self.app.emit(STATUS_CHANGED_EVENT, StatusPayload::new(status, seq)) {
            log::warn!("[Webview] Failed to emit status: {}", e);
        }
    }

    fn clear_input(&self) {
        if let Err(e) = self.app.emit(INPUT_CLEARED_EVENT, ()) {
            log::warn!("[Webview] Failed to emit input clear: {}", e);
        }
    }
}
