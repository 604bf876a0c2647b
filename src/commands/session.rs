/// Session Commands
/// Tauri commands the frontend uses to start the session and send messages.

use crate::config::CompanionConfig;
use crate::models::SessionSnapshot;
use crate::services::webview::WebviewView;
use crate::services::{companion, CompanionEvent, SessionManager};
use std::sync::Arc;
use tauri::{AppHandle, State};

/// Open the session and launch the companion.
/// Called once the UI has loaded; later calls only return the current snapshot.
#[tauri::command]
pub fn session_start(
    app: AppHandle,
    manager: State<'_, Arc<SessionManager>>,
    config: State<'_, CompanionConfig>,
) -> Result<SessionSnapshot, String> {
    let view = Box::new(WebviewView::new(app.clone()));
    if manager.open(view, config.trust_markup) {
        match companion::spawn(&app, &config) {
            Ok((rx, child)) => {
                // Attach the handle before any output is dispatched
                manager.dispatch(CompanionEvent::Spawned(Box::new(child)));
                companion::pump(rx, manager.inner().clone());
            }
            Err(e) => manager.dispatch(CompanionEvent::SpawnFailed(e.to_string())),
        }
    }

    manager
        .snapshot()
        .ok_or_else(|| "Session not open".to_string())
}

/// Send user input to the companion
#[tauri::command]
pub fn session_send(manager: State<'_, Arc<SessionManager>>, text: String) -> Result<(), String> {
    manager.send(&text).map_err(|e| e.to_string())
}

/// Current transcript and status, if the session is open
#[tauri::command]
pub fn session_snapshot(manager: State<'_, Arc<SessionManager>>) -> Option<SessionSnapshot> {
    manager.snapshot()
}
