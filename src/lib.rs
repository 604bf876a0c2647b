/// Synapse desktop front-end
/// Chat window over the Synapse companion process: Tauri backend + plain HTML frontend
///
/// Module structure:
/// - commands: Tauri IPC handlers (frontend → backend)
/// - services: session controller, line protocol, transcript, companion process
/// - models: shared data types
/// - config: companion settings from tauri.conf.json

mod commands;
mod config;
mod error;
mod models;
mod services;

use config::CompanionConfig;
use services::SessionManager;
use std::sync::Arc;
use tauri::{Manager, RunEvent};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let session_manager = Arc::new(SessionManager::new());
    let session_manager_for_shutdown = session_manager.clone();

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .manage(session_manager)
        .setup(|app| {
            let level = if cfg!(debug_assertions) {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            };
            app.handle()
                .plugin(tauri_plugin_log::Builder::default().level(level).build())?;

            let config = CompanionConfig::load(app.handle());
            log::info!("[Config] Companion: {:?}", config);
            app.manage(config);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::session::session_start,
            commands::session::session_send,
            commands::session::session_snapshot,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(move |_app_handle, event| {
            if let RunEvent::Exit = event {
                // Stop the companion on app exit
                log::info!("App shutting down - stopping companion process");
                if let Err(e) = session_manager_for_shutdown.shutdown() {
                    log::error!("{}", e);
                }
            }
        });
}
