/// Companion Service
/// Launches the companion process through the shell plugin and pumps its events into the session.

use crate::config::CompanionConfig;
use crate::error::SessionError;
use crate::services::session::{CompanionEvent, CompanionHandle, SessionManager};
use std::sync::Arc;
use tauri::async_runtime::{self, Receiver};
use tauri::AppHandle;
use tauri_plugin_shell::process::{CommandChild, CommandEvent};
use tauri_plugin_shell::ShellExt;

/// Running companion child
pub struct ShellCompanion {
    pid: u32,
    child: Option<CommandChild>,
}

impl CompanionHandle for ShellCompanion {
    fn pid(&self) -> Option<u32> {
        Some(self.pid)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), SessionError> {
        let child = self.child.as_mut().ok_or(SessionError::NotConnected)?;
        child
            .write(data)
            .map_err(|e| SessionError::Write(e.to_string()))
    }

    fn kill(&mut self) -> Result<(), SessionError> {
        match self.child.take() {
            Some(child) => child
                .kill()
                .map_err(|e| SessionError::Shutdown(e.to_string())),
            None => Ok(()),
        }
    }
}

/// Launch the companion with no arguments
pub fn spawn(
    app: &AppHandle,
    config: &CompanionConfig,
) -> Result<(Receiver<CommandEvent>, ShellCompanion), SessionError> {
    let shell = app.shell();
    let command = match &config.program {
        Some(program) => shell.command(program.clone()),
        None => shell.sidecar(&config.sidecar)?,
    };

    let (rx, child) = command.spawn()?;
    let pid = child.pid();
    log::info!("[Companion] Spawned, pid: {}", pid);

    Ok((
        rx,
        ShellCompanion {
            pid,
            child: Some(child),
        },
    ))
}

/// Drain companion events into the session until the channel closes
pub fn pump(mut rx: Receiver<CommandEvent>, manager: Arc<SessionManager>) {
    async_runtime::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Some(event) = translate(event) {
                manager.dispatch(event);
            }
        }
        log::debug!("[Companion] Event channel closed");
    });
}

fn translate(event: CommandEvent) -> Option<CompanionEvent> {
    match event {
        CommandEvent::Stdout(bytes) => Some(CompanionEvent::Stdout(
            String::from_utf8_lossy(&bytes).into_owned(),
        )),
        CommandEvent::Stderr(bytes) => Some(CompanionEvent::Stderr(
            String::from_utf8_lossy(&bytes).into_owned(),
        )),
        CommandEvent::Error(message) => Some(CompanionEvent::Error(message)),
        CommandEvent::Terminated(payload) => Some(CompanionEvent::Closed {
            code: payload.code,
            signal: payload.signal,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tauri_plugin_shell::process::TerminatedPayload;

    #[test]
    fn stdout_bytes_become_lines() {
        match translate(CommandEvent::Stdout(b"[RESULT] ok\n".to_vec())) {
            Some(CompanionEvent::Stdout(line)) => assert_eq!(line, "[RESULT] ok\n"),
            _ => panic!("expected stdout event"),
        }
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        match translate(CommandEvent::Stderr(vec![0x66, 0xff, 0x6f])) {
            Some(CompanionEvent::Stderr(line)) => assert_eq!(line, "f\u{fffd}o"),
            _ => panic!("expected stderr event"),
        }
    }

    #[test]
    fn termination_maps_to_closed() {
        let payload = TerminatedPayload {
            code: Some(1),
            signal: None,
        };
        match translate(CommandEvent::Terminated(payload)) {
            Some(CompanionEvent::Closed { code, signal }) => {
                assert_eq!(code, Some(1));
                assert_eq!(signal, None);
            }
            _ => panic!("expected closed event"),
        }
    }
}
