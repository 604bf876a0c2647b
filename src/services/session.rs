/// Session Service
/// Owns the companion connection: classifies its output into transcript entries,
/// forwards user submissions to its stdin, and tracks the busy/idle status.

use crate::error::SessionError;
use crate::models::{EntryKind, SessionSnapshot, Status, StatusLabel, StatusPayload, TranscriptEntry};
use crate::services::protocol::{self, Submission, TaggedLine};
use crate::services::transcript::Transcript;
use parking_lot::Mutex;
use std::sync::Arc;

/// Writable side of a running companion process
pub trait CompanionHandle: Send {
    /// Process id, when the runtime knows it
    fn pid(&self) -> Option<u32>;

    /// Write raw bytes to the companion's stdin
    fn write(&mut self, data: &[u8]) -> Result<(), SessionError>;

    /// Kill the companion process. Later calls are no-ops.
    fn kill(&mut self) -> Result<(), SessionError>;
}

/// Where session updates are rendered
pub trait SessionView: Send {
    fn append(&self, entry: &TranscriptEntry);
    /// `seq` increases with every status change
    fn status(&self, status: Status, seq: u64);
    fn clear_input(&self);
}

/// Everything the companion process can report
pub enum CompanionEvent {
    Spawned(Box<dyn CompanionHandle>),
    SpawnFailed(String),
    Stdout(String),
    Stderr(String),
    /// Runtime error reported after launch
    Error(String),
    Closed { code: Option<i32>, signal: Option<i32> },
}

type SharedHandle = Arc<Mutex<Box<dyn CompanionHandle>>>;

/// A submission already recorded in the transcript, waiting to be written.
///
/// Writing happens outside the session lock so a full stdin pipe cannot stall
/// the output pump.
pub struct PendingSend {
    process: SharedHandle,
    payload: String,
    status_seq: u64,
}

impl PendingSend {
    pub fn write(&self) -> Result<(), SessionError> {
        self.process.lock().write(self.payload.as_bytes())
    }
}

/// Session state for one companion connection
pub struct Session {
    process: Option<SharedHandle>,
    pid: Option<u32>,
    status: Status,
    status_seq: u64,
    transcript: Transcript,
    view: Box<dyn SessionView>,
}

impl Session {
    pub fn new(view: Box<dyn SessionView>, trust_markup: bool) -> Self {
        Self {
            process: None,
            pid: None,
            status: Status::default(),
            status_seq: 0,
            transcript: Transcript::new(trust_markup),
            view,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn status_seq(&self) -> u64 {
        self.status_seq
    }

    pub fn is_connected(&self) -> bool {
        self.process.is_some()
    }

    /// Pid of the current or last companion process
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        self.transcript.entries()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            connected: self.is_connected(),
            status: StatusPayload::new(self.status(), self.status_seq()),
            entries: self.entries().to_vec(),
        }
    }

    /// Dispatch one companion event
    pub fn handle_event(&mut self, event: CompanionEvent) {
        match event {
            CompanionEvent::Spawned(handle) => {
                self.pid = handle.pid();
                log::info!("[Session] Companion started, pid: {:?}", self.pid);
                self.process = Some(Arc::new(Mutex::new(handle)));
                self.set_status(StatusLabel::Ready, false);
            }
            CompanionEvent::SpawnFailed(reason) => {
                // Status stays at the connecting sentinel
                log::error!("[Session] Companion failed to start: {}", reason);
                self.append(
                    EntryKind::Error,
                    format!("permission denied or launch failed: {}", reason),
                );
            }
            CompanionEvent::Stdout(line) => self.handle_line(&line),
            CompanionEvent::Stderr(line) => {
                log::warn!("[Companion {:?}] stderr: {}", self.pid(), line.trim_end());
            }
            CompanionEvent::Error(reason) => {
                log::error!("[Session] Companion error: {}", reason);
                self.append(EntryKind::Error, format!("launch failed: {}", reason));
            }
            CompanionEvent::Closed { code, signal } => {
                log::info!(
                    "[Session] Companion {:?} closed, code: {:?}, signal: {:?}",
                    self.pid,
                    code,
                    signal
                );
                self.process = None;
                self.append(EntryKind::Error, "backend disconnected");
                self.set_status(StatusLabel::Disconnected, false);
            }
        }
    }

    /// Classify one stdout line and update the transcript and status
    pub fn handle_line(&mut self, line: &str) {
        let Some(tagged) = protocol::classify(line) else {
            return;
        };
        log::debug!("[Companion {:?}] {}", self.pid(), line.trim());

        match tagged {
            TaggedLine::Think(text) => {
                self.append(EntryKind::Thinking, text);
                self.set_status(StatusLabel::Thinking, true);
            }
            TaggedLine::Result(text) => {
                self.append(EntryKind::Assistant, text);
                self.set_status(StatusLabel::Ready, false);
            }
            TaggedLine::Error(text) => {
                self.append(EntryKind::Error, text);
                self.set_status(StatusLabel::Ready, false);
            }
            TaggedLine::Plain(text) => {
                self.append(EntryKind::Assistant, text);
                self.set_status(StatusLabel::WaitingForInput, false);
            }
        }
    }

    /// Record a user submission and hand back the write to perform.
    ///
    /// Returns `None` without touching the transcript when no process is attached.
    pub fn begin_send(&mut self, raw: &str) -> Option<PendingSend> {
        let process = self.process.clone()?;

        let submission = Submission::from_input(raw);
        let entry = self.transcript.push(EntryKind::User, submission.display);
        self.view.append(&entry);
        self.view.clear_input();

        Some(PendingSend {
            process,
            payload: submission.payload,
            status_seq: self.status_seq,
        })
    }

    /// Apply the outcome of a write started by `begin_send`.
    ///
    /// A successful write only shows `sending…` if no other status arrived meanwhile.
    /// A failed write is surfaced in the transcript and also returned.
    pub fn finish_send(
        &mut self,
        pending: PendingSend,
        result: Result<(), SessionError>,
    ) -> Result<(), SessionError> {
        match result {
            Ok(()) => {
                if self.is_connected() && self.status_seq == pending.status_seq {
                    self.set_status(StatusLabel::Sending, true);
                }
                Ok(())
            }
            Err(e) => {
                log::error!("[Session] Failed to write to companion: {}", e);
                self.append(EntryKind::Error, format!("send failed: {}", e));
                Err(e)
            }
        }
    }

    /// Send a user submission to the companion while holding the session.
    ///
    /// Returns `NotConnected` without touching the transcript when no process is attached.
    pub fn send(&mut self, raw: &str) -> Result<(), SessionError> {
        let pending = self.begin_send(raw).ok_or(SessionError::NotConnected)?;
        let result = pending.write();
        self.finish_send(pending, result)
    }

    /// Kill the companion if one is attached
    pub fn shutdown(&mut self) -> Result<(), SessionError> {
        match self.process.take() {
            Some(process) => {
                log::info!("[Session] Stopping companion, pid: {:?}", self.pid);
                let result = process.lock().kill();
                result
            }
            None => Ok(()),
        }
    }

    fn append(&mut self, kind: EntryKind, text: impl Into<String>) {
        let entry = self.transcript.push(kind, text);
        self.view.append(&entry);
    }

    fn set_status(&mut self, label: StatusLabel, busy: bool) {
        self.status = Status::new(label, busy);
        self.status_seq += 1;
        self.view.status(self.status, self.status_seq);
    }
}

/// Session Manager - holds the single session for the app lifetime
pub struct SessionManager {
    session: Mutex<Option<Session>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            session: Mutex::new(None),
        }
    }

    /// Create the session if none exists. Returns false when one was already open.
    pub fn open(&self, view: Box<dyn SessionView>, trust_markup: bool) -> bool {
        let mut session = self.session.lock();
        if session.is_some() {
            return false;
        }
        *session = Some(Session::new(view, trust_markup));
        true
    }

    pub fn dispatch(&self, event: CompanionEvent) {
        match self.session.lock().as_mut() {
            Some(session) => session.handle_event(event),
            None => log::warn!("[Session] Dropping companion event, no session open"),
        }
    }

    /// Send a submission; silently ignored when nothing is connected.
    /// The stdin write runs with the session unlocked.
    pub fn send(&self, raw: &str) -> Result<(), SessionError> {
        let pending = match self.session.lock().as_mut() {
            Some(session) => session.begin_send(raw),
            None => None,
        };
        let Some(pending) = pending else {
            return Ok(());
        };

        let result = pending.write();

        match self.session.lock().as_mut() {
            Some(session) => session.finish_send(pending, result),
            None => result,
        }
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.lock().as_ref().map(Session::snapshot)
    }

    /// Stop the companion - used during shutdown
    pub fn shutdown(&self) -> Result<(), SessionError> {
        match self.session.lock().as_mut() {
            Some(session) => session.shutdown(),
            None => Ok(()),
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
