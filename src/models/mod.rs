/// Models module
/// Data types shared between the session controller and the webview.
/// Everything here is serialized into IPC payloads and events.

use serde::Serialize;

/// Kind of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    User,
    Assistant,
    Thinking,
    Error,
}

impl EntryKind {
    /// CSS class the webview applies to the entry
    pub fn css_class(self) -> &'static str {
        match self {
            EntryKind::User => "message user-message",
            EntryKind::Assistant => "message ai-message",
            EntryKind::Thinking => "thinking-process",
            EntryKind::Error => "thinking-process error-message",
        }
    }

    /// Error entries do not pull the view to the bottom
    pub fn auto_scroll(self) -> bool {
        !matches!(self, EntryKind::Error)
    }
}

/// One rendered transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    pub id: u64,
    pub kind: EntryKind,
    /// Text as received, before any glyph or markup
    pub text: String,
    /// Markup inserted into the transcript
    pub html: String,
    pub class_name: &'static str,
    pub auto_scroll: bool,
}

/// Status label values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusLabel {
    Connecting,
    Ready,
    Thinking,
    WaitingForInput,
    Sending,
    Disconnected,
}

impl StatusLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusLabel::Connecting => "connecting…",
            StatusLabel::Ready => "ready",
            StatusLabel::Thinking => "thinking…",
            StatusLabel::WaitingForInput => "waiting for input…",
            StatusLabel::Sending => "sending…",
            StatusLabel::Disconnected => "disconnected",
        }
    }
}

/// Status readout: label plus busy flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub label: StatusLabel,
    pub busy: bool,
}

impl Status {
    pub const BUSY_PERIOD_MS: u32 = 1000;
    pub const IDLE_PERIOD_MS: u32 = 3000;

    pub fn new(label: StatusLabel, busy: bool) -> Self {
        Self { label, busy }
    }

    /// Period of the indicator animation
    pub fn animation_period_ms(&self) -> u32 {
        if self.busy {
            Self::BUSY_PERIOD_MS
        } else {
            Self::IDLE_PERIOD_MS
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::new(StatusLabel::Connecting, false)
    }
}

/// Event payload for status changes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub label: String,
    pub busy: bool,
    pub animation_period_ms: u32,
    /// Increases with every status change; the webview ignores older ones
    pub seq: u64,
}

impl StatusPayload {
    pub fn new(status: Status, seq: u64) -> Self {
        Self {
            label: status.label.as_str().to_string(),
            busy: status.busy,
            animation_period_ms: status.animation_period_ms(),
            seq,
        }
    }
}

/// Full session state for a webview that (re)loads
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub connected: bool,
    pub status: StatusPayload,
    pub entries: Vec<TranscriptEntry>,
}
