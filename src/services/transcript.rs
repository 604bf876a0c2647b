/// Transcript
/// Append-only log of rendered chat entries.

use crate::models::{EntryKind, TranscriptEntry};

const THINKING_GLYPH: &str = "🧠";
const WARNING_GLYPH: &str = "⚠️";

pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    next_id: u64,
    trust_markup: bool,
}

impl Transcript {
    /// `trust_markup` inserts assistant text as markup without escaping it
    pub fn new(trust_markup: bool) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            trust_markup,
        }
    }

    /// Render and append an entry, returning the stored copy
    pub fn push(&mut self, kind: EntryKind, text: impl Into<String>) -> TranscriptEntry {
        let text = text.into();
        let entry = TranscriptEntry {
            id: self.next_id,
            kind,
            html: render(kind, &text, self.trust_markup),
            text,
            class_name: kind.css_class(),
            auto_scroll: kind.auto_scroll(),
        };
        self.next_id += 1;
        self.entries.push(entry.clone());
        entry
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }
}

/// Render an entry's text as the markup inserted into the transcript
pub fn render(kind: EntryKind, text: &str, trust_markup: bool) -> String {
    match kind {
        EntryKind::User => escape_html(text),
        EntryKind::Assistant => {
            let body = if trust_markup {
                text.to_string()
            } else {
                escape_html(text)
            };
            body.replace('\n', "<br>")
        }
        EntryKind::Thinking => format!("{} {}", THINKING_GLYPH, escape_html(text)),
        EntryKind::Error => format!("{} {}", WARNING_GLYPH, escape_html(text)),
    }
}

/// Escape the characters that are significant in HTML text and attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_newlines_become_line_breaks() {
        assert_eq!(
            render(EntryKind::Assistant, "Hello\nWorld", false),
            "Hello<br>World"
        );
    }

    #[test]
    fn assistant_markup_is_escaped_unless_trusted() {
        assert_eq!(
            render(EntryKind::Assistant, "<b>hi</b>\nthere", false),
            "&lt;b&gt;hi&lt;/b&gt;<br>there"
        );
        assert_eq!(
            render(EntryKind::Assistant, "<b>hi</b>\nthere", true),
            "<b>hi</b><br>there"
        );
    }

    #[test]
    fn thinking_and_error_carry_glyphs() {
        assert_eq!(render(EntryKind::Thinking, "hmm", false), "🧠 hmm");
        assert_eq!(render(EntryKind::Error, "oops", false), "⚠️ oops");
    }

    #[test]
    fn user_text_is_plain() {
        assert_eq!(render(EntryKind::User, "a < b\nc", false), "a &lt; b\nc");
    }

    #[test]
    fn push_assigns_increasing_ids_and_scroll_flags() {
        let mut transcript = Transcript::new(false);
        assert!(transcript.entries().is_empty());

        let first = transcript.push(EntryKind::User, "hi");
        let second = transcript.push(EntryKind::Error, "boom");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.auto_scroll);
        assert!(!second.auto_scroll);
        assert_eq!(second.class_name, "thinking-process error-message");
        assert_eq!(transcript.entries().len(), 2);
        assert_eq!(transcript.entries()[1].text, "boom");
    }
}
