/// Companion line protocol
/// Classifies tagged stdout lines and normalizes user submissions for stdin.

/// Placeholder shown in the transcript for an empty submission
pub const DEFAULT_SUBMISSION_PLACEHOLDER: &str = "↩︎ (default)";

const THINK_TAG: &str = "[THINK]";
const RESULT_TAG: &str = "[RESULT]";
const ERROR_TAG: &str = "[ERROR]";

/// A classified stdout line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggedLine {
    /// `[THINK]` interim reasoning note
    Think(String),
    /// `[RESULT]` final answer
    Result(String),
    /// `[ERROR]` error to surface
    Error(String),
    /// Any other non-empty line
    Plain(String),
}

/// Classify one stdout line. Returns `None` for blank lines.
pub fn classify(line: &str) -> Option<TaggedLine> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let tagged = if let Some(rest) = strip_tag(line, THINK_TAG) {
        TaggedLine::Think(rest)
    } else if let Some(rest) = strip_tag(line, RESULT_TAG) {
        TaggedLine::Result(rest)
    } else if let Some(rest) = strip_tag(line, ERROR_TAG) {
        TaggedLine::Error(rest)
    } else {
        TaggedLine::Plain(line.to_string())
    };

    Some(tagged)
}

/// Drop the tag and the one separator character after it
fn strip_tag(line: &str, tag: &str) -> Option<String> {
    let rest = line.strip_prefix(tag)?;
    let mut chars = rest.chars();
    chars.next();
    Some(chars.as_str().to_string())
}

/// An outgoing user submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Bytes written to the companion's stdin, newline included
    pub payload: String,
    /// Text shown in the transcript as the user entry
    pub display: String,
}

impl Submission {
    /// Build the outgoing line for raw input text.
    ///
    /// Whitespace-only input is sent as a single space, which the companion trims to an
    /// empty string and treats as "use the default".
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self {
                payload: " \n".to_string(),
                display: DEFAULT_SUBMISSION_PLACEHOLDER.to_string(),
            }
        } else {
            Self {
                payload: format!("{}\n", trimmed),
                display: trimmed.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("   \t\r\n"), None);
    }

    #[test]
    fn tags_strip_prefix_and_separator() {
        assert_eq!(
            classify("[THINK] checking the disk"),
            Some(TaggedLine::Think("checking the disk".to_string()))
        );
        assert_eq!(
            classify("[RESULT] done"),
            Some(TaggedLine::Result("done".to_string()))
        );
        assert_eq!(
            classify("[ERROR] no such file"),
            Some(TaggedLine::Error("no such file".to_string()))
        );
    }

    #[test]
    fn internal_whitespace_is_preserved() {
        assert_eq!(
            classify("  [RESULT]   spaced   out  "),
            Some(TaggedLine::Result("  spaced   out".to_string()))
        );
    }

    #[test]
    fn separator_is_dropped_whatever_it_is() {
        assert_eq!(
            classify("[THINK]:why"),
            Some(TaggedLine::Think("why".to_string()))
        );
        assert_eq!(classify("[ERROR]"), Some(TaggedLine::Error(String::new())));
    }

    #[test]
    fn separator_counts_characters_not_bytes() {
        assert_eq!(
            classify("[RESULT]：完成"),
            Some(TaggedLine::Result("完成".to_string()))
        );
    }

    #[test]
    fn untagged_lines_are_plain() {
        assert_eq!(
            classify("  What should the file be called?  "),
            Some(TaggedLine::Plain("What should the file be called?".to_string()))
        );
        assert_eq!(
            classify("[System] Ready."),
            Some(TaggedLine::Plain("[System] Ready.".to_string()))
        );
    }

    #[test]
    fn whitespace_submission_sends_single_space() {
        for raw in ["", "   ", "\t \n"] {
            let submission = Submission::from_input(raw);
            assert_eq!(submission.payload, " \n");
            assert_eq!(submission.display, DEFAULT_SUBMISSION_PLACEHOLDER);
        }
    }

    #[test]
    fn submission_is_trimmed() {
        let submission = Submission::from_input("  hi  ");
        assert_eq!(submission.payload, "hi\n");
        assert_eq!(submission.display, "hi");
    }
}
