//! Structured tool reports.
//!
//! Tools build a [`Report`] line by line; it is rendered to plain text only
//! when handed back to the MCP client. Keeping the structure until then lets
//! tests inspect lines and outcome without parsing strings.

use rmcp::model::{CallToolResult, Content};

use super::error::ToolError;

/// Indentation unit for nested report lines.
const INDENT: &str = "  ";

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// What a report communicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The call succeeded and returned data.
    Success,
    /// The call succeeded but there was nothing to show.
    Empty,
    /// The call failed.
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    depth: usize,
    text: String,
}

/// Ordered list of report lines plus the outcome they describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    outcome: Outcome,
    lines: Vec<Line>,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    /// Start an empty success report.
    pub fn new() -> Self {
        Self {
            outcome: Outcome::Success,
            lines: Vec::new(),
        }
    }

    /// A failure report made of a single `Error: ...` line.
    pub fn failure(message: impl std::fmt::Display) -> Self {
        Self {
            outcome: Outcome::Failure,
            lines: vec![Line {
                depth: 0,
                text: format!("Error: {}", message),
            }],
        }
    }

    /// Append a top-level line.
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.item(0, text)
    }

    /// Append a line nested `depth` levels deep.
    pub fn item(&mut self, depth: usize, text: impl Into<String>) -> &mut Self {
        self.lines.push(Line {
            depth,
            text: text.into(),
        });
        self
    }

    /// Append a blank separator line.
    pub fn blank(&mut self) -> &mut Self {
        self.line(String::new())
    }

    /// Record that the query matched nothing, with a line saying so.
    pub fn empty(&mut self, text: impl Into<String>) -> &mut Self {
        if self.outcome == Outcome::Success {
            self.outcome = Outcome::Empty;
        }
        self.line(text)
    }

    /// Outcome of the report.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Whether this report describes a failure.
    pub fn is_failure(&self) -> bool {
        self.outcome == Outcome::Failure
    }

    /// Text of each line, without indentation.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }

    /// Render the report as plain text. Never empty.
    pub fn render(&self) -> String {
        let rendered = self
            .lines
            .iter()
            .map(|l| format!("{}{}", INDENT.repeat(l.depth), l.text))
            .collect::<Vec<_>>()
            .join("\n");

        let rendered = rendered.trim_end();
        if rendered.is_empty() {
            "(no output)".to_string()
        } else {
            rendered.to_string()
        }
    }

    /// Convert into the single-text-block MCP result.
    pub fn into_result(self) -> CallToolResult {
        let content = vec![Content::text(self.render())];
        if self.is_failure() {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

impl From<ToolError> for Report {
    fn from(err: ToolError) -> Self {
        Self::failure(err)
    }
}

/// Truncate `text` to `max_chars` characters, appending [`ELLIPSIS`] if cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], ELLIPSIS),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    #[test]
    fn test_render_indents_items() {
        let mut report = Report::new();
        report.line("Title").blank().line("Group").item(1, "child");

        assert_eq!(report.render(), "Title\n\nGroup\n  child");
        assert_eq!(report.outcome(), Outcome::Success);
    }

    #[test]
    fn test_render_is_never_empty() {
        assert_eq!(Report::new().render(), "(no output)");
    }

    #[test]
    fn test_empty_outcome() {
        let mut report = Report::new();
        report.line("Total: 0").empty("Nothing here.");
        assert_eq!(report.outcome(), Outcome::Empty);
        assert!(!report.is_failure());
    }

    #[test]
    fn test_failure_into_error_result() {
        let result = Report::failure("boom").into_result();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 1);
        match &result.content[0].raw {
            RawContent::Text(text) => assert_eq!(text.text, "Error: boom"),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "x".repeat(100);
        let truncated = truncate(&long, 80);
        assert_eq!(truncated, format!("{}...", "x".repeat(80)));

        assert_eq!(truncate("short", 80), "short");
        assert_eq!(truncate(&"y".repeat(80), 80), "y".repeat(80));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let accented = "é".repeat(90);
        let truncated = truncate(&accented, 80);
        assert_eq!(truncated.chars().count(), 83);
        assert!(truncated.ends_with(ELLIPSIS));
    }
}
