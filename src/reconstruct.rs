//! Per-line Markdown reconstruction.
//!
//! A streamed response arrives as logical lines with no guarantee that a
//! block construct (fence, table, blockquote) is complete yet. The state
//! machine here appends every line in a form that keeps the cumulative
//! text render-safe at all times: output only grows, and a re-render at
//! any point shows well-formed block structure.
//!
//! This is deliberately heuristic, not a CommonMark parser. The table and
//! quote rules tolerate rows/lines arriving in separate chunks; known
//! edge-case misrenders (deeply nested lists, mixed fenced/indented code)
//! are accepted in exchange for monotone, restart-safe output.

use std::sync::LazyLock;

use regex::Regex;

/// Shown when a completed stream produced no visible text.
pub const BUSY_FALLBACK: &str =
    "The assistant service is busy right now. Please try again shortly.";

/// Shown when the transport fails mid-stream.
pub const NETWORK_INTERRUPTED_FALLBACK: &str = "Network interrupted. Please retry.";

/// Marker a backend emits on the line carrying a finished video link.
pub const VIDEO_READY_MARKER: &str = "Video generation succeeded";

/// Two trailing spaces force a visual line break without a new paragraph.
const HARD_BREAK: &str = "  \n";

static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-=*_]+$").expect("horizontal rule pattern"));
static LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[+\-*]\s+|\d+\.\s+|\d+\)\s+)").expect("list pattern"));
static CODE_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*`").expect("inline code pattern"));
static PIPE_ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|.*\|$").expect("table row pattern"));
static HTTPS_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://[A-Za-z0-9.-]+\.[A-Za-z]{2,}[^)\s]*").expect("https url pattern")
});

/// Classification state for one streamed response.
///
/// Created fresh per response and discarded afterwards; only the final
/// answer text outlives it. `accumulated` and `side_html` are append-only.
#[derive(Debug, Default, Clone)]
pub struct StreamState {
    accumulated: String,
    side_html: String,
    in_code_fence: bool,
    in_quote_block: bool,
    in_table: bool,
    last_non_empty_line: Option<String>,
}

impl StreamState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn accumulated(&self) -> &str {
        &self.accumulated
    }

    #[must_use]
    pub fn side_html(&self) -> &str {
        &self.side_html
    }

    /// Classifies and appends one logical line. Deterministic; never fails.
    /// Lines matching no rule take the plain-line path.
    pub fn consume_line(&mut self, line: &str) {
        // Fence delimiters flip the mode before anything else looks at the
        // line, so the opening fence itself lands on the verbatim path and
        // the closing fence on the classified path.
        if line.trim().starts_with("```") {
            self.in_code_fence = !self.in_code_fence;
        }

        if self.in_code_fence {
            self.accumulated.push_str(line);
            self.accumulated.push_str(HARD_BREAK);
            return;
        }

        // Some transports leak the blank-line escape as two literal
        // characters; drop that suffix before classifying.
        let mut line = line;
        let trimmed = line.trim();
        if trimmed.ends_with("\\n\\n") {
            line = &trimmed[..trimmed.len() - 4];
        }

        if line.trim().is_empty() {
            return;
        }
        let trimmed = line.trim();

        // Close a blockquote visually once a non-quote line arrives.
        if !trimmed.starts_with('>') && self.in_quote_block {
            self.accumulated.push_str(HARD_BREAK);
        }
        self.in_quote_block = trimmed.starts_with('>');

        // A rule merges with the preceding paragraph unless separated.
        if RULE_RE.is_match(trimmed) {
            self.accumulated.push_str(HARD_BREAK);
        }

        let is_list_item = LIST_RE.is_match(line);
        let is_table_row = self.classify_table_row(line, trimmed);
        if self.in_table && !is_table_row {
            self.accumulated.push_str("  \n\n");
        }
        self.in_table = is_table_row;
        self.last_non_empty_line = Some(line.to_string());

        self.accumulated.push_str(line);
        self.accumulated
            .push_str(if is_list_item { "  \n\n" } else { HARD_BREAK });

        if line.contains(VIDEO_READY_MARKER) {
            if let Some(url) = HTTPS_URL_RE.find(line) {
                self.push_video_embed(url.as_str());
            }
        }
    }

    /// Streamed tables arrive row by row, so any pipe-bearing line that
    /// follows another pipe-bearing line is kept inside the same table.
    /// Inline code spans are stripped first so `a | b` inside backticks
    /// does not fake a row.
    fn classify_table_row(&self, line: &str, trimmed: &str) -> bool {
        let without_code_spans = CODE_SPAN_RE.replace_all(trimmed, "");
        if PIPE_ROW_RE.is_match(&without_code_spans) {
            return true;
        }
        if !line.contains('|') {
            return false;
        }
        self.last_non_empty_line
            .as_deref()
            .is_some_and(|previous| previous.contains('|'))
    }

    fn push_video_embed(&mut self, url: &str) {
        self.side_html.push_str("  <br/>");
        self.side_html.push_str(&format!(
            "<video width=\"320\" height=\"240\" controls>\
             <source src=\"{url}\" type=\"video/mp4\">\
             Your browser does not support video playback.</video>"
        ));
        self.side_html.push_str("  <br/>");
    }

    /// Appends the unterminated stream-end fragment without classification.
    pub fn push_final_fragment(&mut self, fragment: &str) {
        self.accumulated.push_str(fragment);
        self.accumulated.push('\n');
    }

    /// Final answer text; an effectively empty stream yields the busy
    /// fallback rather than an empty string.
    #[must_use]
    pub fn final_answer(&self) -> String {
        let answer = self.accumulated.trim();
        if answer.is_empty() {
            BUSY_FALLBACK.to_string()
        } else {
            answer.to_string()
        }
    }
}
