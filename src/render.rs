//! Render seam between reconstruction and display.

/// Receives the cumulative Markdown plus the side-channel HTML after every
/// consumed line. The full text is re-rendered each time; favoring a
/// correct full conversion over incremental HTML patching is a deliberate
/// trade-off bounded by realistic response sizes.
pub trait RenderSink {
    fn render(&mut self, markdown: &str, side_html: &str);
}

/// Built-in Markdown→HTML sink (GFM so streamed tables render as tables).
///
/// Syntax highlighting is left to the embedding application; it can wrap
/// this sink or replace it entirely.
#[derive(Debug, Default)]
pub struct HtmlSink {
    html: String,
    renders: usize,
}

impl HtmlSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Output of the most recent render.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl RenderSink for HtmlSink {
    fn render(&mut self, markdown: &str, side_html: &str) {
        self.html = match markdown::to_html_with_options(markdown, &markdown::Options::gfm()) {
            Ok(html) => html,
            Err(_) => markdown::to_html(markdown),
        };
        self.html.push_str(side_html);
        self.renders += 1;
    }
}

/// Discards everything; for callers that only want the final answer text.
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _markdown: &str, _side_html: &str) {}
}
