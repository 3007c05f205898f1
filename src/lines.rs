//! Chunk-to-line reassembly.

/// Incremental splitter turning arbitrarily-chunked text into complete
/// logical lines.
///
/// Network reads give no alignment guarantee, so the trailing fragment of
/// every chunk is carried into the next [`feed`](Self::feed) call. Pure
/// buffering; no failure modes.
#[derive(Debug, Default)]
pub struct LineAssembler {
    carry: String,
}

impl LineAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `chunk` to the carry buffer and drains every fully
    /// terminated line (`\n` or `\r\n`).
    pub fn feed(&mut self, chunk: &str) -> Vec<String> {
        self.carry.push_str(chunk);

        let mut lines = Vec::new();
        while let Some(terminator) = self.carry.find('\n') {
            let mut line: String = self.carry.drain(..=terminator).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }
        lines
    }

    /// Hands back the unterminated remainder at stream end, if any
    /// non-whitespace content is pending. The caller treats it as one last
    /// logical line.
    pub fn flush(&mut self) -> Option<String> {
        let carry = std::mem::take(&mut self.carry);
        if carry.trim().is_empty() {
            None
        } else {
            Some(carry)
        }
    }

    #[must_use]
    pub fn pending(&self) -> &str {
        &self.carry
    }
}
