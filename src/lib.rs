//! Progressively-valid Markdown reconstruction for live chat streams.
//!
//! The transport hands over text chunks cut at unpredictable byte
//! boundaries. [`LineAssembler`] reassembles complete logical lines,
//! [`StreamState`] classifies and accumulates them into Markdown that is
//! render-safe after every increment (no unterminated fences, broken
//! tables, or orphaned blockquotes), and a [`RenderSink`] receives the
//! cumulative text after each line for live display. On completion,
//! [`complete_exchange`] records the finished answer into the bounded,
//! durable [`chat_history::HistoryStore`].
//!
//! No network I/O happens here; callers own the transport and feed chunks
//! through [`reconstruct_from_stream`] or [`reconstruct_from_chunks`].

pub mod exchange;
pub mod lines;
pub mod reconstruct;
pub mod render;
pub mod stream;

pub use exchange::complete_exchange;
pub use lines::LineAssembler;
pub use reconstruct::{
    StreamState, BUSY_FALLBACK, NETWORK_INTERRUPTED_FALLBACK, VIDEO_READY_MARKER,
};
pub use render::{HtmlSink, NullSink, RenderSink};
pub use stream::{reconstruct_from_chunks, reconstruct_from_stream};
