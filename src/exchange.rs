//! Stream-completion glue.
//!
//! A record is appended exactly once per response, at stream completion —
//! success or terminal failure — never partially mid-stream.

use std::fmt::Display;

use chat_history::{HistoryError, HistoryRecord, HistoryStore};
use futures_util::Stream;
use storage_backend::StorageBackend;

use crate::render::RenderSink;
use crate::stream::reconstruct_from_stream;

/// Runs one full question/answer exchange: reconstructs the streamed
/// answer (re-rendering through `sink` as it grows), then appends the
/// finished record to `history`.
///
/// Transport failures surface as the fallback answer text, still recorded
/// once; only persistence failures propagate as errors.
pub async fn complete_exchange<S, E, R, B>(
    question: &str,
    chunks: S,
    sink: &mut R,
    history: &mut HistoryStore<B>,
) -> Result<HistoryRecord, HistoryError>
where
    S: Stream<Item = Result<String, E>> + Unpin,
    E: Display,
    R: RenderSink,
    B: StorageBackend,
{
    let answer = reconstruct_from_stream(chunks, sink).await;
    history.append(question, &answer)
}
