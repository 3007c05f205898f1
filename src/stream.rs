//! Pull-based drivers feeding chunks through the reconstruction engine.

use std::fmt::Display;

use futures_util::{Stream, StreamExt};
use tracing::{debug, warn};

use crate::lines::LineAssembler;
use crate::reconstruct::{StreamState, NETWORK_INTERRUPTED_FALLBACK};
use crate::render::RenderSink;

/// Consumes a stream of text chunks and returns the final answer text.
///
/// The sink is re-rendered after every completed logical line. A transport
/// error aborts the loop and yields the fixed network-interrupted fallback;
/// this function never fails. Awaiting the next chunk is the only suspend
/// point; everything between suspensions runs to completion in arrival
/// order.
pub async fn reconstruct_from_stream<S, E, R>(mut chunks: S, sink: &mut R) -> String
where
    S: Stream<Item = Result<String, E>> + Unpin,
    E: Display,
    R: RenderSink,
{
    let mut assembler = LineAssembler::new();
    let mut state = StreamState::new();

    while let Some(next) = chunks.next().await {
        match next {
            Ok(chunk) => {
                for line in assembler.feed(&chunk) {
                    state.consume_line(&line);
                    sink.render(state.accumulated(), state.side_html());
                }
            }
            Err(error) => {
                warn!(%error, "transport read failed mid-stream");
                sink.render(NETWORK_INTERRUPTED_FALLBACK, "");
                return NETWORK_INTERRUPTED_FALLBACK.to_string();
            }
        }
    }

    finalize(&mut assembler, &mut state, sink)
}

/// Synchronous variant for callers that already hold all chunks.
pub fn reconstruct_from_chunks<I, R>(chunks: I, sink: &mut R) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    R: RenderSink,
{
    let mut assembler = LineAssembler::new();
    let mut state = StreamState::new();

    for chunk in chunks {
        for line in assembler.feed(chunk.as_ref()) {
            state.consume_line(&line);
            sink.render(state.accumulated(), state.side_html());
        }
    }

    finalize(&mut assembler, &mut state, sink)
}

fn finalize<R: RenderSink>(
    assembler: &mut LineAssembler,
    state: &mut StreamState,
    sink: &mut R,
) -> String {
    if let Some(fragment) = assembler.flush() {
        state.push_final_fragment(&fragment);
    }

    let answer = state.final_answer();
    if state.accumulated().trim().is_empty() {
        sink.render(&answer, state.side_html());
    } else {
        sink.render(state.accumulated(), state.side_html());
    }
    debug!(chars = answer.len(), "stream reconstruction complete");
    answer
}
