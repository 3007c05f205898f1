use chat_history::HistoryStore;
use chat_stream::{
    complete_exchange, reconstruct_from_stream, NullSink, RenderSink,
    NETWORK_INTERRUPTED_FALLBACK,
};
use futures_util::stream;
use storage_backend_memory::MemoryBackend;

/// Keeps every rendered snapshot so cadence and monotonicity are checkable.
#[derive(Default)]
struct SnapshotSink {
    snapshots: Vec<String>,
}

impl RenderSink for SnapshotSink {
    fn render(&mut self, markdown: &str, side_html: &str) {
        self.snapshots.push(format!("{markdown}{side_html}"));
    }
}

fn ok_chunks(parts: &[&str]) -> impl stream::Stream<Item = Result<String, String>> + Unpin {
    stream::iter(
        parts
            .iter()
            .map(|part| Ok::<_, String>((*part).to_string()))
            .collect::<Vec<_>>(),
    )
}

#[tokio::test]
async fn renders_after_every_completed_line() {
    let mut sink = SnapshotSink::default();
    let chunks = ok_chunks(&["one\ntwo\n", "three\n"]);
    let answer = reconstruct_from_stream(chunks, &mut sink).await;

    // Three per-line renders plus the finalization render.
    assert_eq!(sink.snapshots.len(), 4);
    assert_eq!(answer, "one  \ntwo  \nthree");

    for pair in sink.snapshots.windows(2) {
        assert!(
            pair[1].starts_with(&pair[0]),
            "output must only grow: {pair:?}"
        );
    }
}

#[tokio::test]
async fn transport_error_yields_fallback_and_stops() {
    let chunks = stream::iter(vec![
        Ok("partial line that never finishes".to_string()),
        Err("connection reset".to_string()),
        Ok("never consumed\n".to_string()),
    ]);

    let mut sink = SnapshotSink::default();
    let answer = reconstruct_from_stream(chunks, &mut sink).await;

    assert_eq!(answer, NETWORK_INTERRUPTED_FALLBACK);
    assert_eq!(
        sink.snapshots.last().map(String::as_str),
        Some(NETWORK_INTERRUPTED_FALLBACK)
    );
}

#[tokio::test]
async fn exchange_appends_exactly_one_record() {
    let mut history = HistoryStore::new(MemoryBackend::new());
    let chunks = ok_chunks(&["Hello ", "there\nGeneral answer\n"]);

    let record = complete_exchange("a question", chunks, &mut NullSink, &mut history)
        .await
        .expect("append should persist");

    assert_eq!(history.len(), 1);
    assert_eq!(record.question, "a question");
    assert_eq!(record.answer, "Hello there  \nGeneral answer");
    assert_eq!(history.items()[0], record);
}

#[tokio::test]
async fn failed_exchange_records_the_fallback_once() {
    let mut history = HistoryStore::new(MemoryBackend::new());
    let chunks = stream::iter(vec![
        Ok::<_, String>("some text\n".to_string()),
        Err("timeout".to_string()),
    ]);

    let record = complete_exchange("q", chunks, &mut NullSink, &mut history)
        .await
        .expect("append should persist");

    assert_eq!(history.len(), 1);
    assert_eq!(record.answer, NETWORK_INTERRUPTED_FALLBACK);
}
