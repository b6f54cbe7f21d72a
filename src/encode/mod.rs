/// JSON Lines sink: hands a schedule to an out-of-process renderer.
pub mod jsonl;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
