mod classify;
mod context;
mod error;
mod gate;
mod lang;
mod ranking;
mod sanitize;
mod thresholds;
mod window;

pub use classify::{classify_query, QueryType};
pub use context::{build_context, MAX_CHARS_PER_CHUNK};
pub use error::{GateError, Result};
pub use gate::{evaluate_gate, GateMetrics, GateReason, GateVerdict};
pub use lang::{detect_lang, tokenize, Lang};
pub use ranking::{cosine_similarity, rank_chunks, Chunk, ScoredChunk};
pub use sanitize::sanitize_chunk;
pub use thresholds::{GateThresholds, ThresholdOverrides};
pub use window::LowOverlapWindow;
