mod compose;
mod config;
mod controller;

pub use compose::compose_prompt;
pub use config::{
    RetrievalConfig, DEFAULT_LOW_OVERLAP_THRESHOLD, DEFAULT_TOP_K, DEFAULT_WINDOW_CAPACITY,
    FALLBACK_TOP_K,
};
pub use controller::{AdaptiveRetriever, RetrievalOutcome};

pub use concierge_core::{
    evaluate_gate, Chunk, GateMetrics, GateReason, GateVerdict, Result, ThresholdOverrides,
};

use concierge_core::{build_context, rank_chunks, MAX_CHARS_PER_CHUNK};

/// Scores the tenant's chunks against the query embedding and builds a
/// sanitized context at the given depth. One-shot boundary for callers
/// that do not want the adaptive protocol.
pub fn rank_and_build(
    query_embedding: &[f32],
    chunks: &[Chunk],
    top_k: usize,
) -> Result<(String, Vec<f32>)> {
    let ranked = rank_chunks(query_embedding, chunks)?;
    Ok(build_context(&ranked, top_k, MAX_CHARS_PER_CHUNK))
}
