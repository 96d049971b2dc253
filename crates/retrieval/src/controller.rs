use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use concierge_core::{
    build_context, evaluate_gate, rank_chunks, Chunk, GateVerdict, LowOverlapWindow, Result,
    ScoredChunk, ThresholdOverrides, MAX_CHARS_PER_CHUNK,
};

use crate::config::RetrievalConfig;

/// Final outcome of one adaptive retrieval run.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalOutcome {
    pub context: String,
    pub verdict: GateVerdict,
    pub depth_used: usize,
}

/// Runs the two-attempt retrieval protocol and keeps the rolling
/// low-overlap statistic that biases the starting depth of future
/// queries.
///
/// The window is owned here behind a mutex, so concurrent callers on
/// the same instance see consistent read-modify-write. Separate
/// instances (one per worker) drift independently, which is accepted:
/// the statistic is a soft signal, not a global invariant.
pub struct AdaptiveRetriever {
    config: RetrievalConfig,
    window: Mutex<LowOverlapWindow>,
}

impl AdaptiveRetriever {
    pub fn new(config: RetrievalConfig) -> Self {
        let window = LowOverlapWindow::new(config.window_capacity);
        Self {
            config,
            window: Mutex::new(window),
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Current rolling low-overlap failure rate.
    pub fn low_overlap_rate(&self) -> f32 {
        self.window.lock().rate()
    }

    /// Depth the next query will start at, given the rolling statistic.
    pub fn starting_depth(&self) -> usize {
        let rate = self.low_overlap_rate();
        if self.config.escalate_on_low_overlap && rate >= self.config.low_overlap_threshold {
            self.config.top_k_fallback
        } else {
            self.config.top_k_default
        }
    }

    /// Ranks the tenant's chunks, builds a context at the starting
    /// depth and evaluates the gate. On a low-overlap rejection at a
    /// depth below the fallback, retries exactly once at the fallback
    /// depth; the retry verdict replaces the first unconditionally.
    /// The final low-overlap signal is recorded into the window.
    pub fn retrieve(
        &self,
        query_text: &str,
        query_embedding: &[f32],
        chunks: &[Chunk],
        overrides: Option<&ThresholdOverrides>,
    ) -> Result<RetrievalOutcome> {
        let ranked = rank_chunks(query_embedding, chunks)?;
        let start_depth = self.starting_depth();

        let mut outcome = self.attempt(query_text, &ranked, start_depth, overrides);
        debug!(
            depth = outcome.depth_used,
            accepted = outcome.verdict.accepted,
            reason = %outcome.verdict.reason,
            "first retrieval attempt"
        );

        if outcome.verdict.reason.is_low_overlap() && start_depth < self.config.top_k_fallback {
            outcome = self.attempt(query_text, &ranked, self.config.top_k_fallback, overrides);
            debug!(
                depth = outcome.depth_used,
                accepted = outcome.verdict.accepted,
                reason = %outcome.verdict.reason,
                "escalated retrieval attempt"
            );
        }

        let is_low_overlap = outcome.verdict.reason.is_low_overlap();
        let rate = {
            let mut window = self.window.lock();
            window.push(is_low_overlap);
            window.rate()
        };
        debug!(
            low_overlap = is_low_overlap,
            rolling_rate = rate,
            "rolling window updated"
        );

        Ok(outcome)
    }

    fn attempt(
        &self,
        query_text: &str,
        ranked: &[ScoredChunk],
        depth: usize,
        overrides: Option<&ThresholdOverrides>,
    ) -> RetrievalOutcome {
        let (context, sims) = build_context(ranked, depth, MAX_CHARS_PER_CHUNK);
        let verdict = evaluate_gate(query_text, &context, &sims, overrides);
        RetrievalOutcome {
            context,
            verdict,
            depth_used: depth,
        }
    }
}
