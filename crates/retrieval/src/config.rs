use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_TOP_K: usize = 3;
pub const FALLBACK_TOP_K: usize = 5;
pub const DEFAULT_WINDOW_CAPACITY: usize = 50;
pub const DEFAULT_LOW_OVERLAP_THRESHOLD: f32 = 0.25;

/// Knobs of the two-attempt retrieval protocol. Sourced from tenant
/// settings or the environment by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Depth of the first retrieval attempt.
    pub top_k_default: usize,
    /// Depth of the single escalation retry.
    pub top_k_fallback: usize,
    /// Capacity of the rolling low-overlap window.
    pub window_capacity: usize,
    /// Rolling failure rate at which new queries start deep.
    pub low_overlap_threshold: f32,
    /// Whether a high failure rate escalates the starting depth at all.
    pub escalate_on_low_overlap: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k_default: DEFAULT_TOP_K,
            top_k_fallback: FALLBACK_TOP_K,
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            low_overlap_threshold: DEFAULT_LOW_OVERLAP_THRESHOLD,
            escalate_on_low_overlap: true,
        }
    }
}

impl RetrievalConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            top_k_default: env_parse("RAG_TOPK_DEFAULT", defaults.top_k_default),
            top_k_fallback: env_parse("RAG_TOPK_FALLBACK", defaults.top_k_fallback),
            window_capacity: env_parse("RAG_LOW_OVERLAP_WINDOW", defaults.window_capacity),
            low_overlap_threshold: env_parse(
                "RAG_LOW_OVERLAP_THRESHOLD",
                defaults.low_overlap_threshold,
            ),
            escalate_on_low_overlap: env_flag(
                "RAG_LOW_OVERLAP_START_TOPK5",
                defaults.escalate_on_low_overlap,
            ),
        }
    }
}

fn env_parse<T: std::str::FromStr>(var: &str, default: T) -> T {
    env::var(var)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_flag(var: &str, default: bool) -> bool {
    match env::var(var) {
        Ok(value) => matches!(
            value.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}
