use crate::ranking::ScoredChunk;
use crate::sanitize::sanitize_chunk;

pub const MAX_CHARS_PER_CHUNK: usize = 2200;

/// Takes the `top_k` best chunks and assembles the context handed to
/// the gate: each chunk sanitized, truncated to `max_chars_per_chunk`
/// characters and joined with a blank line. Re-sorts unconditionally,
/// so an unranked input list is still handled correctly.
///
/// The similarity of a selected chunk is recorded even when its text
/// sanitizes to nothing; the best-similarity signal must not depend on
/// how much metadata a chunk happened to carry.
pub fn build_context(
    scored: &[ScoredChunk],
    top_k: usize,
    max_chars_per_chunk: usize,
) -> (String, Vec<f32>) {
    if scored.is_empty() {
        return (String::new(), Vec::new());
    }

    let mut sorted: Vec<&ScoredChunk> = scored.iter().collect();
    sorted.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(top_k);

    let mut parts = Vec::new();
    let mut sims = Vec::new();
    for chunk in sorted {
        sims.push(chunk.similarity);
        let clean = sanitize_chunk(&chunk.text);
        if clean.is_empty() {
            continue;
        }
        let truncated: String = clean.chars().take(max_chars_per_chunk).collect();
        parts.push(truncated.trim().to_string());
    }

    (parts.join("\n\n").trim().to_string(), sims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(text: &str, similarity: f32) -> ScoredChunk {
        ScoredChunk {
            text: text.to_string(),
            similarity,
        }
    }

    #[test]
    fn empty_input_yields_empty_context() {
        let (context, sims) = build_context(&[], 3, MAX_CHARS_PER_CHUNK);
        assert_eq!(context, "");
        assert!(sims.is_empty());
    }

    #[test]
    fn selects_top_k_after_resorting() {
        let chunks = vec![
            scored("низкий", 0.1),
            scored("высокий", 0.9),
            scored("средний", 0.5),
        ];
        let (context, sims) = build_context(&chunks, 2, MAX_CHARS_PER_CHUNK);
        assert_eq!(context, "высокий\n\nсредний");
        assert_eq!(sims, vec![0.9, 0.5]);
    }

    #[test]
    fn similarity_counts_even_when_text_sanitizes_away() {
        let chunks = vec![scored("page_number: 3", 0.8), scored("Завтрак с 7:00", 0.6)];
        let (context, sims) = build_context(&chunks, 2, MAX_CHARS_PER_CHUNK);
        assert_eq!(context, "Завтрак с 7:00");
        assert_eq!(sims, vec![0.8, 0.6]);
    }

    #[test]
    fn truncates_per_chunk_by_characters() {
        let long = "щ".repeat(3000);
        let chunks = vec![scored(&long, 0.7)];
        let (context, _) = build_context(&chunks, 1, 100);
        assert_eq!(context.chars().count(), 100);
    }
}
