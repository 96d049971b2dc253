use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::classify::{classify_query, QueryType};
use crate::lang::{detect_lang, tokenize, Lang};
use crate::thresholds::{GateThresholds, ThresholdOverrides};

/// Why the gate accepted or rejected a context. The `Display` rendering
/// is the wire-stable form persisted by the logging collaborator; the
/// enum itself is what code should match on.
#[derive(Debug, Clone, PartialEq)]
pub enum GateReason {
    EmptyContext,
    TooShort {
        query_type: QueryType,
    },
    LowSimilarity {
        query_type: QueryType,
        best: f32,
    },
    LowOverlap {
        query_type: QueryType,
        lang: Lang,
        overlap: f32,
    },
    Ok {
        query_type: QueryType,
        lang: Lang,
    },
}

impl GateReason {
    pub fn is_low_overlap(&self) -> bool {
        matches!(self, GateReason::LowOverlap { .. })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, GateReason::Ok { .. })
    }
}

impl fmt::Display for GateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateReason::EmptyContext => write!(f, "empty_context"),
            GateReason::TooShort { query_type } => write!(f, "too_short:{query_type}"),
            GateReason::LowSimilarity { query_type, best } => {
                write!(f, "low_similarity:{query_type}:{best:.2}")
            }
            GateReason::LowOverlap {
                query_type,
                lang,
                overlap,
            } => write!(f, "low_overlap:{query_type}:{lang}:{overlap:.2}"),
            GateReason::Ok { query_type, lang } => write!(f, "ok:{query_type}:{lang}"),
        }
    }
}

impl Serialize for GateReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Diagnostics attached to every verdict. Fields stay unset when the
/// gate short-circuited before computing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GateMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<QueryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_len: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_similarity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<Lang>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_tokens: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateVerdict {
    pub accepted: bool,
    pub reason: GateReason,
    pub metrics: GateMetrics,
}

impl GateVerdict {
    fn rejected(reason: GateReason, metrics: GateMetrics) -> Self {
        Self {
            accepted: false,
            reason,
            metrics,
        }
    }
}

/// Decides whether a built context is strong enough evidence to answer
/// from. Checks run in order and short-circuit on the first failure:
/// empty context, context length, best similarity, then lexical overlap
/// between query and context. Overlap is only enforced when the query
/// contributes at least four distinct meaningful tokens; shorter
/// queries make the ratio statistically meaningless.
///
/// Pure and deterministic; similarity scores come in precomputed and
/// are never recalculated here.
pub fn evaluate_gate(
    query: &str,
    context: &str,
    sims: &[f32],
    overrides: Option<&ThresholdOverrides>,
) -> GateVerdict {
    if context.is_empty() {
        return GateVerdict::rejected(GateReason::EmptyContext, GateMetrics::default());
    }

    let query_type = classify_query(query);
    let mut thresholds = GateThresholds::defaults_for(query_type);
    if let Some(overrides) = overrides {
        thresholds = thresholds.with_overrides(overrides);
    }

    let context_len = context.chars().count();
    let best = sims
        .iter()
        .copied()
        .fold(None::<f32>, |acc, s| Some(acc.map_or(s, |b| b.max(s))));

    let mut metrics = GateMetrics {
        query_type: Some(query_type),
        context_len: Some(context_len),
        best_similarity: best,
        ..Default::default()
    };

    if context_len < thresholds.min_context_len {
        return GateVerdict::rejected(GateReason::TooShort { query_type }, metrics);
    }

    if let Some(best) = best {
        if best < thresholds.min_similarity {
            return GateVerdict::rejected(GateReason::LowSimilarity { query_type, best }, metrics);
        }
    }

    let lang = detect_lang(query);
    let min_overlap = match lang {
        Lang::Ru => thresholds.min_overlap_ru,
        Lang::En | Lang::Other => thresholds.min_overlap_en,
    };

    let query_tokens: HashSet<String> = tokenize(query, lang).into_iter().collect();
    let context_tokens: HashSet<String> = tokenize(context, lang).into_iter().collect();
    let key_tokens = query_tokens.len();
    let overlap = if query_tokens.is_empty() {
        0.0
    } else {
        query_tokens.intersection(&context_tokens).count() as f32 / key_tokens.max(1) as f32
    };

    metrics.overlap = Some(overlap);
    metrics.lang = Some(lang);
    metrics.key_tokens = Some(key_tokens);

    if key_tokens >= 4 && overlap < min_overlap {
        return GateVerdict::rejected(
            GateReason::LowOverlap {
                query_type,
                lang,
                overlap,
            },
            metrics,
        );
    }

    GateVerdict {
        accepted: true,
        reason: GateReason::Ok { query_type, lang },
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_render_legacy_strings() {
        let reason = GateReason::LowSimilarity {
            query_type: QueryType::Tariffs,
            best: 0.2,
        };
        assert_eq!(reason.to_string(), "low_similarity:tariffs:0.20");
        let reason = GateReason::LowOverlap {
            query_type: QueryType::Services,
            lang: Lang::Ru,
            overlap: 0.05,
        };
        assert_eq!(reason.to_string(), "low_overlap:services:ru:0.05");
        assert_eq!(GateReason::EmptyContext.to_string(), "empty_context");
    }

    #[test]
    fn reason_serializes_as_string() {
        let reason = GateReason::Ok {
            query_type: QueryType::Rules,
            lang: Lang::En,
        };
        assert_eq!(
            serde_json::to_string(&reason).unwrap(),
            "\"ok:rules:en\""
        );
    }

    #[test]
    fn empty_context_short_circuits_with_empty_metrics() {
        let verdict = evaluate_gate("сколько стоит номер", "", &[0.9], None);
        assert!(!verdict.accepted);
        assert_eq!(verdict.reason, GateReason::EmptyContext);
        assert_eq!(verdict.metrics, GateMetrics::default());
        assert_eq!(serde_json::to_string(&verdict.metrics).unwrap(), "{}");
    }

    #[test]
    fn short_context_rejects_before_similarity_and_overlap() {
        let verdict = evaluate_gate(
            "сколько стоит номер за ночь с завтраком",
            "Номер стоит 4500 рублей за ночь.",
            &[0.9],
            None,
        );
        assert!(!verdict.accepted);
        assert_eq!(verdict.reason.to_string(), "too_short:tariffs");
        assert_eq!(verdict.metrics.context_len, Some(32));
        assert_eq!(verdict.metrics.best_similarity, Some(0.9));
        // Short-circuited before the lexical stage ran.
        assert_eq!(verdict.metrics.overlap, None);
        assert_eq!(verdict.metrics.lang, None);
        assert_eq!(verdict.metrics.key_tokens, None);
    }

    #[test]
    fn missing_similarities_skip_the_similarity_check() {
        let context = "номер стоит 5000 рублей за ночь ".repeat(12);
        let verdict = evaluate_gate("сколько стоит номер за ночь", &context, &[], None);
        assert!(verdict.accepted);
    }

    #[test]
    fn overlap_not_enforced_below_four_key_tokens() {
        // Three meaningful tokens and a context sharing none of them.
        let context = "бассейн работает ежедневно с восьми утра до позднего вечера "
            .repeat(10);
        let verdict = evaluate_gate("сколько стоит номер", &context, &[0.9], None);
        assert!(verdict.accepted, "reason: {}", verdict.reason);
        assert_eq!(verdict.metrics.key_tokens, Some(2));
    }
}
