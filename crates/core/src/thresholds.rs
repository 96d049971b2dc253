use serde::{Deserialize, Serialize};

use crate::classify::QueryType;

/// Acceptance thresholds for one query category. Context length is
/// measured in characters, overlap ratios are per query language.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateThresholds {
    pub min_context_len: usize,
    pub min_similarity: f32,
    pub min_overlap_ru: f32,
    pub min_overlap_en: f32,
}

impl GateThresholds {
    pub fn defaults_for(query_type: QueryType) -> Self {
        match query_type {
            QueryType::Tariffs => Self {
                min_context_len: 300,
                min_similarity: 0.35,
                min_overlap_ru: 0.12,
                min_overlap_en: 0.10,
            },
            QueryType::Rules => Self {
                min_context_len: 650,
                min_similarity: 0.34,
                min_overlap_ru: 0.18,
                min_overlap_en: 0.14,
            },
            QueryType::Services => Self {
                min_context_len: 550,
                min_similarity: 0.32,
                min_overlap_ru: 0.18,
                min_overlap_en: 0.14,
            },
            QueryType::Default => Self {
                min_context_len: 650,
                min_similarity: 0.34,
                min_overlap_ru: 0.18,
                min_overlap_en: 0.14,
            },
        }
    }

    pub fn with_overrides(mut self, overrides: &ThresholdOverrides) -> Self {
        if let Some(len) = overrides.min_context_len {
            self.min_context_len = len;
        }
        if let Some(sim) = overrides.min_similarity {
            self.min_similarity = sim;
        }
        if let Some(ru) = overrides.min_overlap_ru {
            self.min_overlap_ru = ru;
        }
        if let Some(en) = overrides.min_overlap_en {
            self.min_overlap_en = en;
        }
        self
    }
}

/// Tenant-level customization, merged over the static defaults. Fields
/// the tenant leaves unset keep the defaults of the query category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ThresholdOverrides {
    #[serde(default)]
    pub min_context_len: Option<usize>,
    #[serde(default)]
    pub min_similarity: Option<f32>,
    #[serde(default)]
    pub min_overlap_ru: Option<f32>,
    #[serde(default)]
    pub min_overlap_en: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tariffs_row_matches_static_table() {
        let th = GateThresholds::defaults_for(QueryType::Tariffs);
        assert_eq!(th.min_context_len, 300);
        assert_eq!(th.min_similarity, 0.35);
    }

    #[test]
    fn overrides_merge_only_set_fields() {
        let overrides = ThresholdOverrides {
            min_similarity: Some(0.5),
            ..Default::default()
        };
        let th = GateThresholds::defaults_for(QueryType::Services).with_overrides(&overrides);
        assert_eq!(th.min_similarity, 0.5);
        assert_eq!(th.min_context_len, 550);
    }
}
