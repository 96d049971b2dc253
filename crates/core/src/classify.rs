use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Tariffs,
    Rules,
    Services,
    Default,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Tariffs => "tariffs",
            QueryType::Rules => "rules",
            QueryType::Services => "services",
            QueryType::Default => "default",
        }
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const TARIFF_KEYWORDS: &[&str] = &[
    "цена", "стоимость", "сколько стоит", "тариф", "прайс", "заезд", "выезд", "ноч", "прожив",
];

const RULES_KEYWORDS: &[&str] = &[
    "правил", "нельзя", "запрет", "штраф", "курить", "документ", "ответствен", "выселен",
    "возмещен",
];

/// Keyword-presence classification of the raw query. Tariff keywords
/// win over rules keywords when both match; everything else is a
/// services question. `Default` is never produced here, it only names
/// the fallback threshold row.
pub fn classify_query(query: &str) -> QueryType {
    let lowered = query.to_lowercase();
    if TARIFF_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return QueryType::Tariffs;
    }
    if RULES_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return QueryType::Rules;
    }
    QueryType::Services
}
