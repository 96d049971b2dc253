use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ru,
    En,
    Other,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::En => "en",
            Lang::Other => "other",
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

static CYRILLIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[А-Яа-яЁё]").unwrap());
static LATIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]").unwrap());
static NON_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zа-я0-9\s\-]+").unwrap());

static STOPWORDS_RU: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "и", "в", "во", "на", "по", "к", "ко", "с", "со", "у", "из", "за", "для", "о", "об",
        "от", "до", "или", "а", "но", "что", "это", "как", "где", "когда", "сколько", "какой",
        "какая", "какие", "какое", "я", "мы", "вы", "они", "он", "она", "оно", "мне", "нам",
        "вам", "их", "его", "ее", "этот", "эта", "эти", "тут", "там", "здесь", "вот", "ли",
        "же", "бы", "то", "не", "нет", "да",
    ]
    .into_iter()
    .collect()
});

static STOPWORDS_EN: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "to", "of", "in", "on", "for", "with", "about", "is",
        "are", "was", "were", "be", "been", "being", "as", "at", "by", "from", "this", "that",
        "these", "those", "it", "its", "i", "we", "you", "they", "my", "our", "your", "their",
        "me", "us", "them", "please",
    ]
    .into_iter()
    .collect()
});

/// Counts Cyrillic vs Latin letters. Ties resolve to `Ru` because the
/// primary user base is Russian-speaking; no letters at all is `Other`.
pub fn detect_lang(text: &str) -> Lang {
    let cyr = CYRILLIC.find_iter(text).count();
    let lat = LATIN.find_iter(text).count();
    if cyr == 0 && lat == 0 {
        return Lang::Other;
    }
    if cyr >= lat {
        Lang::Ru
    } else {
        Lang::En
    }
}

/// Lowercases, strips everything outside `[a-zа-я0-9\-\s]`, splits on
/// whitespace, drops tokens shorter than three characters and the
/// stopwords of the detected language. `Other` keeps everything.
pub fn tokenize(text: &str, lang: Lang) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = NON_TOKEN.replace_all(&lowered, " ");
    let raw = cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() >= 3);
    match lang {
        Lang::Ru => raw
            .filter(|t| !STOPWORDS_RU.contains(*t))
            .map(str::to_string)
            .collect(),
        Lang::En => raw
            .filter(|t| !STOPWORDS_EN.contains(*t))
            .map(str::to_string)
            .collect(),
        Lang::Other => raw.map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_russian_on_tie() {
        assert_eq!(detect_lang("спа spa"), Lang::Ru);
    }

    #[test]
    fn detects_english() {
        assert_eq!(detect_lang("what time is checkout"), Lang::En);
    }

    #[test]
    fn no_letters_is_other() {
        assert_eq!(detect_lang("12:30 - 14:00"), Lang::Other);
        assert_eq!(detect_lang(""), Lang::Other);
    }

    #[test]
    fn tokenize_drops_short_tokens_and_stopwords() {
        let tokens = tokenize("Сколько стоит номер на ночь?", Lang::Ru);
        assert_eq!(tokens, vec!["стоит", "номер", "ночь"]);
    }

    #[test]
    fn tokenize_keeps_hyphenated_words() {
        let tokens = tokenize("check-in time", Lang::En);
        assert!(tokens.contains(&"check-in".to_string()));
    }

    #[test]
    fn tokenize_other_skips_stopword_filtering() {
        let tokens = tokenize("The spa", Lang::Other);
        assert_eq!(tokens, vec!["the", "spa"]);
    }
}
