use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered scrub rules for metadata that occasionally survives document
/// extraction. New leaked fields upstream get a new rule here, never a
/// gate change.
static LEAK_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bpage_number\b\s*[:=]\s*\d+",
        r"(?i)\bsimilarity\b\s*[:=]\s*[0-9.]+",
        r"(?i)\bid\b\s*[:=]\s*\d+",
        r"(?i)\bfile_name\b\s*[:=]\s*\S+",
        r"(?i)\bresults\b\s*[:=]\s*\[",
        r"(?i)\.pdf\b",
        r"(?i)\bстр\.?\s*\d+\b",
        r"(?i)\bстраниц[аы]\b\s*\d+\b",
        r"(?i)\bна\s+стр\.?\s*\d+\b",
    ]
    .into_iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Removes leaked internal markers from a retrieved chunk so they can
/// never reach a prompt or a user-facing answer.
pub fn sanitize_chunk(text: &str) -> String {
    let mut out = text.to_string();
    for pattern in LEAK_PATTERNS.iter() {
        out = pattern.replace_all(&out, " ").into_owned();
    }
    MULTI_SPACE.replace_all(&out, " ").trim().to_string()
}
