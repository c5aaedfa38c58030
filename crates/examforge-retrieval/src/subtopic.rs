//! Subtopic extraction from outline chunks.

use std::sync::OnceLock;

use regex::Regex;

static SECTION_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
static WHITESPACE: OnceLock<Option<Regex>> = OnceLock::new();

fn section_patterns() -> &'static [Regex] {
    SECTION_PATTERNS.get_or_init(|| {
        [
            // "1.2.3 Title"
            r"[\d.]+\s+([A-Z][^\n\r.]{10,80})",
            // "• Title", "- Title", "* Title"
            r"[•\-*]\s+([A-Z][^\n\r.]{10,80})",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    })
}

fn collapse_whitespace(s: &str) -> String {
    match WHITESPACE.get_or_init(|| Regex::new(r"\s+").ok()) {
        Some(re) => re.replace_all(s, " ").into_owned(),
        None => s.to_string(),
    }
}

/// A subtopic title from numbered-section or bullet lines, else the first
/// sentence of 21–149 characters, else `None`.
pub fn extract_subtopic<S: AsRef<str>>(outline_chunks: &[S]) -> Option<String> {
    for chunk in outline_chunks {
        for re in section_patterns() {
            if let Some(m) = re.captures(chunk.as_ref()).and_then(|c| c.get(1)) {
                let title = collapse_whitespace(m.as_str().trim());
                let len = title.chars().count();
                if len > 10 && len < 100 {
                    return Some(title);
                }
            }
        }
    }
    for chunk in outline_chunks {
        for sentence in chunk.as_ref().split('.') {
            let sentence = sentence.trim();
            let len = sentence.chars().count();
            if len > 20 && len < 150 {
                return Some(sentence.to_string());
            }
        }
    }
    None
}
