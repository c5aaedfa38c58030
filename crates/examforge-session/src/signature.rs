//! Question signature: stem plus correct answer letter.

use std::sync::OnceLock;

use regex::Regex;

static ANSWER_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn answer_patterns() -> &'static [Regex] {
    ANSWER_PATTERNS.get_or_init(|| {
        [
            r"(?im)(?:correct|answer):\s*([A-D])\b",
            r"(?i)\*\*([A-D])\*\*",
            r"(?im)^([A-D])\)",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    })
}

/// Stem line and correct answer letter, if both can be found.
pub fn parse_signature(text: &str) -> Option<(String, char)> {
    let stem = text
        .lines()
        .map(str::trim)
        .find(|line| line.contains('?'))?
        .to_string();
    let letter = answer_patterns().iter().find_map(|re| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().chars().next())
    })?;
    Some((stem, letter.to_ascii_uppercase()))
}

/// `"<stem>\nCorrect: <X>"`, or the trimmed text when no signature is found.
pub fn extract_signature(text: &str) -> String {
    match parse_signature(text) {
        Some((stem, letter)) => format!("{stem}\nCorrect: {letter}"),
        None => text.trim().to_string(),
    }
}
