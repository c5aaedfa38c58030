//! Query text for a blueprint.

use examforge_core::models::{Blueprint, Profile};

/// Domain name, its keywords, and the question type phrase, joined by spaces.
/// `message` is prepended when present.
pub fn build_query(blueprint: &Blueprint, profile: &Profile, message: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(m) = message.map(str::trim).filter(|m| !m.is_empty()) {
        parts.push(m.to_string());
    }
    match profile.domain(&blueprint.domain_id) {
        Some(domain) => {
            parts.push(domain.display_name());
            parts.extend(domain.keywords.iter().cloned());
        }
        None => parts.push(blueprint.domain_id.replace('_', " ")),
    }
    if let Some(qt) = profile.question_type(&blueprint.question_type_id) {
        parts.push(qt.phrase.clone());
    }
    parts.join(" ")
}
