//! Domain hint detection from a free-text request message.

use examforge_core::models::Profile;

/// The profile domain whose keywords appear most often in `message`.
///
/// Matching is case-insensitive substring search, one point per distinct
/// keyword. Ties go to the domain listed first. No hits yields `None`.
pub fn detect_domain_hint(message: &str, profile: &Profile) -> Option<String> {
    let haystack = message.to_lowercase();
    if haystack.trim().is_empty() {
        return None;
    }
    let mut best: Option<(&str, usize)> = None;
    for domain in &profile.domains {
        let score = domain
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty() && haystack.contains(k.as_str()))
            .count();
        if score == 0 {
            continue;
        }
        match best {
            Some((_, top)) if top >= score => {}
            _ => best = Some((domain.id.as_str(), score)),
        }
    }
    best.map(|(id, _)| id.to_string())
}
