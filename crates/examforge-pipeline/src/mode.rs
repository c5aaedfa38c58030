//! Effective retrieval mode for a request.

use examforge_core::models::RetrievalMode;

/// First set value wins: request override, agent setting, profile setting,
/// then the system default.
pub fn resolve_mode(
    request: Option<RetrievalMode>,
    agent: Option<RetrievalMode>,
    profile: Option<RetrievalMode>,
    system_default: RetrievalMode,
) -> RetrievalMode {
    request.or(agent).or(profile).unwrap_or(system_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use RetrievalMode::*;

    #[test]
    fn request_override_beats_everything() {
        assert_eq!(
            resolve_mode(Some(Disabled), Some(Priority), Some(Assistive), Assistive),
            Disabled
        );
    }

    #[test]
    fn falls_through_to_default() {
        assert_eq!(resolve_mode(None, Some(Priority), None, Disabled), Priority);
        assert_eq!(resolve_mode(None, None, Some(Disabled), Priority), Disabled);
        assert_eq!(resolve_mode(None, None, None, Assistive), Assistive);
    }
}
