use examforge_core::errors::{ConfigError, ProfileIssue};
use examforge_core::models::*;
use examforge_core::validation::{ensure_valid, validate_profile};

fn qt(id: &str, level: &str) -> QuestionType {
    QuestionType {
        id: id.into(),
        phrase: format!("{id} phrase"),
        guidance: String::new(),
        difficulty_level_id: level.into(),
    }
}

fn base_profile() -> Profile {
    let mut difficulty = DifficultyProfile::default();
    difficulty.enabled_levels = vec!["1".into(), "2".into(), "3".into()];
    difficulty.weights.insert("1".into(), 0.10);
    difficulty.weights.insert("2".into(), 0.35);
    difficulty.weights.insert("3".into(), 0.55);
    Profile {
        profile_id: "demo".into(),
        name: "Demo".into(),
        domains: vec![Domain {
            id: "network_security".into(),
            name: "Network Security".into(),
            keywords: vec!["firewall".into()],
            priority: 1,
        }],
        question_types: vec![qt("definition", "1"), qt("scenario", "2"), qt("best", "3")],
        reasoning_modes: vec![ReasoningMode {
            id: "risk_based".into(),
            name: "Risk-based".into(),
            description: String::new(),
        }],
        difficulty,
        retrieval_mode: None,
    }
}

// ── valid profiles ──

#[test]
fn well_formed_profile_passes() {
    assert!(validate_profile(&base_profile(), DifficultyRegistry::global()).is_ok());
}

// ── structural issues ──

#[test]
fn enabled_level_without_question_types_is_reported() {
    let mut profile = base_profile();
    profile.question_types.retain(|q| q.difficulty_level_id != "2");
    let issues = validate_profile(&profile, DifficultyRegistry::global()).unwrap_err();
    assert_eq!(
        issues,
        vec![ProfileIssue::LevelWithoutQuestionTypes {
            level_id: "2".into()
        }]
    );
}

#[test]
fn disabled_level_without_question_types_is_fine() {
    let mut profile = base_profile();
    profile.question_types.retain(|q| q.difficulty_level_id != "1");
    profile.difficulty.enabled_levels = vec!["2".into(), "3".into()];
    assert!(validate_profile(&profile, DifficultyRegistry::global()).is_ok());
}

#[test]
fn every_issue_is_collected() {
    let mut profile = base_profile();
    profile.domains.clear();
    profile.difficulty.enabled_levels.clear();
    profile.difficulty.weights.insert("3".into(), -1.0);
    profile.question_types.push(qt("definition", "7"));

    let issues = validate_profile(&profile, DifficultyRegistry::global()).unwrap_err();
    assert!(issues.contains(&ProfileIssue::NoDomains));
    assert!(issues.contains(&ProfileIssue::NoEnabledLevels));
    assert!(issues.contains(&ProfileIssue::DuplicateId {
        kind: "question type".into(),
        id: "definition".into(),
    }));
    assert!(issues.contains(&ProfileIssue::QuestionTypeUnregisteredLevel {
        question_type_id: "definition".into(),
        level_id: "7".into(),
    }));
    assert!(issues
        .iter()
        .any(|i| matches!(i, ProfileIssue::InvalidWeight { level_id, .. } if level_id == "3")));
}

#[test]
fn unregistered_enabled_level_is_reported() {
    let mut profile = base_profile();
    profile.difficulty.enabled_levels.push("4".into());
    profile.question_types.push(qt("design", "4"));
    let issues = validate_profile(&profile, DifficultyRegistry::global()).unwrap_err();
    assert!(issues.contains(&ProfileIssue::UnregisteredLevel {
        level_id: "4".into()
    }));

    let extended = DifficultyRegistry::standard().with_level(GlobalDifficultyLevel::new(
        "4",
        "Synthesis",
        &["design"],
        "Combine concepts.",
    ));
    assert!(validate_profile(&profile, &extended).is_ok());
}

#[test]
fn repeated_enabled_level_is_reported_once() {
    let mut profile = base_profile();
    profile.difficulty.enabled_levels = vec!["1".into(), "1".into(), "2".into()];
    let issues = validate_profile(&profile, DifficultyRegistry::global()).unwrap_err();
    assert_eq!(
        issues,
        vec![ProfileIssue::DuplicateId {
            kind: "enabled level".into(),
            id: "1".into(),
        }]
    );
}

#[test]
fn ensure_valid_wraps_issues_in_config_error() {
    let mut profile = base_profile();
    profile.reasoning_modes.clear();
    let err = ensure_valid(&profile, DifficultyRegistry::global()).unwrap_err();
    match err {
        ConfigError::InvalidProfile { profile_id, issues } => {
            assert_eq!(profile_id, "demo");
            assert_eq!(issues.0, vec![ProfileIssue::NoReasoningModes]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ── JSON shape ──

#[test]
fn profile_document_deserializes_from_json() {
    let json = r#"{
        "profiles": [{
            "profile_id": "mini",
            "domains": [{"id": "crypto", "keywords": ["cipher"]}],
            "question_types": [{"id": "def", "phrase": "What is?", "difficulty_level": "1"}],
            "reasoning_modes": [{"id": "technical"}],
            "difficulty_profile": {"enabled_levels": ["1"], "weights": {"1": 1.0}},
            "retrieval_mode": "priority"
        }]
    }"#;
    let doc: ProfileDocument = serde_json::from_str(json).unwrap();
    let profile = &doc.profiles[0];
    assert_eq!(profile.retrieval_mode, Some(RetrievalMode::Priority));
    assert_eq!(profile.domain("crypto").unwrap().display_name(), "Crypto");
    assert!(validate_profile(profile, DifficultyRegistry::global()).is_ok());
}
