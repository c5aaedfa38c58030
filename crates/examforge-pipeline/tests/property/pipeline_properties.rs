//! Property tests for the attempt loop and mode resolution.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use proptest::prelude::*;

use examforge_core::errors::{ForgeResult, ProviderError};
use examforge_core::models::{GenerationParams, PromptPayload, RetrievalMode};
use examforge_core::traits::IHistoryStore;
use examforge_core::ForgeConfig;
use examforge_embeddings::HashingEmbedder;
use examforge_pipeline::{
    resolve_mode, AttemptState, Collaborators, FormatRule, GenerationRequest,
    InMemoryProfileStore, QuestionGenerator,
};
use examforge_retrieval::InMemoryVectorIndex;
use examforge_session::{InMemoryHistoryStore, InMemorySignatureStore};
use test_fixtures::{load_chunks, security_profile};

const REPEATED: &str = "Which protocol provides encrypted remote shell access?\n\
    A) SSH\n\
    B) Telnet\n\
    Correct: A";

#[derive(Debug, Clone, Copy)]
enum Behavior {
    Unique,
    Repeat,
    Malformed,
    Fail,
}

fn behavior() -> impl Strategy<Value = Behavior> {
    prop_oneof![
        Just(Behavior::Unique),
        Just(Behavior::Repeat),
        Just(Behavior::Malformed),
        Just(Behavior::Fail),
    ]
}

fn mode() -> impl Strategy<Value = RetrievalMode> {
    prop_oneof![
        Just(RetrievalMode::Disabled),
        Just(RetrievalMode::Assistive),
        Just(RetrievalMode::Priority),
    ]
}

/// Cycles through a fixed behavior script.
struct RandomProvider {
    script: Vec<Behavior>,
    calls: AtomicUsize,
    unique: Mutex<usize>,
}

impl RandomProvider {
    fn new(script: Vec<Behavior>) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            unique: Mutex::new(0),
        }
    }
}

impl examforge_core::traits::IGenerationProvider for RandomProvider {
    fn generate(&self, _: &PromptPayload, _: &GenerationParams) -> ForgeResult<String> {
        let i = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script[i % self.script.len()] {
            Behavior::Unique => {
                let mut n = self.unique.lock().unwrap();
                *n += 1;
                let stem: Vec<String> = (0..5).map(|k| format!("word{n}v{k}")).collect();
                Ok(format!("{}?\nA) yes{n}\nB) no{n}\nCorrect: B", stem.join(" ")))
            }
            Behavior::Repeat => Ok(REPEATED.to_string()),
            Behavior::Malformed => Ok("an answer without a question".to_string()),
            Behavior::Fail => Err(ProviderError::RateLimited {
                provider: "random".into(),
            }
            .into()),
        }
    }

    fn name(&self) -> &str {
        "random"
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn attempts_stay_within_budget(
        script in prop::collection::vec(behavior(), 1..8),
        max_attempts in 1u32..5,
        requests in 1usize..4,
    ) {
        let mut config = ForgeConfig::default();
        config.generation.max_attempts = max_attempts;
        config.generation.random_seed = Some(3);

        let embedder = Arc::new(HashingEmbedder::new(128));
        let index = InMemoryVectorIndex::build(load_chunks("security_chunks.json"), embedder.as_ref())
            .unwrap();
        let history = Arc::new(InMemoryHistoryStore::new());
        let generator = QuestionGenerator::new(
            config,
            Collaborators {
                profiles: Arc::new(InMemoryProfileStore::new().with_profile(security_profile())),
                index: Arc::new(index),
                embedder,
                provider: Arc::new(RandomProvider::new(script)),
                history: history.clone(),
                signatures: Arc::new(InMemorySignatureStore::new()),
            },
        )
        .unwrap();

        for n in 1..=requests {
            let result = generator.generate(&GenerationRequest::new("prop", "security_cert"));
            // Selection is recorded whether or not generation succeeds.
            prop_assert_eq!(history.len("prop").unwrap(), n);

            if let Ok(out) = result {
                prop_assert!(!out.attempts.is_empty());
                prop_assert!(out.attempts.len() <= max_attempts as usize);
                let last = out.attempts.last().unwrap().state;
                if out.is_accepted() {
                    prop_assert_eq!(last, AttemptState::Accepted);
                    prop_assert!(out.attempts[..out.attempts.len() - 1]
                        .iter()
                        .all(|a| a.state.is_retryable()));
                } else {
                    prop_assert!(out.exhausted);
                    prop_assert_eq!(out.attempts.len(), max_attempts as usize);
                }
                for (i, a) in out.attempts.iter().enumerate() {
                    prop_assert_eq!(a.attempt as usize, i + 1);
                }
            }
        }
    }

    #[test]
    fn first_set_mode_wins(
        request in prop::option::of(mode()),
        agent in prop::option::of(mode()),
        profile in prop::option::of(mode()),
        default in mode(),
    ) {
        let resolved = resolve_mode(request, agent, profile, default);
        let expected = [request, agent, profile]
            .into_iter()
            .flatten()
            .next()
            .unwrap_or(default);
        prop_assert_eq!(resolved, expected);
    }

    #[test]
    fn format_check_never_panics(text in "\\PC{0,200}") {
        for rule in [FormatRule::None, FormatRule::MultipleChoice, FormatRule::YesNo, FormatRule::Numeric] {
            let _ = rule.check(&text);
        }
        prop_assert!(FormatRule::None.check(&text).is_ok());
    }
}
