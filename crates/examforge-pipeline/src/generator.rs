//! QuestionGenerator: the per-request state machine.
//!
//! Selection and retrieval run once per request. Only generation is retried:
//! a format rejection, a repeat rejection, or a provider/embedding failure
//! sends the loop back for another attempt until the budget runs out.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, warn};

use examforge_blueprint::{detect_domain_hint, BlueprintSelector, ConstraintBuilder, RandomSource};
use examforge_core::constants::MAX_GENERATION_ATTEMPTS;
use examforge_core::errors::{ForgeError, ForgeResult, ProviderError};
use examforge_core::models::{
    Blueprint, ConstraintPayload, GenerationParams, Profile, PromptPayload, RetrievalMode,
    RetrievalResult,
};
use examforge_core::traits::{
    IEmbeddingProvider, IGenerationProvider, IHistoryStore, IProfileStore, ISignatureStore,
    IVectorIndex,
};
use examforge_core::ForgeConfig;
use examforge_embeddings::{CachedEmbedder, HashingEmbedder};
use examforge_observability::metrics::{PipelineMetrics, RejectionReason};
use examforge_observability::{dedup_span, events, generation_span, retrieval_span, selection_span};
use examforge_retrieval::query::build_query;
use examforge_retrieval::TwoStageRetriever;
use examforge_session::{
    extract_signature, DuplicateDetector, InMemoryHistoryStore, InMemorySignatureStore,
};

use crate::attempt::{format_directive, repeat_directive, AttemptRecord};
use crate::format::FormatRule;
use crate::mode::resolve_mode;
use crate::record::QuestionRecord;
use crate::request::{BlueprintSummary, GenerationOutcome, GenerationOutput, GenerationRequest};

/// External collaborators the generator reads from and writes to.
#[derive(Clone)]
pub struct Collaborators {
    pub profiles: Arc<dyn IProfileStore>,
    pub index: Arc<dyn IVectorIndex>,
    pub embedder: Arc<dyn IEmbeddingProvider>,
    pub provider: Arc<dyn IGenerationProvider>,
    pub history: Arc<dyn IHistoryStore>,
    pub signatures: Arc<dyn ISignatureStore>,
}

impl Collaborators {
    /// In-memory session stores around the given external services.
    pub fn in_memory(
        profiles: Arc<dyn IProfileStore>,
        index: Arc<dyn IVectorIndex>,
        embedder: Arc<dyn IEmbeddingProvider>,
        provider: Arc<dyn IGenerationProvider>,
    ) -> Self {
        Self {
            profiles,
            index,
            embedder,
            provider,
            history: Arc::new(InMemoryHistoryStore::new()),
            signatures: Arc::new(InMemorySignatureStore::new()),
        }
    }
}

/// The offline embedder: hashing vectors behind an L1 cache.
pub fn default_embedder(config: &ForgeConfig) -> Arc<dyn IEmbeddingProvider> {
    Arc::new(CachedEmbedder::new(
        HashingEmbedder::new(config.embedding.dimensions),
        config.embedding.l1_cache_size,
    ))
}

/// How the attempt loop ended.
enum LoopOutcome {
    Accepted(String),
    Exhausted(String),
}

/// Orchestrates selection, retrieval, generation, and duplicate filtering.
pub struct QuestionGenerator {
    profiles: Arc<dyn IProfileStore>,
    history: Arc<dyn IHistoryStore>,
    provider: Arc<dyn IGenerationProvider>,
    selector: BlueprintSelector,
    constraints: ConstraintBuilder,
    retriever: TwoStageRetriever,
    detector: DuplicateDetector,
    config: ForgeConfig,
    format_rule: FormatRule,
    default_mode: RetrievalMode,
    metrics: Mutex<PipelineMetrics>,
}

impl QuestionGenerator {
    /// Fails with `ConfigError` if the configured format rule or default
    /// retrieval mode does not parse.
    pub fn new(config: ForgeConfig, collaborators: Collaborators) -> ForgeResult<Self> {
        let format_rule: FormatRule = config.generation.format_rule.parse()?;
        let default_mode = config.retrieval.default_mode()?;
        let selector =
            BlueprintSelector::seeded(config.selection.clone(), config.generation.random_seed);
        let retriever = TwoStageRetriever::new(
            collaborators.index,
            collaborators.embedder.clone(),
            config.retrieval.clone(),
        );
        let detector = DuplicateDetector::new(
            collaborators.embedder,
            collaborators.signatures,
            config.dedup.clone(),
        );
        Ok(Self {
            profiles: collaborators.profiles,
            history: collaborators.history,
            provider: collaborators.provider,
            selector,
            constraints: ConstraintBuilder::default(),
            retriever,
            detector,
            config,
            format_rule,
            default_mode,
            metrics: Mutex::new(PipelineMetrics::new()),
        })
    }

    /// Replace the selection random source (e.g. with a scripted one in tests).
    pub fn with_random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        let registry = self.selector.registry().clone();
        self.selector =
            BlueprintSelector::new(self.config.selection.clone(), rng).with_registry(registry);
        self
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    /// Effective attempt budget.
    pub fn max_attempts(&self) -> u32 {
        self.config
            .generation
            .max_attempts
            .clamp(1, MAX_GENERATION_ATTEMPTS)
    }

    /// Snapshot of the pipeline counters.
    pub fn metrics(&self) -> PipelineMetrics {
        self.lock_metrics().clone()
    }

    fn lock_metrics(&self) -> MutexGuard<'_, PipelineMetrics> {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one request to completion.
    ///
    /// Configuration problems fail before any retrieval or generation call.
    /// Exhaustion is not an error: the output carries the last candidate and
    /// `exhausted = true`.
    pub fn generate(&self, request: &GenerationRequest) -> ForgeResult<GenerationOutput> {
        let span = generation_span!(request.session_id, self.max_attempts());
        let _entered = span.enter();

        let result = self.run(request);
        if let Err(e) = &result {
            self.lock_metrics().generation.record_failed();
            warn!(
                session_id = %request.session_id,
                kind = e.kind(),
                error = %e,
                "generation request failed"
            );
        }
        result
    }

    fn run(&self, request: &GenerationRequest) -> ForgeResult<GenerationOutput> {
        // INIT
        let profile = self.resolve_profile(request)?;
        let mode = resolve_mode(
            request.retrieval_mode,
            request.agent_mode,
            profile.retrieval_mode,
            self.default_mode,
        );
        let detected = match &request.domain_hint {
            Some(_) => None,
            None => request
                .user_message
                .as_deref()
                .and_then(|m| detect_domain_hint(m, &profile)),
        };
        let domain_hint = request.domain_hint.as_deref().or(detected.as_deref());

        // BLUEPRINT_SELECTED
        let blueprint = {
            let span = selection_span!(request.session_id, profile.profile_id);
            let _entered = span.enter();
            self.selector.select_blueprint(
                &request.session_id,
                &profile,
                self.config.selection.history_depth,
                domain_hint,
                self.history.as_ref(),
            )?
        };
        self.on_selected(&request.session_id, &blueprint);
        let constraint = self.constraints.build(&blueprint, &profile)?;

        // RETRIEVED
        let retrieval = {
            let span = retrieval_span!(mode, blueprint.domain_id);
            let _entered = span.enter();
            let query = build_query(&blueprint, &profile, request.user_message.as_deref());
            self.retriever.retrieve_with_query(&query, &blueprint, mode)?
        };
        self.on_retrieved(&retrieval);
        let constraint = constraint.with_subtopic(retrieval.subtopic.clone());

        // GENERATED, looping until accepted or out of attempts.
        let mut attempts = Vec::new();
        let outcome = self.attempt_loop(request, &constraint, &retrieval, &mut attempts)?;
        let (candidate_text, outcome) = match outcome {
            LoopOutcome::Accepted(text) => {
                self.lock_metrics()
                    .generation
                    .record_accepted(attempts.len() as u32);
                (text, GenerationOutcome::Accepted)
            }
            LoopOutcome::Exhausted(text) => {
                let last_reason = attempts.last().map(|a| a.state.as_str()).unwrap_or("");
                events::generation_exhausted(&request.session_id, attempts.len() as u32, last_reason);
                self.lock_metrics()
                    .generation
                    .record_exhausted(attempts.len() as u32);
                (text, GenerationOutcome::Exhausted)
            }
        };

        Ok(self.assemble(
            request,
            &profile,
            &blueprint,
            mode,
            retrieval,
            candidate_text,
            outcome,
            attempts,
        ))
    }

    /// Fetch the profile and apply the request's enabled-levels override.
    fn resolve_profile(&self, request: &GenerationRequest) -> ForgeResult<Profile> {
        let profile = self.profiles.get_profile(&request.profile_id)?;
        Ok(match &request.enabled_levels {
            Some(levels) => profile.with_enabled_levels(levels),
            None => profile,
        })
    }

    fn attempt_loop(
        &self,
        request: &GenerationRequest,
        constraint: &ConstraintPayload,
        retrieval: &RetrievalResult,
        attempts: &mut Vec<AttemptRecord>,
    ) -> ForgeResult<LoopOutcome> {
        let params = GenerationParams {
            temperature: self.config.generation.temperature,
            max_output_tokens: self.config.generation.max_output_tokens,
            format_rule: self.format_rule.as_str().to_string(),
        };
        let session_id = request.session_id.as_str();
        let mut retry_directive: Option<String> = None;
        let mut last_candidate: Option<String> = None;
        let mut last_error: Option<ForgeError> = None;

        for attempt in 1..=self.max_attempts() {
            let prompt = PromptPayload {
                constraint: constraint.clone(),
                context_chunks: retrieval.chunks.clone(),
                user_message: request.user_message.clone(),
                retry_directive: retry_directive.take(),
                attempt,
            };

            let candidate = match self.call_provider(&prompt, &params) {
                Ok(text) => text,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    self.reject(session_id, attempt, RejectionReason::ProviderError, None);
                    attempts.push(AttemptRecord::failed(attempt, &e));
                    last_error = Some(e);
                    continue;
                }
            };
            debug!(session_id, attempt, chars = candidate.len(), "candidate generated");

            if let Err(violation) = self.format_rule.check(&candidate) {
                self.reject(session_id, attempt, RejectionReason::Format, None);
                attempts.push(AttemptRecord::format(attempt, &violation));
                retry_directive = Some(format_directive(self.format_rule, &violation));
                last_candidate = Some(candidate);
                continue;
            }

            let signature = extract_signature(&candidate);
            let verdict = {
                let span = dedup_span!(session_id, attempt);
                let _entered = span.enter();
                self.detector.check_and_record(session_id, &signature)
            };
            let verdict = match verdict {
                Ok(v) => v,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    self.reject(session_id, attempt, RejectionReason::ProviderError, None);
                    attempts.push(AttemptRecord::failed(attempt, &e));
                    last_candidate = Some(candidate);
                    last_error = Some(e);
                    continue;
                }
            };

            if verdict.is_accepted() {
                events::candidate_accepted(session_id, attempt, verdict.max_similarity);
                attempts.push(AttemptRecord::accepted(attempt, verdict.max_similarity));
                return Ok(LoopOutcome::Accepted(candidate));
            }
            self.reject(
                session_id,
                attempt,
                RejectionReason::Repeat,
                Some(verdict.max_similarity),
            );
            attempts.push(AttemptRecord::repeat(attempt, verdict.max_similarity));
            retry_directive = Some(repeat_directive(verdict.max_similarity));
            last_candidate = Some(candidate);
        }

        match (last_candidate, last_error) {
            (Some(candidate), _) => Ok(LoopOutcome::Exhausted(candidate)),
            (None, Some(e)) => Err(e),
            (None, None) => Err(ProviderError::EmptyResponse {
                provider: self.provider.name().to_string(),
            }
            .into()),
        }
    }

    /// A blank response counts as a provider failure.
    fn call_provider(
        &self,
        prompt: &PromptPayload,
        params: &GenerationParams,
    ) -> ForgeResult<String> {
        let text = self.provider.generate(prompt, params)?;
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse {
                provider: self.provider.name().to_string(),
            }
            .into());
        }
        Ok(text)
    }

    fn reject(
        &self,
        session_id: &str,
        attempt: u32,
        reason: RejectionReason,
        similarity: Option<f64>,
    ) {
        events::candidate_rejected(session_id, attempt, reason.as_str(), similarity);
        self.lock_metrics().generation.record_rejection(reason);
    }

    fn on_selected(&self, session_id: &str, blueprint: &Blueprint) {
        events::blueprint_selected(
            session_id,
            &blueprint.domain_id,
            &blueprint.difficulty_level_id,
            &blueprint.question_type_id,
            &blueprint.reasoning_mode_id,
        );
        self.lock_metrics()
            .selection
            .record(&blueprint.difficulty_level_id, &blueprint.domain_id);
    }

    fn on_retrieved(&self, retrieval: &RetrievalResult) {
        let path = retrieval.retrieval_path();
        events::retrieval_completed(
            retrieval.mode.as_str(),
            &path,
            retrieval.chunks.len(),
            retrieval.hot_topics_used(),
        );
        for d in &retrieval.degradations {
            events::retrieval_degraded(d.stage.as_str(), d.requested, d.returned, &d.reason);
        }
        self.lock_metrics().retrieval.record(
            &path,
            retrieval.hot_topics_used(),
            retrieval.is_degraded(),
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        &self,
        request: &GenerationRequest,
        profile: &Profile,
        blueprint: &Blueprint,
        mode: RetrievalMode,
        retrieval: RetrievalResult,
        candidate_text: String,
        outcome: GenerationOutcome,
        attempts: Vec<AttemptRecord>,
    ) -> GenerationOutput {
        let global = self.selector.registry().get(&blueprint.difficulty_level_id);
        let global_name = global.map(|l| l.name.clone()).unwrap_or_default();
        let display_name = profile
            .display_name_override(&blueprint.difficulty_level_id)
            .map(str::to_string)
            .unwrap_or_else(|| global_name.clone());
        let phrase = profile
            .question_type(&blueprint.question_type_id)
            .map(|q| q.phrase.clone())
            .unwrap_or_default();
        let retrieval_path = retrieval.retrieval_path();
        let hot_topics_used = retrieval.hot_topics_used();

        let record = QuestionRecord {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: request.session_id.clone(),
            profile_id: profile.profile_id.clone(),
            domain_id: blueprint.domain_id.clone(),
            difficulty_level_id: blueprint.difficulty_level_id.clone(),
            difficulty_level_display_name: display_name.clone(),
            question_type_id: blueprint.question_type_id.clone(),
            question_type_phrase: phrase.clone(),
            retrieval_mode: mode,
            retrieval_path: retrieval_path.clone(),
            hot_topics_used,
            candidate_text: candidate_text.clone(),
            outcome,
            created_at: Utc::now(),
        };

        GenerationOutput {
            blueprint: BlueprintSummary {
                domain: blueprint.domain_id.clone(),
                question_type_id: blueprint.question_type_id.clone(),
                question_type_phrase: phrase,
                difficulty_level_id: blueprint.difficulty_level_id.clone(),
                difficulty_level_display_name: display_name,
                difficulty_level_global_name: global_name,
                reasoning_mode: blueprint.reasoning_mode_id.clone(),
            },
            retrieval_mode: mode,
            retrieval_path,
            hot_topics_used,
            subtopic: retrieval.subtopic,
            degradations: retrieval.degradations,
            candidate_text,
            exhausted: outcome == GenerationOutcome::Exhausted,
            outcome,
            attempts,
            record,
        }
    }
}
