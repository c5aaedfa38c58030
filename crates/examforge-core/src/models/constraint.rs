use serde::{Deserialize, Serialize};

/// The question type's instruction. Always the primary constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionTypeDirective {
    pub question_type_id: String,
    pub phrase: String,
    pub guidance: String,
}

/// Cognitive depth hint from the difficulty level. Supports the question
/// type directive and never overrides it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyDirective {
    pub level_id: String,
    /// Profile override if present, else the global name.
    pub display_name: String,
    pub global_name: String,
    pub description: String,
    pub verbs: Vec<String>,
}

/// Structured instruction payload rendered from a blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintPayload {
    pub primary: QuestionTypeDirective,
    pub supporting: DifficultyDirective,
    pub domain_id: String,
    pub domain_name: String,
    pub reasoning_mode_id: String,
    pub reasoning_mode_name: String,
    pub reasoning_mode_description: String,
    /// Outline subtopic found during retrieval, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtopic: Option<String>,
}

impl ConstraintPayload {
    pub fn with_subtopic(mut self, subtopic: Option<String>) -> Self {
        self.subtopic = subtopic;
        self
    }

    /// Plain-text rendering for prompt assembly.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Domain: {}\n", self.domain_name));
        if let Some(subtopic) = &self.subtopic {
            out.push_str(&format!("Focus subtopic: {subtopic}\n"));
        }
        out.push_str(&format!(
            "Primary constraint (question type): {}\n",
            self.primary.phrase
        ));
        if !self.primary.guidance.is_empty() {
            out.push_str(&format!("Guidance: {}\n", self.primary.guidance));
        }
        out.push_str(&format!(
            "Supporting hint (cognitive depth, does not override the question type): {} - {}\n",
            self.supporting.display_name, self.supporting.description
        ));
        if !self.supporting.verbs.is_empty() {
            out.push_str(&format!(
                "Suggested verbs: {}\n",
                self.supporting.verbs.join(", ")
            ));
        }
        out.push_str(&format!(
            "Reasoning mode: {}",
            self.reasoning_mode_name
        ));
        if !self.reasoning_mode_description.is_empty() {
            out.push_str(&format!(" ({})", self.reasoning_mode_description));
        }
        out.push('\n');
        out
    }
}
