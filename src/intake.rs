//! Extraction intake: partial records from upstream extraction services.
//!
//! A transcription/extraction service returns a partial JSON record using
//! the same field names as the document model's scalar and array fields.
//! `ExtractedFields` deserializes that payload (unknown keys ignored) and
//! wraps it into a transient document that is then combined with the normal
//! merge engine rules.

use serde::Deserialize;

use crate::models::{ActionItem, AnalysisDocument, Assumption, Phase, Question};
use crate::storage::generate_id;

/// Partial record produced by an extraction service.
///
/// Bare strings in `assumptions`/`questions`/`actions` become
/// minimally-shaped collection items with default enum values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedFields {
    pub feature_name: String,
    pub date: String,
    pub requestor: String,
    pub origin: String,
    pub origin_other: String,
    pub description: String,

    pub problem: String,
    pub who: String,
    pub business_outcome: String,
    pub success_metrics: String,
    pub if_not_built: String,

    pub segments: String,
    pub workflow: String,
    pub workarounds: String,
    pub triggers: String,
    pub before_after: String,

    pub affected: String,
    pub new_patterns: String,
    pub technical: String,

    pub confidence: String,
    pub key_concerns: String,
    pub next_steps: String,

    pub figma_url: String,
    pub notes: String,
    pub phase: String,

    pub assumptions: Vec<String>,
    pub questions: Vec<String>,
    pub actions: Vec<String>,
}

impl ExtractedFields {
    /// Wrap the partial record into a transient document suitable for
    /// merging into a live one.
    pub fn into_document(self) -> AnalysisDocument {
        let mut doc = AnalysisDocument::new(generate_id("gw", "extracted"), String::new());

        doc.overview.feature = self.feature_name;
        doc.overview.date = self.date;
        doc.overview.requestor = self.requestor;
        doc.overview.origin = self.origin;
        doc.overview.origin_other = self.origin_other;
        doc.overview.description = self.description;

        doc.problem.statement = self.problem;
        doc.problem.who = self.who;
        doc.problem.business_outcome = self.business_outcome;
        doc.problem.success_metrics = self.success_metrics;
        doc.problem.if_not_built = self.if_not_built;

        doc.context.segments = self.segments;
        doc.context.workflow = self.workflow;
        doc.context.workarounds = self.workarounds;
        doc.context.triggers = self.triggers;
        doc.context.before_after = self.before_after;

        doc.scope.affected = self.affected;
        doc.scope.new_patterns = self.new_patterns;
        doc.scope.technical = self.technical;

        doc.summary.confidence = self.confidence;
        doc.summary.key_concerns = self.key_concerns;
        doc.summary.next_steps = self.next_steps;

        doc.mapping.figma_url = self.figma_url;
        doc.notes = self.notes;
        doc.phase = Phase::from_label(&self.phase);

        for text in self.assumptions {
            let text = text.trim().to_string();
            if text.is_empty() {
                continue;
            }
            doc.assumptions.push(Assumption {
                id: generate_id("gwa", &text),
                text,
                status: Default::default(),
                tags: Vec::new(),
            });
        }
        for text in self.questions {
            let text = text.trim().to_string();
            if text.is_empty() {
                continue;
            }
            doc.questions.push(Question {
                id: generate_id("gwq", &text),
                text,
                kind: Default::default(),
                status: Default::default(),
                answer: String::new(),
                dependency: false,
                tags: Vec::new(),
            });
        }
        for text in self.actions {
            let text = text.trim().to_string();
            if text.is_empty() {
                continue;
            }
            doc.actions.push(ActionItem {
                id: generate_id("gwx", &text),
                text,
                completed: false,
                note: String::new(),
            });
        }

        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssumptionStatus, QuestionKind, QuestionStatus};

    #[test]
    fn test_deserialize_partial_payload() {
        let json = r#"{
            "featureName": "Dark Mode",
            "problem": "Bright screens at night",
            "assumptions": ["Users have modern browsers"],
            "questions": ["Should images be dimmed?"],
            "unknownKey": "ignored"
        }"#;
        let fields: ExtractedFields = serde_json::from_str(json).unwrap();
        assert_eq!(fields.feature_name, "Dark Mode");
        assert_eq!(fields.problem, "Bright screens at night");
        assert_eq!(fields.assumptions.len(), 1);
    }

    #[test]
    fn test_into_document_wraps_bare_strings() {
        let fields = ExtractedFields {
            feature_name: "Dark Mode".to_string(),
            phase: "MVP".to_string(),
            assumptions: vec!["one".to_string(), "  ".to_string(), "two".to_string()],
            questions: vec!["why".to_string()],
            actions: vec!["ship".to_string()],
            ..Default::default()
        };
        let doc = fields.into_document();
        assert_eq!(doc.overview.feature, "Dark Mode");
        assert_eq!(doc.phase, Some(Phase::Mvp));
        assert_eq!(doc.assumptions.len(), 2);
        assert_eq!(doc.assumptions[0].status, AssumptionStatus::Unvalidated);
        assert_eq!(doc.questions[0].kind, QuestionKind::Product);
        assert_eq!(doc.questions[0].status, QuestionStatus::Open);
        assert_ne!(doc.assumptions[0].id, doc.assumptions[1].id);
        assert!(doc.assumptions[0].id.starts_with("gwa-"));
    }

    #[test]
    fn test_unknown_phase_token_degrades() {
        let fields = ExtractedFields {
            phase: "Someday".to_string(),
            ..Default::default()
        };
        assert_eq!(fields.into_document().phase, None);
    }
}
