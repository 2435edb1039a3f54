//! Merge engine: reconcile a freshly decoded document into a live one.
//!
//! Scalars fill empty destinations unconditionally; non-empty destinations
//! follow a per-field `Replace`/`Append` policy. Collections always
//! concatenate, with fresh ids minted for incoming items and no
//! deduplication. Edge-case `considered` flags are OR-ed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{AnalysisDocument, EdgeCase, Phase, is_filled};
use crate::storage::generate_id;

/// How to reconcile a non-empty destination scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    #[default]
    Replace,
    Append,
}

/// Closed set of mergeable scalar fields, addressable by dotted key.
///
/// The dotted form (`overview.feature`, `edge.empty`, ...) is the CLI
/// surface for `gw set` and `gw import --append`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    Name,
    JiraTicket,
    Phase,
    OverviewFeature,
    OverviewDate,
    OverviewRequestor,
    OverviewOrigin,
    OverviewOriginOther,
    OverviewDescription,
    ProblemStatement,
    ProblemWho,
    ProblemBusinessOutcome,
    ProblemSuccessMetrics,
    ProblemIfNotBuilt,
    ContextSegments,
    ContextWorkflow,
    ContextWorkarounds,
    ContextTriggers,
    ContextBeforeAfter,
    ScopeAffected,
    ScopeNewPatterns,
    ScopeTechnical,
    SummaryConfidence,
    SummaryKeyConcerns,
    SummaryNextSteps,
    FigmaUrl,
    Notes,
    EdgeCaseNotes(EdgeCase),
}

impl ScalarField {
    /// All string-valued fields (everything except `Phase`), for iteration.
    pub fn all() -> Vec<ScalarField> {
        let mut fields = vec![
            ScalarField::Name,
            ScalarField::JiraTicket,
            ScalarField::OverviewFeature,
            ScalarField::OverviewDate,
            ScalarField::OverviewRequestor,
            ScalarField::OverviewOrigin,
            ScalarField::OverviewOriginOther,
            ScalarField::OverviewDescription,
            ScalarField::ProblemStatement,
            ScalarField::ProblemWho,
            ScalarField::ProblemBusinessOutcome,
            ScalarField::ProblemSuccessMetrics,
            ScalarField::ProblemIfNotBuilt,
            ScalarField::ContextSegments,
            ScalarField::ContextWorkflow,
            ScalarField::ContextWorkarounds,
            ScalarField::ContextTriggers,
            ScalarField::ContextBeforeAfter,
            ScalarField::ScopeAffected,
            ScalarField::ScopeNewPatterns,
            ScalarField::ScopeTechnical,
            ScalarField::SummaryConfidence,
            ScalarField::SummaryKeyConcerns,
            ScalarField::SummaryNextSteps,
            ScalarField::FigmaUrl,
            ScalarField::Notes,
        ];
        for key in EdgeCase::ALL {
            fields.push(ScalarField::EdgeCaseNotes(key));
        }
        fields
    }

    /// Dotted key form used by the CLI.
    pub fn key(&self) -> String {
        match self {
            ScalarField::Name => "name".to_string(),
            ScalarField::JiraTicket => "jira".to_string(),
            ScalarField::Phase => "phase".to_string(),
            ScalarField::OverviewFeature => "overview.feature".to_string(),
            ScalarField::OverviewDate => "overview.date".to_string(),
            ScalarField::OverviewRequestor => "overview.requestor".to_string(),
            ScalarField::OverviewOrigin => "overview.origin".to_string(),
            ScalarField::OverviewOriginOther => "overview.origin_other".to_string(),
            ScalarField::OverviewDescription => "overview.description".to_string(),
            ScalarField::ProblemStatement => "problem.statement".to_string(),
            ScalarField::ProblemWho => "problem.who".to_string(),
            ScalarField::ProblemBusinessOutcome => "problem.business_outcome".to_string(),
            ScalarField::ProblemSuccessMetrics => "problem.success_metrics".to_string(),
            ScalarField::ProblemIfNotBuilt => "problem.if_not_built".to_string(),
            ScalarField::ContextSegments => "context.segments".to_string(),
            ScalarField::ContextWorkflow => "context.workflow".to_string(),
            ScalarField::ContextWorkarounds => "context.workarounds".to_string(),
            ScalarField::ContextTriggers => "context.triggers".to_string(),
            ScalarField::ContextBeforeAfter => "context.before_after".to_string(),
            ScalarField::ScopeAffected => "scope.affected".to_string(),
            ScalarField::ScopeNewPatterns => "scope.new_patterns".to_string(),
            ScalarField::ScopeTechnical => "scope.technical".to_string(),
            ScalarField::SummaryConfidence => "summary.confidence".to_string(),
            ScalarField::SummaryKeyConcerns => "summary.key_concerns".to_string(),
            ScalarField::SummaryNextSteps => "summary.next_steps".to_string(),
            ScalarField::FigmaUrl => "mapping.figma_url".to_string(),
            ScalarField::Notes => "notes".to_string(),
            ScalarField::EdgeCaseNotes(key) => format!("edge.{}", key.key()),
        }
    }

    /// Parse a dotted key. Unknown keys yield `None`.
    pub fn parse(key: &str) -> Option<ScalarField> {
        if let Some(edge) = key.strip_prefix("edge.") {
            return EdgeCase::from_key(edge).map(ScalarField::EdgeCaseNotes);
        }
        match key {
            "name" => Some(ScalarField::Name),
            "jira" | "jira_ticket" | "ticket" => Some(ScalarField::JiraTicket),
            "phase" => Some(ScalarField::Phase),
            "overview.feature" => Some(ScalarField::OverviewFeature),
            "overview.date" => Some(ScalarField::OverviewDate),
            "overview.requestor" | "overview.stakeholders" => Some(ScalarField::OverviewRequestor),
            "overview.origin" => Some(ScalarField::OverviewOrigin),
            "overview.origin_other" => Some(ScalarField::OverviewOriginOther),
            "overview.description" => Some(ScalarField::OverviewDescription),
            "problem.statement" => Some(ScalarField::ProblemStatement),
            "problem.who" => Some(ScalarField::ProblemWho),
            "problem.business_outcome" => Some(ScalarField::ProblemBusinessOutcome),
            "problem.success_metrics" => Some(ScalarField::ProblemSuccessMetrics),
            "problem.if_not_built" => Some(ScalarField::ProblemIfNotBuilt),
            "context.segments" => Some(ScalarField::ContextSegments),
            "context.workflow" => Some(ScalarField::ContextWorkflow),
            "context.workarounds" => Some(ScalarField::ContextWorkarounds),
            "context.triggers" => Some(ScalarField::ContextTriggers),
            "context.before_after" => Some(ScalarField::ContextBeforeAfter),
            "scope.affected" => Some(ScalarField::ScopeAffected),
            "scope.new_patterns" => Some(ScalarField::ScopeNewPatterns),
            "scope.technical" => Some(ScalarField::ScopeTechnical),
            "summary.confidence" => Some(ScalarField::SummaryConfidence),
            "summary.key_concerns" => Some(ScalarField::SummaryKeyConcerns),
            "summary.next_steps" => Some(ScalarField::SummaryNextSteps),
            "mapping.figma_url" | "figma" => Some(ScalarField::FigmaUrl),
            "notes" => Some(ScalarField::Notes),
            _ => None,
        }
    }

    /// Mutable access to the backing string slot. `None` for `Phase`, which
    /// is not string-valued.
    pub fn slot_mut<'a>(&self, doc: &'a mut AnalysisDocument) -> Option<&'a mut String> {
        match self {
            ScalarField::Name => Some(&mut doc.name),
            ScalarField::JiraTicket => Some(&mut doc.jira_ticket),
            ScalarField::Phase => None,
            ScalarField::OverviewFeature => Some(&mut doc.overview.feature),
            ScalarField::OverviewDate => Some(&mut doc.overview.date),
            ScalarField::OverviewRequestor => Some(&mut doc.overview.requestor),
            ScalarField::OverviewOrigin => Some(&mut doc.overview.origin),
            ScalarField::OverviewOriginOther => Some(&mut doc.overview.origin_other),
            ScalarField::OverviewDescription => Some(&mut doc.overview.description),
            ScalarField::ProblemStatement => Some(&mut doc.problem.statement),
            ScalarField::ProblemWho => Some(&mut doc.problem.who),
            ScalarField::ProblemBusinessOutcome => Some(&mut doc.problem.business_outcome),
            ScalarField::ProblemSuccessMetrics => Some(&mut doc.problem.success_metrics),
            ScalarField::ProblemIfNotBuilt => Some(&mut doc.problem.if_not_built),
            ScalarField::ContextSegments => Some(&mut doc.context.segments),
            ScalarField::ContextWorkflow => Some(&mut doc.context.workflow),
            ScalarField::ContextWorkarounds => Some(&mut doc.context.workarounds),
            ScalarField::ContextTriggers => Some(&mut doc.context.triggers),
            ScalarField::ContextBeforeAfter => Some(&mut doc.context.before_after),
            ScalarField::ScopeAffected => Some(&mut doc.scope.affected),
            ScalarField::ScopeNewPatterns => Some(&mut doc.scope.new_patterns),
            ScalarField::ScopeTechnical => Some(&mut doc.scope.technical),
            ScalarField::SummaryConfidence => Some(&mut doc.summary.confidence),
            ScalarField::SummaryKeyConcerns => Some(&mut doc.summary.key_concerns),
            ScalarField::SummaryNextSteps => Some(&mut doc.summary.next_steps),
            ScalarField::FigmaUrl => Some(&mut doc.mapping.figma_url),
            ScalarField::Notes => Some(&mut doc.notes),
            ScalarField::EdgeCaseNotes(key) => {
                doc.edge_cases.get_mut(key).map(|state| &mut state.notes)
            }
        }
    }

    /// Read the current value as a string. `Phase` reads as its label.
    pub fn get(&self, doc: &AnalysisDocument) -> String {
        match self {
            ScalarField::Name => doc.name.clone(),
            ScalarField::JiraTicket => doc.jira_ticket.clone(),
            ScalarField::Phase => doc.phase.map(|p| p.label().to_string()).unwrap_or_default(),
            ScalarField::OverviewFeature => doc.overview.feature.clone(),
            ScalarField::OverviewDate => doc.overview.date.clone(),
            ScalarField::OverviewRequestor => doc.overview.requestor.clone(),
            ScalarField::OverviewOrigin => doc.overview.origin.clone(),
            ScalarField::OverviewOriginOther => doc.overview.origin_other.clone(),
            ScalarField::OverviewDescription => doc.overview.description.clone(),
            ScalarField::ProblemStatement => doc.problem.statement.clone(),
            ScalarField::ProblemWho => doc.problem.who.clone(),
            ScalarField::ProblemBusinessOutcome => doc.problem.business_outcome.clone(),
            ScalarField::ProblemSuccessMetrics => doc.problem.success_metrics.clone(),
            ScalarField::ProblemIfNotBuilt => doc.problem.if_not_built.clone(),
            ScalarField::ContextSegments => doc.context.segments.clone(),
            ScalarField::ContextWorkflow => doc.context.workflow.clone(),
            ScalarField::ContextWorkarounds => doc.context.workarounds.clone(),
            ScalarField::ContextTriggers => doc.context.triggers.clone(),
            ScalarField::ContextBeforeAfter => doc.context.before_after.clone(),
            ScalarField::ScopeAffected => doc.scope.affected.clone(),
            ScalarField::ScopeNewPatterns => doc.scope.new_patterns.clone(),
            ScalarField::ScopeTechnical => doc.scope.technical.clone(),
            ScalarField::SummaryConfidence => doc.summary.confidence.clone(),
            ScalarField::SummaryKeyConcerns => doc.summary.key_concerns.clone(),
            ScalarField::SummaryNextSteps => doc.summary.next_steps.clone(),
            ScalarField::FigmaUrl => doc.mapping.figma_url.clone(),
            ScalarField::Notes => doc.notes.clone(),
            ScalarField::EdgeCaseNotes(key) => doc.edge_case(*key).notes,
        }
    }
}

/// Per-field merge policy. Missing fields resolve to `Replace`.
#[derive(Debug, Clone, Default)]
pub struct MergePolicy {
    modes: HashMap<ScalarField, MergeMode>,
}

impl MergePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: ScalarField, mode: MergeMode) {
        self.modes.insert(field, mode);
    }

    pub fn with(mut self, field: ScalarField, mode: MergeMode) -> Self {
        self.set(field, mode);
        self
    }

    pub fn mode_for(&self, field: ScalarField) -> MergeMode {
        self.modes.get(&field).copied().unwrap_or_default()
    }
}

/// Apply the scalar reconciliation rule to one destination string.
fn merge_scalar(existing: &mut String, incoming: &str, mode: MergeMode) {
    if !is_filled(incoming) {
        return;
    }
    if !is_filled(existing) {
        *existing = incoming.to_string();
        return;
    }
    match mode {
        MergeMode::Replace => *existing = incoming.to_string(),
        MergeMode::Append => {
            existing.push_str("\n\n");
            existing.push_str(incoming);
        }
    }
}

/// Merge `incoming` into `existing` in place. Total: never fails.
pub fn merge(existing: &mut AnalysisDocument, incoming: AnalysisDocument, policy: &MergePolicy) {
    // String scalars, including per-key edge-case notes.
    for field in ScalarField::all() {
        let value = field.get(&incoming);
        if let Some(slot) = field.slot_mut(existing) {
            merge_scalar(slot, &value, policy.mode_for(field));
        }
    }

    // Phase: fill-if-empty; append keeps the existing value.
    if let Some(incoming_phase) = incoming.phase {
        match (existing.phase, policy.mode_for(ScalarField::Phase)) {
            (None, _) | (Some(_), MergeMode::Replace) => existing.phase = Some(incoming_phase),
            (Some(_), MergeMode::Append) => {}
        }
    }

    existing.secure = existing.secure || incoming.secure;

    // Edge-case considered flags only grow.
    for key in EdgeCase::ALL {
        let incoming_considered = incoming.edge_case(key).considered;
        if let Some(state) = existing.edge_cases.get_mut(&key) {
            state.considered = state.considered || incoming_considered;
        }
    }

    // Collections always concatenate with fresh ids; no deduplication.
    for mut assumption in incoming.assumptions {
        assumption.id = generate_id("gwa", &assumption.text);
        existing.assumptions.push(assumption);
    }
    for mut question in incoming.questions {
        question.id = generate_id("gwq", &question.text);
        existing.questions.push(question);
    }
    for mut action in incoming.actions {
        action.id = generate_id("gwx", &action.text);
        existing.actions.push(action);
    }
    for mut item in incoming.scope.items {
        item.id = generate_id("gws", &item.item);
        existing.scope.items.push(item);
    }

    existing.touch();
}

/// Parse a `Phase` for `ScalarField::Phase` assignment via `gw set`.
pub fn set_field(doc: &mut AnalysisDocument, field: ScalarField, value: &str) -> crate::Result<()> {
    match field {
        ScalarField::Phase => {
            if value.trim().is_empty() {
                doc.phase = None;
            } else {
                let phase = Phase::from_label(value).ok_or_else(|| {
                    crate::Error::InvalidInput(format!(
                        "Invalid phase '{}'. Must be MVP, V1, V2, or Future",
                        value
                    ))
                })?;
                doc.phase = Some(phase);
            }
        }
        _ => {
            if let Some(slot) = field.slot_mut(doc) {
                *slot = value.to_string();
            }
        }
    }
    Ok(())
}

/// Append a value to a field via `gw set --append`.
pub fn append_field(doc: &mut AnalysisDocument, field: ScalarField, value: &str) -> crate::Result<()> {
    if field == ScalarField::Phase {
        return Err(crate::Error::InvalidInput(
            "Cannot append to 'phase'".to_string(),
        ));
    }
    if let Some(slot) = field.slot_mut(doc) {
        merge_scalar(slot, value, MergeMode::Append);
    }
    Ok(())
}
