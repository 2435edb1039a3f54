//! Data models for Groundwork documents.
//!
//! This module defines the core data structures:
//! - `AnalysisDocument` - One unit of feature analysis (the document model root)
//! - `Overview`, `Problem`, `UserContext`, `Scope`, `Summary`, `Mapping` - Section records
//! - `Assumption`, `Question`, `ActionItem`, `ScopeItem` - Ordered collection items
//! - `EdgeCase` / `EdgeCaseState` - The fixed edge-case checklist

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Release phase for a document or scope item.
///
/// Declared order drives the by-version grouping in the text export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Mvp,
    V1,
    V2,
    Future,
}

impl Phase {
    /// All phases in declared order.
    pub const ALL: [Phase; 4] = [Phase::Mvp, Phase::V1, Phase::V2, Phase::Future];

    /// Human-readable label used in the text format.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Mvp => "MVP",
            Phase::V1 => "V1",
            Phase::V2 => "V2",
            Phase::Future => "Future",
        }
    }

    /// Parse a label back into a phase. Unknown tokens yield `None`.
    pub fn from_label(s: &str) -> Option<Phase> {
        match s.trim().to_lowercase().as_str() {
            "mvp" => Some(Phase::Mvp),
            "v1" => Some(Phase::V1),
            "v2" => Some(Phase::V2),
            "future" => Some(Phase::Future),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// UI label language for a document. Not part of the text format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub fn from_label(s: &str) -> Option<Language> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Language::En),
            "es" | "spanish" => Some(Language::Es),
            _ => None,
        }
    }
}

/// Validation status of an assumption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssumptionStatus {
    #[default]
    Unvalidated,
    NeedsResearch,
    Validated,
    Disproven,
}

impl AssumptionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AssumptionStatus::Unvalidated => "Unvalidated",
            AssumptionStatus::NeedsResearch => "Needs Research",
            AssumptionStatus::Validated => "Validated",
            AssumptionStatus::Disproven => "Disproven",
        }
    }

    pub fn from_label(s: &str) -> Option<AssumptionStatus> {
        match s.trim().to_lowercase().as_str() {
            "unvalidated" => Some(AssumptionStatus::Unvalidated),
            "needs research" | "needs-research" | "needs_research" => {
                Some(AssumptionStatus::NeedsResearch)
            }
            "validated" => Some(AssumptionStatus::Validated),
            "disproven" => Some(AssumptionStatus::Disproven),
            _ => None,
        }
    }
}

impl fmt::Display for AssumptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Who a question is for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[default]
    Product,
    Design,
    Technical,
    Business,
    User,
}

impl QuestionKind {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::Product => "Product",
            QuestionKind::Design => "Design",
            QuestionKind::Technical => "Technical",
            QuestionKind::Business => "Business",
            QuestionKind::User => "User",
        }
    }

    pub fn from_label(s: &str) -> Option<QuestionKind> {
        match s.trim().to_lowercase().as_str() {
            "product" => Some(QuestionKind::Product),
            "design" => Some(QuestionKind::Design),
            "technical" => Some(QuestionKind::Technical),
            "business" => Some(QuestionKind::Business),
            "user" => Some(QuestionKind::User),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Whether a question has been answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    #[default]
    Open,
    Answered,
}

/// Priority of a scope item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopePriority {
    High,
    #[default]
    Medium,
    Low,
}

impl ScopePriority {
    pub fn label(&self) -> &'static str {
        match self {
            ScopePriority::High => "High",
            ScopePriority::Medium => "Medium",
            ScopePriority::Low => "Low",
        }
    }

    pub fn from_label(s: &str) -> Option<ScopePriority> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(ScopePriority::High),
            "medium" | "med" => Some(ScopePriority::Medium),
            "low" => Some(ScopePriority::Low),
            _ => None,
        }
    }
}

impl fmt::Display for ScopePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The fixed edge-case checklist keys.
///
/// The key set is a schema constant, not user-extensible. `Ord` follows
/// declared order so map iteration is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeCase {
    Empty,
    Loading,
    Error,
    Offline,
    Permissions,
    LargeData,
    Concurrent,
    Localization,
}

impl EdgeCase {
    /// All edge-case keys in declared order.
    pub const ALL: [EdgeCase; 8] = [
        EdgeCase::Empty,
        EdgeCase::Loading,
        EdgeCase::Error,
        EdgeCase::Offline,
        EdgeCase::Permissions,
        EdgeCase::LargeData,
        EdgeCase::Concurrent,
        EdgeCase::Localization,
    ];

    /// Exact label used in the text format (case-sensitive on decode).
    pub fn label(&self) -> &'static str {
        match self {
            EdgeCase::Empty => "Empty state",
            EdgeCase::Loading => "Loading state",
            EdgeCase::Error => "Error state",
            EdgeCase::Offline => "Offline behavior",
            EdgeCase::Permissions => "Permission denied",
            EdgeCase::LargeData => "Large data volumes",
            EdgeCase::Concurrent => "Concurrent edits",
            EdgeCase::Localization => "Long text & localization",
        }
    }

    /// Reverse lookup from the exact text-format label.
    pub fn from_label(s: &str) -> Option<EdgeCase> {
        EdgeCase::ALL.iter().copied().find(|e| e.label() == s)
    }

    /// Short key used by `gw edge` and dotted field keys (e.g. `edge.empty`).
    pub fn key(&self) -> &'static str {
        match self {
            EdgeCase::Empty => "empty",
            EdgeCase::Loading => "loading",
            EdgeCase::Error => "error",
            EdgeCase::Offline => "offline",
            EdgeCase::Permissions => "permissions",
            EdgeCase::LargeData => "large_data",
            EdgeCase::Concurrent => "concurrent",
            EdgeCase::Localization => "localization",
        }
    }

    pub fn from_key(s: &str) -> Option<EdgeCase> {
        EdgeCase::ALL.iter().copied().find(|e| e.key() == s)
    }
}

/// Considered/notes state for one edge-case key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCaseState {
    #[serde(default)]
    pub considered: bool,

    #[serde(default)]
    pub notes: String,
}

/// The Overview section: what the feature is and where it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    #[serde(default)]
    pub feature: String,

    #[serde(default)]
    pub date: String,

    /// Serialized with the "Stakeholders" label in the text format.
    #[serde(default)]
    pub requestor: String,

    #[serde(default)]
    pub origin: String,

    /// Set when origin is "Other".
    #[serde(default)]
    pub origin_other: String,

    /// Free-form block; the decoder's catch-all for unlabeled lines.
    #[serde(default)]
    pub description: String,
}

/// The Problem & Purpose section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(default)]
    pub statement: String,

    #[serde(default)]
    pub who: String,

    #[serde(default)]
    pub business_outcome: String,

    #[serde(default)]
    pub success_metrics: String,

    #[serde(default)]
    pub if_not_built: String,
}

/// The User Context section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default)]
    pub segments: String,

    #[serde(default)]
    pub workflow: String,

    #[serde(default)]
    pub workarounds: String,

    #[serde(default)]
    pub triggers: String,

    #[serde(default)]
    pub before_after: String,
}

/// One item of planned scope, optionally pinned to a release phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeItem {
    /// Unique identifier (e.g., "gws-a1b2")
    pub id: String,

    pub item: String,

    #[serde(default)]
    pub description: String,

    /// `None` renders in the "Unassigned" bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Phase>,

    #[serde(default)]
    pub priority: ScopePriority,
}

/// The Scope & Versions section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(default)]
    pub affected: String,

    #[serde(default)]
    pub new_patterns: String,

    #[serde(default)]
    pub technical: String,

    #[serde(default)]
    pub items: Vec<ScopeItem>,
}

/// One assumption logged against the feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assumption {
    /// Unique identifier (e.g., "gwa-a1b2")
    pub id: String,

    pub text: String,

    #[serde(default)]
    pub status: AssumptionStatus,

    /// Set semantics: deduplicated on add.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One open (or answered) question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier (e.g., "gwq-a1b2")
    pub id: String,

    pub text: String,

    #[serde(default)]
    pub kind: QuestionKind,

    #[serde(default)]
    pub status: QuestionStatus,

    #[serde(default)]
    pub answer: String,

    /// True when the answer blocks other work. Not part of the text format.
    #[serde(default)]
    pub dependency: bool,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// One follow-up action item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    /// Unique identifier (e.g., "gwx-a1b2")
    pub id: String,

    pub text: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub note: String,
}

/// Link to the design file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    #[serde(default)]
    pub figma_url: String,
}

/// The Summary section: confidence and next steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub confidence: String,

    #[serde(default)]
    pub key_concerns: String,

    #[serde(default)]
    pub next_steps: String,
}

/// One feature analysis: the document model root.
///
/// Created blank (all scalars empty, all collections empty, every edge case
/// unconsidered) and mutated in place for its entire life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDocument {
    /// Unique identifier (e.g., "gw-a1b2"), assigned once at creation.
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,

    #[serde(default)]
    pub jira_ticket: String,

    #[serde(default)]
    pub language: Language,

    /// Marks the document as sensitive.
    #[serde(default)]
    pub secure: bool,

    #[serde(default)]
    pub overview: Overview,

    #[serde(default)]
    pub problem: Problem,

    #[serde(default)]
    pub context: UserContext,

    #[serde(default)]
    pub scope: Scope,

    #[serde(default)]
    pub summary: Summary,

    #[serde(default)]
    pub mapping: Mapping,

    #[serde(default)]
    pub assumptions: Vec<Assumption>,

    #[serde(default)]
    pub questions: Vec<Question>,

    #[serde(default)]
    pub actions: Vec<ActionItem>,

    /// Fully populated at creation; keys are a schema constant.
    #[serde(default = "blank_edge_cases")]
    pub edge_cases: BTreeMap<EdgeCase, EdgeCaseState>,

    /// Free-text blob.
    #[serde(default)]
    pub notes: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp, bumped on every mutation
    pub updated_at: DateTime<Utc>,
}

/// A fully populated edge-case map with nothing considered.
pub fn blank_edge_cases() -> BTreeMap<EdgeCase, EdgeCaseState> {
    EdgeCase::ALL
        .iter()
        .map(|k| (*k, EdgeCaseState::default()))
        .collect()
}

impl AnalysisDocument {
    /// Create a blank document with the given ID and name.
    pub fn new(id: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            phase: None,
            jira_ticket: String::new(),
            language: Language::default(),
            secure: false,
            overview: Overview::default(),
            problem: Problem::default(),
            context: UserContext::default(),
            scope: Scope::default(),
            summary: Summary::default(),
            mapping: Mapping::default(),
            assumptions: Vec::new(),
            questions: Vec::new(),
            actions: Vec::new(),
            edge_cases: blank_edge_cases(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump the update timestamp. Called before every save.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Look up an edge-case state, tolerating documents deserialized from
    /// older data with a partial map.
    pub fn edge_case(&self, key: EdgeCase) -> EdgeCaseState {
        self.edge_cases.get(&key).cloned().unwrap_or_default()
    }
}

/// True when a scalar counts as filled: non-empty after trim.
pub fn is_filled(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Add a tag with set semantics (no duplicates, insertion order kept).
pub fn add_tag(tags: &mut Vec<String>, tag: &str) {
    let tag = tag.trim();
    if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}
