//! Completion scorer: a 0-100 fill ratio over the document model.
//!
//! Read-only; recomputable at any time from the document alone.

use serde::Serialize;

use crate::models::{AnalysisDocument, is_filled};

/// Filled/total counts plus the list of unfilled slots, for `gw status`.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub score: u8,
    pub filled: usize,
    pub total: usize,
    pub missing: Vec<String>,
}

/// Completion score in `[0, 100]`.
pub fn score(doc: &AnalysisDocument) -> u8 {
    breakdown(doc).score
}

/// Compute the full fill-ratio breakdown.
///
/// Counted slots: every scalar field of Overview, Problem, User Context, the
/// Scope scalars and Summary, plus `phase`, plus one unit each for the five
/// collection checks (assumptions, edge cases, scope items, questions,
/// actions).
pub fn breakdown(doc: &AnalysisDocument) -> ScoreBreakdown {
    let scalars: [(&str, &str); 22] = [
        ("overview.feature", &doc.overview.feature),
        ("overview.date", &doc.overview.date),
        ("overview.requestor", &doc.overview.requestor),
        ("overview.origin", &doc.overview.origin),
        ("overview.origin_other", &doc.overview.origin_other),
        ("overview.description", &doc.overview.description),
        ("problem.statement", &doc.problem.statement),
        ("problem.who", &doc.problem.who),
        ("problem.business_outcome", &doc.problem.business_outcome),
        ("problem.success_metrics", &doc.problem.success_metrics),
        ("problem.if_not_built", &doc.problem.if_not_built),
        ("context.segments", &doc.context.segments),
        ("context.workflow", &doc.context.workflow),
        ("context.workarounds", &doc.context.workarounds),
        ("context.triggers", &doc.context.triggers),
        ("context.before_after", &doc.context.before_after),
        ("scope.affected", &doc.scope.affected),
        ("scope.new_patterns", &doc.scope.new_patterns),
        ("scope.technical", &doc.scope.technical),
        ("summary.confidence", &doc.summary.confidence),
        ("summary.key_concerns", &doc.summary.key_concerns),
        ("summary.next_steps", &doc.summary.next_steps),
    ];

    let collections: [(&str, bool); 5] = [
        ("assumptions", !doc.assumptions.is_empty()),
        (
            "edge_cases",
            doc.edge_cases.values().any(|state| state.considered),
        ),
        ("scope.items", !doc.scope.items.is_empty()),
        ("questions", !doc.questions.is_empty()),
        ("actions", !doc.actions.is_empty()),
    ];

    let mut filled = 0;
    let mut missing = Vec::new();
    let total = scalars.len() + 1 + collections.len();

    for (slot, value) in scalars {
        if is_filled(value) {
            filled += 1;
        } else {
            missing.push(slot.to_string());
        }
    }

    if doc.phase.is_some() {
        filled += 1;
    } else {
        missing.push("phase".to_string());
    }

    for (slot, ok) in collections {
        if ok {
            filled += 1;
        } else {
            missing.push(slot.to_string());
        }
    }

    let score = if total == 0 {
        0
    } else {
        ((100.0 * filled as f64 / total as f64).round()) as u8
    };

    ScoreBreakdown {
        score,
        filled,
        total,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ActionItem, AnalysisDocument, Assumption, EdgeCase, Phase, Question, ScopeItem,
    };

    fn blank() -> AnalysisDocument {
        AnalysisDocument::new("gw-0001".to_string(), String::new())
    }

    fn full() -> AnalysisDocument {
        let mut doc = blank();
        doc.phase = Some(Phase::Mvp);
        doc.overview.feature = "f".to_string();
        doc.overview.date = "d".to_string();
        doc.overview.requestor = "r".to_string();
        doc.overview.origin = "o".to_string();
        doc.overview.origin_other = "oo".to_string();
        doc.overview.description = "desc".to_string();
        doc.problem.statement = "p".to_string();
        doc.problem.who = "w".to_string();
        doc.problem.business_outcome = "b".to_string();
        doc.problem.success_metrics = "m".to_string();
        doc.problem.if_not_built = "i".to_string();
        doc.context.segments = "s".to_string();
        doc.context.workflow = "w".to_string();
        doc.context.workarounds = "wa".to_string();
        doc.context.triggers = "t".to_string();
        doc.context.before_after = "ba".to_string();
        doc.scope.affected = "a".to_string();
        doc.scope.new_patterns = "n".to_string();
        doc.scope.technical = "t".to_string();
        doc.summary.confidence = "c".to_string();
        doc.summary.key_concerns = "k".to_string();
        doc.summary.next_steps = "n".to_string();
        doc.assumptions.push(Assumption {
            id: "gwa-0001".to_string(),
            text: "a".to_string(),
            status: Default::default(),
            tags: vec![],
        });
        doc.edge_cases.get_mut(&EdgeCase::Empty).unwrap().considered = true;
        doc.scope.items.push(ScopeItem {
            id: "gws-0001".to_string(),
            item: "i".to_string(),
            description: String::new(),
            version: None,
            priority: Default::default(),
        });
        doc.questions.push(Question {
            id: "gwq-0001".to_string(),
            text: "q".to_string(),
            kind: Default::default(),
            status: Default::default(),
            answer: String::new(),
            dependency: false,
            tags: vec![],
        });
        doc.actions.push(ActionItem {
            id: "gwx-0001".to_string(),
            text: "x".to_string(),
            completed: false,
            note: String::new(),
        });
        doc
    }

    #[test]
    fn test_blank_document_scores_zero() {
        let b = breakdown(&blank());
        assert_eq!(b.score, 0);
        assert_eq!(b.filled, 0);
        assert_eq!(b.total, 28);
        assert_eq!(b.missing.len(), 28);
    }

    #[test]
    fn test_full_document_scores_hundred() {
        let b = breakdown(&full());
        assert_eq!(b.score, 100);
        assert_eq!(b.filled, 28);
        assert!(b.missing.is_empty());
    }

    #[test]
    fn test_score_is_bounded() {
        let mut doc = blank();
        doc.overview.feature = "only one".to_string();
        let s = score(&doc);
        assert!(s > 0 && s < 100);
    }

    #[test]
    fn test_whitespace_only_does_not_count() {
        let mut doc = blank();
        doc.overview.feature = "   ".to_string();
        assert_eq!(score(&doc), 0);
    }

    #[test]
    fn test_missing_lists_unfilled_slots() {
        let mut doc = full();
        doc.summary.next_steps = String::new();
        doc.actions.clear();
        let b = breakdown(&doc);
        assert_eq!(b.missing, vec!["summary.next_steps".to_string(), "actions".to_string()]);
    }
}
