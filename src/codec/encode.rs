//! Encoder: document model -> canonical text.
//!
//! Deterministic and total. Scalar fields are emitted only when non-empty
//! after trim; empty collections render a placeholder line. Repeated encoding
//! of an unmutated document always yields the same text.

use crate::models::{AnalysisDocument, EdgeCase, Phase, ScopeItem, is_filled};

/// Section headings, in fixed output order.
pub const OVERVIEW: &str = "Overview";
pub const PROBLEM: &str = "Problem & Purpose";
pub const CONTEXT: &str = "User Context";
pub const ASSUMPTIONS: &str = "Assumptions";
pub const EDGE_CASES: &str = "Edge Cases";
pub const SCOPE: &str = "Scope & Versions";
pub const QUESTIONS: &str = "Open Questions";
pub const ACTIONS: &str = "Action Items";
pub const MAPPING: &str = "Mapping";
pub const NOTES: &str = "Notes";
pub const SUMMARY: &str = "Summary";

pub const NO_ASSUMPTIONS: &str = "*No assumptions logged yet.*";
pub const NO_SCOPE_ITEMS: &str = "*No scope items yet.*";
pub const NO_QUESTIONS: &str = "*No questions logged yet.*";
pub const NO_ACTIONS: &str = "*No action items logged yet.*";
pub const NO_FIGMA: &str = "*No Figma link.*";
pub const NO_NOTES: &str = "*No notes.*";

/// Render a document into the canonical text format.
pub fn encode(doc: &AnalysisDocument) -> String {
    let mut sections: Vec<String> = Vec::new();

    sections.push(header_block(doc));
    sections.push(overview_block(doc));
    sections.push(problem_block(doc));
    sections.push(context_block(doc));
    sections.push(assumptions_block(doc));
    sections.push(edge_cases_block(doc));
    sections.push(scope_block(doc));
    sections.push(questions_block(doc));
    sections.push(actions_block(doc));
    sections.push(mapping_block(doc));
    sections.push(notes_block(doc));
    sections.push(summary_block(doc));

    let mut text = sections.join("\n\n");
    text.push('\n');
    text
}

/// Emit `**<label>:** <value>` iff the value is non-empty after trim.
fn field(lines: &mut Vec<String>, label: &str, value: &str) {
    if is_filled(value) {
        lines.push(format!("**{}:** {}", label, value.trim()));
    }
}

fn header_block(doc: &AnalysisDocument) -> String {
    let mut lines = Vec::new();
    if is_filled(&doc.name) {
        lines.push(format!("# {}", doc.name.trim()));
    }
    lines.push(format!("*Created: {}*", doc.created_at.format("%Y-%m-%d")));
    if let Some(phase) = doc.phase {
        lines.push(format!("*Target Phase: {}*", phase.label()));
    }
    if is_filled(&doc.jira_ticket) {
        lines.push(format!("*JIRA Ticket: {}*", doc.jira_ticket.trim()));
    }
    lines.join("\n")
}

fn overview_block(doc: &AnalysisDocument) -> String {
    let mut lines = vec![format!("## {}", OVERVIEW)];
    let ov = &doc.overview;
    field(&mut lines, "Feature", &ov.feature);
    field(&mut lines, "Date", &ov.date);
    field(&mut lines, "Stakeholders", &ov.requestor);
    if ov.origin.trim() == "Other" && is_filled(&ov.origin_other) {
        lines.push(format!("**Origin:** Other: {}", ov.origin_other.trim()));
    } else {
        field(&mut lines, "Origin", &ov.origin);
    }
    if is_filled(&ov.description) {
        lines.push(String::new());
        lines.push(ov.description.trim().to_string());
    }
    lines.join("\n")
}

fn problem_block(doc: &AnalysisDocument) -> String {
    let mut lines = vec![format!("## {}", PROBLEM)];
    let p = &doc.problem;
    field(&mut lines, "Problem", &p.statement);
    field(&mut lines, "Who", &p.who);
    field(&mut lines, "Business Outcome", &p.business_outcome);
    field(&mut lines, "Success Metrics", &p.success_metrics);
    field(&mut lines, "If Not Built", &p.if_not_built);
    lines.join("\n")
}

fn context_block(doc: &AnalysisDocument) -> String {
    let mut lines = vec![format!("## {}", CONTEXT)];
    let c = &doc.context;
    field(&mut lines, "Target Segments", &c.segments);
    field(&mut lines, "Current Workflow", &c.workflow);
    field(&mut lines, "Workarounds", &c.workarounds);
    field(&mut lines, "Triggers", &c.triggers);
    field(&mut lines, "Before/After", &c.before_after);
    lines.join("\n")
}

fn assumptions_block(doc: &AnalysisDocument) -> String {
    let mut lines = vec![format!("## {}", ASSUMPTIONS)];
    if doc.assumptions.is_empty() {
        lines.push(NO_ASSUMPTIONS.to_string());
    } else {
        for (i, a) in doc.assumptions.iter().enumerate() {
            lines.push(format!("{}. [{}] {}", i + 1, a.status.label(), a.text.trim()));
        }
    }
    lines.join("\n")
}

fn edge_cases_block(doc: &AnalysisDocument) -> String {
    let mut lines = vec![format!("## {}", EDGE_CASES)];
    for key in EdgeCase::ALL {
        let state = doc.edge_case(key);
        if state.considered {
            if is_filled(&state.notes) {
                lines.push(format!("- [x] **{}**: {}", key.label(), state.notes.trim()));
            } else {
                lines.push(format!("- [x] **{}**", key.label()));
            }
        } else {
            lines.push(format!("- [ ] {}", key.label()));
        }
    }
    lines.join("\n")
}

fn scope_item_line(item: &ScopeItem) -> String {
    if is_filled(&item.description) {
        format!(
            "{} [{}] — {}",
            item.item.trim(),
            item.priority.label(),
            item.description.trim()
        )
    } else {
        format!("{} [{}]", item.item.trim(), item.priority.label())
    }
}

fn scope_block(doc: &AnalysisDocument) -> String {
    let mut lines = vec![format!("## {}", SCOPE)];
    let s = &doc.scope;
    field(&mut lines, "Affected Features", &s.affected);
    field(&mut lines, "New Patterns Needed", &s.new_patterns);
    field(&mut lines, "Technical Constraints", &s.technical);

    if s.items.is_empty() {
        lines.push(NO_SCOPE_ITEMS.to_string());
        return lines.join("\n");
    }

    // Flat listing in collection order: presentation only, skipped on decode.
    for (i, item) in s.items.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, scope_item_line(item)));
    }

    // Grouped listing, phase declaration order with Unassigned last. The
    // decoder rebuilds items solely from this listing.
    lines.push("### Scope Items by Version".to_string());
    for phase in Phase::ALL {
        let bucket: Vec<&ScopeItem> =
            s.items.iter().filter(|i| i.version == Some(phase)).collect();
        if !bucket.is_empty() {
            lines.push(format!("**{}**", phase.label()));
            for item in bucket {
                lines.push(format!("- {}", scope_item_line(item)));
            }
        }
    }
    let unassigned: Vec<&ScopeItem> = s.items.iter().filter(|i| i.version.is_none()).collect();
    if !unassigned.is_empty() {
        lines.push("**Unassigned**".to_string());
        for item in unassigned {
            lines.push(format!("- {}", scope_item_line(item)));
        }
    }
    lines.join("\n")
}

fn questions_block(doc: &AnalysisDocument) -> String {
    use crate::models::QuestionStatus;

    let mut lines = vec![format!("## {}", QUESTIONS)];
    if doc.questions.is_empty() {
        lines.push(NO_QUESTIONS.to_string());
    } else {
        for (i, q) in doc.questions.iter().enumerate() {
            let marker = match q.status {
                QuestionStatus::Answered => "✓",
                QuestionStatus::Open => "?",
            };
            lines.push(format!(
                "{}. [{}] ({}) {}",
                i + 1,
                marker,
                q.kind.label(),
                q.text.trim()
            ));
            if is_filled(&q.answer) {
                for answer_line in q.answer.trim().lines() {
                    lines.push(format!("   → {}", answer_line));
                }
            }
        }
    }
    lines.join("\n")
}

fn actions_block(doc: &AnalysisDocument) -> String {
    let mut lines = vec![format!("## {}", ACTIONS)];
    if doc.actions.is_empty() {
        lines.push(NO_ACTIONS.to_string());
    } else {
        for (i, a) in doc.actions.iter().enumerate() {
            let marker = if a.completed { "X" } else { " " };
            lines.push(format!("{}. [{}] {}", i + 1, marker, a.text.trim()));
            if is_filled(&a.note) {
                for note_line in a.note.trim().lines() {
                    lines.push(format!("   → {}", note_line));
                }
            }
        }
    }
    lines.join("\n")
}

fn mapping_block(doc: &AnalysisDocument) -> String {
    let mut lines = vec![format!("## {}", MAPPING)];
    if is_filled(&doc.mapping.figma_url) {
        lines.push(format!("Figma Embed: {}", doc.mapping.figma_url.trim()));
    } else {
        lines.push(NO_FIGMA.to_string());
    }
    lines.join("\n")
}

fn notes_block(doc: &AnalysisDocument) -> String {
    let mut lines = vec![format!("## {}", NOTES)];
    if is_filled(&doc.notes) {
        lines.push(doc.notes.trim().to_string());
    } else {
        lines.push(NO_NOTES.to_string());
    }
    lines.join("\n")
}

fn summary_block(doc: &AnalysisDocument) -> String {
    let mut lines = vec![format!("## {}", SUMMARY)];
    field(&mut lines, "Confidence", &doc.summary.confidence);
    field(&mut lines, "Key Concerns", &doc.summary.key_concerns);
    field(&mut lines, "Next Steps", &doc.summary.next_steps);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisDocument, Assumption, AssumptionStatus};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_minimal_document() {
        let mut doc = AnalysisDocument::new("gw-0001".to_string(), "Dark Mode".to_string());
        doc.overview.feature = "Dark Mode".to_string();
        doc.assumptions.push(Assumption {
            id: "gwa-0001".to_string(),
            text: "Users have modern browsers".to_string(),
            status: AssumptionStatus::Unvalidated,
            tags: vec![],
        });

        let text = encode(&doc);
        assert!(text.starts_with("# Dark Mode\n*Created: "));
        assert!(text.contains("## Overview\n**Feature:** Dark Mode"));
        assert!(text.contains("## Assumptions\n1. [Unvalidated] Users have modern browsers"));
        assert!(text.contains("## Open Questions\n*No questions logged yet.*"));
        assert!(text.contains("## Action Items\n*No action items logged yet.*"));
        assert!(text.contains("## Mapping\n*No Figma link.*"));
        assert!(text.contains("## Notes\n*No notes.*"));
        assert!(text.ends_with("## Summary\n"));
    }

    #[test]
    fn test_padded_item_text_is_trimmed() {
        let mut doc = AnalysisDocument::new("gw-0001".to_string(), "X".to_string());
        doc.assumptions.push(Assumption {
            id: "gwa-0001".to_string(),
            text: "  padded text  ".to_string(),
            status: AssumptionStatus::Unvalidated,
            tags: vec![],
        });
        let text = encode(&doc);
        assert!(text.contains("1. [Unvalidated] padded text\n"));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let doc = AnalysisDocument::new("gw-0001".to_string(), "X".to_string());
        assert_eq!(encode(&doc), encode(&doc));
    }

    #[test]
    fn test_nameless_document_starts_with_created_line() {
        let doc = AnalysisDocument::new("gw-0001".to_string(), "   ".to_string());
        let text = encode(&doc);
        assert!(text.starts_with("*Created: "));
    }

    #[test]
    fn test_origin_other_is_folded_into_one_line() {
        let mut doc = AnalysisDocument::new("gw-0001".to_string(), "X".to_string());
        doc.overview.origin = "Other".to_string();
        doc.overview.origin_other = "Hack week".to_string();
        let text = encode(&doc);
        assert!(text.contains("**Origin:** Other: Hack week"));
    }

    #[test]
    fn test_all_edge_cases_always_emitted() {
        let doc = AnalysisDocument::new("gw-0001".to_string(), "X".to_string());
        let text = encode(&doc);
        for key in EdgeCase::ALL {
            assert!(text.contains(&format!("- [ ] {}", key.label())));
        }
    }
}
