//! Decoder: canonical (or hand-edited) text -> document model.
//!
//! A line-oriented state machine. Totally non-throwing: any input yields a
//! structurally valid document, with unmatched sections and fields left at
//! their blank defaults and unknown enum tokens degraded to the benign
//! default. Section headers are matched against current names and the legacy
//! aliases used by older exports.

use chrono::{NaiveDate, Utc};

use crate::codec::grammar::{self, Metadata};
use crate::models::{
    ActionItem, AnalysisDocument, Assumption, AssumptionStatus, EdgeCase, Phase, Question,
    QuestionKind, QuestionStatus, ScopeItem, ScopePriority,
};
use crate::storage::generate_id;

/// The sections the state machine can be inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Overview,
    Problem,
    Context,
    Assumptions,
    EdgeCases,
    Scope,
    Questions,
    Actions,
    Mapping,
    Notes,
    Summary,
}

/// Match a section header against current names and legacy aliases.
fn match_section(name: &str) -> Option<Section> {
    match name {
        "Overview" | "Feature Overview" => Some(Section::Overview),
        "Problem & Purpose" | "Problem" => Some(Section::Problem),
        "User Context" | "Context" => Some(Section::Context),
        "Assumptions" | "Assumptions & Hypotheses" => Some(Section::Assumptions),
        "Edge Cases" | "Edge Cases & States" => Some(Section::EdgeCases),
        "Scope & Versions" | "Scope" => Some(Section::Scope),
        "Open Questions" | "Questions" => Some(Section::Questions),
        "Action Items" | "Next Actions" => Some(Section::Actions),
        "Mapping" | "Figma Mapping" => Some(Section::Mapping),
        "Notes" | "Additional Notes" => Some(Section::Notes),
        "Summary" | "Summary & Confidence" => Some(Section::Summary),
        _ => None,
    }
}

/// Parse text into a best-effort document with a freshly minted id.
pub fn decode(text: &str) -> AnalysisDocument {
    let mut doc = AnalysisDocument::new(generate_id("gw", text), String::new());

    let mut section: Option<Section> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if index == 0 {
            if let Some(name) = grammar::title(line) {
                doc.name = name.to_string();
                continue;
            }
        }

        if let Some(meta) = grammar::metadata(line) {
            apply_metadata(&mut doc, meta);
            continue;
        }

        if let Some(name) = grammar::section_header(line) {
            flush(&mut doc, section, &buffer);
            buffer.clear();
            section = match_section(name);
            continue;
        }

        if section.is_some() {
            // Leading blank lines are skipped; interior blanks are kept so
            // verbatim blocks survive intact.
            if line.trim().is_empty() && buffer.is_empty() {
                continue;
            }
            buffer.push(line);
        }
    }
    flush(&mut doc, section, &buffer);

    doc
}

fn apply_metadata(doc: &mut AnalysisDocument, meta: Metadata<'_>) {
    match meta {
        Metadata::Created(value) => {
            if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                    doc.created_at = midnight.and_utc();
                    if doc.updated_at < doc.created_at {
                        doc.updated_at = doc.created_at;
                    }
                }
            }
        }
        Metadata::Phase(value) => doc.phase = Phase::from_label(value),
        Metadata::Ticket(value) => doc.jira_ticket = value.to_string(),
    }
}

fn flush(doc: &mut AnalysisDocument, section: Option<Section>, buffer: &[&str]) {
    match section {
        Some(Section::Overview) => flush_overview(doc, buffer),
        Some(Section::Problem) => flush_problem(doc, buffer),
        Some(Section::Context) => flush_context(doc, buffer),
        Some(Section::Assumptions) => flush_assumptions(doc, buffer),
        Some(Section::EdgeCases) => flush_edge_cases(doc, buffer),
        Some(Section::Scope) => flush_scope(doc, buffer),
        Some(Section::Questions) => flush_questions(doc, buffer),
        Some(Section::Actions) => flush_actions(doc, buffer),
        Some(Section::Mapping) => flush_mapping(doc, buffer),
        Some(Section::Notes) => flush_notes(doc, buffer),
        Some(Section::Summary) => flush_summary(doc, buffer),
        None => {}
    }
}

fn flush_overview(doc: &mut AnalysisDocument, buffer: &[&str]) {
    let mut description: Vec<&str> = Vec::new();
    for line in buffer {
        if let Some((label, value)) = grammar::scalar_field(line) {
            match label {
                "Feature" => doc.overview.feature = value.to_string(),
                "Date" => doc.overview.date = value.to_string(),
                "Stakeholders" => doc.overview.requestor = value.to_string(),
                "Origin" => {
                    if let Some(rest) = value.strip_prefix("Other: ") {
                        doc.overview.origin = "Other".to_string();
                        doc.overview.origin_other = rest.trim().to_string();
                    } else {
                        doc.overview.origin = value.to_string();
                    }
                }
                // Unknown labels fall into the description catch-all.
                _ => description.push(line),
            }
        } else {
            description.push(line);
        }
    }
    doc.overview.description = description.join("\n").trim().to_string();
}

fn flush_problem(doc: &mut AnalysisDocument, buffer: &[&str]) {
    for line in buffer {
        if let Some((label, value)) = grammar::scalar_field(line) {
            match label {
                "Problem" => doc.problem.statement = value.to_string(),
                "Who" => doc.problem.who = value.to_string(),
                "Business Outcome" => doc.problem.business_outcome = value.to_string(),
                "Success Metrics" => doc.problem.success_metrics = value.to_string(),
                "If Not Built" => doc.problem.if_not_built = value.to_string(),
                _ => {}
            }
        }
    }
}

fn flush_context(doc: &mut AnalysisDocument, buffer: &[&str]) {
    for line in buffer {
        if let Some((label, value)) = grammar::scalar_field(line) {
            match label {
                "Target Segments" => doc.context.segments = value.to_string(),
                "Current Workflow" => doc.context.workflow = value.to_string(),
                "Workarounds" => doc.context.workarounds = value.to_string(),
                "Triggers" => doc.context.triggers = value.to_string(),
                "Before/After" => doc.context.before_after = value.to_string(),
                _ => {}
            }
        }
    }
}

fn flush_assumptions(doc: &mut AnalysisDocument, buffer: &[&str]) {
    for line in buffer {
        if grammar::is_placeholder(line) {
            continue;
        }
        // A parenthesized token here is assumption text, not a kind.
        if let Some(entry) = grammar::plain_list_entry(line) {
            if entry.text.is_empty() {
                continue;
            }
            let status = entry
                .tag
                .and_then(AssumptionStatus::from_label)
                .unwrap_or_default();
            doc.assumptions.push(Assumption {
                id: generate_id("gwa", entry.text),
                text: entry.text.to_string(),
                status,
                tags: Vec::new(),
            });
        }
    }
}

fn flush_edge_cases(doc: &mut AnalysisDocument, buffer: &[&str]) {
    for line in buffer {
        if let Some(parsed) = grammar::edge_case_line(line) {
            // Labels are exact-match; foreign checklist lines are dropped.
            if let Some(key) = EdgeCase::from_label(parsed.label) {
                if let Some(state) = doc.edge_cases.get_mut(&key) {
                    state.considered = parsed.considered;
                    state.notes = parsed.notes.to_string();
                }
            }
        }
    }
}

fn flush_scope(doc: &mut AnalysisDocument, buffer: &[&str]) {
    // The flat numbered listing is presentation only; items are rebuilt from
    // the bulleted by-version listing, whose bucket headers carry `version`.
    let mut bucket: Option<Phase> = None;
    for line in buffer {
        if grammar::is_placeholder(line) {
            continue;
        }
        if let Some((label, value)) = grammar::scalar_field(line) {
            match label {
                "Affected Features" => doc.scope.affected = value.to_string(),
                "New Patterns Needed" => doc.scope.new_patterns = value.to_string(),
                "Technical Constraints" => doc.scope.technical = value.to_string(),
                _ => {}
            }
            continue;
        }
        if let Some(name) = grammar::bucket_header(line) {
            bucket = Phase::from_label(name);
            continue;
        }
        if let Some((item, priority, description)) = grammar::scope_bullet(line) {
            doc.scope.items.push(ScopeItem {
                id: generate_id("gws", item),
                item: item.to_string(),
                description: description.to_string(),
                version: bucket,
                priority: ScopePriority::from_label(priority).unwrap_or_default(),
            });
        }
    }
}

fn flush_questions(doc: &mut AnalysisDocument, buffer: &[&str]) {
    for line in buffer {
        if grammar::is_placeholder(line) {
            continue;
        }
        if let Some(entry) = grammar::list_entry(line) {
            if entry.text.is_empty() {
                continue;
            }
            let status = match entry.tag {
                Some("✓") => QuestionStatus::Answered,
                _ => QuestionStatus::Open,
            };
            let kind = entry
                .kind
                .and_then(QuestionKind::from_label)
                .unwrap_or_default();
            doc.questions.push(Question {
                id: generate_id("gwq", entry.text),
                text: entry.text.to_string(),
                kind,
                status,
                answer: String::new(),
                dependency: false,
                tags: Vec::new(),
            });
        } else if let Some(rest) = grammar::continuation(line) {
            if let Some(last) = doc.questions.last_mut() {
                if last.answer.is_empty() {
                    last.answer = rest.to_string();
                } else {
                    last.answer.push('\n');
                    last.answer.push_str(rest);
                }
            }
        }
    }
}

fn flush_actions(doc: &mut AnalysisDocument, buffer: &[&str]) {
    for line in buffer {
        if grammar::is_placeholder(line) {
            continue;
        }
        if let Some(entry) = grammar::plain_list_entry(line) {
            if entry.text.is_empty() {
                continue;
            }
            let completed = matches!(entry.tag, Some("X") | Some("x"));
            doc.actions.push(ActionItem {
                id: generate_id("gwx", entry.text),
                text: entry.text.to_string(),
                completed,
                note: String::new(),
            });
        } else if let Some(rest) = grammar::continuation(line) {
            if let Some(last) = doc.actions.last_mut() {
                if last.note.is_empty() {
                    last.note = rest.to_string();
                } else {
                    last.note.push('\n');
                    last.note.push_str(rest);
                }
            }
        }
    }
}

fn flush_mapping(doc: &mut AnalysisDocument, buffer: &[&str]) {
    let joined = buffer
        .iter()
        .filter(|line| !grammar::is_placeholder(line))
        .copied()
        .collect::<Vec<_>>()
        .join("\n");
    let trimmed = joined.trim();
    let url = trimmed.strip_prefix("Figma Embed:").unwrap_or(trimmed);
    doc.mapping.figma_url = url.trim().to_string();
}

fn flush_notes(doc: &mut AnalysisDocument, buffer: &[&str]) {
    let joined = buffer
        .iter()
        .filter(|line| !grammar::is_placeholder(line))
        .copied()
        .collect::<Vec<_>>()
        .join("\n");
    doc.notes = joined.trim().to_string();
}

fn flush_summary(doc: &mut AnalysisDocument, buffer: &[&str]) {
    for line in buffer {
        if let Some((label, value)) = grammar::scalar_field(line) {
            match label {
                "Confidence" => doc.summary.confidence = value.to_string(),
                "Key Concerns" => doc.summary.key_concerns = value.to_string(),
                "Next Steps" => doc.summary.next_steps = value.to_string(),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_empty_input() {
        let doc = decode("");
        assert_eq!(doc.name, "");
        assert!(doc.assumptions.is_empty());
        assert_eq!(doc.edge_cases.len(), EdgeCase::ALL.len());
    }

    #[test]
    fn test_decode_garbage_never_panics() {
        for input in [
            "\u{0}\u{1}\u{2} binary-ish",
            "## ",
            "###",
            "1. [",
            "**:**",
            "- [x] **",
            "## Unknown Section\nstuff\n## Overview",
            "→ dangling continuation",
        ] {
            let doc = decode(input);
            assert!(doc.updated_at >= doc.created_at);
        }
    }

    #[test]
    fn test_decode_title_only_on_first_line() {
        let doc = decode("# My Feature\n\n# Not A Title\n");
        assert_eq!(doc.name, "My Feature");

        let doc = decode("*Created: 2026-01-01*\n# Late Title\n");
        assert_eq!(doc.name, "");
    }

    #[test]
    fn test_decode_metadata() {
        let doc = decode("# X\n*Created: 2026-03-15*\n*Target Phase: V2*\n*JIRA Ticket: AB-9*\n");
        assert_eq!(doc.phase, Some(Phase::V2));
        assert_eq!(doc.jira_ticket, "AB-9");
        assert_eq!(doc.created_at.format("%Y-%m-%d").to_string(), "2026-03-15");
    }

    #[test]
    fn test_unknown_phase_degrades_to_none() {
        let doc = decode("# X\n*Target Phase: Soon™*\n");
        assert_eq!(doc.phase, None);
    }

    #[test]
    fn test_decode_overview_with_origin_other() {
        let text = "# X\n\n## Overview\n**Feature:** Toggle\n**Origin:** Other: Hack week\n\nLonger description here.\nSecond line.\n";
        let doc = decode(text);
        assert_eq!(doc.overview.feature, "Toggle");
        assert_eq!(doc.overview.origin, "Other");
        assert_eq!(doc.overview.origin_other, "Hack week");
        assert_eq!(
            doc.overview.description,
            "Longer description here.\nSecond line."
        );
    }

    #[test]
    fn test_decode_legacy_section_aliases() {
        let text = "# X\n\n## Feature Overview\n**Feature:** A\n\n## Next Actions\n1. [ ] Follow up\n\n## Additional Notes\nremember this\n";
        let doc = decode(text);
        assert_eq!(doc.overview.feature, "A");
        assert_eq!(doc.actions.len(), 1);
        assert_eq!(doc.actions[0].text, "Follow up");
        assert!(!doc.actions[0].completed);
        assert_eq!(doc.notes, "remember this");
    }

    #[test]
    fn test_decode_assumption_with_unknown_status() {
        let doc = decode("## Assumptions\n1. [Probably] It works\n");
        assert_eq!(doc.assumptions.len(), 1);
        assert_eq!(doc.assumptions[0].status, AssumptionStatus::Unvalidated);
        assert_eq!(doc.assumptions[0].text, "It works");
    }

    #[test]
    fn test_decode_paren_prefixed_text_survives_outside_questions() {
        let text = "## Assumptions\n1. [Unvalidated] (internal) users have SSO\n\n## Action Items\n1. [ ] (ops) rotate the keys\n";
        let doc = decode(text);
        assert_eq!(doc.assumptions.len(), 1);
        assert_eq!(doc.assumptions[0].text, "(internal) users have SSO");
        assert_eq!(doc.actions.len(), 1);
        assert_eq!(doc.actions[0].text, "(ops) rotate the keys");
    }

    #[test]
    fn test_decode_question_with_multi_line_answer() {
        let text = "## Open Questions\n1. [✓] (Technical) Which DB?\n   → Postgres.\n   → Managed instance.\n2. [?] (Product) Who pays?\n";
        let doc = decode(text);
        assert_eq!(doc.questions.len(), 2);
        assert_eq!(doc.questions[0].status, QuestionStatus::Answered);
        assert_eq!(doc.questions[0].kind, QuestionKind::Technical);
        assert_eq!(doc.questions[0].answer, "Postgres.\nManaged instance.");
        assert_eq!(doc.questions[1].status, QuestionStatus::Open);
        assert_eq!(doc.questions[1].answer, "");
    }

    #[test]
    fn test_decode_scope_items_come_from_bucket_listing_only() {
        let text = "## Scope & Versions\n**Affected Features:** Settings\n1. Toggle [High] — flat listing\n### Scope Items by Version\n**MVP**\n- Toggle [High] — flat listing\n**Unassigned**\n- Later thing [Low]\n";
        let doc = decode(text);
        assert_eq!(doc.scope.affected, "Settings");
        assert_eq!(doc.scope.items.len(), 2);
        assert_eq!(doc.scope.items[0].item, "Toggle");
        assert_eq!(doc.scope.items[0].version, Some(Phase::Mvp));
        assert_eq!(doc.scope.items[0].priority, ScopePriority::High);
        assert_eq!(doc.scope.items[1].version, None);
        assert_eq!(doc.scope.items[1].priority, ScopePriority::Low);
    }

    #[test]
    fn test_decode_edge_cases() {
        let text = "## Edge Cases\n- [x] **Empty state**: show sample data\n- [x] **Error state**\n- [ ] Loading state\n- [x] **Not A Real Label**: dropped\n";
        let doc = decode(text);
        assert!(doc.edge_case(EdgeCase::Empty).considered);
        assert_eq!(doc.edge_case(EdgeCase::Empty).notes, "show sample data");
        assert!(doc.edge_case(EdgeCase::Error).considered);
        assert_eq!(doc.edge_case(EdgeCase::Error).notes, "");
        assert!(!doc.edge_case(EdgeCase::Loading).considered);
        assert_eq!(doc.edge_cases.len(), EdgeCase::ALL.len());
    }

    #[test]
    fn test_decode_mapping_strips_prefix() {
        let doc = decode("## Mapping\nFigma Embed: https://figma.com/file/abc\n");
        assert_eq!(doc.mapping.figma_url, "https://figma.com/file/abc");

        let doc = decode("## Mapping\nhttps://figma.com/file/abc\n");
        assert_eq!(doc.mapping.figma_url, "https://figma.com/file/abc");

        let doc = decode("## Mapping\n*No Figma link.*\n");
        assert_eq!(doc.mapping.figma_url, "");
    }

    #[test]
    fn test_decode_placeholders_yield_empty_collections() {
        let text = "## Assumptions\n*No assumptions logged yet.*\n\n## Open Questions\n*No questions logged yet.*\n\n## Notes\n*No notes.*\n";
        let doc = decode(text);
        assert!(doc.assumptions.is_empty());
        assert!(doc.questions.is_empty());
        assert_eq!(doc.notes, "");
    }

    #[test]
    fn test_decode_ids_are_minted_fresh() {
        let text = "## Assumptions\n1. [Validated] same text\n2. [Validated] same text\n";
        let doc = decode(text);
        assert_eq!(doc.assumptions.len(), 2);
        assert!(doc.assumptions[0].id.starts_with("gwa-"));
    }
}
