//! Per-field line grammar for the canonical text format.
//!
//! Pure functions over single lines: each recognizer either matches a line
//! shape and returns its parts, or returns `None`. The decoder decides which
//! recognizers apply inside which section.

use regex::Regex;
use std::sync::LazyLock;

static TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#\s+(.+)$").expect("valid regex"));

static SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+(.+)$").expect("valid regex"));

static METADATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*(Created|Target Phase|JIRA Ticket):\s*(.*?)\*$").expect("valid regex")
});

static SCALAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*(.+?):\*\*\s*(.*)$").expect("valid regex"));

static LIST_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+\.\s+(?:\[([^\]]*)\]\s*)?(?:\(([^)]+)\)\s*)?(.*)$").expect("valid regex")
});

static LIST_ENTRY_PLAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+\.\s+(?:\[([^\]]*)\]\s*)?(.*)$").expect("valid regex")
});

static CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:→|->)\s?(.*)$").expect("valid regex"));

static INDENTED_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+-\s+(.*)$").expect("valid regex"));

static BUCKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*([^*:]+)\*\*$").expect("valid regex"));

static SCOPE_BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-\s+(.+?)\s+\[([^\]]+)\](?:\s+—\s+(.*))?$").expect("valid regex")
});

static EDGE_CONSIDERED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-\s+\[[xX]\]\s+\*\*(.+?)\*\*(?::\s?(.*))?$").expect("valid regex")
});

static EDGE_UNCONSIDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s+\[\s?\]\s+(.*)$").expect("valid regex"));

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*No .+\*$").expect("valid regex"));

/// A recognized numbered list entry: `N. [tag] (kind) text`.
///
/// `tag` and `kind` are single bracketed/parenthesized tokens; either may be
/// absent. Which tags are meaningful depends on the section. Only the
/// question section carries a `(kind)` token; other sections use
/// [`plain_list_entry`] so a leading parenthesized token stays in the text.
#[derive(Debug, PartialEq, Eq)]
pub struct ListEntry<'a> {
    pub tag: Option<&'a str>,
    pub kind: Option<&'a str>,
    pub text: &'a str,
}

/// Metadata line below the title: `*Created: ...*` etc.
#[derive(Debug, PartialEq, Eq)]
pub enum Metadata<'a> {
    Created(&'a str),
    Phase(&'a str),
    Ticket(&'a str),
}

/// A recognized edge-case checklist line.
#[derive(Debug, PartialEq, Eq)]
pub struct EdgeCaseLine<'a> {
    pub considered: bool,
    pub label: &'a str,
    pub notes: &'a str,
}

/// Title line: `# <name>`. Only meaningful as the very first line.
pub fn title(line: &str) -> Option<&str> {
    TITLE.captures(line).map(|c| c.get(1).unwrap().as_str().trim())
}

/// Section header line: `## <name>`. Does not match `###` subheadings.
pub fn section_header(line: &str) -> Option<&str> {
    SECTION
        .captures(line)
        .filter(|c| !c.get(1).unwrap().as_str().starts_with('#'))
        .map(|c| c.get(1).unwrap().as_str().trim())
}

/// Metadata line: `*Created: X*`, `*Target Phase: X*`, `*JIRA Ticket: X*`.
pub fn metadata(line: &str) -> Option<Metadata<'_>> {
    let caps = METADATA.captures(line)?;
    let value = caps.get(2).unwrap().as_str().trim();
    match caps.get(1).unwrap().as_str() {
        "Created" => Some(Metadata::Created(value)),
        "Target Phase" => Some(Metadata::Phase(value)),
        "JIRA Ticket" => Some(Metadata::Ticket(value)),
        _ => None,
    }
}

/// Labeled scalar line: `**<Label>:** <value>`. Returns (label, trimmed value).
pub fn scalar_field(line: &str) -> Option<(&str, &str)> {
    let caps = SCALAR.captures(line)?;
    Some((
        caps.get(1).unwrap().as_str(),
        caps.get(2).unwrap().as_str().trim(),
    ))
}

/// Numbered list entry line. Returns `None` for non-numbered lines.
pub fn list_entry(line: &str) -> Option<ListEntry<'_>> {
    let caps = LIST_ENTRY.captures(line)?;
    Some(ListEntry {
        tag: caps.get(1).map(|m| m.as_str().trim()),
        kind: caps.get(2).map(|m| m.as_str().trim()),
        text: caps.get(3).unwrap().as_str().trim(),
    })
}

/// Numbered list entry line without a `(kind)` token. `kind` is always
/// `None`; the text keeps any parenthesized prefix verbatim.
pub fn plain_list_entry(line: &str) -> Option<ListEntry<'_>> {
    let caps = LIST_ENTRY_PLAIN.captures(line)?;
    Some(ListEntry {
        tag: caps.get(1).map(|m| m.as_str().trim()),
        kind: None,
        text: caps.get(2).unwrap().as_str().trim(),
    })
}

/// Continuation line following a list entry: `→ text`, `-> text`, or an
/// indented `- text`. Carries the answer/note of the preceding entry.
pub fn continuation(line: &str) -> Option<&str> {
    if let Some(caps) = CONTINUATION.captures(line) {
        return Some(caps.get(1).unwrap().as_str());
    }
    INDENTED_DASH.captures(line).map(|c| c.get(1).unwrap().as_str())
}

/// Version bucket header inside the scope section: `**<version>**`.
pub fn bucket_header(line: &str) -> Option<&str> {
    BUCKET.captures(line).map(|c| c.get(1).unwrap().as_str().trim())
}

/// Bulleted scope item: `- <item> [<priority>] — <description>`.
pub fn scope_bullet(line: &str) -> Option<(&str, &str, &str)> {
    let caps = SCOPE_BULLET.captures(line)?;
    Some((
        caps.get(1).unwrap().as_str(),
        caps.get(2).unwrap().as_str(),
        caps.get(3).map(|m| m.as_str().trim()).unwrap_or(""),
    ))
}

/// Edge-case checklist line, considered or not.
pub fn edge_case_line(line: &str) -> Option<EdgeCaseLine<'_>> {
    if let Some(caps) = EDGE_CONSIDERED.captures(line) {
        return Some(EdgeCaseLine {
            considered: true,
            label: caps.get(1).unwrap().as_str(),
            notes: caps.get(2).map(|m| m.as_str().trim()).unwrap_or(""),
        });
    }
    EDGE_UNCONSIDERED.captures(line).map(|caps| EdgeCaseLine {
        considered: false,
        label: caps.get(1).unwrap().as_str().trim(),
        notes: "",
    })
}

/// Empty-collection placeholder line: `*No ... *`.
pub fn is_placeholder(line: &str) -> bool {
    PLACEHOLDER.is_match(line.trim())
}
