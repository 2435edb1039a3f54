//! CLI argument definitions for Groundwork.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Groundwork - structured feature analysis before implementation.
///
/// Start with `gw system init`, then `gw doc create "<name>"` to begin an
/// analysis document.
#[derive(Parser, Debug)]
#[command(name = "gw")]
#[command(author, version, about = "A CLI tool for structuring feature analysis before implementation", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Run as if gw was started in <path> instead of the current directory.
    /// The path must exist. Bypasses git root detection - uses the path literally.
    /// Can also be set via GW_REPO environment variable.
    #[arg(short = 'C', long = "repo", global = true, env = "GW_REPO")]
    pub repo_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Document management commands
    Doc {
        #[command(subcommand)]
        command: DocCommands,
    },

    /// Set a scalar field by dotted key (e.g. `overview.feature`, `edge.empty`)
    Set {
        /// Dotted field key
        field: String,

        /// New value
        value: String,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,

        /// Append to the current value instead of replacing it
        #[arg(long)]
        append: bool,
    },

    /// Assumption commands
    Assumption {
        #[command(subcommand)]
        command: AssumptionCommands,
    },

    /// Open question commands
    Question {
        #[command(subcommand)]
        command: QuestionCommands,
    },

    /// Action item commands
    Action {
        #[command(subcommand)]
        command: ActionCommands,
    },

    /// Scope item commands
    Scope {
        #[command(subcommand)]
        command: ScopeCommands,
    },

    /// Edge-case checklist commands
    Edge {
        #[command(subcommand)]
        command: EdgeCommands,
    },

    /// Show completion score and unfilled slots
    Status {
        /// Document id (defaults to the active document)
        id: Option<String>,
    },

    /// Encode a document to the canonical text format
    Export {
        /// Document id (defaults to the active document)
        id: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode canonical text and create a new document or merge into one
    Import {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Always create a new document instead of merging
        #[arg(long)]
        new: bool,

        /// Merge into this document id (defaults to the active document)
        #[arg(long)]
        into: Option<String>,

        /// Use append instead of replace for these dotted field keys
        #[arg(long)]
        append: Vec<String>,
    },

    /// Merge a partial extraction record (JSON) into a document
    Ingest {
        /// Input file with the extraction payload
        file: PathBuf,

        /// Merge into this document id (defaults to the active document)
        #[arg(long)]
        into: Option<String>,

        /// Use append instead of replace for these dotted field keys
        #[arg(long)]
        append: Vec<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// System administration commands
    System {
        #[command(subcommand)]
        command: SystemCommands,
    },
}

/// Document subcommands
#[derive(Subcommand, Debug)]
pub enum DocCommands {
    /// Create a new analysis document (becomes the active document)
    Create {
        /// Document name
        name: String,

        /// Target phase (MVP, V1, V2, Future)
        #[arg(long)]
        phase: Option<String>,

        /// JIRA ticket reference
        #[arg(long)]
        ticket: Option<String>,

        /// Label language (en, es)
        #[arg(long)]
        language: Option<String>,

        /// Mark the document as sensitive
        #[arg(long)]
        secure: bool,
    },

    /// List documents
    List,

    /// Show a document
    Show {
        /// Document id (defaults to the active document)
        id: Option<String>,
    },

    /// Set the active document
    Open {
        /// Document id
        id: String,
    },

    /// Update document metadata
    Update {
        /// Document id (defaults to the active document)
        id: Option<String>,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New target phase (MVP, V1, V2, Future)
        #[arg(long)]
        phase: Option<String>,

        /// New JIRA ticket reference
        #[arg(long)]
        ticket: Option<String>,

        /// New label language (en, es)
        #[arg(long)]
        language: Option<String>,

        /// Mark the document as sensitive
        #[arg(long, conflicts_with = "no_secure")]
        secure: bool,

        /// Clear the sensitive marker
        #[arg(long)]
        no_secure: bool,
    },

    /// Delete a document
    Delete {
        /// Document id
        id: String,
    },
}

/// Assumption subcommands
#[derive(Subcommand, Debug)]
pub enum AssumptionCommands {
    /// Log a new assumption
    Add {
        /// Assumption text
        text: String,

        /// Status (Unvalidated, Needs Research, Validated, Disproven)
        #[arg(long)]
        status: Option<String>,

        /// Tags for the assumption
        #[arg(short, long)]
        tag: Vec<String>,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// List assumptions
    List {
        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// Update an assumption
    Update {
        /// Assumption id
        id: String,

        /// New text
        #[arg(long)]
        text: Option<String>,

        /// New status
        #[arg(long)]
        status: Option<String>,

        /// Tags to add
        #[arg(long)]
        add_tag: Vec<String>,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// Remove an assumption
    Remove {
        /// Assumption id
        id: String,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },
}

/// Question subcommands
#[derive(Subcommand, Debug)]
pub enum QuestionCommands {
    /// Log a new open question
    Add {
        /// Question text
        text: String,

        /// Kind (Product, Design, Technical, Business, User)
        #[arg(long)]
        kind: Option<String>,

        /// Mark the question as blocking other work
        #[arg(long)]
        dependency: bool,

        /// Tags for the question
        #[arg(short, long)]
        tag: Vec<String>,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// Record an answer (marks the question answered)
    Answer {
        /// Question id
        id: String,

        /// Answer text
        answer: String,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// List questions
    List {
        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// Update a question
    Update {
        /// Question id
        id: String,

        /// New text
        #[arg(long)]
        text: Option<String>,

        /// New kind
        #[arg(long)]
        kind: Option<String>,

        /// Reopen the question (clears the answer)
        #[arg(long)]
        reopen: bool,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// Remove a question
    Remove {
        /// Question id
        id: String,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },
}

/// Action item subcommands
#[derive(Subcommand, Debug)]
pub enum ActionCommands {
    /// Log a new action item
    Add {
        /// Action text
        text: String,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// Mark an action item completed
    Check {
        /// Action id
        id: String,

        /// Completion note
        #[arg(long)]
        note: Option<String>,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// Mark an action item not completed
    Uncheck {
        /// Action id
        id: String,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// List action items
    List {
        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// Remove an action item
    Remove {
        /// Action id
        id: String,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },
}

/// Scope item subcommands
#[derive(Subcommand, Debug)]
pub enum ScopeCommands {
    /// Add a scope item
    Add {
        /// Item name
        item: String,

        /// Target version (MVP, V1, V2, Future; unassigned when omitted)
        #[arg(long)]
        version: Option<String>,

        /// Priority (High, Medium, Low)
        #[arg(long)]
        priority: Option<String>,

        /// Item description
        #[arg(short, long)]
        description: Option<String>,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// List scope items
    List {
        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// Update a scope item
    Update {
        /// Scope item id
        id: String,

        /// New item name
        #[arg(long)]
        item: Option<String>,

        /// New version (pass "unassigned" to clear)
        #[arg(long)]
        version: Option<String>,

        /// New priority
        #[arg(long)]
        priority: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// Remove a scope item
    Remove {
        /// Scope item id
        id: String,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },
}

/// Edge-case subcommands
#[derive(Subcommand, Debug)]
pub enum EdgeCommands {
    /// Mark an edge case as considered
    Consider {
        /// Edge case key (empty, loading, error, offline, permissions,
        /// large_data, concurrent, localization)
        key: String,

        /// Notes on how the case is handled
        #[arg(long)]
        notes: Option<String>,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// Mark an edge case as not considered (clears notes)
    Clear {
        /// Edge case key
        key: String,

        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },

    /// List the edge-case checklist
    List {
        /// Target document id (defaults to the active document)
        #[arg(long)]
        doc: Option<String>,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Get a config value
    Get {
        /// Config key (output, language, phase, action_log)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key
        key: String,

        /// New value
        value: String,
    },

    /// List all config values
    List,
}

/// System subcommands
#[derive(Subcommand, Debug)]
pub enum SystemCommands {
    /// Initialize storage for this repository
    Init,

    /// Show build information
    BuildInfo,
}

/// Package version from Cargo.toml.
pub fn package_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Git commit the binary was built from.
pub fn git_commit() -> &'static str {
    env!("GW_GIT_COMMIT")
}

/// Timestamp the binary was built at.
pub fn build_timestamp() -> &'static str {
    env!("GW_BUILD_TIMESTAMP")
}
