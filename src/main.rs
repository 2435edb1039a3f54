//! Groundwork CLI - structured feature analysis for humans and agents.

use clap::Parser;
use groundwork::action_log;
use groundwork::cli::{
    ActionCommands, AssumptionCommands, Cli, Commands, ConfigCommands, DocCommands, EdgeCommands,
    QuestionCommands, ScopeCommands, SystemCommands,
};
use groundwork::commands::{self, Output};
use groundwork::config::Config;
use groundwork::storage::find_git_root;
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

fn main() {
    let cli = Cli::parse();
    let human =
        cli.human_readable || Config::load().map(|c| c.human_output()).unwrap_or(false);

    // Determine repo path: --repo flag > GW_REPO env > auto-detect git root > cwd
    let repo_path = resolve_repo_path(cli.repo_path, human);

    // Serialize command for logging
    let (cmd_name, args_json) = serialize_command(&cli.command);

    // Start timing
    let start = Instant::now();

    // Execute command
    let result = run_command(cli.command, &repo_path, human);

    // Calculate duration
    let duration = start.elapsed().as_millis() as u64;

    // Determine success/error
    let (success, error) = match &result {
        Ok(_) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    };

    // Log the action (silently fails if logging is disabled or encounters errors)
    let _ = action_log::log_action(&repo_path, &cmd_name, args_json, success, error, duration);

    // Handle result
    if let Err(e) = result {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!(r#"{{"error": "{}"}}"#, e);
        }
        process::exit(1);
    }
}

/// Resolve the repository path based on explicit flag, environment variable, or auto-detection.
///
/// Priority: --repo flag > GW_REPO env var > git root detection > current working directory
///
/// When an explicit path is provided (via -C/--repo or GW_REPO), it is used literally
/// without git root detection. When no explicit path is given, we auto-detect the git
/// root from the current directory so storage is consistent regardless of which
/// subdirectory the user runs from.
fn resolve_repo_path(explicit_path: Option<PathBuf>, human: bool) -> PathBuf {
    match explicit_path {
        Some(path) => {
            if !path.exists() {
                if human {
                    eprintln!(
                        "Error: Specified repo path does not exist: {}",
                        path.display()
                    );
                } else {
                    eprintln!(
                        r#"{{"error": "Specified repo path does not exist: {}"}}"#,
                        path.display()
                    );
                }
                process::exit(1);
            }
            path
        }
        None => {
            let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            find_git_root(&cwd).unwrap_or(cwd)
        }
    }
}

fn run_command(
    command: Option<Commands>,
    repo_path: &Path,
    human: bool,
) -> Result<(), groundwork::Error> {
    match command {
        Some(Commands::System { command }) => match command {
            SystemCommands::Init => {
                let result = commands::system_init(repo_path)?;
                output(&result, human);
            }
            SystemCommands::BuildInfo => {
                let result = commands::build_info()?;
                output(&result, human);
            }
        },

        Some(Commands::Doc { command }) => match command {
            DocCommands::Create {
                name,
                phase,
                ticket,
                language,
                secure,
            } => {
                let result =
                    commands::doc_create(repo_path, name, phase, ticket, language, secure)?;
                output(&result, human);
            }
            DocCommands::List => {
                let result = commands::doc_list(repo_path)?;
                output(&result, human);
            }
            DocCommands::Show { id } => {
                let result = commands::doc_show(repo_path, id.as_deref())?;
                output(&result, human);
            }
            DocCommands::Open { id } => {
                let result = commands::doc_open(repo_path, &id)?;
                output(&result, human);
            }
            DocCommands::Update {
                id,
                name,
                phase,
                ticket,
                language,
                secure,
                no_secure,
            } => {
                let result = commands::doc_update(
                    repo_path,
                    id.as_deref(),
                    name,
                    phase,
                    ticket,
                    language,
                    secure,
                    no_secure,
                )?;
                output(&result, human);
            }
            DocCommands::Delete { id } => {
                let result = commands::doc_delete(repo_path, &id)?;
                output(&result, human);
            }
        },

        Some(Commands::Set {
            field,
            value,
            doc,
            append,
        }) => {
            let result = commands::set(repo_path, &field, value, doc.as_deref(), append)?;
            output(&result, human);
        }

        Some(Commands::Assumption { command }) => match command {
            AssumptionCommands::Add {
                text,
                status,
                tag,
                doc,
            } => {
                let result =
                    commands::assumption_add(repo_path, text, status, tag, doc.as_deref())?;
                output(&result, human);
            }
            AssumptionCommands::List { doc } => {
                let result = commands::assumption_list(repo_path, doc.as_deref())?;
                output(&result, human);
            }
            AssumptionCommands::Update {
                id,
                text,
                status,
                add_tag,
                doc,
            } => {
                let result = commands::assumption_update(
                    repo_path,
                    &id,
                    text,
                    status,
                    add_tag,
                    doc.as_deref(),
                )?;
                output(&result, human);
            }
            AssumptionCommands::Remove { id, doc } => {
                let result = commands::assumption_remove(repo_path, &id, doc.as_deref())?;
                output(&result, human);
            }
        },

        Some(Commands::Question { command }) => match command {
            QuestionCommands::Add {
                text,
                kind,
                dependency,
                tag,
                doc,
            } => {
                let result = commands::question_add(
                    repo_path,
                    text,
                    kind,
                    dependency,
                    tag,
                    doc.as_deref(),
                )?;
                output(&result, human);
            }
            QuestionCommands::Answer { id, answer, doc } => {
                let result = commands::question_answer(repo_path, &id, answer, doc.as_deref())?;
                output(&result, human);
            }
            QuestionCommands::List { doc } => {
                let result = commands::question_list(repo_path, doc.as_deref())?;
                output(&result, human);
            }
            QuestionCommands::Update {
                id,
                text,
                kind,
                reopen,
                doc,
            } => {
                let result = commands::question_update(
                    repo_path,
                    &id,
                    text,
                    kind,
                    reopen,
                    doc.as_deref(),
                )?;
                output(&result, human);
            }
            QuestionCommands::Remove { id, doc } => {
                let result = commands::question_remove(repo_path, &id, doc.as_deref())?;
                output(&result, human);
            }
        },

        Some(Commands::Action { command }) => match command {
            ActionCommands::Add { text, doc } => {
                let result = commands::action_add(repo_path, text, doc.as_deref())?;
                output(&result, human);
            }
            ActionCommands::Check { id, note, doc } => {
                let result = commands::action_check(repo_path, &id, note, doc.as_deref())?;
                output(&result, human);
            }
            ActionCommands::Uncheck { id, doc } => {
                let result = commands::action_uncheck(repo_path, &id, doc.as_deref())?;
                output(&result, human);
            }
            ActionCommands::List { doc } => {
                let result = commands::action_list(repo_path, doc.as_deref())?;
                output(&result, human);
            }
            ActionCommands::Remove { id, doc } => {
                let result = commands::action_remove(repo_path, &id, doc.as_deref())?;
                output(&result, human);
            }
        },

        Some(Commands::Scope { command }) => match command {
            ScopeCommands::Add {
                item,
                version,
                priority,
                description,
                doc,
            } => {
                let result = commands::scope_add(
                    repo_path,
                    item,
                    version,
                    priority,
                    description,
                    doc.as_deref(),
                )?;
                output(&result, human);
            }
            ScopeCommands::List { doc } => {
                let result = commands::scope_list(repo_path, doc.as_deref())?;
                output(&result, human);
            }
            ScopeCommands::Update {
                id,
                item,
                version,
                priority,
                description,
                doc,
            } => {
                let result = commands::scope_update(
                    repo_path,
                    &id,
                    item,
                    version,
                    priority,
                    description,
                    doc.as_deref(),
                )?;
                output(&result, human);
            }
            ScopeCommands::Remove { id, doc } => {
                let result = commands::scope_remove(repo_path, &id, doc.as_deref())?;
                output(&result, human);
            }
        },

        Some(Commands::Edge { command }) => match command {
            EdgeCommands::Consider { key, notes, doc } => {
                let result = commands::edge_consider(repo_path, &key, notes, doc.as_deref())?;
                output(&result, human);
            }
            EdgeCommands::Clear { key, doc } => {
                let result = commands::edge_clear(repo_path, &key, doc.as_deref())?;
                output(&result, human);
            }
            EdgeCommands::List { doc } => {
                let result = commands::edge_list(repo_path, doc.as_deref())?;
                output(&result, human);
            }
        },

        Some(Commands::Status { id }) => {
            let result = commands::status(repo_path, id.as_deref())?;
            output(&result, human);
        }

        Some(Commands::Export { id, output: out }) => {
            let result = commands::export(repo_path, id.as_deref(), out.as_deref())?;
            output(&result, human);
        }

        Some(Commands::Import {
            file,
            new,
            into,
            append,
        }) => {
            let result = commands::import(
                repo_path,
                file.as_deref(),
                new,
                into.as_deref(),
                &append,
            )?;
            output(&result, human);
        }

        Some(Commands::Ingest { file, into, append }) => {
            let result = commands::ingest(repo_path, &file, into.as_deref(), &append)?;
            output(&result, human);
        }

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Get { key } => {
                let result = commands::config_get(&key)?;
                output(&result, human);
            }
            ConfigCommands::Set { key, value } => {
                let result = commands::config_set(&key, &value)?;
                output(&result, human);
            }
            ConfigCommands::List => {
                let result = commands::config_list()?;
                output(&result, human);
            }
        },

        None => {
            // Default: list documents
            match commands::doc_list(repo_path) {
                Ok(result) => output(&result, human),
                Err(groundwork::Error::NotInitialized) => {
                    if human {
                        println!("Groundwork - Not initialized.");
                        println!(
                            "Run `gw system init` to initialize, then `gw doc create \"Name\"` to start an analysis."
                        );
                    } else {
                        println!(r#"{{"initialized": false, "documents": []}}"#);
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}

/// Serialize the command and its arguments for action logging.
fn serialize_command(command: &Option<Commands>) -> (String, serde_json::Value) {
    match command {
        Some(Commands::System { command }) => match command {
            SystemCommands::Init => ("system init".to_string(), serde_json::json!({})),
            SystemCommands::BuildInfo => ("system build-info".to_string(), serde_json::json!({})),
        },

        Some(Commands::Doc { command }) => match command {
            DocCommands::Create {
                name,
                phase,
                ticket,
                language,
                secure,
            } => (
                "doc create".to_string(),
                serde_json::json!({
                    "name": name,
                    "phase": phase,
                    "ticket": ticket,
                    "language": language,
                    "secure": secure,
                }),
            ),
            DocCommands::List => ("doc list".to_string(), serde_json::json!({})),
            DocCommands::Show { id } => ("doc show".to_string(), serde_json::json!({ "id": id })),
            DocCommands::Open { id } => ("doc open".to_string(), serde_json::json!({ "id": id })),
            DocCommands::Update {
                id,
                name,
                phase,
                ticket,
                language,
                secure,
                no_secure,
            } => (
                "doc update".to_string(),
                serde_json::json!({
                    "id": id,
                    "name": name,
                    "phase": phase,
                    "ticket": ticket,
                    "language": language,
                    "secure": secure,
                    "no_secure": no_secure,
                }),
            ),
            DocCommands::Delete { id } => {
                ("doc delete".to_string(), serde_json::json!({ "id": id }))
            }
        },

        Some(Commands::Set {
            field,
            value,
            doc,
            append,
        }) => (
            "set".to_string(),
            serde_json::json!({ "field": field, "value": value, "doc": doc, "append": append }),
        ),

        Some(Commands::Assumption { command }) => match command {
            AssumptionCommands::Add {
                text,
                status,
                tag,
                doc,
            } => (
                "assumption add".to_string(),
                serde_json::json!({ "text": text, "status": status, "tag": tag, "doc": doc }),
            ),
            AssumptionCommands::List { doc } => (
                "assumption list".to_string(),
                serde_json::json!({ "doc": doc }),
            ),
            AssumptionCommands::Update {
                id,
                text,
                status,
                add_tag,
                doc,
            } => (
                "assumption update".to_string(),
                serde_json::json!({ "id": id, "text": text, "status": status, "add_tag": add_tag, "doc": doc }),
            ),
            AssumptionCommands::Remove { id, doc } => (
                "assumption remove".to_string(),
                serde_json::json!({ "id": id, "doc": doc }),
            ),
        },

        Some(Commands::Question { command }) => match command {
            QuestionCommands::Add {
                text,
                kind,
                dependency,
                tag,
                doc,
            } => (
                "question add".to_string(),
                serde_json::json!({ "text": text, "kind": kind, "dependency": dependency, "tag": tag, "doc": doc }),
            ),
            QuestionCommands::Answer { id, answer, doc } => (
                "question answer".to_string(),
                serde_json::json!({ "id": id, "answer": answer, "doc": doc }),
            ),
            QuestionCommands::List { doc } => (
                "question list".to_string(),
                serde_json::json!({ "doc": doc }),
            ),
            QuestionCommands::Update {
                id,
                text,
                kind,
                reopen,
                doc,
            } => (
                "question update".to_string(),
                serde_json::json!({ "id": id, "text": text, "kind": kind, "reopen": reopen, "doc": doc }),
            ),
            QuestionCommands::Remove { id, doc } => (
                "question remove".to_string(),
                serde_json::json!({ "id": id, "doc": doc }),
            ),
        },

        Some(Commands::Action { command }) => match command {
            ActionCommands::Add { text, doc } => (
                "action add".to_string(),
                serde_json::json!({ "text": text, "doc": doc }),
            ),
            ActionCommands::Check { id, note, doc } => (
                "action check".to_string(),
                serde_json::json!({ "id": id, "note": note, "doc": doc }),
            ),
            ActionCommands::Uncheck { id, doc } => (
                "action uncheck".to_string(),
                serde_json::json!({ "id": id, "doc": doc }),
            ),
            ActionCommands::List { doc } => {
                ("action list".to_string(), serde_json::json!({ "doc": doc }))
            }
            ActionCommands::Remove { id, doc } => (
                "action remove".to_string(),
                serde_json::json!({ "id": id, "doc": doc }),
            ),
        },

        Some(Commands::Scope { command }) => match command {
            ScopeCommands::Add {
                item,
                version,
                priority,
                description,
                doc,
            } => (
                "scope add".to_string(),
                serde_json::json!({ "item": item, "version": version, "priority": priority, "description": description, "doc": doc }),
            ),
            ScopeCommands::List { doc } => {
                ("scope list".to_string(), serde_json::json!({ "doc": doc }))
            }
            ScopeCommands::Update {
                id,
                item,
                version,
                priority,
                description,
                doc,
            } => (
                "scope update".to_string(),
                serde_json::json!({ "id": id, "item": item, "version": version, "priority": priority, "description": description, "doc": doc }),
            ),
            ScopeCommands::Remove { id, doc } => (
                "scope remove".to_string(),
                serde_json::json!({ "id": id, "doc": doc }),
            ),
        },

        Some(Commands::Edge { command }) => match command {
            EdgeCommands::Consider { key, notes, doc } => (
                "edge consider".to_string(),
                serde_json::json!({ "key": key, "notes": notes, "doc": doc }),
            ),
            EdgeCommands::Clear { key, doc } => (
                "edge clear".to_string(),
                serde_json::json!({ "key": key, "doc": doc }),
            ),
            EdgeCommands::List { doc } => {
                ("edge list".to_string(), serde_json::json!({ "doc": doc }))
            }
        },

        Some(Commands::Status { id }) => ("status".to_string(), serde_json::json!({ "id": id })),

        Some(Commands::Export { id, output }) => (
            "export".to_string(),
            serde_json::json!({ "id": id, "output": output }),
        ),

        Some(Commands::Import {
            file,
            new,
            into,
            append,
        }) => (
            "import".to_string(),
            serde_json::json!({ "file": file, "new": new, "into": into, "append": append }),
        ),

        Some(Commands::Ingest { file, into, append }) => (
            "ingest".to_string(),
            serde_json::json!({ "file": file, "into": into, "append": append }),
        ),

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Get { key } => {
                ("config get".to_string(), serde_json::json!({ "key": key }))
            }
            ConfigCommands::Set { key, value } => (
                "config set".to_string(),
                serde_json::json!({ "key": key, "value": value }),
            ),
            ConfigCommands::List => ("config list".to_string(), serde_json::json!({})),
        },

        None => ("default".to_string(), serde_json::json!({})),
    }
}
