//! Groundwork - a structured feature-analysis library.
//!
//! This library provides the core functionality for the `gw` CLI tool:
//! the analysis document model, the canonical text encoder/decoder, the
//! merge engine, and the completion scorer.

pub mod action_log;
pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod intake;
pub mod merge;
pub mod models;
pub mod score;
pub mod storage;

/// Library-level error type for Groundwork operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not initialized: run `gw system init` first")]
    NotInitialized,

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No active document: run `gw doc open <id>` or pass an id explicitly")]
    NoActiveDocument,

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Groundwork operations.
pub type Result<T> = std::result::Result<T, Error>;
