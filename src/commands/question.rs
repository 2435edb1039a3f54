//! Open question collection operations.

use serde::Serialize;
use std::path::Path;

use crate::commands::{Output, read_doc, update_doc};
use crate::models::{Question, QuestionKind, QuestionStatus, add_tag};
use crate::storage::generate_id;
use crate::{Error, Result};

/// Result of single-question commands.
#[derive(Debug, Serialize)]
pub struct QuestionResult {
    pub doc_id: String,
    pub question: Question,
}

fn question_line(q: &Question) -> String {
    let marker = match q.status {
        QuestionStatus::Answered => "✓",
        QuestionStatus::Open => "?",
    };
    let dep = if q.dependency { "  (blocking)" } else { "" };
    let mut line = format!("{}  [{}] ({})  {}{}", q.id, marker, q.kind.label(), q.text, dep);
    if !q.answer.is_empty() {
        for answer_line in q.answer.lines() {
            line.push_str(&format!("\n    → {}", answer_line));
        }
    }
    line
}

impl Output for QuestionResult {
    fn to_human(&self) -> String {
        question_line(&self.question)
    }
}

/// Result of `gw question list`.
#[derive(Debug, Serialize)]
pub struct QuestionListResult {
    pub doc_id: String,
    pub questions: Vec<Question>,
    pub count: usize,
    pub open: usize,
}

impl Output for QuestionListResult {
    fn to_human(&self) -> String {
        if self.questions.is_empty() {
            return "No questions logged".to_string();
        }
        self.questions
            .iter()
            .map(question_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_kind(value: &str) -> Result<QuestionKind> {
    QuestionKind::from_label(value).ok_or_else(|| {
        Error::InvalidInput(format!(
            "Invalid kind '{}'. Must be Product, Design, Technical, Business, or User",
            value
        ))
    })
}

pub fn question_add(
    repo_path: &Path,
    text: String,
    kind: Option<String>,
    dependency: bool,
    tags: Vec<String>,
    doc_id: Option<&str>,
) -> Result<QuestionResult> {
    if text.trim().is_empty() {
        return Err(Error::InvalidInput("Question text cannot be empty".to_string()));
    }
    let kind = match kind {
        Some(value) => parse_kind(&value)?,
        None => QuestionKind::default(),
    };

    let (doc_id, question) = update_doc(repo_path, doc_id, |doc| {
        let mut question = Question {
            id: generate_id("gwq", &text),
            text: text.clone(),
            kind,
            status: QuestionStatus::Open,
            answer: String::new(),
            dependency,
            tags: Vec::new(),
        };
        for tag in &tags {
            add_tag(&mut question.tags, tag);
        }
        doc.questions.push(question.clone());
        Ok(question)
    })?;
    Ok(QuestionResult { doc_id, question })
}

/// Record an answer and mark the question answered.
pub fn question_answer(
    repo_path: &Path,
    id: &str,
    answer: String,
    doc_id: Option<&str>,
) -> Result<QuestionResult> {
    if answer.trim().is_empty() {
        return Err(Error::InvalidInput("Answer cannot be empty".to_string()));
    }

    let (doc_id, question) = update_doc(repo_path, doc_id, |doc| {
        let question = doc
            .questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        question.answer = answer.clone();
        question.status = QuestionStatus::Answered;
        Ok(question.clone())
    })?;
    Ok(QuestionResult { doc_id, question })
}

pub fn question_list(repo_path: &Path, doc_id: Option<&str>) -> Result<QuestionListResult> {
    let doc = read_doc(repo_path, doc_id)?;
    let open = doc
        .questions
        .iter()
        .filter(|q| q.status == QuestionStatus::Open)
        .count();
    Ok(QuestionListResult {
        doc_id: doc.id,
        count: doc.questions.len(),
        open,
        questions: doc.questions,
    })
}

pub fn question_update(
    repo_path: &Path,
    id: &str,
    text: Option<String>,
    kind: Option<String>,
    reopen: bool,
    doc_id: Option<&str>,
) -> Result<QuestionResult> {
    let kind = match kind {
        Some(value) => Some(parse_kind(&value)?),
        None => None,
    };

    let (doc_id, question) = update_doc(repo_path, doc_id, |doc| {
        let question = doc
            .questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        if let Some(text) = text {
            if text.trim().is_empty() {
                return Err(Error::InvalidInput("Question text cannot be empty".to_string()));
            }
            question.text = text;
        }
        if let Some(kind) = kind {
            question.kind = kind;
        }
        if reopen {
            question.status = QuestionStatus::Open;
            question.answer = String::new();
        }
        Ok(question.clone())
    })?;
    Ok(QuestionResult { doc_id, question })
}

pub fn question_remove(repo_path: &Path, id: &str, doc_id: Option<&str>) -> Result<QuestionResult> {
    let (doc_id, question) = update_doc(repo_path, doc_id, |doc| {
        let pos = doc
            .questions
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        Ok(doc.questions.remove(pos))
    })?;
    Ok(QuestionResult { doc_id, question })
}
