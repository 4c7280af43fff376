//! Fact extraction from user messages.
//!
//! Independent extractor functions that spot self-descriptive statements
//! (name, age, current project) worth persisting. They feed
//! [`remember`](super::orchestrator::MemoryOrchestrator::remember); nothing
//! here touches the stores directly.

use serde::{Deserialize, Serialize};

/// Kind of fact an extractor recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactKind {
    Name,
    Age,
    Project,
}

/// A fact extracted from a user message, phrased for storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFact {
    pub kind: FactKind,
    pub text: String,
}

/// Run all extractors over a user message.
///
/// Each extractor fires at most once; an empty vec means nothing worth
/// remembering was spotted.
pub fn extract_facts(text: &str) -> Vec<ExtractedFact> {
    let mut facts = Vec::new();

    if let Some(name) = extract_name(text) {
        facts.push(ExtractedFact {
            kind: FactKind::Name,
            text: format!("User's name is {name}"),
        });
    }

    if let Some(age) = extract_age(text) {
        facts.push(ExtractedFact {
            kind: FactKind::Age,
            text: format!("User is {age} years old"),
        });
    }

    if let Some(project) = extract_project(text) {
        facts.push(ExtractedFact {
            kind: FactKind::Project,
            text: format!("User is working on {project}"),
        });
    }

    facts
}

fn extract_name(text: &str) -> Option<String> {
    for pattern in ["my name is", "i am called", "call me"] {
        if let Some(rest) = rest_after(text, pattern) {
            // First word after the pattern, stripped of punctuation.
            let name = rest
                .split_whitespace()
                .next()
                .map(trim_punctuation)
                .filter(|s| !s.is_empty())?;
            return Some(name.to_string());
        }
    }
    None
}

fn extract_age(text: &str) -> Option<u32> {
    find_ignore_ascii_case(text, "years old")?;
    // First digit run in the message.
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn extract_project(text: &str) -> Option<String> {
    for pattern in ["working on", "my project is"] {
        if let Some(rest) = rest_after(text, pattern) {
            let project = trim_punctuation(rest.trim());
            if !project.is_empty() {
                return Some(project.to_string());
            }
        }
    }
    None
}

/// The text following the first case-insensitive occurrence of `pattern`.
fn rest_after<'a>(text: &'a str, pattern: &str) -> Option<&'a str> {
    let start = find_ignore_ascii_case(text, pattern)?;
    Some(text[start + pattern.len()..].trim_start())
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

fn trim_punctuation(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
}
