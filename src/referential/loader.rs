//! Tolerant loading of the referential and keyword table
//!
//! A missing, empty or malformed referential file never aborts the
//! application: the loader logs a warning and falls back to a minimal
//! in-memory referential so an analysis can still run end to end.

use crate::error::Result;
use crate::referential::model::{
    Competency, Domain, KeywordTable, Questions, Referential,
};
use log::{info, warn};
use std::collections::HashSet;
use std::path::Path;

/// Default referential shipped with the binary.
pub const DEFAULT_REFERENTIAL_JSON: &str = include_str!("../../data/referential.json");

/// Default keyword table shipped with the binary.
pub const DEFAULT_KEYWORDS_JSON: &str = include_str!("../../data/keywords.json");

/// Load the referential from a file, or the embedded default when no path
/// is given. Falls back to a minimal referential on any load failure.
pub fn load_referential(path: Option<&Path>) -> Result<Referential> {
    let raw = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(content) if !content.trim().is_empty() => content,
            Ok(_) => {
                warn!("referential file {} is empty, using minimal fallback", p.display());
                return Ok(minimal_referential());
            }
            Err(e) => {
                warn!(
                    "referential file {} unreadable ({}), using minimal fallback",
                    p.display(),
                    e
                );
                return Ok(minimal_referential());
            }
        },
        None => DEFAULT_REFERENTIAL_JSON.to_string(),
    };

    match serde_json::from_str::<Referential>(&raw) {
        Ok(mut referential) => {
            dedup_competencies(&mut referential);
            info!(
                "loaded referential v{} ({} domains, {} competencies, {} jobs)",
                referential.version,
                referential.domains.len(),
                referential.competency_count(),
                referential.jobs.len()
            );
            Ok(referential)
        }
        Err(e) => {
            warn!("referential JSON invalid ({}), using minimal fallback", e);
            Ok(minimal_referential())
        }
    }
}

/// Load the keyword table from a file, or the embedded default.
/// An unreadable or invalid file degrades to an empty table: scoring then
/// runs on the Likert and multi-choice channels only.
pub fn load_keywords(path: Option<&Path>) -> Result<KeywordTable> {
    let raw = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(content) => content,
            Err(e) => {
                warn!("keyword file {} unreadable ({}), using empty table", p.display(), e);
                return Ok(empty_keyword_table());
            }
        },
        None => DEFAULT_KEYWORDS_JSON.to_string(),
    };

    match serde_json::from_str::<KeywordTable>(&raw) {
        Ok(table) => Ok(table),
        Err(e) => {
            warn!("keyword JSON invalid ({}), using empty table", e);
            Ok(empty_keyword_table())
        }
    }
}

/// Drop duplicate competency ids across domains, keeping the first
/// occurrence. A competency belongs to exactly one domain.
fn dedup_competencies(referential: &mut Referential) {
    let mut seen: HashSet<String> = HashSet::new();
    for domain in &mut referential.domains {
        domain.competencies.retain(|c| {
            if seen.contains(&c.id) {
                warn!("duplicate competency {} dropped (first occurrence kept)", c.id);
                false
            } else {
                seen.insert(c.id.clone());
                true
            }
        });
    }
}

fn minimal_referential() -> Referential {
    Referential {
        version: "0.0.0".to_string(),
        description: "Auto-generated minimal referential".to_string(),
        last_updated: None,
        domains: vec![Domain {
            id: "B1".to_string(),
            name: "Data Analysis".to_string(),
            description: "Fallback domain".to_string(),
            weight: 1.0,
            competencies: vec![Competency {
                id: "C1".to_string(),
                name: "Exploratory data analysis".to_string(),
                description: String::new(),
            }],
        }],
        jobs: vec![],
        questions: Questions::default(),
    }
}

fn empty_keyword_table() -> KeywordTable {
    KeywordTable {
        competencies: Default::default(),
        generic_vocabulary: vec![],
        families: vec![],
    }
}
