//! Seed documents for the catalog.
//!
//! A seed is three JSON arrays: `words.json`, `quiz.json` and
//! `knowledge.json`. The web crate embeds a default seed; a directory on
//! disk can replace it.

use std::path::Path;

use serde::de::DeserializeOwned;

use super::model::{KnowledgeItem, QuizQuestion, SlangWord};
use crate::error::{CoreError, CoreResult};

pub const WORDS_FILE: &str = "words.json";
pub const QUIZ_FILE: &str = "quiz.json";
pub const KNOWLEDGE_FILE: &str = "knowledge.json";

/// Parsed seed content, ready to build a [`Catalog`](super::Catalog).
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub words: Vec<SlangWord>,
    pub quiz: Vec<QuizQuestion>,
    pub knowledge: Vec<KnowledgeItem>,
}

impl Seed {
    /// Parses the three seed documents.
    ///
    /// # Errors
    ///
    /// [`CoreError::SeedParse`] naming the document that failed.
    pub fn from_json(words: &str, quiz: &str, knowledge: &str) -> CoreResult<Self> {
        Ok(Self {
            words: parse(WORDS_FILE, words)?,
            quiz: parse(QUIZ_FILE, quiz)?,
            knowledge: parse(KNOWLEDGE_FILE, knowledge)?,
        })
    }

    /// Reads and parses the seed documents from `dir`.
    pub fn load_dir(dir: &Path) -> CoreResult<Self> {
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    CoreError::NotFound(format!("seed file {}", path.display()))
                }
                _ => CoreError::Io(e),
            })
        };
        Self::from_json(&read(WORDS_FILE)?, &read(QUIZ_FILE)?, &read(KNOWLEDGE_FILE)?)
    }
}

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> CoreResult<Vec<T>> {
    serde_json::from_str(raw).map_err(|e| CoreError::SeedParse(format!("{name}: {e}")))
}
