//! The content catalog: slang words, quiz questions and the knowledge bank.
//!
//! The catalog is built once from a [`Seed`] and then shared behind an
//! `Arc`. Words and knowledge items can change at runtime (approved
//! community submissions, likes), so they sit behind `RwLock`s; quiz
//! questions are read-only.

pub mod model;
pub mod seed;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use dashmap::{DashMap, DashSet};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
pub use model::{
    Difficulty, KnowledgeItem, KnowledgeLevel, KnowledgeType, QuizQuestion, SlangWord,
};
pub use seed::Seed;

/// Helpful / unhelpful votes on a search result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WordFeedback {
    pub helpful: u32,
    pub unhelpful: u32,
}

/// How many words outside the catalog keep feedback counters.
pub const UNKNOWN_FEEDBACK_CAPACITY: usize = 1_000;

/// A word to add to the catalog.
#[derive(Debug, Clone)]
pub struct NewWord {
    pub word: String,
    pub meaning: String,
    pub example: String,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

/// Filters for listing knowledge items.
#[derive(Debug, Clone)]
pub struct KnowledgeFilter {
    pub kind: Option<KnowledgeType>,
    pub difficulty: Option<KnowledgeLevel>,
    pub category: Option<String>,
    /// Matches items carrying any of these tags.
    pub tags: Vec<String>,
    pub offset: usize,
    pub limit: usize,
}

impl Default for KnowledgeFilter {
    fn default() -> Self {
        Self {
            kind: None,
            difficulty: None,
            category: None,
            tags: Vec::new(),
            offset: 0,
            limit: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct KnowledgeStats {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_difficulty: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeResult {
    Added,
    Removed,
}

#[derive(Debug, Clone, Serialize)]
pub struct LikeOutcome {
    pub result: LikeResult,
    pub knowledge_id: String,
    pub new_like_count: u32,
    pub user_liked: bool,
}

pub struct Catalog {
    words: RwLock<Vec<SlangWord>>,
    questions: Vec<QuizQuestion>,
    knowledge: RwLock<Vec<KnowledgeItem>>,
    /// `(user_id, knowledge_id)` pairs.
    likes: DashSet<(String, String)>,
    feedback: DashMap<String, WordFeedback>,
    /// Feedback entries for words that were not in the catalog when first voted on.
    unknown_feedback: AtomicUsize,
    next_word_id: AtomicU64,
}

impl Catalog {
    pub fn new(seed: Seed) -> Self {
        let next_id = seed
            .words
            .iter()
            .filter_map(|w| w.id.parse::<u64>().ok())
            .max()
            .unwrap_or(seed.words.len() as u64)
            + 1;

        tracing::info!(
            "Catalog loaded: {} words, {} quiz questions, {} knowledge items",
            seed.words.len(),
            seed.quiz.len(),
            seed.knowledge.len()
        );

        Self {
            words: RwLock::new(seed.words),
            questions: seed.quiz,
            knowledge: RwLock::new(seed.knowledge),
            likes: DashSet::new(),
            feedback: DashMap::new(),
            unknown_feedback: AtomicUsize::new(0),
            next_word_id: AtomicU64::new(next_id),
        }
    }

    fn words(&self) -> RwLockReadGuard<'_, Vec<SlangWord>> {
        self.words.read().unwrap_or_else(|e| e.into_inner())
    }

    fn words_mut(&self) -> RwLockWriteGuard<'_, Vec<SlangWord>> {
        self.words.write().unwrap_or_else(|e| e.into_inner())
    }

    fn knowledge(&self) -> RwLockReadGuard<'_, Vec<KnowledgeItem>> {
        self.knowledge.read().unwrap_or_else(|e| e.into_inner())
    }

    fn knowledge_mut(&self) -> RwLockWriteGuard<'_, Vec<KnowledgeItem>> {
        self.knowledge.write().unwrap_or_else(|e| e.into_inner())
    }

    // ---- words ----

    pub fn word_count(&self) -> usize {
        self.words().len()
    }

    /// Runs `f` against the current word list without cloning it.
    pub fn with_words<R>(&self, f: impl FnOnce(&[SlangWord]) -> R) -> R {
        f(&self.words())
    }

    pub fn word_by_id(&self, id: &str) -> Option<SlangWord> {
        self.words().iter().find(|w| w.id == id).cloned()
    }

    /// Case-insensitive lookup by the word itself.
    pub fn word_by_name(&self, name: &str) -> Option<SlangWord> {
        let needle = name.trim().to_lowercase();
        self.words()
            .iter()
            .find(|w| w.word.to_lowercase() == needle)
            .cloned()
    }

    /// Looks a word up by id first, then by name.
    pub fn lookup_word(&self, key: &str) -> Option<SlangWord> {
        self.word_by_id(key).or_else(|| self.word_by_name(key))
    }

    pub fn contains_word(&self, name: &str) -> bool {
        self.word_by_name(name).is_some()
    }

    /// Returns page `page` (1-based) of `limit` words in catalog order,
    /// together with the total word count.
    pub fn list_words(&self, page: usize, limit: usize) -> (Vec<SlangWord>, usize) {
        let words = self.words();
        let start = page.saturating_sub(1).saturating_mul(limit);
        let items = words.iter().skip(start).take(limit).cloned().collect();
        (items, words.len())
    }

    /// Other words in the same category as `word`.
    pub fn related_words(&self, word: &SlangWord, limit: usize) -> Vec<SlangWord> {
        let Some(category) = word.category.as_deref() else {
            return Vec::new();
        };
        self.words()
            .iter()
            .filter(|w| w.id != word.id && w.category.as_deref() == Some(category))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Adds a word to the catalog.
    ///
    /// # Errors
    ///
    /// [`CoreError::Conflict`] when the word (case-insensitive) already exists.
    pub fn insert_word(&self, new: NewWord) -> CoreResult<SlangWord> {
        let normalized = new.word.trim().to_lowercase();
        let mut words = self.words_mut();
        if words.iter().any(|w| w.word.to_lowercase() == normalized) {
            return Err(CoreError::Conflict(format!(
                "word '{normalized}' already exists"
            )));
        }

        let word = SlangWord {
            id: self.next_word_id.fetch_add(1, Ordering::Relaxed).to_string(),
            word: normalized,
            meaning: new.meaning,
            example: new.example,
            category: new.category,
            difficulty: new.difficulty,
        };
        words.push(word.clone());
        tracing::info!("Word added to catalog: {} (id={})", word.word, word.id);
        Ok(word)
    }

    /// Records a helpful/unhelpful vote for a search result.
    ///
    /// Catalog words always keep counters. Other words are tracked until
    /// [`UNKNOWN_FEEDBACK_CAPACITY`] of them exist; after that, votes for new
    /// unknown words are dropped and the zero counts are returned.
    pub fn record_feedback(&self, word: &str, helpful: bool) -> WordFeedback {
        let key = word.trim().to_lowercase();
        if !self.feedback.contains_key(&key) && !self.contains_word(&key) {
            if self.unknown_feedback.load(Ordering::Relaxed) >= UNKNOWN_FEEDBACK_CAPACITY {
                tracing::debug!("Feedback for unknown word dropped: {key}");
                return WordFeedback::default();
            }
            self.unknown_feedback.fetch_add(1, Ordering::Relaxed);
        }

        let mut entry = self.feedback.entry(key).or_default();
        if helpful {
            entry.helpful += 1;
        } else {
            entry.unhelpful += 1;
        }
        *entry
    }

    pub fn feedback_for(&self, word: &str) -> WordFeedback {
        self.feedback
            .get(&word.trim().to_lowercase())
            .map(|f| *f)
            .unwrap_or_default()
    }

    // ---- quiz ----

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    // ---- knowledge ----

    pub fn knowledge_count(&self) -> usize {
        self.knowledge().iter().filter(|k| k.is_active).count()
    }

    pub fn with_knowledge<R>(&self, f: impl FnOnce(&[KnowledgeItem]) -> R) -> R {
        f(&self.knowledge())
    }

    /// Active items matching `filter`, newest first.
    pub fn knowledge_items(&self, filter: &KnowledgeFilter) -> Vec<KnowledgeItem> {
        let mut items: Vec<KnowledgeItem> = self
            .knowledge()
            .iter()
            .filter(|item| item.is_active)
            .filter(|item| filter.kind.is_none_or(|k| item.kind == k))
            .filter(|item| filter.difficulty.is_none_or(|d| item.difficulty == d))
            .filter(|item| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|c| item.category == c)
            })
            .filter(|item| filter.tags.is_empty() || filter.tags.iter().any(|t| item.tags.contains(t)))
            .cloned()
            .collect();

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect()
    }

    /// Looks up an active knowledge item.
    pub fn knowledge_by_id(&self, id: &str) -> Option<KnowledgeItem> {
        self.knowledge()
            .iter()
            .find(|k| k.id == id && k.is_active)
            .cloned()
    }

    /// Counts over active items only.
    pub fn knowledge_stats(&self) -> KnowledgeStats {
        let items = self.knowledge();
        let mut stats = KnowledgeStats::default();
        for item in items.iter().filter(|k| k.is_active) {
            stats.total += 1;
            *stats.by_type.entry(item.kind.as_str().to_string()).or_default() += 1;
            *stats
                .by_difficulty
                .entry(item.difficulty.as_str().to_string())
                .or_default() += 1;
            *stats.by_category.entry(item.category.clone()).or_default() += 1;
        }
        stats
    }

    /// Likes the item for `user_id`, or removes the like when it exists.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] when the item does not exist or is inactive.
    pub fn toggle_like(&self, user_id: &str, knowledge_id: &str) -> CoreResult<LikeOutcome> {
        let mut items = self.knowledge_mut();
        let item = items
            .iter_mut()
            .find(|k| k.id == knowledge_id && k.is_active)
            .ok_or_else(|| CoreError::NotFound(format!("knowledge item {knowledge_id}")))?;

        let key = (user_id.to_string(), knowledge_id.to_string());
        let result = if self.likes.remove(&key).is_some() {
            item.like_count = item.like_count.saturating_sub(1);
            LikeResult::Removed
        } else {
            self.likes.insert(key);
            item.like_count += 1;
            LikeResult::Added
        };
        item.updated_at = chrono::Utc::now();

        tracing::info!(
            "Knowledge like updated: user={user_id}, item={knowledge_id}, result={result:?}"
        );

        Ok(LikeOutcome {
            result,
            knowledge_id: knowledge_id.to_string(),
            new_like_count: item.like_count,
            user_liked: result == LikeResult::Added,
        })
    }
}
