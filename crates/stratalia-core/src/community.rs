//! Community word submissions and their moderation.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Catalog, NewWord, SlangWord};
use crate::error::{CoreError, CoreResult};
use crate::points::{PointsAward, PointsLedger};

/// Points for a submission that gets approved.
pub const APPROVAL_POINTS: u32 = 25;
pub const APPROVAL_ACTION: &str = "submission_approved";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub id: String,
    pub word: String,
    pub definition: String,
    pub example: Option<String>,
    pub context: Option<String>,
    pub source: Option<String>,
    pub status: SubmissionStatus,
    pub submitted_by: Option<String>,
    pub reviewed_by: Option<String>,
    pub review_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct NewSubmission {
    pub word: String,
    pub definition: String,
    pub example: Option<String>,
    pub context: Option<String>,
    pub source: Option<String>,
    pub submitted_by: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Moderation {
    pub submission: Submission,
    /// The catalog entry created on approval.
    pub word: Option<SlangWord>,
    /// Points given to the submitter on approval.
    pub award: Option<PointsAward>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ModerationStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub recent: Vec<Submission>,
}

#[derive(Default)]
pub struct Submissions {
    items: RwLock<Vec<Submission>>,
}

impl Submissions {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Submission>> {
        self.items.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Submission>> {
        self.items.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Stores a new pending submission.
    ///
    /// # Errors
    ///
    /// [`CoreError::Conflict`] when the word is already in the catalog or
    /// already awaiting review.
    pub fn submit(&self, catalog: &Catalog, new: NewSubmission) -> CoreResult<Submission> {
        let word = new.word.trim().to_lowercase();
        if catalog.contains_word(&word) {
            return Err(CoreError::Conflict(format!(
                "'{word}' staat al in de database"
            )));
        }

        let mut items = self.write();
        if items
            .iter()
            .any(|s| s.status == SubmissionStatus::Pending && s.word == word)
        {
            return Err(CoreError::Conflict(format!(
                "'{word}' is al ingediend en wacht op beoordeling"
            )));
        }

        let submission = Submission {
            id: Uuid::new_v4().to_string(),
            word,
            definition: new.definition.trim().to_string(),
            example: non_empty(new.example),
            context: non_empty(new.context),
            source: non_empty(new.source),
            status: SubmissionStatus::Pending,
            submitted_by: new.submitted_by,
            reviewed_by: None,
            review_notes: None,
            created_at: Utc::now(),
            reviewed_at: None,
        };
        items.push(submission.clone());
        tracing::info!("Community submission received: {} ({})", submission.word, submission.id);
        Ok(submission)
    }

    pub fn get(&self, id: &str) -> Option<Submission> {
        self.read().iter().find(|s| s.id == id).cloned()
    }

    /// Submissions with `status` (all when `None`), newest first.
    pub fn list(&self, status: Option<SubmissionStatus>, limit: usize) -> Vec<Submission> {
        let mut found: Vec<Submission> = self
            .read()
            .iter()
            .filter(|s| status.is_none_or(|st| s.status == st))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found.truncate(limit);
        found
    }

    pub fn by_submitter(&self, user_id: &str) -> Vec<Submission> {
        let mut found: Vec<Submission> = self
            .read()
            .iter()
            .filter(|s| s.submitted_by.as_deref() == Some(user_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }

    /// Approves or rejects a pending submission.
    ///
    /// Approval adds the word to `catalog` and awards the submitter
    /// [`APPROVAL_POINTS`].
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] for an unknown id, [`CoreError::Conflict`]
    /// when the submission was already reviewed or the word has since been
    /// added to the catalog.
    pub fn moderate(
        &self,
        id: &str,
        decision: Decision,
        reviewer: &str,
        notes: Option<String>,
        catalog: &Catalog,
        points: &PointsLedger,
        today: NaiveDate,
    ) -> CoreResult<Moderation> {
        let mut items = self.write();
        let submission = items
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("submission {id}")))?;

        if submission.status != SubmissionStatus::Pending {
            return Err(CoreError::Conflict(format!(
                "submission {id} is already {:?}",
                submission.status
            )));
        }

        let (status, word) = match decision {
            Decision::Approve => {
                let word = catalog.insert_word(NewWord {
                    word: submission.word.clone(),
                    meaning: submission.definition.clone(),
                    example: submission.example.clone().unwrap_or_default(),
                    category: None,
                    difficulty: None,
                })?;
                (SubmissionStatus::Approved, Some(word))
            }
            Decision::Reject => (SubmissionStatus::Rejected, None),
        };

        submission.status = status;
        submission.reviewed_by = Some(reviewer.to_string());
        submission.review_notes = non_empty(notes);
        submission.reviewed_at = Some(Utc::now());

        let award = match (&word, submission.submitted_by.as_deref()) {
            (Some(_), Some(user_id)) => {
                Some(points.award(user_id, "", APPROVAL_POINTS, APPROVAL_ACTION, today)?)
            }
            _ => None,
        };

        tracing::info!(
            "Submission {} moderated by {reviewer}: {:?}",
            submission.id,
            submission.status
        );

        Ok(Moderation {
            submission: submission.clone(),
            word,
            award,
        })
    }

    pub fn stats(&self) -> ModerationStats {
        let items = self.read();
        let count = |st: SubmissionStatus| items.iter().filter(|s| s.status == st).count();
        let mut recent: Vec<Submission> = items.clone();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(10);

        ModerationStats {
            total: items.len(),
            pending: count(SubmissionStatus::Pending),
            approved: count(SubmissionStatus::Approved),
            rejected: count(SubmissionStatus::Rejected),
            recent,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
