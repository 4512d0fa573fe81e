//! Word of the day.
//!
//! The word for a date is chosen by rotating through the catalog by
//! day-of-year and then pinned, so later catalog changes do not swap the
//! word mid-day.

use chrono::{Datelike, Days, NaiveDate};
use dashmap::{DashMap, DashSet};

use crate::catalog::{Catalog, SlangWord};
use crate::error::{CoreError, CoreResult};

/// Points for completing the word of the day.
pub const DAILY_WORD_POINTS: u32 = 5;

/// How many days back a daily word can still be marked learned.
pub const LEARN_WINDOW_DAYS: u64 = 1;

#[derive(Default)]
pub struct DailyWords {
    chosen: DashMap<NaiveDate, String>,
    /// Completions inside the learn window.
    completed: DashSet<(String, NaiveDate)>,
    /// All-time completions per user.
    learned: DashMap<String, u32>,
}

impl DailyWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the word of the day for `date`, picking one if needed.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] when the catalog holds no words.
    pub fn word_for(&self, catalog: &Catalog, date: NaiveDate) -> CoreResult<SlangWord> {
        if let Some(id) = self.chosen.get(&date) {
            if let Some(word) = catalog.word_by_id(&id) {
                return Ok(word);
            }
        }

        let word = catalog
            .with_words(|words| {
                if words.is_empty() {
                    None
                } else {
                    Some(words[date.ordinal() as usize % words.len()].clone())
                }
            })
            .ok_or_else(|| CoreError::NotFound("no words available".to_string()))?;

        tracing::debug!("Daily word for {date}: {}", word.word);
        self.chosen.insert(date, word.id.clone());
        Ok(word)
    }

    /// Checks that a daily word for `date` can still be marked learned.
    ///
    /// # Errors
    ///
    /// [`CoreError::Validation`] when `date` is after `today` or more than
    /// [`LEARN_WINDOW_DAYS`] before it.
    pub fn check_learn_date(date: NaiveDate, today: NaiveDate) -> CoreResult<()> {
        if date > today {
            return Err(CoreError::validation("date", "Datum mag niet in de toekomst liggen"));
        }
        if date < window_start(today) {
            return Err(CoreError::validation(
                "date",
                "Alleen het woord van vandaag of gisteren kan worden afgerond",
            ));
        }
        Ok(())
    }

    /// Marks the daily word for `date` as learned. Returns `true` the first
    /// time a user completes a given date.
    ///
    /// # Errors
    ///
    /// See [`DailyWords::check_learn_date`].
    pub fn mark_learned(&self, user_id: &str, date: NaiveDate, today: NaiveDate) -> CoreResult<bool> {
        Self::check_learn_date(date, today)?;
        let newly = self.completed.insert((user_id.to_string(), date));
        if newly {
            *self.learned.entry(user_id.to_string()).or_default() += 1;
        }
        Ok(newly)
    }

    /// Daily words the user has completed, ever.
    pub fn learned_count(&self, user_id: &str) -> u32 {
        self.learned.get(user_id).map_or(0, |n| *n)
    }

    /// Forgets completions and pinned words outside the learn window.
    /// Returns the number of entries removed.
    pub fn prune(&self, today: NaiveDate) -> usize {
        let start = window_start(today);
        let before = self.completed.len() + self.chosen.len();
        self.completed.retain(|(_, date)| *date >= start);
        self.chosen.retain(|date, _| (start..=today).contains(date));
        before.saturating_sub(self.completed.len() + self.chosen.len())
    }
}

fn window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(LEARN_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN)
}
