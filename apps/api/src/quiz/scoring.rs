//! Scoring Engine — answer record, tally derivation, and winner selection.
//!
//! The tally is never stored. Every result is recomputed from the answer
//! record, so revising an earlier answer can't leave a stale count behind.
//!
//! Winner rule: highest tally; ties go to the category that comes first in
//! enumeration order (builder, analyst, creator, helper, explorer).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::quiz::bank::{Question, QuestionBank};
use crate::quiz::category::Category;
use crate::quiz::QuizError;

/// Per-category count, zero-initialised for every category in the enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTally(BTreeMap<Category, u32>);

impl Default for CategoryTally {
    fn default() -> Self {
        Self(Category::ALL.into_iter().map(|c| (c, 0)).collect())
    }
}

impl CategoryTally {
    pub fn from_counts(counts: &[(Category, u32)]) -> Self {
        let mut tally = Self::default();
        for (category, count) in counts {
            tally.0.insert(*category, *count);
        }
        tally
    }

    fn increment(&mut self, category: Category) {
        *self.0.entry(category).or_insert(0) += 1;
    }

    pub fn get(&self, category: Category) -> u32 {
        self.0.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// First maximum in enumeration order. Total over the enumeration: an
    /// all-zero tally yields `Builder`.
    pub fn top_category(&self) -> Category {
        let mut best = Category::ALL[0];
        let mut best_count = self.get(best);
        for (&category, &count) in &self.0 {
            if count > best_count {
                best = category;
                best_count = count;
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n))
    }
}

/// Client-held quiz state, sent with every quiz request and returned updated.
///
/// `answers` maps a 0-based question index to the chosen option id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSession {
    #[serde(default)]
    pub answers: BTreeMap<usize, String>,
    #[serde(default)]
    pub current: usize,
}

impl QuizSession {
    /// Records (or overwrites) the answer for `question_index` and moves the
    /// pointer to the next question. The pointer stays on the last question
    /// once it is reached.
    pub fn submit_answer(
        &mut self,
        bank: &QuestionBank,
        question_index: usize,
        option_id: &str,
    ) -> Result<(), QuizError> {
        bank.option(question_index, option_id)?;
        self.answers.insert(question_index, option_id.to_string());
        self.current = (question_index + 1).min(bank.len() - 1);
        Ok(())
    }

    /// Steps back one question to revise an answer. A no-op on the first
    /// question; refused once every question has an answer.
    pub fn go_to_previous(&mut self, bank: &QuestionBank) -> Result<(), QuizError> {
        if self.is_complete(bank) {
            return Err(QuizError::AlreadyComplete);
        }
        self.current = self.current.saturating_sub(1);
        Ok(())
    }

    pub fn is_complete(&self, bank: &QuestionBank) -> bool {
        (0..bank.len()).all(|i| self.answers.contains_key(&i))
    }

    /// Checks every recorded answer and the pointer against the bank. Sessions
    /// arrive from clients, so nothing about them is trusted.
    pub fn validate(&self, bank: &QuestionBank) -> Result<(), QuizError> {
        if self.current >= bank.len() {
            return Err(QuizError::QuestionOutOfRange {
                index: self.current,
                total: bank.len(),
            });
        }
        for (&index, option_id) in &self.answers {
            bank.option(index, option_id)?;
        }
        Ok(())
    }

    /// Derives the tally from the answer record alone.
    pub fn tally(&self, bank: &QuestionBank) -> Result<CategoryTally, QuizError> {
        let mut tally = CategoryTally::default();
        for (&index, option_id) in &self.answers {
            tally.increment(bank.option(index, option_id)?.category);
        }
        Ok(tally)
    }

    /// Final classification. Requires an answer for every question.
    pub fn compute_result(&self, bank: &QuestionBank) -> Result<QuizResult, QuizError> {
        if !self.is_complete(bank) {
            return Err(QuizError::Incomplete {
                answered: self.answers.len(),
                total: bank.len(),
            });
        }
        let scores = self.tally(bank)?;
        Ok(QuizResult {
            top_category: scores.top_category(),
            scores,
        })
    }

    pub fn current_question<'a>(&self, bank: &'a QuestionBank) -> Option<&'a Question> {
        bank.get(self.current)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub top_category: Category,
    pub scores: CategoryTally,
}

/// Display figures derived from a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    /// Share of questions that voted for the winner, 0–100.
    pub match_percent: u32,
    /// Two runners-up, highest tally first.
    pub secondary: Vec<CategoryScore>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: u32,
}

impl QuizResult {
    pub fn summary(&self, question_count: usize) -> ResultSummary {
        let top = self.scores.get(self.top_category);
        let match_percent = if question_count == 0 {
            0
        } else {
            ((top as f64 / question_count as f64) * 100.0).round() as u32
        };

        // Stable sort keeps enumeration order among equal tallies.
        let mut others: Vec<CategoryScore> = self
            .scores
            .iter()
            .filter(|(c, _)| *c != self.top_category)
            .map(|(category, score)| CategoryScore { category, score })
            .collect();
        others.sort_by(|a, b| b.score.cmp(&a.score));
        others.truncate(2);

        ResultSummary {
            match_percent,
            secondary: others,
        }
    }
}
