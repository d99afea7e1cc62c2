use crate::card::Card;
use crate::category::Stage;
use crate::deck;
use crate::scheduler;
use crate::storage::{CardFilter, ReviewOutcome, Storage};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// A card id that does not exist in storage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("card with id {0} not found")]
pub struct CardNotFound(pub String);

/// Whether today's quiz can still be taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAvailability {
    pub can_take_quiz: bool,
    pub last_quiz_day: Option<NaiveDate>,
}

/// Deck overview on a given date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub total: usize,
    pub due: usize,
    /// Never reviewed
    pub new: usize,
    pub done: usize,
    /// Card count per stage, indexed by rank - 1
    pub per_stage: [usize; 8],
}

/// Edits to card content. `None` leaves the field alone.
#[derive(Debug, Clone, Default)]
pub struct CardUpdate {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Use cases over the card store: lookups by id, engine transitions, persistence
pub struct CardService {
    storage: Storage,
}

impl CardService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn create_card(
        &self,
        question: &str,
        answer: &str,
        tags: &[String],
        now: DateTime<Utc>,
    ) -> Result<Card> {
        let card = Card::new(question, answer, tags, now)?;
        self.storage.save_card(&card)?;
        log::info!("created card {}", card.id);
        Ok(card)
    }

    pub fn get_card(&self, id: &str) -> Result<Card> {
        self.storage
            .get_card(id)?
            .ok_or_else(|| CardNotFound(id.to_string()).into())
    }

    pub fn update_card(&self, id: &str, update: &CardUpdate) -> Result<Card> {
        let mut card = self.get_card(id)?;

        if let Some(question) = &update.question {
            card.set_question(question)?;
        }
        if let Some(answer) = &update.answer {
            card.set_answer(answer)?;
        }
        if let Some(tags) = &update.tags {
            card.set_tags(tags)?;
        }

        self.storage.save_card(&card)?;
        log::info!("updated card {}", card.id);
        Ok(card)
    }

    pub fn delete_card(&self, id: &str) -> Result<()> {
        if !self.storage.delete_card(id)? {
            return Err(CardNotFound(id.to_string()).into());
        }
        log::info!("deleted card {}", id);
        Ok(())
    }

    pub fn list_cards(&self, filter: &CardFilter) -> Result<Vec<Card>> {
        self.storage.list_cards(filter)
    }

    /// Cards due on `as_of`, in storage order
    pub fn quiz_cards(&self, as_of: NaiveDate) -> Result<Vec<Card>> {
        let cards = self.storage.list_cards(&CardFilter::default())?;
        Ok(scheduler::select_due_cards(&cards, as_of))
    }

    /// Apply a pass/fail answer and persist the result
    pub fn answer_card(&self, id: &str, correct: bool, now: DateTime<Utc>) -> Result<Card> {
        let card = self.get_card(id)?;

        let (updated, outcome) = if correct {
            (scheduler::answer_correctly(&card, now), ReviewOutcome::Correct)
        } else {
            (scheduler::answer_incorrectly(&card, now), ReviewOutcome::Incorrect)
        };

        self.persist_transition(&card, &updated, outcome, now)?;
        Ok(updated)
    }

    /// Move a card to a stage picked by hand and persist the result
    pub fn review_card(&self, id: &str, target: Stage, now: DateTime<Utc>) -> Result<Card> {
        let card = self.get_card(id)?;
        let updated = scheduler::move_to_stage(&card, target, now);
        self.persist_transition(&card, &updated, ReviewOutcome::Manual, now)?;
        Ok(updated)
    }

    fn persist_transition(
        &self,
        before: &Card,
        after: &Card,
        outcome: ReviewOutcome,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.storage.save_reviewed_card(after, outcome, before.stage, now)?;
        log::info!(
            "card {} {}: {} -> {}",
            after.id,
            outcome,
            before.stage,
            after.stage
        );
        Ok(())
    }

    /// One quiz per calendar day
    pub fn quiz_availability(&self, today: NaiveDate) -> Result<QuizAvailability> {
        let last_quiz_day = self.storage.last_quiz_day()?;
        Ok(QuizAvailability {
            can_take_quiz: last_quiz_day.is_none_or(|day| day < today),
            last_quiz_day,
        })
    }

    pub fn mark_quiz_completed(&self, today: NaiveDate, now: DateTime<Utc>) -> Result<()> {
        self.storage.mark_quiz_completed(today, now)?;
        log::info!("quiz for {} marked completed", today);
        Ok(())
    }

    pub fn stats(&self, as_of: NaiveDate) -> Result<DeckStats> {
        let cards = self.storage.list_cards(&CardFilter::default())?;
        Ok(DeckStats {
            total: cards.len(),
            due: cards.iter().filter(|c| scheduler::is_due(c, as_of)).count(),
            new: cards.iter().filter(|c| c.last_reviewed.is_none()).count(),
            done: cards.iter().filter(|c| c.is_done()).count(),
            per_stage: self.storage.stage_counts()?,
        })
    }

    /// Create one card per entry of a TSV deck file. Nothing is saved if any entry fails.
    pub fn import_tsv(&self, path: &Path, now: DateTime<Utc>) -> Result<usize> {
        let entries = deck::load(path)?;

        let cards = entries
            .iter()
            .map(|entry| Card::new(&entry.question, &entry.answer, &entry.tags, now))
            .collect::<Result<Vec<_>, _>>()?;

        self.storage.save_cards(&cards)?;
        log::info!("imported {} cards from {}", cards.len(), path.display());
        Ok(cards.len())
    }
}
