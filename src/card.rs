use crate::category::Stage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation failures on card content
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("card question is required")]
    EmptyQuestion,
    #[error("card answer is required")]
    EmptyAnswer,
    #[error("tag cannot be empty")]
    EmptyTag,
}

/// A flashcard and its Leitner state.
///
/// `stage` and `last_reviewed` are readable in place; change them through
/// `scheduler::answer_correctly`, `answer_incorrectly` or `move_to_stage`,
/// which always move both together. Deserializing runs the same content
/// checks as `Card::new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CardRecord")]
pub struct Card {
    pub id: String,
    question: String,
    answer: String,
    tags: Vec<String>,
    pub stage: Stage,
    pub created_at: DateTime<Utc>,
    /// `None` until the first answer or manual move
    pub last_reviewed: Option<DateTime<Utc>>,
}

/// Unchecked wire form of a card
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardRecord {
    id: String,
    question: String,
    answer: String,
    #[serde(default)]
    tags: Vec<String>,
    stage: Stage,
    created_at: DateTime<Utc>,
    last_reviewed: Option<DateTime<Utc>>,
}

impl TryFrom<CardRecord> for Card {
    type Error = CardError;

    fn try_from(record: CardRecord) -> Result<Self, CardError> {
        let mut card = Card {
            id: record.id,
            question: validate_question(&record.question)?,
            answer: validate_answer(&record.answer)?,
            tags: Vec::new(),
            stage: record.stage,
            created_at: record.created_at,
            last_reviewed: record.last_reviewed,
        };
        card.set_tags(&record.tags)?;
        Ok(card)
    }
}

impl Card {
    /// Create a new card in the first stage, never reviewed
    pub fn new(
        question: &str,
        answer: &str,
        tags: &[String],
        now: DateTime<Utc>,
    ) -> Result<Self, CardError> {
        let mut card = Card {
            id: Uuid::new_v4().to_string(),
            question: validate_question(question)?,
            answer: validate_answer(answer)?,
            tags: Vec::new(),
            stage: Stage::FIRST,
            created_at: now,
            last_reviewed: None,
        };
        card.set_tags(tags)?;
        Ok(card)
    }

    /// Rebuild a card from persisted fields. Content is trusted as stored.
    pub fn from_parts(
        id: String,
        question: String,
        answer: String,
        tags: Vec<String>,
        stage: Stage,
        created_at: DateTime<Utc>,
        last_reviewed: Option<DateTime<Utc>>,
    ) -> Self {
        Card {
            id,
            question,
            answer,
            tags,
            stage,
            created_at,
            last_reviewed,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn set_question(&mut self, question: &str) -> Result<(), CardError> {
        self.question = validate_question(question)?;
        Ok(())
    }

    pub fn set_answer(&mut self, answer: &str) -> Result<(), CardError> {
        self.answer = validate_answer(answer)?;
        Ok(())
    }

    /// Replace all tags. Fails without modifying the card if any tag is blank.
    pub fn set_tags(&mut self, tags: &[String]) -> Result<(), CardError> {
        let mut cleaned: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag = tag.trim();
            if tag.is_empty() {
                return Err(CardError::EmptyTag);
            }
            if !cleaned.iter().any(|t| t == tag) {
                cleaned.push(tag.to_string());
            }
        }
        self.tags = cleaned;
        Ok(())
    }

    /// Add a tag; duplicates are ignored
    pub fn add_tag(&mut self, tag: &str) -> Result<(), CardError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(CardError::EmptyTag);
        }
        if !self.has_tag(tag) {
            self.tags.push(tag.to_string());
        }
        Ok(())
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Mastered cards never come up in a quiz
    pub fn is_done(&self) -> bool {
        self.stage.is_terminal()
    }
}

fn validate_question(question: &str) -> Result<String, CardError> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err(CardError::EmptyQuestion);
    }
    Ok(trimmed.to_string())
}

fn validate_answer(answer: &str) -> Result<String, CardError> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return Err(CardError::EmptyAnswer);
    }
    Ok(trimmed.to_string())
}
