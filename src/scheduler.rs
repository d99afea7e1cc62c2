use crate::card::Card;
use crate::category::Stage;
use chrono::{DateTime, Days, NaiveDate, Utc};

/// Calendar date on which a card becomes due again.
/// `None` for mastered cards and for dates past the end of the calendar.
/// Never-reviewed cards are due on any date, so they have no due date.
pub fn next_due_date(card: &Card) -> Option<NaiveDate> {
    let interval = card.stage.interval_days()?;
    let last = card.last_reviewed?;
    last
        .date_naive()
        .checked_add_days(Days::new(u64::from(interval)))
}

/// Whether a card belongs in the quiz for `as_of` (a UTC calendar date)
pub fn is_due(card: &Card, as_of: NaiveDate) -> bool {
    // Mastered cards are out for good
    if card.stage.is_terminal() {
        return false;
    }

    if card.last_reviewed.is_none() {
        return true;
    }

    match next_due_date(card) {
        Some(due) => as_of >= due,
        None => false,
    }
}

/// Same as [`is_due`], taking a timestamp. Only its UTC date matters.
pub fn is_due_at(card: &Card, as_of: DateTime<Utc>) -> bool {
    is_due(card, as_of.date_naive())
}

/// Cards due on `as_of`, in input order
pub fn select_due_cards(cards: &[Card], as_of: NaiveDate) -> Vec<Card> {
    cards
        .iter()
        .filter(|card| is_due(card, as_of))
        .cloned()
        .collect()
}

/// Promote one stage (saturating at mastered) and stamp the review time
pub fn answer_correctly(card: &Card, now: DateTime<Utc>) -> Card {
    let stage = card.stage.next_on_success();
    log::debug!("card {} answered correctly: {} -> {}", card.id, card.stage, stage);
    transition(card, stage, now)
}

/// Back to the first stage, whatever the current stage is
pub fn answer_incorrectly(card: &Card, now: DateTime<Utc>) -> Card {
    log::debug!("card {} answered incorrectly: {} -> {}", card.id, card.stage, Stage::FIRST);
    transition(card, Stage::FIRST, now)
}

/// Manual override to any stage, terminal included
pub fn move_to_stage(card: &Card, target: Stage, now: DateTime<Utc>) -> Card {
    log::debug!("card {} moved manually: {} -> {}", card.id, card.stage, target);
    transition(card, target, now)
}

fn transition(card: &Card, stage: Stage, now: DateTime<Utc>) -> Card {
    let mut next = card.clone();
    next.stage = stage;
    next.last_reviewed = Some(now);
    next
}
