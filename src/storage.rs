use crate::card::Card;
use crate::category::{InvalidStageError, Stage};
use anyhow::{Context, Result};
use chrono::{DateTime, Days, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{Connection, Row, params};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// What happened to a card in a review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Correct,
    Incorrect,
    /// Stage picked by hand, outside the pass/fail flow
    Manual,
}

impl ReviewOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewOutcome::Correct => "correct",
            ReviewOutcome::Incorrect => "incorrect",
            ReviewOutcome::Manual => "manual",
        }
    }
}

impl fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewOutcome {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "correct" => Ok(ReviewOutcome::Correct),
            "incorrect" => Ok(ReviewOutcome::Incorrect),
            "manual" => Ok(ReviewOutcome::Manual),
            other => anyhow::bail!("Unknown review outcome '{}'", other),
        }
    }
}

/// A review record
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i64,
    pub card_id: String,
    pub outcome: ReviewOutcome,
    pub from_stage: Stage,
    pub to_stage: Stage,
    pub reviewed_at: DateTime<Utc>,
}

/// Narrowing for card listings. Empty filter lists everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardFilter {
    pub stage: Option<Stage>,
    /// Card matches if it carries any of these tags
    pub tags: Vec<String>,
    /// Inclusive bounds on the UTC creation date
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl CardFilter {
    fn matches_tags(&self, card: &Card) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|t| card.has_tag(t))
    }
}

impl ToSql for Stage {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(self.rank())))
    }
}

impl FromSql for Stage {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let rank = value.as_i64()?;
        u8::try_from(rank)
            .map_err(|_| InvalidStageError(rank.to_string()))
            .and_then(Stage::from_rank)
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// Fixed width so that text order is time order
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn parse_optional_timestamp(row: &Row, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    match row.get::<_, Option<String>>(idx)? {
        Some(_) => parse_timestamp(row, idx).map(Some),
        None => Ok(None),
    }
}

fn start_of_day(day: NaiveDate) -> String {
    format_timestamp(&day.and_time(chrono::NaiveTime::MIN).and_utc())
}

const CARD_COLUMNS: &str = "id, question, answer, tags, stage, created_at, last_reviewed";

fn card_from_row(row: &Row) -> rusqlite::Result<Card> {
    let tags_json: String = row.get(3)?;
    let tags: Vec<String> = serde_json::from_str(&tags_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Card::from_parts(
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        tags,
        row.get(4)?,
        parse_timestamp(row, 5)?,
        parse_optional_timestamp(row, 6)?,
    ))
}

fn upsert_card(conn: &Connection, card: &Card) -> Result<()> {
    let tags = serde_json::to_string(card.tags())?;

    conn.execute(
        "INSERT INTO cards (id, question, answer, tags, stage, created_at, last_reviewed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(id) DO UPDATE SET
            question = excluded.question,
            answer = excluded.answer,
            tags = excluded.tags,
            stage = excluded.stage,
            last_reviewed = excluded.last_reviewed",
        params![
            card.id,
            card.question(),
            card.answer(),
            tags,
            card.stage,
            format_timestamp(&card.created_at),
            card.last_reviewed.as_ref().map(format_timestamp),
        ],
    )?;
    log::debug!("saved card {} at stage {}", card.id, card.stage);

    Ok(())
}

fn insert_review(
    conn: &Connection,
    card_id: &str,
    outcome: ReviewOutcome,
    from_stage: Stage,
    to_stage: Stage,
    reviewed_at: DateTime<Utc>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO reviews (card_id, outcome, from_stage, to_stage, reviewed_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            card_id,
            outcome.as_str(),
            from_stage,
            to_stage,
            format_timestamp(&reviewed_at)
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open or create the database
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        let storage = Storage { conn };
        storage.init_schema()?;
        log::debug!("opened card database at {}", path.display());

        Ok(storage)
    }

    /// Fresh database that lives as long as the value
    pub fn open_in_memory() -> Result<Self> {
        let storage = Storage {
            conn: Connection::open_in_memory()?,
        };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS cards (
                id TEXT PRIMARY KEY,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                tags TEXT NOT NULL DEFAULT '[]',
                stage INTEGER NOT NULL DEFAULT 1 CHECK (stage BETWEEN 1 AND 8),
                created_at TEXT NOT NULL,
                last_reviewed TEXT
            );

            CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY,
                card_id TEXT NOT NULL,
                outcome TEXT NOT NULL,
                from_stage INTEGER NOT NULL,
                to_stage INTEGER NOT NULL,
                reviewed_at TEXT NOT NULL,
                FOREIGN KEY (card_id) REFERENCES cards(id)
            );

            CREATE TABLE IF NOT EXISTS quiz_sessions (
                day TEXT PRIMARY KEY,
                completed_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_cards_stage ON cards(stage);
            CREATE INDEX IF NOT EXISTS idx_cards_created ON cards(created_at);
            CREATE INDEX IF NOT EXISTS idx_reviews_card ON reviews(card_id);
            ",
        )?;

        Ok(())
    }

    /// Insert or overwrite a card by id
    pub fn save_card(&self, card: &Card) -> Result<()> {
        upsert_card(&self.conn, card)
    }

    /// Save a batch of cards. Either all of them are stored or none.
    pub fn save_cards(&self, cards: &[Card]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for card in cards {
            upsert_card(&tx, card)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Store a card's new state together with the review that produced it
    pub fn save_reviewed_card(
        &self,
        card: &Card,
        outcome: ReviewOutcome,
        from_stage: Stage,
        reviewed_at: DateTime<Utc>,
    ) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        upsert_card(&tx, card)?;
        let review_id = insert_review(&tx, &card.id, outcome, from_stage, card.stage, reviewed_at)?;
        tx.commit()?;
        Ok(review_id)
    }

    /// Get a card by ID
    pub fn get_card(&self, id: &str) -> Result<Option<Card>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?1"))?;

        match stmt.query_row(params![id], card_from_row) {
            Ok(card) => Ok(Some(card)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to load card {}", id)),
        }
    }

    /// Cards matching `filter`, newest first
    pub fn list_cards(&self, filter: &CardFilter) -> Result<Vec<Card>> {
        let from = filter.from.map(start_of_day);
        // Exclusive upper bound: start of the day after `to`
        let until = filter
            .to
            .and_then(|day| day.checked_add_days(Days::new(1)))
            .map(start_of_day);

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CARD_COLUMNS} FROM cards
             WHERE (?1 IS NULL OR stage = ?1)
               AND (?2 IS NULL OR created_at >= ?2)
               AND (?3 IS NULL OR created_at < ?3)
             ORDER BY created_at DESC, id ASC"
        ))?;

        let cards = stmt
            .query_map(params![filter.stage, from, until], card_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load cards")?;

        Ok(cards
            .into_iter()
            .filter(|card| filter.matches_tags(card))
            .collect())
    }

    /// Delete a card and its review history. Returns false if it did not exist.
    pub fn delete_card(&self, id: &str) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM reviews WHERE card_id = ?1", params![id])?;
        let deleted = tx.execute("DELETE FROM cards WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(deleted > 0)
    }

    /// Record a review
    pub fn record_review(
        &self,
        card_id: &str,
        outcome: ReviewOutcome,
        from_stage: Stage,
        to_stage: Stage,
        reviewed_at: DateTime<Utc>,
    ) -> Result<i64> {
        insert_review(&self.conn, card_id, outcome, from_stage, to_stage, reviewed_at)
    }

    /// Review history for a card, oldest first
    pub fn reviews_for_card(&self, card_id: &str) -> Result<Vec<Review>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, card_id, outcome, from_stage, to_stage, reviewed_at
             FROM reviews WHERE card_id = ?1 ORDER BY reviewed_at ASC, id ASC",
        )?;

        let rows = stmt
            .query_map(params![card_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Stage>(3)?,
                    row.get::<_, Stage>(4)?,
                    parse_timestamp(row, 5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, card_id, outcome, from_stage, to_stage, reviewed_at)| {
                Ok(Review {
                    id,
                    card_id,
                    outcome: outcome.parse()?,
                    from_stage,
                    to_stage,
                    reviewed_at,
                })
            })
            .collect()
    }

    /// Number of cards in each stage, indexed by rank - 1
    pub fn stage_counts(&self) -> Result<[usize; 8]> {
        let mut stmt = self
            .conn
            .prepare("SELECT stage, COUNT(*) FROM cards GROUP BY stage")?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, Stage>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut counts = [0usize; 8];
        for (stage, count) in rows {
            counts[usize::from(stage.rank()) - 1] = usize::try_from(count)?;
        }
        Ok(counts)
    }

    /// Remember that the quiz for `day` has been taken
    pub fn mark_quiz_completed(&self, day: NaiveDate, at: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "INSERT INTO quiz_sessions (day, completed_at) VALUES (?1, ?2)
             ON CONFLICT(day) DO UPDATE SET completed_at = excluded.completed_at",
            params![day.format(DAY_FORMAT).to_string(), format_timestamp(&at)],
        )?;
        Ok(())
    }

    /// Most recent day a quiz was completed
    pub fn last_quiz_day(&self) -> Result<Option<NaiveDate>> {
        let day: Option<String> =
            self.conn
                .query_row("SELECT MAX(day) FROM quiz_sessions", [], |row| row.get(0))?;

        day.map(|d| {
            NaiveDate::parse_from_str(&d, DAY_FORMAT)
                .with_context(|| format!("Corrupt quiz day '{}'", d))
        })
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 18, 45, 12).unwrap() + Duration::nanoseconds(123_456_789)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn card(question: &str, tags: &[&str], created_at: DateTime<Utc>) -> Card {
        let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        Card::new(question, "answer", &tags, created_at).unwrap()
    }

    #[test]
    fn test_save_and_get_round_trip() {
        let storage = Storage::open_in_memory().unwrap();
        let mut c = card("Q", &["rust", "cli"], now());
        c.stage = Stage::Sixth;
        c.last_reviewed = Some(now());
        storage.save_card(&c).unwrap();

        let loaded = storage.get_card(&c.id).unwrap().unwrap();
        assert_eq!(loaded, c);
    }

    #[test]
    fn test_get_missing_card() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage.get_card("nope").unwrap().is_none());
    }

    #[test]
    fn test_due_answer_survives_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cards.db");

        let mut c = card("Q", &[], now() - Duration::days(30));
        c.stage = Stage::Second;
        // One nanosecond before midnight: truncation would move the date
        let late = Utc.with_ymd_and_hms(2024, 5, 18, 23, 59, 59).unwrap();
        c.last_reviewed = Some(late + Duration::nanoseconds(999_999_999));

        let as_of = day(2024, 5, 20);
        let before = scheduler::is_due(&c, as_of);
        {
            let storage = Storage::open(&path).unwrap();
            storage.save_card(&c).unwrap();
        }

        let storage = Storage::open(&path).unwrap();
        let loaded = storage.get_card(&c.id).unwrap().unwrap();
        assert_eq!(loaded.last_reviewed, c.last_reviewed);
        assert_eq!(scheduler::is_due(&loaded, as_of), before);
        assert!(before);
    }

    #[test]
    fn test_upsert_overwrites_state() {
        let storage = Storage::open_in_memory().unwrap();
        let c = card("Q", &[], now());
        storage.save_card(&c).unwrap();

        let answered = scheduler::answer_correctly(&c, now());
        storage.save_card(&answered).unwrap();

        let loaded = storage.get_card(&c.id).unwrap().unwrap();
        assert_eq!(loaded.stage, Stage::Second);
        assert_eq!(loaded.last_reviewed, Some(now()));
        assert_eq!(storage.list_cards(&CardFilter::default()).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_stored_stage_is_an_error() {
        let storage = Storage::open_in_memory().unwrap();
        let c = card("Q", &[], now());
        storage.save_card(&c).unwrap();
        // Bypass the CHECK constraint the way a foreign writer could
        storage
            .conn
            .execute_batch("PRAGMA ignore_check_constraints = ON;")
            .unwrap();
        storage
            .conn
            .execute("UPDATE cards SET stage = 12 WHERE id = ?1", params![c.id])
            .unwrap();

        let err = storage.get_card(&c.id).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid stage '12'"));
    }

    #[test]
    fn test_list_newest_first() {
        let storage = Storage::open_in_memory().unwrap();
        let old = card("old", &[], now() - Duration::days(3));
        let new = card("new", &[], now());
        storage.save_card(&old).unwrap();
        storage.save_card(&new).unwrap();

        let cards = storage.list_cards(&CardFilter::default()).unwrap();
        let questions: Vec<&str> = cards.iter().map(|c| c.question()).collect();
        assert_eq!(questions, vec!["new", "old"]);
    }

    #[test]
    fn test_filter_by_stage_and_tags() {
        let storage = Storage::open_in_memory().unwrap();
        let mut math = card("math", &["math"], now());
        math.stage = Stage::Third;
        let geo = card("geo", &["geo", "europe"], now());
        let plain = card("plain", &[], now());
        for c in [&math, &geo, &plain] {
            storage.save_card(c).unwrap();
        }

        let by_stage = storage
            .list_cards(&CardFilter {
                stage: Some(Stage::Third),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_stage.len(), 1);
        assert_eq!(by_stage[0].id, math.id);

        let by_tags = storage
            .list_cards(&CardFilter {
                tags: vec!["europe".into(), "math".into()],
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_tags.len(), 2);
        assert!(by_tags.iter().all(|c| c.id != plain.id));
    }

    #[test]
    fn test_filter_by_creation_dates_inclusive() {
        let storage = Storage::open_in_memory().unwrap();
        let first = card("first", &[], Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let mid = card("mid", &[], Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 59).unwrap());
        let last = card("last", &[], Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap());
        for c in [&first, &mid, &last] {
            storage.save_card(c).unwrap();
        }

        let cards = storage
            .list_cards(&CardFilter {
                from: Some(day(2024, 1, 1)),
                to: Some(day(2024, 1, 5)),
                ..Default::default()
            })
            .unwrap();
        let questions: Vec<&str> = cards.iter().map(|c| c.question()).collect();
        assert_eq!(questions, vec!["mid", "first"]);
    }

    #[test]
    fn test_delete_card() {
        let storage = Storage::open_in_memory().unwrap();
        let c = card("Q", &[], now());
        storage.save_card(&c).unwrap();
        storage
            .record_review(&c.id, ReviewOutcome::Correct, Stage::First, Stage::Second, now())
            .unwrap();

        assert!(storage.delete_card(&c.id).unwrap());
        assert!(!storage.delete_card(&c.id).unwrap());
        assert!(storage.get_card(&c.id).unwrap().is_none());
        assert!(storage.reviews_for_card(&c.id).unwrap().is_empty());
    }

    #[test]
    fn test_delete_card_is_all_or_nothing() {
        let storage = Storage::open_in_memory().unwrap();
        let c = card("Q", &[], now());
        storage.save_card(&c).unwrap();
        storage
            .record_review(&c.id, ReviewOutcome::Correct, Stage::First, Stage::Second, now())
            .unwrap();
        storage
            .conn
            .execute_batch(
                "CREATE TRIGGER keep_cards BEFORE DELETE ON cards
                 BEGIN SELECT RAISE(ABORT, 'cards are locked'); END;",
            )
            .unwrap();

        assert!(storage.delete_card(&c.id).is_err());
        assert!(storage.get_card(&c.id).unwrap().is_some());
        assert_eq!(storage.reviews_for_card(&c.id).unwrap().len(), 1);
    }

    #[test]
    fn test_save_reviewed_card() {
        let storage = Storage::open_in_memory().unwrap();
        let c = card("Q", &[], now());
        storage.save_card(&c).unwrap();

        let answered = scheduler::answer_correctly(&c, now());
        storage
            .save_reviewed_card(&answered, ReviewOutcome::Correct, c.stage, now())
            .unwrap();

        assert_eq!(storage.get_card(&c.id).unwrap().unwrap(), answered);
        let reviews = storage.reviews_for_card(&c.id).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].from_stage, Stage::First);
        assert_eq!(reviews[0].to_stage, Stage::Second);
    }

    #[test]
    fn test_save_reviewed_card_rolls_back_on_review_failure() {
        let storage = Storage::open_in_memory().unwrap();
        let c = card("Q", &[], now());
        storage.save_card(&c).unwrap();
        storage
            .conn
            .execute_batch(
                "CREATE TRIGGER no_reviews BEFORE INSERT ON reviews
                 BEGIN SELECT RAISE(ABORT, 'reviews are locked'); END;",
            )
            .unwrap();

        let answered = scheduler::answer_correctly(&c, now());
        assert!(
            storage
                .save_reviewed_card(&answered, ReviewOutcome::Correct, c.stage, now())
                .is_err()
        );

        let stored = storage.get_card(&c.id).unwrap().unwrap();
        assert_eq!(stored.stage, Stage::First);
        assert_eq!(stored.last_reviewed, None);
    }

    #[test]
    fn test_save_cards_is_all_or_nothing() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .conn
            .execute_batch(
                "CREATE TRIGGER no_bad_cards BEFORE INSERT ON cards WHEN NEW.question = 'bad'
                 BEGIN SELECT RAISE(ABORT, 'bad card'); END;",
            )
            .unwrap();

        let cards = vec![card("good", &[], now()), card("bad", &[], now())];
        assert!(storage.save_cards(&cards).is_err());
        assert!(storage.list_cards(&CardFilter::default()).unwrap().is_empty());

        storage.save_cards(&cards[..1]).unwrap();
        assert_eq!(storage.list_cards(&CardFilter::default()).unwrap().len(), 1);
    }

    #[test]
    fn test_review_history() {
        let storage = Storage::open_in_memory().unwrap();
        let c = card("Q", &[], now());
        storage.save_card(&c).unwrap();
        storage
            .record_review(&c.id, ReviewOutcome::Correct, Stage::First, Stage::Second, now())
            .unwrap();
        storage
            .record_review(
                &c.id,
                ReviewOutcome::Manual,
                Stage::Second,
                Stage::Done,
                now() + Duration::hours(1),
            )
            .unwrap();

        let reviews = storage.reviews_for_card(&c.id).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].outcome, ReviewOutcome::Correct);
        assert_eq!(reviews[1].to_stage, Stage::Done);
        assert_eq!(reviews[0].reviewed_at, now());
    }

    #[test]
    fn test_stage_counts() {
        let storage = Storage::open_in_memory().unwrap();
        let mut done = card("done", &[], now());
        done.stage = Stage::Done;
        storage.save_card(&done).unwrap();
        storage.save_card(&card("a", &[], now())).unwrap();
        storage.save_card(&card("b", &[], now())).unwrap();

        assert_eq!(storage.stage_counts().unwrap(), [2, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_quiz_days() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(storage.last_quiz_day().unwrap(), None);

        storage.mark_quiz_completed(day(2024, 5, 19), now()).unwrap();
        storage.mark_quiz_completed(day(2024, 5, 20), now()).unwrap();
        storage.mark_quiz_completed(day(2024, 5, 20), now()).unwrap();
        assert_eq!(storage.last_quiz_day().unwrap(), Some(day(2024, 5, 20)));
    }

    #[test]
    fn test_review_outcome_parse() {
        assert_eq!("manual".parse::<ReviewOutcome>().unwrap(), ReviewOutcome::Manual);
        assert!("maybe".parse::<ReviewOutcome>().is_err());
    }
}
