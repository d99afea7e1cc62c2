use crate::card::Card;
use crate::config::Config;
use crate::service::{CardService, QuizAvailability};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rand::seq::SliceRandom;
use std::io::{BufRead, Write};

/// Study session statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub reviewed: usize,
    pub correct: usize,
}

/// How a study session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Every card in the session was answered
    Finished(SessionStats),
    /// User quit or input ran out before the last card
    Quit(SessionStats),
    NothingDue,
    /// Today's quiz was already taken
    AlreadyTaken,
}

/// What the user typed at the grading prompt
enum Grade {
    Correct,
    Incorrect,
    Quit,
}

/// Interactive daily quiz over a line-based terminal
pub struct Session<'a> {
    service: &'a CardService,
    config: &'a Config,
    stats: SessionStats,
}

impl<'a> Session<'a> {
    pub fn new(service: &'a CardService, config: &'a Config) -> Self {
        Self {
            service,
            config,
            stats: SessionStats::default(),
        }
    }

    /// Run the quiz for the UTC date of `now`
    pub fn run<R: BufRead, W: Write>(
        mut self,
        input: &mut R,
        output: &mut W,
        now: DateTime<Utc>,
    ) -> Result<SessionEnd> {
        let today = now.date_naive();

        if !quiz_availability(self.service, self.config, today)?.can_take_quiz {
            writeln!(output, "Today's quiz is already done. Come back tomorrow!")?;
            return Ok(SessionEnd::AlreadyTaken);
        }

        let cards = self.load_cards(today)?;
        if cards.is_empty() {
            writeln!(output, "No cards due on {}.", today)?;
            return Ok(SessionEnd::NothingDue);
        }

        let total = cards.len();
        for (idx, card) in cards.iter().enumerate() {
            writeln!(output)?;
            writeln!(
                output,
                "[{}/{}] {} ({})",
                idx + 1,
                total,
                card.question(),
                card.stage.label()
            )?;
            write!(output, "Press Enter to reveal the answer (q to quit) ")?;
            output.flush()?;

            match read_line(input)? {
                Some(line) if !line.eq_ignore_ascii_case("q") => {}
                _ => return self.finish(output, false, now),
            }

            writeln!(output, "Answer: {}", card.answer())?;

            let correct = match prompt_grade(input, output)? {
                Grade::Correct => true,
                Grade::Incorrect => false,
                Grade::Quit => return self.finish(output, false, now),
            };

            let updated = self.service.answer_card(&card.id, correct, now)?;
            self.stats.reviewed += 1;
            if correct {
                self.stats.correct += 1;
            }
            writeln!(output, "-> {}", updated.stage.label())?;
        }

        self.finish(output, true, now)
    }

    /// Due cards, shuffled and capped as configured
    fn load_cards(&self, today: NaiveDate) -> Result<Vec<Card>> {
        let mut cards = self.service.quiz_cards(today)?;

        // Randomize card order to avoid sequence-based hints
        if self.config.shuffle_cards {
            cards.shuffle(&mut rand::rng());
        }
        if self.config.cards_per_session > 0 {
            cards.truncate(self.config.cards_per_session);
        }

        Ok(cards)
    }

    /// Print the summary. A session that ran through marks today's quiz done.
    fn finish<W: Write>(
        &self,
        output: &mut W,
        finished: bool,
        now: DateTime<Utc>,
    ) -> Result<SessionEnd> {
        writeln!(output)?;
        writeln!(
            output,
            "Reviewed {} card(s), {} correct.",
            self.stats.reviewed, self.stats.correct
        )?;

        if finished {
            self.service.mark_quiz_completed(now.date_naive(), now)?;
            Ok(SessionEnd::Finished(self.stats))
        } else {
            Ok(SessionEnd::Quit(self.stats))
        }
    }
}

/// Whether a quiz can be taken on `today`. Always open when the daily limit is off.
pub fn quiz_availability(
    service: &CardService,
    config: &Config,
    today: NaiveDate,
) -> Result<QuizAvailability> {
    let mut availability = service.quiz_availability(today)?;
    if !config.one_quiz_per_day {
        availability.can_take_quiz = true;
    }
    Ok(availability)
}

/// Read one trimmed line, `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_grade<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Grade> {
    loop {
        write!(output, "Did you know it? [y/n/q] ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(Grade::Quit);
        };
        match line.to_lowercase().as_str() {
            "y" | "yes" => return Ok(Grade::Correct),
            "n" | "no" => return Ok(Grade::Incorrect),
            "q" | "quit" => return Ok(Grade::Quit),
            _ => writeln!(output, "Please answer y, n or q.")?,
        }
    }
}
