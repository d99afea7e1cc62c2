use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use leitner::app::{self, Session, SessionEnd};
use leitner::config::Config;
use leitner::deck::split_tags;
use leitner::service::CardUpdate;
use leitner::{Card, CardFilter, CardService, Stage, Storage, scheduler};
use serde::Serialize;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "leitner", about = "Leitner-box flashcards with a daily quiz", version)]
struct Cli {
    /// Config file (default: <config dir>/leitner/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overrides the config
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a card in the first stage
    Add {
        question: String,
        answer: String,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// List cards, newest first
    List {
        /// Only this stage (1-8 or FIRST..DONE)
        #[arg(long)]
        stage: Option<Stage>,
        /// Cards carrying any of these tags
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Created on or after (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Created on or before (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },

    /// Show one card
    Show { id: String },

    /// Change a card's content
    Edit {
        id: String,
        #[arg(long)]
        question: Option<String>,
        #[arg(long)]
        answer: Option<String>,
        /// Comma-separated tags, replaces the current ones
        #[arg(long)]
        tags: Option<String>,
    },

    /// Delete a card
    Delete { id: String },

    /// List the cards due for a quiz
    Quiz {
        /// Quiz date (YYYY-MM-DD, UTC), default today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },

    /// Record a pass/fail answer
    Answer {
        id: String,
        #[command(flatten)]
        verdict: Verdict,
    },

    /// Move a card to a stage of your choice
    Review {
        id: String,
        /// Target stage (1-8 or FIRST..DONE)
        stage: Stage,
    },

    /// Take today's quiz interactively
    Study,

    /// Whether today's quiz is still open
    Status {
        #[arg(long)]
        json: bool,
    },

    /// Card counts per stage
    Stats {
        /// Date used for the due count (YYYY-MM-DD, UTC), default today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },

    /// Create cards from a TSV file (question<TAB>answer[<TAB>tags])
    Import { file: PathBuf },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Verdict {
    #[arg(long)]
    correct: bool,
    #[arg(long)]
    incorrect: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_card_line(card: &Card) {
    println!("{}  {:<8} {}", card.id, card.stage.token(), card.question());
}

fn print_cards(cards: &[Card], json: bool) -> Result<()> {
    if json {
        return print_json(cards);
    }
    if cards.is_empty() {
        println!("No cards.");
    }
    for card in cards {
        print_card_line(card);
    }
    Ok(())
}

fn print_card(card: &Card) {
    println!("id:        {}", card.id);
    println!("question:  {}", card.question());
    println!("answer:    {}", card.answer());
    println!(
        "stage:     {} ({}, {})",
        card.stage.rank(),
        card.stage,
        card.stage.label()
    );
    if !card.tags().is_empty() {
        println!("tags:      {}", card.tags().join(", "));
    }
    println!("created:   {}", card.created_at.format("%Y-%m-%d %H:%M UTC"));
    match card.last_reviewed {
        Some(at) => println!("reviewed:  {}", at.format("%Y-%m-%d %H:%M UTC")),
        None => println!("reviewed:  never"),
    }
    if card.is_done() {
        println!("due:       never (mastered)");
    } else if let Some(due) = scheduler::next_due_date(card) {
        println!("due:       {}", due);
    } else {
        println!("due:       now");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    config.ensure_dirs()?;

    let service = CardService::new(Storage::open(&config.db_path)?);
    let now = Utc::now();
    let today = now.date_naive();

    match cli.command {
        Command::Add {
            question,
            answer,
            tags,
        } => {
            let tags = tags.as_deref().map(split_tags).unwrap_or_default();
            let card = service.create_card(&question, &answer, &tags, now)?;
            println!("Created card {}", card.id);
        }
        Command::List {
            stage,
            tags,
            from,
            to,
            json,
        } => {
            let filter = CardFilter {
                stage,
                tags,
                from,
                to,
            };
            print_cards(&service.list_cards(&filter)?, json)?;
        }
        Command::Show { id } => print_card(&service.get_card(&id)?),
        Command::Edit {
            id,
            question,
            answer,
            tags,
        } => {
            let update = CardUpdate {
                question,
                answer,
                tags: tags.as_deref().map(split_tags),
            };
            let card = service.update_card(&id, &update)?;
            println!("Updated card {}", card.id);
        }
        Command::Delete { id } => {
            service.delete_card(&id)?;
            println!("Deleted card {}", id);
        }
        Command::Quiz { date, json } => {
            let cards = service.quiz_cards(date.unwrap_or(today))?;
            print_cards(&cards, json)?;
        }
        Command::Answer { id, verdict } => {
            let correct = verdict.correct && !verdict.incorrect;
            let card = service.answer_card(&id, correct, now)?;
            println!(
                "Card {} is now in stage {} ({})",
                card.id,
                card.stage,
                card.stage.label()
            );
        }
        Command::Review { id, stage } => {
            let card = service.review_card(&id, stage, now)?;
            println!(
                "Card {} moved to stage {} ({})",
                card.id,
                card.stage,
                card.stage.label()
            );
        }
        Command::Study => {
            let stdin = io::stdin();
            let end =
                Session::new(&service, &config).run(&mut stdin.lock(), &mut io::stdout(), now)?;
            log::debug!("study session ended: {:?}", end);
            if let SessionEnd::Finished(stats) = end
                && stats.reviewed > 0
                && stats.reviewed == stats.correct
            {
                println!("All correct!");
            }
        }
        Command::Status { json } => {
            let availability = app::quiz_availability(&service, &config, today)?;
            if json {
                print_json(&availability)?;
            } else if availability.can_take_quiz {
                println!("Today's quiz is open.");
            } else {
                println!("Today's quiz is done.");
            }
        }
        Command::Stats { date, json } => {
            let stats = service.stats(date.unwrap_or(today))?;
            if json {
                print_json(&stats)?;
            } else {
                println!(
                    "total: {}  due: {}  new: {}  mastered: {}",
                    stats.total, stats.due, stats.new, stats.done
                );
                for (stage, count) in Stage::ALL.iter().zip(stats.per_stage) {
                    println!("  {} {:<13} {}", stage.rank(), stage.label(), count);
                }
            }
        }
        Command::Import { file } => {
            let count = service.import_tsv(&file, now)?;
            println!("Imported {} cards from {}", count, file.display());
        }
    }

    Ok(())
}
