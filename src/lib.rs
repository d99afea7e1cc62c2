//! Leitner-box flashcard scheduling.
//!
//! Cards climb eight stages on correct answers and drop back to the first
//! stage on a miss. A card is due once the interval of its stage has passed
//! since its last review, counted in UTC calendar days. Mastered cards never
//! come up again.
//!
//! [`category`] and [`scheduler`] are pure and hold no state. [`storage`],
//! [`service`] and [`app`] wire them to SQLite and a terminal.

pub mod app;
pub mod card;
pub mod category;
pub mod config;
pub mod deck;
pub mod scheduler;
pub mod service;
pub mod storage;

pub use card::{Card, CardError};
pub use category::{InvalidStageError, Stage};
pub use service::{CardNotFound, CardService};
pub use storage::{CardFilter, Storage};
