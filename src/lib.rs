//! KANA WiZ: ひらがなの読みを覚えるためのクイズ。
//!
//! `bank` と `session` がクイズ本体、`app` と `ui` が端末の画面側。

pub mod app;
pub mod bank;
pub mod choices;
pub mod config;
pub mod error;
pub mod kana;
pub mod session;
pub mod ui;

pub use bank::{CharacterBank, Dataset};
pub use choices::{CHOICE_COUNT, ChoiceSet, generate_choices};
pub use error::{BankError, ConfigError, QuizError};
pub use kana::{CharacterRecord, Subset};
pub use session::{AnswerKind, Feedback, QuizSession, QuizType, Verdict};
