// ============================================
// src/session.rs
// クイズの状態管理 (出題・採点・スコア)
// ============================================

use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::bank::{CharacterBank, Dataset};
use crate::choices::{ChoiceSet, generate_choices};
use crate::error::QuizError;
use crate::kana::CharacterRecord;

// --------------------------------------------------
// 設定値
// --------------------------------------------------

/// 出題形式
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum QuizType {
    /// ローマ字で答える
    #[default]
    #[serde(rename = "romanized")]
    #[value(name = "romanized")]
    RomanizedEntry,
    /// ハングルで答える
    #[serde(rename = "localized")]
    #[value(name = "localized")]
    LocalizedEntry,
    /// ローマ字・ハングルどちらでも可
    #[serde(rename = "combined")]
    #[value(name = "combined")]
    CombinedEntry,
    /// 5択
    #[serde(rename = "choice")]
    #[value(name = "choice")]
    MultipleChoice,
}

impl QuizType {
    pub const CYCLE: [QuizType; 4] = [
        QuizType::RomanizedEntry,
        QuizType::LocalizedEntry,
        QuizType::CombinedEntry,
        QuizType::MultipleChoice,
    ];

    /// テキスト入力で採点するときの比較対象。5択なら None
    pub fn answer_kind(self) -> Option<AnswerKind> {
        match self {
            QuizType::RomanizedEntry => Some(AnswerKind::Romanized),
            QuizType::LocalizedEntry => Some(AnswerKind::Localized),
            QuizType::CombinedEntry => Some(AnswerKind::Either),
            QuizType::MultipleChoice => None,
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::CYCLE.iter().position(|q| *q == self).unwrap_or(0);
        Self::CYCLE[(idx + 1) % Self::CYCLE.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            QuizType::RomanizedEntry => "Romaji",
            QuizType::LocalizedEntry => "Hangul",
            QuizType::CombinedEntry => "Romaji / Hangul",
            QuizType::MultipleChoice => "Multiple choice",
        }
    }
}

/// どの発音と比べるか
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AnswerKind {
    Romanized,
    Localized,
    /// どちらか一致すれば正解
    Either,
}

// --------------------------------------------------
// 採点結果
// --------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// テキスト入力の採点結果。発音は常に両方を開示する
    Text {
        verdict: Verdict,
        symbol: &'static str,
        submitted: String,
        /// 一致した発音 (不正解なら None)
        matched: Option<&'static str>,
        romanized: &'static str,
        localized: &'static str,
    },
    /// 5択の採点結果
    Choice {
        verdict: Verdict,
        chosen: &'static str,
        correct: &'static str,
    },
}

impl Feedback {
    pub fn verdict(&self) -> Verdict {
        match self {
            Feedback::Text { verdict, .. } | Feedback::Choice { verdict, .. } => *verdict,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.verdict() == Verdict::Correct
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Text {
                verdict: Verdict::Correct,
                symbol,
                romanized,
                localized,
                ..
            } => write!(f, "Correct! '{symbol}' is read '{romanized}' ({localized})."),
            Feedback::Text {
                verdict: Verdict::Incorrect,
                symbol,
                romanized,
                localized,
                ..
            } => write!(f, "Wrong. '{symbol}' is read '{romanized}' ({localized})."),
            Feedback::Choice {
                verdict: Verdict::Correct,
                correct,
                ..
            } => write!(f, "Correct! The answer is '{correct}'."),
            Feedback::Choice {
                verdict: Verdict::Incorrect,
                chosen,
                correct,
            } => write!(f, "Wrong. You chose '{chosen}', the answer is '{correct}'."),
        }
    }
}

// --------------------------------------------------
// セッション本体
// --------------------------------------------------

/// 1人のユーザーの1回の学習セッション
#[derive(Debug)]
pub struct QuizSession<R = StdRng> {
    bank: Arc<CharacterBank>,
    rng: R,

    dataset: Dataset,
    quiz_type: QuizType,

    /// 出題中の記号 (最初の出題前は None)
    current: Option<&'static str>,
    /// 5択の選択肢 (5択のときだけ Some)
    choices: Option<ChoiceSet>,
    is_answered: bool,
    last_feedback: Option<Feedback>,

    score: u32,
    total_answered: u32,
}

impl QuizSession<StdRng> {
    /// OS の乱数で初期化する
    pub fn new(bank: Arc<CharacterBank>) -> Self {
        Self::with_rng(bank, StdRng::from_os_rng())
    }

    /// シード固定 (`--seed`)
    pub fn seeded(bank: Arc<CharacterBank>, seed: u64) -> Self {
        Self::with_rng(bank, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(bank: Arc<CharacterBank>, rng: R) -> Self {
        Self {
            bank,
            rng,
            dataset: Dataset::default(),
            quiz_type: QuizType::default(),
            current: None,
            choices: None,
            is_answered: false,
            last_feedback: None,
            score: 0,
            total_answered: 0,
        }
    }

    /// 新しい問題を出す。
    ///
    /// 範囲や形式の変更時にも呼ぶ (未回答の問題は破棄される)。
    /// スコアには触らない。失敗したときは直前の状態がそのまま残る。
    pub fn start_new_question(&mut self, dataset: Dataset, quiz_type: QuizType) -> Result<(), QuizError> {
        let symbols = self.bank.all_symbols(dataset);
        let symbol = *symbols.choose(&mut self.rng).ok_or(QuizError::InsufficientPoolSize {
            available: 0,
            required: 1,
        })?;

        let choices = match quiz_type {
            QuizType::MultipleChoice => Some(generate_choices(symbol, &self.bank, dataset, &mut self.rng)?),
            _ => None,
        };

        debug!(
            "new question: {} ({:?}, {:?}) choices={:?}",
            symbol,
            dataset,
            quiz_type,
            choices.as_ref().map(ChoiceSet::options)
        );

        self.dataset = dataset;
        self.quiz_type = quiz_type;
        self.current = Some(symbol);
        self.choices = choices;
        self.is_answered = false;
        self.last_feedback = None;
        Ok(())
    }

    /// テキスト入力の採点
    pub fn submit_text_answer(&mut self, raw_input: &str, kind: AnswerKind) -> Result<Feedback, QuizError> {
        if self.is_answered {
            warn!("rejected answer '{}': already answered", raw_input);
            return Err(QuizError::AlreadyAnswered);
        }
        let symbol = self.current.ok_or(QuizError::NoActiveQuestion)?;

        let input = raw_input.trim();
        if input.is_empty() {
            return Err(QuizError::EmptyInput);
        }

        let record = *self.bank.lookup(symbol)?;
        let matched = match_answer(&record, input, kind);

        self.total_answered += 1;
        self.is_answered = true;
        let verdict = if matched.is_some() {
            self.score += 1;
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };

        let feedback = Feedback::Text {
            verdict,
            symbol,
            submitted: input.to_string(),
            matched,
            romanized: record.romanized,
            localized: record.localized,
        };
        debug!("{:?} answer '{}' for {}: {:?}", kind, input, symbol, verdict);

        self.last_feedback = Some(feedback.clone());
        Ok(feedback)
    }

    /// 5択の採点
    pub fn submit_choice(&mut self, selected_index: usize) -> Result<Feedback, QuizError> {
        if self.is_answered {
            warn!("rejected choice {}: already answered", selected_index);
            return Err(QuizError::AlreadyAnswered);
        }
        let choices = self.choices.as_ref().ok_or(QuizError::ChoiceOutOfRange {
            index: selected_index,
            len: 0,
        })?;
        let chosen = choices.get(selected_index).ok_or(QuizError::ChoiceOutOfRange {
            index: selected_index,
            len: choices.len(),
        })?;
        let correct = choices.correct();

        self.total_answered += 1;
        self.is_answered = true;
        let verdict = if selected_index == choices.correct_index() {
            self.score += 1;
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };
        debug!("choice {} ({}) for {}: {:?}", selected_index, chosen, correct, verdict);

        let feedback = Feedback::Choice {
            verdict,
            chosen,
            correct,
        };
        self.last_feedback = Some(feedback.clone());
        Ok(feedback)
    }

    /// スコアを0に戻す。出題中の問題はそのまま (未回答扱いに戻る)
    pub fn reset_score(&mut self) {
        info!("score reset ({}/{})", self.score, self.total_answered);
        self.score = 0;
        self.total_answered = 0;
        self.last_feedback = None;
        self.is_answered = false;
    }

    pub fn bank(&self) -> &CharacterBank {
        &self.bank
    }

    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    pub fn quiz_type(&self) -> QuizType {
        self.quiz_type
    }

    pub fn current_symbol(&self) -> Option<&'static str> {
        self.current
    }

    pub fn current_record(&self) -> Option<&CharacterRecord> {
        self.current.and_then(|s| self.bank.lookup(s).ok())
    }

    pub fn choices(&self) -> Option<&ChoiceSet> {
        self.choices.as_ref()
    }

    pub fn is_answered(&self) -> bool {
        self.is_answered
    }

    pub fn last_feedback(&self) -> Option<&Feedback> {
        self.last_feedback.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_answered(&self) -> u32 {
        self.total_answered
    }

    /// 正解率 (%)。未回答なら None
    pub fn accuracy(&self) -> Option<f64> {
        accuracy(self.score, self.total_answered)
    }

    #[cfg(test)]
    pub(crate) fn force_question(&mut self, symbol: &'static str, choices: Option<ChoiceSet>) {
        self.current = Some(symbol);
        self.quiz_type = if choices.is_some() {
            QuizType::MultipleChoice
        } else {
            QuizType::RomanizedEntry
        };
        self.choices = choices;
        self.is_answered = false;
        self.last_feedback = None;
    }
}

/// 入力と一致した発音を返す
fn match_answer(record: &CharacterRecord, input: &str, kind: AnswerKind) -> Option<&'static str> {
    let romanized_match = || (input.to_lowercase() == record.romanized).then_some(record.romanized);
    let localized_match = || (input == record.localized).then_some(record.localized);

    match kind {
        AnswerKind::Romanized => romanized_match(),
        AnswerKind::Localized => localized_match(),
        AnswerKind::Either => romanized_match().or_else(localized_match),
    }
}

pub fn accuracy(score: u32, total: u32) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(score as f64 / total as f64 * 100.0)
}

/// 表示用: "33.3%"、未回答なら "0%"
pub fn format_accuracy(score: u32, total: u32) -> String {
    match accuracy(score, total) {
        Some(pct) => format!("{:.1}%", pct),
        None => "0%".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> QuizSession {
        let bank = Arc::new(CharacterBank::hiragana().unwrap());
        QuizSession::seeded(bank, 42)
    }

    #[test]
    fn new_session_has_no_question() {
        let s = session();
        assert_eq!(s.current_symbol(), None);
        assert_eq!(s.total_answered(), 0);
        assert_eq!(s.accuracy(), None);
    }

    #[test]
    fn submitting_before_first_question_is_rejected() {
        let mut s = session();
        assert_eq!(
            s.submit_text_answer("a", AnswerKind::Romanized),
            Err(QuizError::NoActiveQuestion)
        );
        assert!(matches!(s.submit_choice(0), Err(QuizError::ChoiceOutOfRange { len: 0, .. })));
    }

    #[test]
    fn new_question_draws_from_the_selected_dataset() {
        let mut s = session();
        for _ in 0..50 {
            s.start_new_question(Dataset::Diacritics, QuizType::RomanizedEntry).unwrap();
            let symbol = s.current_symbol().unwrap();
            assert!(s.bank().all_symbols(Dataset::Diacritics).contains(&symbol));
            assert!(s.choices().is_none());
        }
    }

    #[test]
    fn multiple_choice_question_has_choice_set() {
        let mut s = session();
        s.start_new_question(Dataset::All, QuizType::MultipleChoice).unwrap();
        let choices = s.choices().unwrap();
        assert_eq!(choices.len(), 5);
        assert_eq!(Some(choices.correct()), s.current_symbol());
        assert_eq!(s.quiz_type(), QuizType::MultipleChoice);
    }

    #[test]
    fn romanized_answer_is_case_insensitive() {
        let mut s = session();
        s.force_question("あ", None);

        let fb = s.submit_text_answer("A", AnswerKind::Romanized).unwrap();
        assert!(fb.is_correct());
        assert_eq!(s.score(), 1);
        assert_eq!(s.total_answered(), 1);
        assert_eq!(s.last_feedback(), Some(&fb));
    }

    #[test]
    fn blank_answer_is_not_counted() {
        let mut s = session();
        s.force_question("あ", None);

        assert_eq!(s.submit_text_answer(" ", AnswerKind::Romanized), Err(QuizError::EmptyInput));
        assert_eq!(s.score(), 0);
        assert_eq!(s.total_answered(), 0);
        assert!(!s.is_answered());
    }

    #[test]
    fn second_submission_changes_nothing() {
        let mut s = session();
        s.force_question("し", None);

        let fb = s.submit_text_answer("si", AnswerKind::Romanized).unwrap();
        assert_eq!(fb.verdict(), Verdict::Incorrect);

        for input in ["shi", "SHI", "시"] {
            assert_eq!(
                s.submit_text_answer(input, AnswerKind::Either),
                Err(QuizError::AlreadyAnswered)
            );
        }
        assert_eq!(s.submit_choice(0), Err(QuizError::AlreadyAnswered));
        assert_eq!(s.score(), 0);
        assert_eq!(s.total_answered(), 1);
        assert_eq!(s.last_feedback(), Some(&fb));
    }

    #[test]
    fn localized_answer_is_compared_exactly_after_trim() {
        let mut s = session();
        s.force_question("か", None);
        let fb = s.submit_text_answer("  카 ", AnswerKind::Localized).unwrap();
        assert!(fb.is_correct());

        s.force_question("か", None);
        let fb = s.submit_text_answer("ka", AnswerKind::Localized).unwrap();
        assert!(!fb.is_correct());
    }

    #[test]
    fn either_kind_accepts_both_forms_and_discloses_both() {
        let mut s = session();
        s.force_question("つ", None);
        let fb = s.submit_text_answer("츠", AnswerKind::Either).unwrap();
        assert_eq!(
            fb,
            Feedback::Text {
                verdict: Verdict::Correct,
                symbol: "つ",
                submitted: "츠".to_string(),
                matched: Some("츠"),
                romanized: "tsu",
                localized: "츠",
            }
        );

        s.force_question("つ", None);
        let fb = s.submit_text_answer("Tsu", AnswerKind::Either).unwrap();
        assert!(matches!(fb, Feedback::Text { matched: Some("tsu"), .. }));

        s.force_question("つ", None);
        let fb = s.submit_text_answer("tu", AnswerKind::Either).unwrap();
        assert!(matches!(
            fb,
            Feedback::Text {
                verdict: Verdict::Incorrect,
                matched: None,
                romanized: "tsu",
                localized: "츠",
                ..
            }
        ));
        assert_eq!(s.score(), 2);
        assert_eq!(s.total_answered(), 3);
    }

    #[test]
    fn choice_scenario_discloses_chosen_and_correct() {
        let mut s = session();
        let set = ChoiceSet::from_parts(vec!["い", "あ", "う", "え", "お"], 1);

        s.force_question("あ", Some(set.clone()));
        let fb = s.submit_choice(1).unwrap();
        assert_eq!(
            fb,
            Feedback::Choice {
                verdict: Verdict::Correct,
                chosen: "あ",
                correct: "あ",
            }
        );

        s.force_question("あ", Some(set));
        let fb = s.submit_choice(0).unwrap();
        assert_eq!(
            fb,
            Feedback::Choice {
                verdict: Verdict::Incorrect,
                chosen: "い",
                correct: "あ",
            }
        );
        assert_eq!(s.score(), 1);
        assert_eq!(s.total_answered(), 2);
    }

    #[test]
    fn out_of_range_choice_is_rejected_without_state_change() {
        let mut s = session();
        s.start_new_question(Dataset::Basic, QuizType::MultipleChoice).unwrap();
        assert_eq!(
            s.submit_choice(5),
            Err(QuizError::ChoiceOutOfRange { index: 5, len: 5 })
        );
        assert!(!s.is_answered());
        assert_eq!(s.total_answered(), 0);
    }

    #[test]
    fn reset_keeps_question_and_zeroes_counters() {
        let mut s = session();
        s.start_new_question(Dataset::Basic, QuizType::RomanizedEntry).unwrap();
        let symbol = s.current_symbol();
        let answer = s.current_record().unwrap().romanized;
        s.submit_text_answer(answer, AnswerKind::Romanized).unwrap();

        s.reset_score();
        assert_eq!(s.current_symbol(), symbol);
        assert_eq!(s.score(), 0);
        assert_eq!(s.total_answered(), 0);
        assert_eq!(s.last_feedback(), None);
        assert!(!s.is_answered());

        for quiz_type in QuizType::CYCLE {
            s.start_new_question(Dataset::All, quiz_type).unwrap();
            assert_eq!(s.score(), 0);
            assert_eq!(s.total_answered(), 0);
        }
    }

    #[test]
    fn new_question_clears_answer_state_but_keeps_score() {
        let mut s = session();
        s.force_question("あ", None);
        s.submit_text_answer("a", AnswerKind::Romanized).unwrap();

        s.start_new_question(Dataset::Basic, QuizType::LocalizedEntry).unwrap();
        assert!(!s.is_answered());
        assert_eq!(s.last_feedback(), None);
        assert_eq!(s.score(), 1);
        assert_eq!(s.total_answered(), 1);
    }

    #[test]
    fn accuracy_is_formatted_to_one_decimal() {
        assert_eq!(format_accuracy(1, 3), "33.3%");
        assert_eq!(format_accuracy(2, 3), "66.7%");
        assert_eq!(format_accuracy(3, 3), "100.0%");
        assert_eq!(format_accuracy(0, 0), "0%");
    }

    #[test]
    fn quiz_type_maps_to_answer_kind() {
        assert_eq!(QuizType::RomanizedEntry.answer_kind(), Some(AnswerKind::Romanized));
        assert_eq!(QuizType::LocalizedEntry.answer_kind(), Some(AnswerKind::Localized));
        assert_eq!(QuizType::CombinedEntry.answer_kind(), Some(AnswerKind::Either));
        assert_eq!(QuizType::MultipleChoice.answer_kind(), None);
        assert_eq!(QuizType::MultipleChoice.next(), QuizType::RomanizedEntry);
    }

    #[test]
    fn feedback_message_names_both_pronunciations() {
        let mut s = session();
        s.force_question("ん", None);
        let fb = s.submit_text_answer("m", AnswerKind::Romanized).unwrap();
        assert_eq!(fb.to_string(), "Wrong. 'ん' is read 'n' (응).");
    }
}
