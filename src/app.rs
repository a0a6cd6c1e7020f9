// ============================================
// src/app.rs
// 画面側の状態 (入力バッファ・キー操作) とクイズ本体の橋渡し
// ============================================

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{info, warn};
use rand::Rng;
use rand::rngs::StdRng;

use crate::bank::Dataset;
use crate::config::Settings;
use crate::error::QuizError;
use crate::session::{QuizSession, QuizType};

/// キー処理の結果
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// アプリ全体の状態を管理する
#[derive(Debug)]
pub struct App<R = StdRng> {
    pub session: QuizSession<R>,
    dataset: Dataset,
    quiz_type: QuizType,

    /// 入力中の答え
    input: String,
    /// ヒント表を表示するか
    show_hints: bool,
    /// 「答えを入力してください」などの一言
    notice: Option<String>,
}

impl<R: Rng> App<R> {
    /// App の初期化 (最初の問題もここで出す)
    pub fn new(settings: &Settings, session: QuizSession<R>) -> Result<Self, QuizError> {
        let mut app = Self {
            session,
            dataset: settings.dataset,
            quiz_type: settings.quiz_type,
            input: String::new(),
            show_hints: settings.show_hints,
            notice: None,
        };
        app.next_question()?;
        Ok(app)
    }

    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    pub fn quiz_type(&self) -> QuizType {
        self.quiz_type
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn show_hints(&self) -> bool {
        self.show_hints
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// キー入力の処理
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.kind != KeyEventKind::Press {
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return AppAction::Quit,
            KeyCode::F(1) => self.show_hints = !self.show_hints,
            KeyCode::F(2) => self.cycle_dataset(),
            KeyCode::F(3) => self.cycle_quiz_type(),
            KeyCode::F(5) => self.reset_score(),
            KeyCode::Enter => {
                if self.session.is_answered() {
                    let result = self.next_question();
                    self.report(result);
                } else if self.quiz_type == QuizType::MultipleChoice {
                    self.notice = Some("Press 1-5 to choose an answer.".to_string());
                } else {
                    self.submit();
                }
            }
            KeyCode::Backspace => {
                if !self.session.is_answered() {
                    self.input.pop();
                }
            }
            KeyCode::Char(c) => self.handle_char(c),
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_char(&mut self, c: char) {
        // 回答後は入力・選択を受け付けない
        if self.session.is_answered() {
            return;
        }

        if self.quiz_type == QuizType::MultipleChoice {
            if let Some(digit) = c.to_digit(10).filter(|d| *d >= 1) {
                let result = self.session.submit_choice(digit as usize - 1).map(|_| ());
                self.report(result);
            }
        } else {
            self.input.push(c);
            self.notice = None;
        }
    }

    /// 入力中の答えを採点に回す
    pub fn submit(&mut self) {
        let Some(kind) = self.quiz_type.answer_kind() else {
            return;
        };
        match self.session.submit_text_answer(&self.input, kind) {
            Ok(_) => self.notice = None,
            Err(QuizError::EmptyInput) => {
                self.notice = Some("Please enter an answer!".to_string());
            }
            Err(err) => self.report(Err(err)),
        }
    }

    /// 次の問題へ
    pub fn next_question(&mut self) -> Result<(), QuizError> {
        self.session.start_new_question(self.dataset, self.quiz_type)?;
        self.input.clear();
        self.notice = None;
        Ok(())
    }

    /// 出題範囲を切り替え、問題を出し直す
    pub fn cycle_dataset(&mut self) {
        self.dataset = self.dataset.next();
        info!("dataset -> {:?}", self.dataset);
        let result = self.next_question();
        self.report(result);
    }

    /// 出題形式を切り替え、問題を出し直す
    pub fn cycle_quiz_type(&mut self) {
        self.quiz_type = self.quiz_type.next();
        info!("mode -> {:?}", self.quiz_type);
        let result = self.next_question();
        self.report(result);
    }

    pub fn reset_score(&mut self) {
        self.session.reset_score();
        self.input.clear();
        self.notice = Some("Score reset.".to_string());
    }

    fn report(&mut self, result: Result<(), QuizError>) {
        match result {
            Ok(()) => {}
            // 回答済みの入力は黙って捨てる
            Err(QuizError::AlreadyAnswered) => {}
            Err(err) => {
                warn!("{}", err);
                self.notice = Some(err.to_string());
            }
        }
    }
}
