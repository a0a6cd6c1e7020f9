// ============================================
// src/choices.rs
// 4択 + 正解 = 5択の選択肢を作る
// ============================================

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::bank::{CharacterBank, Dataset};
use crate::error::QuizError;

/// 選択肢の数 (正解1 + ダミー4)
pub const CHOICE_COUNT: usize = 5;

/// 並べ替え済みの選択肢と正解の位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSet {
    options: Vec<&'static str>,
    correct_index: usize,
}

impl ChoiceSet {
    pub fn options(&self) -> &[&'static str] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn correct(&self) -> &'static str {
        self.options[self.correct_index]
    }

    pub fn get(&self, index: usize) -> Option<&'static str> {
        self.options.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_parts(options: Vec<&'static str>, correct_index: usize) -> Self {
        Self {
            options,
            correct_index,
        }
    }
}

/// 出題範囲から `correct` 以外の記号を4つ選び、正解と混ぜてシャッフルする
pub fn generate_choices<R: Rng + ?Sized>(
    correct: &'static str,
    bank: &CharacterBank,
    dataset: Dataset,
    rng: &mut R,
) -> Result<ChoiceSet, QuizError> {
    bank.lookup(correct)?;
    generate_choices_from(correct, &bank.all_symbols(dataset), rng)
}

/// 記号の一覧 (重複なし) から選択肢を作る
pub fn generate_choices_from<R: Rng + ?Sized>(
    correct: &'static str,
    pool: &[&'static str],
    rng: &mut R,
) -> Result<ChoiceSet, QuizError> {
    let others: Vec<&'static str> = pool.iter().copied().filter(|s| *s != correct).collect();

    if others.len() < CHOICE_COUNT - 1 {
        return Err(QuizError::InsufficientPoolSize {
            available: others.len() + 1,
            required: CHOICE_COUNT,
        });
    }

    // 非復元抽出でダミーを選ぶ
    let mut options = Vec::with_capacity(CHOICE_COUNT);
    options.push(correct);
    options.extend(others.choose_multiple(rng, CHOICE_COUNT - 1).copied());

    options.shuffle(rng);

    let correct_index = options
        .iter()
        .position(|s| *s == correct)
        .ok_or(QuizError::NotFound {
            symbol: correct.to_string(),
        })?;

    Ok(ChoiceSet {
        options,
        correct_index,
    })
}
