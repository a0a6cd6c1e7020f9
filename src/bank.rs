// ============================================
// src/bank.rs
// 文字バンク (記号 -> 発音データ の不変マップ)
// ============================================

use std::collections::HashMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{BankError, QuizError};
use crate::kana::{CharacterRecord, Subset};

/// 出題範囲 (区分の組み合わせ)
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    /// 清音のみ
    #[default]
    Basic,
    /// 濁音 + 半濁音
    Diacritics,
    /// すべて
    All,
}

impl Dataset {
    pub const CYCLE: [Dataset; 3] = [Dataset::Basic, Dataset::Diacritics, Dataset::All];

    pub fn subsets(self) -> &'static [Subset] {
        match self {
            Dataset::Basic => &[Subset::Basic],
            Dataset::Diacritics => &[Subset::Dakuten, Subset::Handakuten],
            Dataset::All => &Subset::ALL,
        }
    }

    /// F2 で切り替える次の範囲
    pub fn next(self) -> Self {
        let idx = Self::CYCLE.iter().position(|d| *d == self).unwrap_or(0);
        Self::CYCLE[(idx + 1) % Self::CYCLE.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Dataset::Basic => "Basic",
            Dataset::Diacritics => "Dakuten + Handakuten",
            Dataset::All => "All",
        }
    }
}

/// 起動時に一度だけ作られ、以後変更されない文字バンク
#[derive(Debug, Clone)]
pub struct CharacterBank {
    subsets: Vec<(Subset, &'static [CharacterRecord])>,
    index: HashMap<&'static str, (Subset, CharacterRecord)>,
}

impl CharacterBank {
    /// 区分ごとのデータからバンクを作る。
    ///
    /// 区分どうしで記号が重なっていたり、発音が空・前後に空白を含む場合はエラー。
    pub fn new(subsets: Vec<(Subset, &'static [CharacterRecord])>) -> Result<Self, BankError> {
        let mut index = HashMap::new();

        for (subset, records) in &subsets {
            if records.is_empty() {
                return Err(BankError::EmptySubset(*subset));
            }
            for rec in records.iter() {
                if !is_normalized(rec.romanized)
                    || !is_normalized(rec.localized)
                    || rec.romanized.to_lowercase() != rec.romanized
                {
                    return Err(BankError::InvalidRecord {
                        symbol: rec.symbol.to_string(),
                    });
                }
                if let Some((first, _)) = index.insert(rec.symbol, (*subset, *rec)) {
                    return Err(BankError::DuplicateSymbol {
                        symbol: rec.symbol.to_string(),
                        first,
                        second: *subset,
                    });
                }
            }
        }

        Ok(Self { subsets, index })
    }

    /// 同梱のひらがなデータ (清音・濁音・半濁音)
    pub fn hiragana() -> Result<Self, BankError> {
        Self::new(
            Subset::ALL
                .iter()
                .map(|subset| (*subset, subset.records()))
                .collect(),
        )
    }

    /// 範囲に含まれる記号をデータ定義順で返す
    pub fn all_symbols(&self, dataset: Dataset) -> Vec<&'static str> {
        // Dataset の区分リストは空にならない
        self.collect_symbols(dataset.subsets())
    }

    /// 任意の区分の和集合
    pub fn symbols_in(&self, selection: &[Subset]) -> Result<Vec<&'static str>, BankError> {
        if selection.is_empty() {
            return Err(BankError::EmptySelection);
        }
        Ok(self.collect_symbols(selection))
    }

    fn collect_symbols(&self, selection: &[Subset]) -> Vec<&'static str> {
        let mut out = Vec::new();
        for (subset, records) in &self.subsets {
            if selection.contains(subset) {
                out.extend(records.iter().map(|rec| rec.symbol));
            }
        }
        out
    }

    pub fn lookup(&self, symbol: &str) -> Result<&CharacterRecord, QuizError> {
        self.index
            .get(symbol)
            .map(|(_, rec)| rec)
            .ok_or_else(|| QuizError::NotFound {
                symbol: symbol.to_string(),
            })
    }

    pub fn subset_of(&self, symbol: &str) -> Option<Subset> {
        self.index.get(symbol).map(|(subset, _)| *subset)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn is_normalized(s: &str) -> bool {
    !s.is_empty() && s.trim() == s
}
