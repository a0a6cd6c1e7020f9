// ============================================
// src/error.rs
// エラー型
// ============================================

use std::path::PathBuf;

use thiserror::Error;

use crate::kana::Subset;

/// 文字バンクの構築・参照エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("symbol '{symbol}' appears in both {first:?} and {second:?}")]
    DuplicateSymbol {
        symbol: String,
        first: Subset,
        second: Subset,
    },

    #[error("record for '{symbol}' has an empty or untrimmed pronunciation")]
    InvalidRecord { symbol: String },

    #[error("subset {0:?} has no records")]
    EmptySubset(Subset),

    #[error("subset selection cannot be empty")]
    EmptySelection,
}

/// クイズ操作のエラー (すべて回復可能)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("symbol '{symbol}' is not in the character bank")]
    NotFound { symbol: String },

    #[error("need at least {required} symbols for multiple choice, found {available}")]
    InsufficientPoolSize { available: usize, required: usize },

    #[error("answer is empty")]
    EmptyInput,

    #[error("this question has already been answered")]
    AlreadyAnswered,

    #[error("no question has been generated yet")]
    NoActiveQuestion,

    #[error("choice {index} is out of range (0..{len})")]
    ChoiceOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Bank(#[from] BankError),
}

/// 設定ファイルの読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
