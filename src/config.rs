// ============================================
// src/config.rs
// コマンドライン引数と設定ファイル (読み込みのみ)
// ============================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::Parser;
use directories::ProjectDirs;
use log::{info, warn};
use serde::Deserialize;

use crate::bank::Dataset;
use crate::error::ConfigError;
use crate::session::QuizType;

const SETTINGS_FILE: &str = "settings.json";

/// KANA WiZ: ひらがなクイズ
#[derive(Debug, Default, Parser)]
#[command(name = "kanawiz", version, about = "Hiragana flashcard quiz for the terminal")]
pub struct Cli {
    /// Character set to quiz on
    #[arg(short, long, value_enum)]
    pub dataset: Option<Dataset>,

    /// How answers are given
    #[arg(short, long, value_enum)]
    pub mode: Option<QuizType>,

    /// Start with the pronunciation guide open
    #[arg(long)]
    pub hints: bool,

    /// Settings file (JSON). Defaults to the per-user config directory
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fixed random seed
    #[arg(long)]
    pub seed: Option<u64>,
}

/// settings.json の中身。すべて省略可
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dataset: Dataset,
    #[serde(rename = "mode")]
    pub quiz_type: QuizType,
    pub show_hints: bool,
    #[serde(skip)]
    pub seed: Option<u64>,
}

impl Settings {
    // MARK:設定ファイルのパスを取得する関数
    fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("jp", "kanawiz", "KANA_WIZ")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// 設定ファイルを読み、コマンドライン引数で上書きする。
    ///
    /// `--config` で明示されたファイルが読めない場合だけエラーにする。
    /// 既定の場所のファイルが無い・壊れている場合は初期値で続行する。
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut settings = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) => match Self::from_file(&path) {
                    Ok(settings) => settings,
                    Err(ConfigError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
                        Self::default()
                    }
                    Err(err) => {
                        warn!("ignoring settings: {}", err);
                        Self::default()
                    }
                },
                None => Self::default(),
            },
        };

        settings.apply(cli);
        info!(
            "settings: dataset={:?} mode={:?} hints={} seed={:?}",
            settings.dataset, settings.quiz_type, settings.show_hints, settings.seed
        );
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// 引数で指定されたものだけ上書き
    fn apply(&mut self, cli: &Cli) {
        if let Some(dataset) = cli.dataset {
            self.dataset = dataset;
        }
        if let Some(mode) = cli.mode {
            self.quiz_type = mode;
        }
        if cli.hints {
            self.show_hints = true;
        }
        self.seed = cli.seed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.dataset, Dataset::Basic);
        assert_eq!(settings.quiz_type, QuizType::RomanizedEntry);
    }

    #[test]
    fn json_fields_are_read() {
        let settings =
            Settings::from_json(r#"{ "dataset": "all", "mode": "choice", "show_hints": true }"#).unwrap();
        assert_eq!(settings.dataset, Dataset::All);
        assert_eq!(settings.quiz_type, QuizType::MultipleChoice);
        assert!(settings.show_hints);
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        assert!(Settings::from_json(r#"{ "mode": "kanji" }"#).is_err());
    }

    #[test]
    fn cli_flags_override_file_values() {
        let cli = Cli::parse_from(["kanawiz", "--dataset", "diacritics", "--mode", "combined", "--seed", "9"]);
        let mut settings = Settings::from_json(r#"{ "dataset": "all", "show_hints": true }"#).unwrap();
        settings.apply(&cli);

        assert_eq!(settings.dataset, Dataset::Diacritics);
        assert_eq!(settings.quiz_type, QuizType::CombinedEntry);
        assert!(settings.show_hints);
        assert_eq!(settings.seed, Some(9));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let cli = Cli::parse_from(["kanawiz", "--config", "/nonexistent/kanawiz/settings.json"]);
        assert!(matches!(Settings::load(&cli), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let path = std::env::temp_dir().join(format!("kanawiz-settings-{}.json", std::process::id()));
        fs::write(&path, r#"{ "mode": "localized" }"#).unwrap();

        let cli = Cli::parse_from(["kanawiz", "--config", path.to_str().unwrap(), "--hints"]);
        let settings = Settings::load(&cli).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.quiz_type, QuizType::LocalizedEntry);
        assert!(settings.show_hints);
    }
}
