// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use kanawiz::app::{App, AppAction};
use kanawiz::bank::CharacterBank;
use kanawiz::config::{Cli, Settings};
use kanawiz::session::QuizSession;
use kanawiz::ui;

// --------------------------------------------------
// メイン関数 (TUIセットアップと実行ループ)
// --------------------------------------------------

fn main() -> Result<()> {
    // RUST_LOG 未設定なら何も出さない (画面が崩れるので 2> でファイルへ)
    pretty_env_logger::init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli).context("failed to load settings")?;

    let bank = Arc::new(CharacterBank::hiragana().context("built-in hiragana table is invalid")?);
    let session = match settings.seed {
        Some(seed) => QuizSession::seeded(bank, seed),
        None => QuizSession::new(bank),
    };
    let mut app = App::new(&settings, session).context("failed to generate the first question")?;
    log::info!("starting kanawiz");

    let mut terminal = setup_terminal()?;
    // エラーでも端末は必ず元に戻す
    let result = run_app(&mut terminal, &mut app);
    restore_terminal()?;
    result?;

    println!(
        "Correct: {} / {}",
        app.session.score(),
        app.session.total_answered()
    );
    Ok(())
}

fn setup_terminal() -> Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?; // カーソルを非表示
    let backend = CrosstermBackend::new(stdout());
    Ok(Terminal::new(backend)?)
}

fn restore_terminal() -> Result<()> {
    stdout().execute(Show)?; // カーソルを再表示
    stdout().execute(LeaveAlternateScreen)?; // 代替スクリーンを終了
    disable_raw_mode()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key(key) == AppAction::Quit {
                    break;
                }
            }
        }
    }
    Ok(())
}
