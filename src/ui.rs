// ============================================
// src/ui.rs
// 画面描画 (ratatui)
// ============================================

use rand::Rng;
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
};

use crate::app::App;
use crate::bank::{CharacterBank, Dataset};
use crate::kana::HINT_ROWS;
use crate::session::{Feedback, QuizType, format_accuracy};

const LEGEND: &str = "Enter: check / next   1-5: choose   F1: hints   F2: set   F3: mode   F5: reset   Esc: quit";

pub fn draw<R: Rng>(f: &mut Frame, app: &App<R>) {
    let size = f.area();
    // 枠線を描画
    let block = Block::default().borders(Borders::ALL).title("Kana Wiz !");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    let hint_height = if app.show_hints() { Constraint::Min(3) } else { Constraint::Length(0) };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] 出題範囲・形式
            Constraint::Length(1), // [1] 正解率ゲージ
            Constraint::Length(1), // [2] 空白
            Constraint::Length(1), // [3] 問題文
            Constraint::Length(1), // [4] 記号 (または発音)
            Constraint::Length(1), // [5] 空白
            Constraint::Length(1), // [6] 入力欄 / 選択肢
            Constraint::Length(1), // [7] 採点結果
            Constraint::Length(1), // [8] お知らせ
            hint_height,           // [9] ヒント表
            Constraint::Min(0),    // [10] 余白
            Constraint::Length(1), // [11] 操作説明
        ])
        .split(inner_area);

    let session = &app.session;

    // 0. 設定表示
    let settings_line = Line::from(vec![
        Span::raw("Set: "),
        Span::styled(app.dataset().label(), Style::default().fg(Color::Cyan)),
        Span::raw("   Mode: "),
        Span::styled(app.quiz_type().label(), Style::default().fg(Color::Cyan)),
    ]);
    f.render_widget(Paragraph::new(settings_line), chunks[0]);

    // 1. スコア (正解数・総数・正解率)
    let (score, total) = (session.score(), session.total_answered());
    let ratio = session.accuracy().map(|pct| (pct / 100.0).clamp(0.0, 1.0)).unwrap_or(0.0);
    let label = format!(
        "Correct: {}  Total: {}  Accuracy: {}",
        score,
        total,
        format_accuracy(score, total)
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
        .ratio(ratio)
        .label(label);
    f.render_widget(gauge, chunks[1]);

    // 2. 問題
    let Some(record) = session.current_record() else {
        return;
    };
    let (prompt, shown) = match app.quiz_type() {
        QuizType::RomanizedEntry => ("Type the romaji for this hiragana:", record.symbol.to_string()),
        QuizType::LocalizedEntry => ("Type the hangul reading for this hiragana:", record.symbol.to_string()),
        QuizType::CombinedEntry => ("Type the reading (romaji or hangul):", record.symbol.to_string()),
        QuizType::MultipleChoice => (
            "Which hiragana is read like this?",
            format!("{} / {}", record.romanized, record.localized),
        ),
    };
    f.render_widget(
        Paragraph::new(prompt).style(Style::default().fg(Color::Gray)).centered(),
        chunks[3],
    );
    f.render_widget(
        Paragraph::new(shown)
            .style(Style::default().fg(Color::LightRed).bold())
            .centered(),
        chunks[4],
    );

    // 3. 入力欄または選択肢
    let answer_line = if app.quiz_type() == QuizType::MultipleChoice {
        choice_line(app)
    } else {
        input_line(app)
    };
    f.render_widget(Paragraph::new(answer_line).centered(), chunks[6]);

    // 4. 採点結果
    if let Some(feedback) = session.last_feedback() {
        let color = if feedback.is_correct() { Color::Green } else { Color::Red };
        f.render_widget(
            Paragraph::new(feedback.to_string())
                .style(Style::default().fg(color))
                .centered(),
            chunks[7],
        );
    }

    // 5. お知らせ
    if let Some(notice) = app.notice() {
        f.render_widget(
            Paragraph::new(notice).style(Style::default().fg(Color::Yellow)).centered(),
            chunks[8],
        );
    }

    // 6. ヒント表
    if app.show_hints() {
        let rows = hint_rows(session.bank(), app.dataset())
            .into_iter()
            .map(|row| Row::new(row.into_iter().map(Cell::from)));
        let table = Table::new(rows, [Constraint::Length(10); 5])
            .block(Block::default().borders(Borders::TOP).title("Pronunciation guide"));
        f.render_widget(table, chunks[9]);
    }

    f.render_widget(
        Paragraph::new(LEGEND).style(Style::default().fg(Color::DarkGray)),
        chunks[11],
    );
}

/// テキスト入力欄。回答後は灰色で固定
fn input_line<R: Rng>(app: &App<R>) -> Line<'static> {
    let answered = app.session.is_answered();
    let style = if answered {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled("> ", style),
        Span::styled(app.input().to_string(), style),
    ];
    if !answered {
        // カーソル
        spans.push(Span::styled(" ", Style::default().fg(Color::Black).bg(Color::White)));
    }
    Line::from(spans)
}

/// 5択。回答後は正解を緑、選んだ誤答を赤、他は灰色にする
fn choice_line<R: Rng>(app: &App<R>) -> Line<'static> {
    let session = &app.session;
    let Some(choices) = session.choices() else {
        return Line::default();
    };
    let chosen = match session.last_feedback() {
        Some(Feedback::Choice { chosen, .. }) => Some(*chosen),
        _ => None,
    };

    let mut spans = Vec::new();
    for (i, symbol) in choices.options().iter().enumerate() {
        let style = if !session.is_answered() {
            Style::default().fg(Color::White)
        } else if i == choices.correct_index() {
            Style::default().fg(Color::Green).bold()
        } else if Some(*symbol) == chosen {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("[{}] {}", i + 1, symbol), style));
        spans.push(Span::raw("   "));
    }
    spans.pop();
    Line::from(spans)
}

/// 五十音表を「あ(a)」形式の5列で返す。出題範囲に含まれる区分の行だけ
pub fn hint_rows(bank: &CharacterBank, dataset: Dataset) -> Vec<[String; 5]> {
    let subsets = dataset.subsets();
    HINT_ROWS
        .iter()
        .filter(|(subset, _)| subsets.contains(subset))
        .map(|&(_, row)| {
            row.map(|cell| {
                cell.and_then(|symbol| bank.lookup(symbol).ok())
                    .map(|rec| format!("{}({})", rec.symbol, rec.romanized))
                    .unwrap_or_default()
            })
        })
        .collect()
}
