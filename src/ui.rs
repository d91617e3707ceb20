pub mod screen;

use minetype::{
    rank::{Mascot, Tint},
    session::SessionSnapshot,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const GRASS: Color = Color::Rgb(62, 137, 72);
const LIME: Color = Color::Rgb(85, 255, 85);

pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(app.session.phase()).render(app, f);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Dirt => Color::Rgb(146, 64, 14),
        Tint::Wood => Color::Rgb(217, 119, 6),
        Tint::Stone => Color::Gray,
        Tint::Iron => Color::White,
        Tint::Gold => Color::Yellow,
        Tint::Diamond => Color::Cyan,
        Tint::Netherite => Color::Magenta,
    }
}

pub fn render_menu(_app: &App, f: &mut Frame) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("MINETYPE", bold.fg(Color::White))),
        Line::from(Span::styled("THE BLOCKY TYPER", bold.fg(Color::Gray))),
        Line::default(),
        Line::from(Span::styled(
            "Type the words before the sun sets!",
            Style::default().fg(GRASS),
        )),
        Line::default(),
        Line::from(Span::styled(
            "(enter) start   (esc) quit",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        )),
    ];
    let area = centered(f.area(), 44, lines.len() as u16 + 2);
    let menu = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::bordered().border_type(BorderType::Thick));
    f.render_widget(menu, area);
}

pub fn render_loading(_app: &App, f: &mut Frame) {
    let loading = Paragraph::new(Span::styled(
        "Mining words...",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
    ))
    .alignment(Alignment::Center);
    f.render_widget(loading, centered(f.area(), 30, 1));
}

fn word_spans<'a>(snap: &SessionSnapshot<'a>) -> Vec<Span<'a>> {
    let Some(word) = snap.word else {
        return vec![];
    };
    let typed_len = snap.typed.chars().count();
    let green_bold = Style::default().fg(LIME).add_modifier(Modifier::BOLD);
    let dim_bold = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);

    word.transliteration
        .chars()
        .enumerate()
        .map(|(idx, c)| {
            let style = if idx < typed_len {
                green_bold
            } else if idx == typed_len {
                dim_bold.add_modifier(Modifier::UNDERLINED)
            } else {
                dim_bold
            };
            Span::styled(c.to_string(), style)
        })
        .collect()
}

pub fn render_playing(app: &App, f: &mut Frame) {
    let snap = app.session.snapshot();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // score and time
            Constraint::Min(7),    // word panel
            Constraint::Length(1), // time bar
            Constraint::Length(1), // hint
        ])
        .split(f.area());

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    let gain = match app.last_gain {
        Some(g) if g > 0 => Span::styled(format!("  +{g}"), Style::default().fg(LIME)),
        Some(g) if g < 0 => Span::styled(format!("  {g}"), Style::default().fg(Color::Red)),
        _ => Span::raw(""),
    };
    let score = Paragraph::new(Line::from(vec![
        Span::styled(snap.score.score.to_string(), bold),
        gain,
    ]))
    .block(Block::bordered().title("Score"));
    f.render_widget(score, header[0]);

    let time = Paragraph::new(Span::styled(snap.remaining_secs.to_string(), bold))
        .alignment(Alignment::Right)
        .block(Block::bordered().title(Line::from("Time").right_aligned()));
    f.render_widget(time, header[1]);

    if let Some(word) = snap.word {
        let border = if app.is_flashing() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut lines = vec![
            Line::from(Span::styled(word.native.as_str(), bold.fg(Color::White))),
            Line::default(),
            Line::from(word_spans(&snap)),
        ];
        if snap.combo > 1 {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("COMBO x{}!", snap.combo),
                bold.fg(Color::Yellow),
            )));
        }

        let width = (word.native.width().max(word.transliteration.width()) as u16 + 8).max(30);
        let panel_area = centered(chunks[1], width, lines.len() as u16 + 2);
        let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(border)
                .title_top(
                    Line::from(Span::styled(
                        format!(" {} ", word.category),
                        Style::default().fg(Color::White).bg(GRASS),
                    ))
                    .right_aligned(),
                )
                .title_bottom(
                    Line::from(Span::styled(
                        format!(" {}/{} ", snap.word_index + 1, snap.queue_len),
                        Style::default().add_modifier(Modifier::DIM),
                    ))
                    .right_aligned(),
                ),
        );
        f.render_widget(panel, panel_area);
    }

    let bar = Gauge::default()
        .gauge_style(Style::default().fg(GRASS).bg(Color::DarkGray))
        .ratio(snap.time_fraction.clamp(0.0, 1.0))
        .label("");
    f.render_widget(bar, chunks[2]);

    let hint = Paragraph::new(Span::styled(
        "Type the Romaji exactly as shown   (esc) menu",
        Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(hint, chunks[3]);
}

pub fn render_results(app: &App, f: &mut Frame) {
    let snap = app.session.snapshot();
    let Some(rank) = app.session.rank() else {
        return;
    };
    let mascot = Mascot::for_score(snap.score.score);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let label = Style::default().fg(Color::Gray);

    let lines = vec![
        Line::from(Span::styled("GAME OVER", bold.fg(Color::White))),
        Line::default(),
        Line::from(vec![
            Span::styled(mascot.to_string(), bold),
            Span::styled(format!(": {}", mascot.cheer()), label),
        ]),
        Line::default(),
        Line::from(vec![
            Span::styled("Total Score  ", label),
            Span::styled(snap.score.score.to_string(), bold),
        ]),
        Line::from(vec![
            Span::styled("Rank         ", label),
            Span::styled(rank.title, bold.fg(tint_color(rank.tint))),
        ]),
        Line::from(vec![
            Span::styled("Max Combo    ", label),
            Span::raw(snap.score.max_combo.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Accuracy     ", label),
            Span::raw(format!("{}%", snap.score.accuracy_percent())),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "(r) play again   (m) menu   (q) quit",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        )),
    ];

    let area = centered(f.area(), 46, lines.len() as u16 + 2);
    f.render_widget(Clear, area);
    let results = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::bordered().border_type(BorderType::Thick));
    f.render_widget(results, area);
}
