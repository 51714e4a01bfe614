//! Deck table: draw-control button, card grid and status line.

use std::ops::Range;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::deck::DeckView;
use crate::tui::state::App;
use crate::tui::theme::Theme;
use crate::tui::widgets::card::{PlayingCard, CARD_HEIGHT, CARD_WIDTH};
use crate::tui::widgets::footer::draw_footer;

const CARD_GAP: u16 = 1;

pub(crate) fn draw_table(area: Rect, f: &mut ratatui::Frame, app: &App, theme: Theme) {
    let view = DeckView::project(app.session.widget());

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // button
            Constraint::Min(0),    // cards
            Constraint::Length(1), // status
            Constraint::Length(1), // footer
        ])
        .split(area);

    draw_button(layout[0], f, app, &view, &theme);
    draw_cards(layout[1], f, &view, &theme);
    draw_status(layout[2], f, &view, &theme);

    let hints: &[(&str, &str)] = if app.notice.is_some() {
        &[("Enter", "Dismiss")]
    } else if view.button.is_some() {
        &[("Space", "Auto-draw"), ("D", "Draw one"), ("Q", "Quit")]
    } else {
        &[("Q", "Quit")]
    };
    draw_footer(layout[3], f, &theme, hints);
}

fn draw_button(area: Rect, f: &mut ratatui::Frame, app: &App, view: &DeckView, theme: &Theme) {
    let Some(label) = view.button else {
        let line = if view.loading {
            Line::from(vec![
                Span::styled(
                    format!("  {}  ", app.animation.spinner_char()),
                    Style::default().fg(theme.accent),
                ),
                Span::styled("Shuffling a fresh deck...", Style::default().fg(theme.text)),
            ])
        } else {
            Line::from(Span::styled(
                "  No deck available.",
                Style::default().fg(theme.text_dim),
            ))
        };
        f.render_widget(Paragraph::new(vec![Line::from(""), line]), area);
        return;
    };

    let color = theme.button_color(view.auto_draw);
    let width = (label.chars().count() as u16 + 6).min(area.width);
    let button_area = Rect { width, ..area };

    let button = Paragraph::new(Line::from(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(button, button_area);
}

fn draw_cards(area: Rect, f: &mut ratatui::Frame, view: &DeckView, theme: &Theme) {
    if view.cards.is_empty() {
        if view.button.is_some() {
            let hint = Paragraph::new(Line::from(Span::styled(
                "No cards drawn yet.",
                Style::default().fg(theme.muted),
            )))
            .alignment(Alignment::Center);
            f.render_widget(hint, area);
        }
        return;
    }

    let cols = (area.width.saturating_add(CARD_GAP) / (CARD_WIDTH + CARD_GAP)).max(1) as usize;
    let rows = (area.height / CARD_HEIGHT) as usize;
    let window = visible_window(view.cards.len(), cols, rows);
    let newest = view.cards.len() - 1;

    for (slot, idx) in window.enumerate() {
        let col = (slot % cols) as u16;
        let row = (slot / cols) as u16;
        let cell = Rect {
            x: area.x + col * (CARD_WIDTH + CARD_GAP),
            y: area.y + row * CARD_HEIGHT,
            width: CARD_WIDTH.min(area.width),
            height: CARD_HEIGHT,
        };
        PlayingCard::new(view.cards[idx])
            .highlight(idx == newest)
            .render(cell, f, theme);
    }
}

fn draw_status(area: Rect, f: &mut ratatui::Frame, view: &DeckView, theme: &Theme) {
    let mut spans = vec![Span::styled(
        format!("{} drawn", view.cards.len()),
        Style::default().fg(theme.text_dim),
    )];

    if let Some(last) = view.cards.last() {
        spans.push(Span::styled("  │  ", Style::default().fg(theme.muted)));
        spans.push(Span::styled(last.label, Style::default().fg(theme.text)));
        spans.push(Span::raw("  "));
        spans.push(Span::styled(last.image_url, Style::default().fg(theme.muted)));
    }

    if view.exhausted {
        spans.push(Span::styled("  │  ", Style::default().fg(theme.muted)));
        spans.push(Span::styled("deck empty", Style::default().fg(theme.caution)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Indexes of the cards that fit in a `cols` x `rows` grid, keeping the
/// newest row visible and every row aligned to `cols`.
fn visible_window(total: usize, cols: usize, rows: usize) -> Range<usize> {
    if cols == 0 || rows == 0 {
        return total..total;
    }
    let total_rows = total.div_ceil(cols);
    let first_row = total_rows.saturating_sub(rows);
    (first_row * cols).min(total)..total
}
