//! Rounded playing-card panel.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::deck::CardView;
use crate::tui::theme::Theme;

/// Wide enough for the longest label, `DIAMONDS QUEEN`, plus borders.
pub(crate) const CARD_WIDTH: u16 = 16;
pub(crate) const CARD_HEIGHT: u16 = 7;

pub(crate) struct PlayingCard<'a> {
    pub view: CardView<'a>,
    pub highlight: bool,
}

impl<'a> PlayingCard<'a> {
    pub fn new(view: CardView<'a>) -> Self {
        Self {
            view,
            highlight: false,
        }
    }

    pub fn highlight(mut self, on: bool) -> Self {
        self.highlight = on;
        self
    }

    pub fn render(self, area: Rect, f: &mut ratatui::Frame, theme: &Theme) {
        let suit_style = Style::default()
            .fg(theme.suit_color(self.view.red))
            .add_modifier(Modifier::BOLD);
        let edge = if self.highlight {
            theme.accent
        } else {
            theme.card_edge
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(edge))
            .title_bottom(
                Line::from(Span::styled(
                    self.view.label,
                    Style::default().fg(theme.text_dim),
                ))
                .alignment(Alignment::Center),
            );

        let para = Paragraph::new(Text::from(face_lines(&self.view, suit_style))).block(block);
        f.render_widget(para, area);
    }
}

/// Corner index top-left, pip in the middle, corner index bottom-right.
fn face_lines<'a>(view: &CardView<'a>, suit_style: Style) -> Vec<Line<'a>> {
    let corner = format!("{}{}", view.rank, view.suit_symbol);
    vec![
        Line::from(Span::styled(corner.clone(), suit_style)),
        Line::from(""),
        Line::from(Span::styled(view.suit_symbol, suit_style)).alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(corner, suit_style)).alignment(Alignment::Right),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_shows_rank_and_suit_in_corners() {
        let view = CardView {
            key: "KS",
            label: "SPADES KING",
            image_url: "url",
            rank: "K",
            suit_symbol: "♠",
            red: false,
        };
        let lines = face_lines(&view, Style::default());
        assert_eq!(lines.len() as u16, CARD_HEIGHT - 2);

        let text = |line: &Line| -> String { line.spans.iter().map(|s| s.content.as_ref()).collect() };
        assert_eq!(text(&lines[0]), "K♠");
        assert_eq!(text(&lines[2]), "♠");
        assert_eq!(text(&lines[4]), "K♠");
        assert_eq!(lines[4].alignment, Some(Alignment::Right));
    }

    #[test]
    fn test_longest_label_fits() {
        assert!("DIAMONDS QUEEN".chars().count() as u16 <= CARD_WIDTH - 2);
    }
}
