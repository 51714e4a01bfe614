//! Top header bar: title, deck id, drawn count and auto-draw state.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::deck::DeckView;
use crate::tui::theme::Theme;

pub(crate) fn draw_header(area: Rect, f: &mut ratatui::Frame, theme: &Theme, view: &DeckView) {
    let rule = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(theme.border),
    ));
    f.render_widget(
        Paragraph::new(vec![header_line(theme, view), rule]),
        area,
    );
}

fn header_line<'a>(theme: &Theme, view: &DeckView<'a>) -> Line<'a> {
    let mut spans = vec![Span::styled(
        "DECK DRAWER",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];

    let Some(deck_id) = view.deck_id else {
        let status = if view.loading { "shuffling…" } else { "no deck" };
        spans.push(Span::styled(
            format!("  //  {status}"),
            Style::default().fg(theme.text_dim),
        ));
        return Line::from(spans);
    };

    let drawn = match view.deck_size {
        Some(size) => format!("{}/{size} drawn", view.cards.len()),
        None => format!("{} drawn", view.cards.len()),
    };
    spans.push(Span::styled(
        format!("  //  deck {deck_id}  ·  {drawn}"),
        Style::default().fg(theme.text_dim),
    ));

    let (badge, color) = if view.exhausted {
        ("EMPTY", theme.critical)
    } else if view.auto_draw {
        ("AUTO", theme.go)
    } else {
        ("IDLE", theme.muted)
    };
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!("[{badge}]"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{DeckHandle, DeckWidget, WidgetEvent};
    use std::time::Duration;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_while_shuffling() {
        let mut w = DeckWidget::new(Duration::from_secs(1));
        w.update(WidgetEvent::Mounted);
        let line = header_line(&Theme::default(), &DeckView::project(&w));
        assert_eq!(text(&line), "DECK DRAWER  //  shuffling…");
    }

    #[test]
    fn test_header_shows_deck_and_auto_state() {
        let mut w = DeckWidget::new(Duration::from_secs(1));
        w.update(WidgetEvent::Mounted);
        w.update(WidgetEvent::DeckLoaded(Ok(DeckHandle {
            deck_id: "abc".to_string(),
            remaining: 52,
            shuffled: true,
        })));
        let line = header_line(&Theme::default(), &DeckView::project(&w));
        assert_eq!(text(&line), "DECK DRAWER  //  deck abc  ·  0/52 drawn  [IDLE]");

        w.update(WidgetEvent::ToggleAutoDraw);
        let line = header_line(&Theme::default(), &DeckView::project(&w));
        assert!(text(&line).ends_with("[AUTO]"));
    }
}
