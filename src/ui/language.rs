use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState},
};

use crate::language::Language;

use super::widgets::{centered_rect, titled_block};

pub fn render_language_picker(
    frame: &mut Frame,
    current: Language,
    state: &mut ListState,
    accent: Color,
) {
    let area: Rect = centered_rect(34, Language::all().len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = Language::all()
        .iter()
        .map(|lang| {
            let marker = if *lang == current { "✓ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Green)),
                Span::raw(lang.label()),
                Span::styled(
                    format!("  {}", lang.code()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(titled_block("Language", accent))
        .highlight_style(
            Style::default()
                .bg(accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, state);
}
