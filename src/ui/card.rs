use std::ops::Range;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::metadata::MediaItem;

use super::widgets::truncate;

pub const CARD_WIDTH: u16 = 22;

/// Items that fit in a row of `slots` cards while keeping `selected` shown
pub fn carousel_window(selected: usize, count: usize, slots: usize) -> Range<usize> {
    if slots == 0 || count == 0 {
        return 0..0;
    }
    if count <= slots {
        return 0..count;
    }
    let start = (selected + 1).saturating_sub(slots).min(count - slots);
    start..start + slots
}

fn rating_color(item: &MediaItem) -> Color {
    match item.vote_average {
        Some(score) if score >= 7.5 => Color::Green,
        Some(score) if score >= 6.0 => Color::Yellow,
        Some(score) if score > 0.0 => Color::Red,
        _ => Color::DarkGray,
    }
}

/// Text lines of a poster card, sized for `inner_width` columns
pub fn card_lines(item: &MediaItem, inner_width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(
        truncate(&item.title, inner_width * 2),
        Style::default().add_modifier(Modifier::BOLD),
    )];

    lines.push(Line::from(vec![
        Span::styled("★ ", Style::default().fg(Color::Yellow)),
        Span::styled(item.rating_label(), Style::default().fg(rating_color(item))),
    ]));

    if let Some(year) = item.year() {
        lines.push(Line::styled(
            year.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    }

    lines
}

pub fn render_card(
    frame: &mut Frame,
    area: Rect,
    item: &MediaItem,
    highlighted: bool,
    accent: Color,
) {
    let border_style = if highlighted {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner_width = block.inner(area).width as usize;

    let card = Paragraph::new(card_lines(item, inner_width))
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(card, area);
}

/// Grey placeholder cards shown while a list is loading
pub fn render_skeleton(frame: &mut Frame, area: Rect) {
    let slots = (area.width / CARD_WIDTH).max(1);
    let fill = "░".repeat(CARD_WIDTH.saturating_sub(4) as usize);

    for i in 0..slots {
        let rect = Rect {
            x: area.x + i * CARD_WIDTH,
            y: area.y,
            width: CARD_WIDTH.saturating_sub(1).min(area.width),
            height: area.height,
        };
        let lines: Vec<Line> = (0..rect.height.saturating_sub(2))
            .map(|_| Line::styled(fill.clone(), Style::default().fg(Color::DarkGray)))
            .collect();
        let placeholder = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(placeholder, rect);
    }
}
