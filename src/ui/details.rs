use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use ratatui_image::{StatefulImage, protocol::StatefulProtocol};

use crate::metadata::MediaItem;

use super::widgets::titled_block;

const POSTER_WIDTH: u16 = 30;

pub fn detail_lines(item: &MediaItem) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(
        item.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];

    if let Some(original) = item.original_title.as_ref().filter(|t| **t != item.title) {
        lines.push(Line::styled(
            original.clone(),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::default());

    let mut meta = vec![
        Span::styled("★ ", Style::default().fg(Color::Yellow)),
        Span::raw(format!("{} / 10", item.rating_label())),
    ];
    if let Some(date) = &item.release_date {
        meta.push(Span::raw("   "));
        meta.push(Span::styled(date.clone(), Style::default().fg(Color::Cyan)));
    }
    if let Some(runtime) = item.runtime {
        meta.push(Span::raw("   "));
        meta.push(Span::styled(
            format!("{} min", runtime),
            Style::default().fg(Color::Green),
        ));
    }
    lines.push(Line::from(meta));

    if !item.genres.is_empty() {
        lines.push(Line::styled(
            item.genres.join(" · "),
            Style::default().fg(Color::Magenta),
        ));
    }
    lines.push(Line::default());

    lines.push(Line::raw(
        item.overview
            .clone()
            .unwrap_or_else(|| "No description available.".to_string()),
    ));

    lines
}

pub fn render_details_view(
    frame: &mut Frame,
    area: Rect,
    item: &MediaItem,
    loading: bool,
    poster: Option<&mut StatefulProtocol>,
    accent: Color,
) {
    let title = if loading {
        format!("{} (loading...)", item.media_type.as_display())
    } else {
        item.media_type.as_display().to_string()
    };
    let block = titled_block(&title, accent);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(POSTER_WIDTH), Constraint::Min(10)])
        .split(inner);

    match poster {
        Some(protocol) => {
            frame.render_stateful_widget(StatefulImage::default(), chunks[0], protocol);
        }
        None => {
            let placeholder = Paragraph::new("No poster")
                .style(Style::default().fg(Color::DarkGray))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                );
            frame.render_widget(placeholder, chunks[0]);
        }
    }

    let text_area = Rect {
        x: chunks[1].x + 1,
        width: chunks[1].width.saturating_sub(1),
        ..chunks[1]
    };
    let info = Paragraph::new(detail_lines(item)).wrap(Wrap { trim: true });
    frame.render_widget(info, text_area);
}
