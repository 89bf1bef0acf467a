use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::language::Language;
use crate::metadata::MediaType;
use crate::sections::{Phase, Section, visible_range};

use super::card::{CARD_WIDTH, carousel_window, render_card, render_skeleton};

/// Rows per section: one title row plus the card row
pub const SECTION_HEIGHT: u16 = 8;

pub struct HomeLayout {
    pub tabs: Rect,
    pub body: Rect,
}

pub fn home_layout(area: Rect) -> HomeLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);
    HomeLayout {
        tabs: chunks[0],
        body: chunks[1],
    }
}

pub struct HomeView<'a> {
    pub tab: MediaType,
    pub sections: &'a [Section],
    pub focused: usize,
    pub scroll: usize,
    pub language: Language,
    pub accent: Color,
}

pub fn render_home_view(frame: &mut Frame, area: Rect, view: &HomeView) {
    let layout = home_layout(area);
    render_tabs(frame, layout.tabs, view);

    let visible = visible_range(
        view.scroll,
        layout.body.height,
        SECTION_HEIGHT,
        view.sections.len(),
    );

    for idx in visible {
        let offset = (idx - view.scroll) as u16 * SECTION_HEIGHT;
        let height = SECTION_HEIGHT.min(layout.body.height.saturating_sub(offset));
        if height == 0 {
            break;
        }
        let rect = Rect {
            x: layout.body.x,
            y: layout.body.y + offset,
            width: layout.body.width,
            height,
        };
        render_section(
            frame,
            rect,
            &view.sections[idx],
            idx == view.focused,
            view.accent,
        );
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, view: &HomeView) {
    let tab_style = |tab: MediaType| {
        if tab == view.tab {
            Style::default()
                .fg(Color::Black)
                .bg(view.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };

    let line = Line::from(vec![
        Span::styled(" Movies ", tab_style(MediaType::Movie)),
        Span::raw(" "),
        Span::styled(" TV Shows ", tab_style(MediaType::Tv)),
        Span::raw("   "),
        Span::styled("Language: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} ({})", view.language.label(), view.language.code()),
            Style::default().fg(Color::Cyan),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_section(frame: &mut Frame, area: Rect, section: &Section, focused: bool, accent: Color) {
    let title_style = if focused {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let mut title = vec![Span::styled(section.name.clone(), title_style)];
    if let Some(page) = section.page() {
        title.push(Span::styled(
            format!("  {} of {}", page.results.len(), page.total_results),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let title_area = Rect { height: 1, ..area };
    frame.render_widget(Paragraph::new(Line::from(title)), title_area);

    let content = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(1),
        ..area
    };
    if content.height == 0 {
        return;
    }

    match section.phase() {
        Phase::Dormant | Phase::Armed | Phase::Pending(_) => render_skeleton(frame, content),
        Phase::Failed(_) => {
            let message = format!(
                "Failed to load: {} (r to retry)",
                section.error().unwrap_or("unknown error")
            );
            frame.render_widget(
                Paragraph::new(message).style(Style::default().fg(Color::Red)),
                content,
            );
        }
        Phase::Ready(_) => {
            let Some(page) = section.page() else {
                return;
            };
            if page.results.is_empty() {
                frame.render_widget(
                    Paragraph::new("Nothing here yet.").style(Style::default().fg(Color::DarkGray)),
                    content,
                );
                return;
            }

            let slots = (content.width / CARD_WIDTH).max(1) as usize;
            let window = carousel_window(section.selected, page.results.len(), slots);
            for (slot, idx) in window.enumerate() {
                let rect = Rect {
                    x: content.x + slot as u16 * CARD_WIDTH,
                    y: content.y,
                    width: CARD_WIDTH.saturating_sub(1).min(content.width),
                    height: content.height,
                };
                render_card(
                    frame,
                    rect,
                    &page.results[idx],
                    focused && idx == section.selected,
                    accent,
                );
            }
        }
    }
}
