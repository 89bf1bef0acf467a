use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Paragraph, Wrap},
};

use crate::gift::{GiftBox, GiftPhase};

use super::details::detail_lines;
use super::widgets::{centered_rect, titled_block};

const GIFT_BOX: &str = r#"
      \\  //
   ____\\//____
  |     ||     |
  |=====[]=====|
  |     ||     |
  |     ||     |
  |_____||_____|
"#;

const FOOTER: &str = "Wishing you joy, happiness, and great movies!";

pub fn render_gift_view(frame: &mut Frame, area: Rect, gift: &GiftBox, tick: u64, accent: Color) {
    let block = titled_block("Happy New Year!", accent);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(inner);

    let heading = Paragraph::new(Line::styled(
        "Santa has a special movie gift for you!",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(heading, chunks[0]);

    match gift.phase() {
        GiftPhase::Closed => render_box(frame, chunks[1], 0, "Press Enter to open Santa's gift"),
        GiftPhase::Revealing { .. } => {
            let bounce = (tick / 3 % 2) as u16;
            render_box(frame, chunks[1], bounce, "Santa is choosing a movie for you...");
        }
        GiftPhase::Revealed(movie) => {
            let card_area = centered_rect(70, chunks[1].height, chunks[1]);
            let mut lines = detail_lines(movie);
            lines.push(Line::default());
            lines.push(Line::styled(
                "Enter: another gift   d: details",
                Style::default().fg(Color::DarkGray),
            ));
            let card = Paragraph::new(lines)
                .block(titled_block("Your gift", Color::Green))
                .wrap(Wrap { trim: true });
            frame.render_widget(card, card_area);
        }
        GiftPhase::Failed(e) => {
            let text = Text::from(vec![
                Line::styled(
                    format!("Santa got lost: {}", e),
                    Style::default().fg(Color::Red),
                ),
                Line::styled("Press Enter to try again", Style::default().fg(Color::DarkGray)),
            ]);
            frame.render_widget(
                Paragraph::new(text).alignment(Alignment::Center),
                chunks[1],
            );
        }
    }

    let footer = Paragraph::new(Line::styled(FOOTER, Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[2]);
}

fn render_box(frame: &mut Frame, area: Rect, bounce: u16, caption: &str) {
    let art_height = GIFT_BOX.lines().count() as u16;
    let art_area = Rect {
        y: area.y + bounce,
        height: art_height.min(area.height.saturating_sub(bounce)),
        ..area
    };
    let art = Paragraph::new(Text::styled(GIFT_BOX, Style::default().fg(Color::Red)))
        .alignment(Alignment::Center);
    frame.render_widget(art, art_area);

    let caption_y = area.y + art_height + 2;
    if caption_y < area.y + area.height {
        let caption_area = Rect {
            y: caption_y,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(Line::styled(caption.to_string(), Style::default().fg(Color::Yellow)))
                .alignment(Alignment::Center),
            caption_area,
        );
    }
}
