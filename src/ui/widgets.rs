use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Create a styled block with a title
pub fn titled_block(title: &str, accent: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
}

/// Create a help bar at the bottom
pub fn help_bar<'a>(hints: &'a [(&'a str, &'a str)]) -> Paragraph<'a> {
    let spans: Vec<Span> = hints
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let mut v = vec![
                Span::styled(*key, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::styled(*action, Style::default().fg(Color::DarkGray)),
            ];
            if i < hints.len() - 1 {
                v.push(Span::raw("  "));
            }
            v
        })
        .collect();

    Paragraph::new(Line::from(spans))
}

/// Shorten to `max_chars` characters, ending with an ellipsis when cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let kept: String = text.chars().take(max_chars - 1).collect();
    format!("{}…", kept.trim_end())
}

/// A `width` x `height` rect centered in `area`, clamped to it
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Parse accent color from config string
pub fn parse_accent_color(color: &str) -> Color {
    match color.to_lowercase().as_str() {
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        _ => Color::Yellow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Soul", 10), "Soul");
        assert_eq!(truncate("Guardians of the Galaxy", 10), "Guardians…");
        assert_eq!(truncate("Dune: Part Two", 6), "Dune:…");
        assert_eq!(truncate("anything", 0), "");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("العربية", 7), "العربية");
        assert_eq!(truncate("العربية", 4).chars().count(), 4);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(40, 10, area), Rect::new(30, 15, 40, 10));
        assert_eq!(centered_rect(200, 80, area), area);
    }

    #[test]
    fn test_accent_fallback() {
        assert_eq!(parse_accent_color("Cyan"), Color::Cyan);
        assert_eq!(parse_accent_color("chartreuse"), Color::Yellow);
    }
}
