use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::snowfall::Snowfall;

/// Draws flakes over whatever is already rendered, only into blank cells
pub struct SnowLayer<'a>(pub &'a Snowfall);

impl Widget for SnowLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (x, y, glyph) in self.0.cells() {
            if x >= area.width || y >= area.height {
                continue;
            }
            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                if cell.symbol() == " " {
                    let color = if glyph == '·' { Color::Gray } else { Color::White };
                    cell.set_char(glyph).set_fg(color);
                }
            }
        }
    }
}
