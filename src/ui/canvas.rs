//! Character-cell drawing primitives over a ratatui [`Buffer`]
//!
//! Everything is clipped to the buffer area, so callers can pass positions
//! computed from a layout that doesn't fit the screen.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
};

use super::text::{display_width, styled_runs};

/// Print text with colour markup at `(x, y)`, at most `width` cells
///
/// Returns the number of cells written.
pub fn print(buf: &mut Buffer, x: u16, y: u16, width: usize, text: &str, base: Style) -> usize {
    if !buf.area.contains(Position::new(x, y)) {
        return 0;
    }
    let room = width.min((buf.area.right() - x) as usize);
    let mut written = 0;
    for (run, style) in styled_runs(text, base) {
        if written >= room {
            break;
        }
        let (end, _) = buf.set_stringn(x + written as u16, y, &run, room - written, style);
        written = (end - x) as usize;
    }
    written
}

/// Print text ending at the right edge of `width` cells from `x`
pub fn print_right(buf: &mut Buffer, x: u16, y: u16, width: usize, text: &str, base: Style) {
    let text_width = display_width(text).min(width);
    let offset = (width - text_width) as u16;
    print(buf, x.saturating_add(offset), y, text_width, text, base);
}

/// Print text centred on row `y` of `area`
pub fn print_centered(buf: &mut Buffer, area: Rect, y: u16, text: &str, base: Style) {
    let text_width = display_width(text).min(area.width as usize);
    let x = area.x + (area.width - text_width as u16) / 2;
    print(buf, x, y, text_width, text, base);
}

/// Paint a rectangle with blanks
pub fn fill(buf: &mut Buffer, area: Rect, style: Style) {
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(" ").set_style(style);
            }
        }
    }
}

/// Draw a horizontal run of `symbol`
pub fn hline(buf: &mut Buffer, x: u16, y: u16, width: usize, symbol: &str, style: Style) {
    for dx in 0..width as u16 {
        if let Some(cell) = buf.cell_mut((x.saturating_add(dx), y)) {
            cell.set_symbol(symbol).set_style(style);
        }
    }
}

/// Put a single character
pub fn put(buf: &mut Buffer, x: u16, y: u16, ch: char, style: Style) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(ch).set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_print_markup_and_clip() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        let written = print(&mut buf, 1, 0, 20, "a<color_red>bc</color>defghijk", Style::default());
        assert_eq!(written, 9);
        assert_eq!(row(&buf, 0), " abcdefghi");
        assert_eq!(buf[(2, 0)].fg, Color::Red);
        assert_eq!(buf[(4, 0)].fg, Color::Reset);
    }

    #[test]
    fn test_print_outside_is_noop() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        assert_eq!(print(&mut buf, 9, 0, 3, "abc", Style::default()), 0);
        assert_eq!(print(&mut buf, 0, 3, 3, "abc", Style::default()), 0);
    }

    #[test]
    fn test_right_and_centered() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 9, 2));
        print_right(&mut buf, 0, 0, 9, "abc", Style::default());
        let area = buf.area;
        print_centered(&mut buf, area, 1, "abc", Style::default());
        assert_eq!(row(&buf, 0), "      abc");
        assert_eq!(row(&buf, 1), "   abc   ");
    }

    #[test]
    fn test_fill_and_hline() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 2));
        hline(&mut buf, 1, 0, 10, "─", Style::default());
        assert_eq!(row(&buf, 0), " ───");
        fill(&mut buf, Rect::new(0, 0, 2, 2), Style::default().bg(Color::Blue));
        assert_eq!(buf[(1, 1)].bg, Color::Blue);
        assert_eq!(buf[(1, 0)].symbol(), " ");
    }
}
