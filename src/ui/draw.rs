//! Rendering of a laid-out selector
//!
//! The selector computes all geometry in `update`; drawing only reads it.
//! Window rows, top to bottom: header, separator, column rows, footer (page
//! labels share the footer row and are drawn over it).

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::canvas::{fill, hline, print, print_centered, print_right, put};
use super::text::{display_width, strip_color_tags};
use super::theme::Theme;
use crate::inventory::column::Column;
use crate::inventory::entry::Entry;
use crate::inventory::selector::{Selector, SelectorSettings};
use crate::inventory::store::Store;

/// Draw the selector window and any pending notice
pub fn draw(f: &mut Frame, selector: &Selector, theme: &Theme) {
    let area = selector.area().intersection(f.area());
    if area.is_empty() {
        return;
    }

    let base = Style::default().fg(theme.foreground).bg(theme.background);
    f.render_widget(Clear, area);
    let block = if selector.border() > 0 {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(base)
    } else {
        Block::default().style(base)
    };
    f.render_widget(block, area);

    let buf = f.buffer_mut();
    draw_header(buf, selector, area, theme);
    draw_footer(buf, selector, area, theme);
    draw_columns(buf, selector, area, theme);

    if let Some(notice) = selector.notice() {
        draw_notice(f, area, notice, theme);
    }
}

fn draw_header(buf: &mut Buffer, selector: &Selector, area: Rect, theme: &Theme) {
    let border = selector.border() as u16;
    let x = area.x + border + 1;
    let y = area.y + border;
    let width = area.width.saturating_sub(2 * (border + 1)) as usize;

    let title_style = Style::default()
        .fg(theme.header)
        .add_modifier(Modifier::BOLD);
    print(buf, x, y, width, selector.title(), title_style);
    print(buf, x, y + 1, width, selector.hint(), Style::default().fg(theme.dimmed));

    for (i, line) in selector.stats().iter().enumerate() {
        print_right(buf, x, y + i as u16, width, line, Style::default().fg(theme.dimmed));
    }

    let separator = y + selector.header_height() as u16;
    let line_style = Style::default().fg(theme.accent);
    hline(
        buf,
        area.x + border,
        separator,
        area.width.saturating_sub(2 * border) as usize,
        "─",
        line_style,
    );
    if border > 0 {
        put(buf, area.x, separator, '├', line_style);
        put(buf, area.right().saturating_sub(1), separator, '┤', line_style);
    }
}

fn draw_columns(buf: &mut Buffer, selector: &Selector, area: Rect, theme: &Theme) {
    let border = selector.border() as u16;
    let y = area.y + border + selector.header_height() as u16 + 1;
    let labels_y = area.bottom().saturating_sub(border + 1);
    let store = selector.store();
    let settings = selector.settings();

    let mut active = None;
    for (index, x) in selector.column_placement() {
        let column = selector.column(index);
        let x = area.x + to_u16(x);
        // The active column goes last so its text wins any overlap
        if index == selector.active_column_index() {
            active = Some((column, x));
        } else {
            draw_column(buf, column, store, settings, theme, x, y);
        }

        if column.pages_count() > 1 {
            let label = format!("Page {}/{}", column.page_index() + 1, column.pages_count());
            print(buf, x, labels_y, display_width(&label), &label, Style::default().fg(theme.dimmed));
        }
    }
    if let Some((column, x)) = active {
        draw_column(buf, column, store, settings, theme, x, y);
    }

    if selector.is_empty() {
        print_centered(
            buf,
            area,
            area.y + area.height / 2,
            "Your inventory is empty.",
            Style::default().fg(theme.dimmed),
        );
    }
}

/// Draw the current page of a column with its top-left corner at `(x, y)`
pub fn draw_column(
    buf: &mut Buffer,
    column: &Column,
    store: &Store,
    settings: &SelectorSettings,
    theme: &Theme,
    x: u16,
    y: u16,
) {
    if !column.visible() {
        return;
    }

    let preset = column.preset();
    let layout = column.layout();
    let cells = layout.cells();
    let width = column.width();
    let min_cell_gap = settings.layout.min_cell_gap as isize;
    let x = x as usize;

    let selection_style = Style::default()
        .fg(theme.selection_fg)
        .bg(theme.selection_bg);
    let spare_width = |entry: &Entry, index: usize| {
        layout
            .cell(index)
            .current_width
            .saturating_sub(column.entry_cell_width(entry, index, store))
    };

    for (line, (index, entry)) in column.page_entries().enumerate() {
        if entry.is_blank() {
            continue;
        }
        let row = y.saturating_add(to_u16(line));
        let mut x1 = x + column.entry_indent(entry);
        let mut x2 = x + layout.reserved_width().saturating_sub(layout.cells_width());
        let selected = column.is_active() && column.is_selected(index);

        if selected && layout.visible_cells() > 1 {
            let highlight = Rect::new(
                to_u16(x1),
                row,
                to_u16((x + width).saturating_sub(x1)),
                1,
            );
            fill(buf, highlight, selection_style);
        }

        let denial = column.entry_denial(entry, store);
        if !denial.is_empty() {
            let max_width = width.saturating_sub(
                settings.layout.min_denial_gap + column.entry_cell_width(entry, 0, store),
            );
            let denial_width = max_width.min(display_width(&denial));
            print(
                buf,
                to_u16(x + width - denial_width),
                row,
                denial_width,
                &denial,
                Style::default().fg(theme.denial),
            );
        }

        let count = if denial.is_empty() { cells.len() } else { 1 };
        for cell_index in 0..count {
            let cell = cells[cell_index];
            if !cell.visible() {
                continue;
            }
            if line != 0 && cell_index != 0 && entry.is_header() {
                break;
            }

            x2 += cell.current_width;

            let mut text_width = preset.cell_width(entry, cell_index, store);
            let text_gap = if cell_index > 0 {
                cell.gap().max(min_cell_gap) as usize
            } else {
                0
            };
            let mut available = x2.saturating_sub(x1 + text_gap);

            if text_width > available {
                // Borrow what a neighbouring cell doesn't use
                if cell_index == 0 && count >= 2 {
                    available += spare_width(entry, 1);
                } else if cell_index > 0 {
                    available += spare_width(entry, cell_index - 1);
                }
                text_width = text_width.min(available);
            }

            if text_width > 0 {
                let text_x = if cell_index == 0 { x1 } else { x2.saturating_sub(text_width) };
                let text = preset.cell_text(entry, cell_index, store);
                match entry {
                    Entry::Item(item) if selected || !item.is_selectable() => {
                        let style = if selected {
                            selection_style
                        } else {
                            Style::default().fg(theme.disabled)
                        };
                        print(buf, to_u16(text_x), row, text_width, &strip_color_tags(&text), style);
                    }
                    Entry::Item(item) => {
                        let color = preset.color(store.item(item.item));
                        print(buf, to_u16(text_x), row, text_width, &text, Style::default().fg(color));
                    }
                    _ => {
                        let style = Style::default()
                            .fg(theme.header)
                            .add_modifier(Modifier::BOLD);
                        print(buf, to_u16(text_x), row, text_width, &text, style);
                    }
                }
            }

            x1 = x2;
        }

        if let Entry::Item(item) = entry {
            let record = store.item(item.item);
            let mut xx = x;
            if let Some(key) = item.shortcut_key(record) {
                let tone = item.shortcut_tone(record, &settings.reserved_keys);
                put(buf, to_u16(xx), row, key, Style::default().fg(theme.shortcut(tone)));
            }
            xx += 2;
            if column.shows_item_symbols() {
                put(buf, to_u16(xx), row, record.symbol, Style::default().fg(record.color));
                xx += 2;
            }
            if column.allows_selecting() && column.is_multiselect() {
                let (mark, color) = if item.chosen_count == 0 {
                    ('-', theme.disabled)
                } else if item.chosen_count >= item.available_count(record) {
                    ('+', theme.marked)
                } else {
                    ('#', theme.marked)
                };
                put(buf, to_u16(xx), row, mark, Style::default().fg(color));
            }
        }
    }
}

fn draw_footer(buf: &mut Buffer, selector: &Selector, area: Rect, theme: &Theme) {
    let border = selector.border() as u16;
    let y = area.bottom().saturating_sub(border + 1);
    let color = if selector.has_available_choices() {
        theme.navigation(selector.mode())
    } else {
        theme.denial
    };
    print_centered(buf, area, y, &selector.footer(selector.mode()), Style::default().fg(color));
}

/// Centred popup holding a notice
fn draw_notice(f: &mut Frame, area: Rect, notice: &str, theme: &Theme) {
    let max_text = area.width.saturating_sub(4).max(1);
    let text_width = (display_width(notice) as u16).clamp(1, max_text);
    let lines = (display_width(notice) as u16).div_ceil(text_width).max(1);
    let width = (text_width + 4).min(area.width);
    let height = (lines + 2).min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let paragraph = Paragraph::new(notice)
        .style(Style::default().fg(theme.notice).bg(theme.background))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.notice))
                .style(Style::default().bg(theme.background)),
        );
    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Carrier, ItemRecord};
    use crate::inventory::preset::DefaultPreset;
    use crate::inventory::selector::{SelectorSettings, OWN_INV_COLUMN};
    use ratatui::{backend::TestBackend, Terminal};
    use std::rc::Rc;

    fn render(selector: &mut Selector, width: u16, height: u16) -> Vec<String> {
        selector.update(width, height);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| draw(f, selector, &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    fn selector() -> Selector {
        Selector::new(Rc::new(DefaultPreset::new()), SelectorSettings::default())
    }

    #[test]
    fn test_empty_selector() {
        let mut selector = selector();
        let screen = render(&mut selector, 60, 10);
        assert!(screen.iter().any(|l| l.contains("Your inventory is empty.")));
        assert!(screen.iter().any(|l| l.contains("There are no available choices.")));
    }

    #[test]
    fn test_rows_and_footer() {
        let mut selector = selector();
        selector.set_title("Pick an item");
        selector.add_item(OWN_INV_COLUMN, ItemRecord::new("apple", "FOOD").with_invlet('a'), 1, None);
        selector.add_item(
            OWN_INV_COLUMN,
            ItemRecord::new("anvil", "FOOD").with_denial("too heavy"),
            1,
            None,
        );
        let screen = render(&mut selector, 80, 20);
        let text = screen.join("\n");

        assert!(text.contains("Pick an item"));
        assert!(text.contains("FOOD"));
        assert!(text.contains("a apple"));
        assert!(text.contains("too heavy"));
        assert!(text.contains("Item selection mode; tab switches mode, enter confirms."));
        // Framed: the window is smaller than the screen
        assert!(text.contains('├'));

        let apple = screen.iter().find(|l| l.contains("apple")).unwrap();
        let anvil = screen.iter().find(|l| l.contains("anvil")).unwrap();
        assert!(apple.find("apple") == anvil.find("anvil"));
        assert!(anvil.find("too heavy") > anvil.find("anvil"));
    }

    #[test]
    fn test_page_labels() {
        let mut selector = selector();
        for name in ["a", "b", "c", "d", "e", "f", "g", "h"] {
            selector.add_item(OWN_INV_COLUMN, ItemRecord::new(name, "MISC"), 1, None);
        }
        // Header, separator and footer leave four rows for the column
        let screen = render(&mut selector, 60, 8);
        assert!(screen.iter().any(|l| l.contains("Page 1/")));
    }

    #[test]
    fn test_stats_in_header() {
        let mut selector = selector();
        selector.set_carrier(Some(Carrier {
            weight_capacity: 1.0,
            volume_capacity: 2.0,
        }));
        selector.add_item(
            OWN_INV_COLUMN,
            ItemRecord::new("brick", "MISC").with_weight(3.0, 1.0),
            1,
            None,
        );
        let screen = render(&mut selector, 80, 20);
        assert!(screen.iter().any(|l| l.contains("Weight (kg): 3.0/1.0")));
        assert!(screen.iter().any(|l| l.contains("Volume (L): 1.0/2.0")));
    }

    #[test]
    fn test_notice_popup() {
        let mut selector = selector();
        selector.add_item(OWN_INV_COLUMN, ItemRecord::new("apple", "FOOD"), 1, None);
        selector.show_notice("Nothing to see here.");
        let screen = render(&mut selector, 80, 20);
        assert!(screen.iter().any(|l| l.contains("Nothing to see here.")));
    }

    #[test]
    fn test_multiselect_marks() {
        let mut selector = Selector::multiselect(
            Rc::new(DefaultPreset::new()),
            SelectorSettings::default(),
            "ITEMS TO DROP",
        );
        let arrows = selector
            .add_item(OWN_INV_COLUMN, ItemRecord::new("arrow", "AMMO"), 4, None)
            .unwrap();
        selector.add_item(OWN_INV_COLUMN, ItemRecord::new("bolt", "AMMO"), 1, None);
        selector.set_chosen(arrows, 2);
        let screen = render(&mut selector, 80, 20);
        let text = screen.join("\n");
        assert!(text.contains("# 4 arrow"));
        assert!(text.contains("- bolt"));
        assert!(text.contains("ITEMS TO DROP"));
        assert!(text.contains("2 of 4 arrow"));
    }
}
