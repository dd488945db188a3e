//! Cell width negotiation
//!
//! Each column splits its width between the cells of its preset. A cell
//! remembers how wide its widest content is (`real_width`) and how wide it
//! is drawn (`current_width`); the difference is the gap in front of it.

use crate::config::LayoutConfig;

/// Width bookkeeping of one cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Width the widest content needs
    pub real_width: usize,
    /// Width actually drawn
    pub current_width: usize,
}

impl Cell {
    pub fn visible(&self) -> bool {
        self.current_width > 0
    }

    /// Free space in front of the content; negative when squeezed
    pub fn gap(&self) -> isize {
        self.current_width as isize - self.real_width as isize
    }
}

/// Cells of one column plus width reserved by rejection texts
#[derive(Debug, Clone, Default)]
pub struct CellLayout {
    cells: Vec<Cell>,
    reserved_width: usize,
}

impl CellLayout {
    pub fn new(count: usize) -> Self {
        Self {
            cells: vec![Cell::default(); count],
            reserved_width: 0,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Cell {
        self.cells.get(index).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn reserved_width(&self) -> usize {
        self.reserved_width
    }

    /// Forget all measurements
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = Cell::default());
        self.reserved_width = 0;
    }

    /// Account for `width` columns of content in cell `index`
    ///
    /// A hidden cell stays hidden unless `reveal` is set, so headers and
    /// stub texts never make a cell appear on their own.
    pub fn grow(&mut self, index: usize, width: usize, reveal: bool, config: &LayoutConfig) {
        let Some(cell) = self.cells.get_mut(index) else {
            return;
        };
        cell.real_width = cell.real_width.max(width);
        if cell.visible() || reveal {
            let gap = if index > 0 { config.normal_cell_gap } else { 0 };
            cell.current_width = cell.current_width.max(gap + cell.real_width);
        }
    }

    pub fn reserve(&mut self, width: usize) {
        self.reserved_width = self.reserved_width.max(width);
    }

    pub fn cells_width(&self) -> usize {
        self.cells.iter().map(|c| c.current_width).sum()
    }

    pub fn width(&self) -> usize {
        self.cells_width().max(self.reserved_width)
    }

    pub fn visible_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.visible()).count()
    }

    /// Grow or shrink cells one unit at a time until they sum to `target`
    ///
    /// Growing feeds the visible cell with the smallest gap. Shrinking takes
    /// from the visible cell with the largest gap while any gap exceeds the
    /// minimum, then from the widest cell. Stops early when no visible cell
    /// is left. The result reserves exactly `target`.
    pub fn fit(&mut self, target: usize, config: &LayoutConfig) {
        let min_gap = config.min_cell_gap as isize;
        let mut total = self.cells_width();

        while total != target {
            let picked = if total < target {
                self.visible()
                    .min_by_key(|(_, c)| c.gap())
                    .map(|(i, _)| i)
            } else if self.visible().any(|(_, c)| c.gap() > min_gap) {
                first_max_by_key(self.visible(), |c| c.gap())
            } else {
                first_max_by_key(self.visible(), |c| c.current_width as isize)
            };

            let Some(index) = picked else {
                tracing::debug!("Cell layout can't reach width {}", target);
                break;
            };

            if total < target {
                self.cells[index].current_width += 1;
                total += 1;
            } else {
                self.cells[index].current_width -= 1;
                total -= 1;
            }
        }

        self.reserved_width = target;
    }

    fn visible(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells.iter().enumerate().filter(|(_, c)| c.visible())
    }
}

/// `Iterator::max_by_key` keeps the last maximum; ties here go to the first
fn first_max_by_key<'a>(
    cells: impl Iterator<Item = (usize, &'a Cell)>,
    key: impl Fn(&Cell) -> isize,
) -> Option<usize> {
    let mut best: Option<(usize, isize)> = None;
    for (i, cell) in cells {
        let k = key(cell);
        if best.map_or(true, |(_, b)| k > b) {
            best = Some((i, k));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grown(widths: &[usize]) -> (CellLayout, LayoutConfig) {
        let config = LayoutConfig::default();
        let mut layout = CellLayout::new(widths.len());
        for (i, w) in widths.iter().enumerate() {
            layout.grow(i, *w, true, &config);
        }
        (layout, config)
    }

    #[test]
    fn test_grow_applies_gap() {
        let (layout, config) = grown(&[10, 3]);
        assert_eq!(layout.cell(0).current_width, 10);
        assert_eq!(layout.cell(1).current_width, 3 + config.normal_cell_gap);
        assert_eq!(layout.cell(1).gap(), config.normal_cell_gap as isize);
    }

    #[test]
    fn test_hidden_cell_needs_reveal() {
        let config = LayoutConfig::default();
        let mut layout = CellLayout::new(2);
        layout.grow(1, 6, false, &config);
        assert!(!layout.cell(1).visible());
        assert_eq!(layout.cell(1).real_width, 6);
        layout.grow(1, 2, true, &config);
        assert_eq!(layout.cell(1).current_width, 6 + config.normal_cell_gap);
    }

    #[test]
    fn test_fit_grows_smallest_gap() {
        let (mut layout, config) = grown(&[10, 3]);
        layout.fit(20, &config);
        assert_eq!(layout.cells_width(), 20);
        // Caption starts with no gap so it takes the extra room
        assert_eq!(layout.cell(0).current_width, 13);
        assert_eq!(layout.width(), 20);
    }

    #[test]
    fn test_fit_shrinks_gaps_first() {
        let (mut layout, config) = grown(&[10, 3]);
        layout.fit(15, &config);
        assert_eq!(layout.cells_width(), 15);
        assert_eq!(layout.cell(0).current_width, 10);
        assert_eq!(layout.cell(1).gap(), config.min_cell_gap as isize);

        layout.fit(12, &config);
        // Gaps are at the minimum: the widest cell gives way
        assert_eq!(layout.cell(0).current_width, 7);
        assert_eq!(layout.cells_width(), 12);
    }

    #[test]
    fn test_fit_converges_to_every_target() {
        for target in 1..40 {
            let (mut layout, config) = grown(&[9, 4, 2]);
            layout.fit(target, &config);
            assert_eq!(layout.cells_width(), target, "target {target}");
            assert_eq!(layout.reserved_width(), target);
        }
    }

    #[test]
    fn test_fit_without_visible_cells_stops() {
        let config = LayoutConfig::default();
        let mut layout = CellLayout::new(2);
        layout.fit(10, &config);
        assert_eq!(layout.cells_width(), 0);
        assert_eq!(layout.width(), 10);

        let (mut layout, config) = grown(&[3]);
        layout.fit(0, &config);
        assert_eq!(layout.cells_width(), 0);
    }

    #[test]
    fn test_reserve_and_clear() {
        let (mut layout, _) = grown(&[4]);
        layout.reserve(12);
        assert_eq!(layout.width(), 12);
        layout.clear();
        assert_eq!(layout.width(), 0);
        assert_eq!(layout.visible_cells(), 0);
    }
}
