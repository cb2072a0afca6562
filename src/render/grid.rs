//! Grid: a row-major frame of cells, plus the `Rect` used to place views.

use super::cell::{Cell, Rgb};

/// A rectangular area in terminal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left column.
    pub x: u16,
    /// Top row.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A frame of cells stored contiguously in row-major order.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Grid {
    /// Create a grid filled with empty cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Grid width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Full-grid rectangle.
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Get a cell.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell. Returns `false` when out of bounds.
    ///
    /// Wide cells also write a continuation into the next column when it
    /// exists.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        let Some(index) = self.index_of(x, y) else {
            return false;
        };
        self.cells[index] = cell;
        if cell.display_width() == 2 {
            if let Some(next) = self.index_of(x + 1, y) {
                self.cells[next] = Cell::CONTINUATION.with_fg(cell.fg()).with_bg(cell.bg());
            }
        }
        true
    }

    /// Fill a rectangle (clipped to the grid) with one cell.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let right = rect.x.saturating_add(rect.width).min(self.width);
        let bottom = rect.y.saturating_add(rect.height).min(self.height);
        for y in rect.y..bottom {
            for x in rect.x..right {
                self.set(x, y, cell);
            }
        }
    }

    /// Clear a rectangle to spaces on the given background.
    pub fn clear_rect(&mut self, rect: Rect, fg: Rgb, bg: Rgb) {
        self.fill(rect, Cell::EMPTY.with_fg(fg).with_bg(bg));
    }

    /// Resize the grid, preserving the overlapping top-left region.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        let mut resized = Self::new(width, height);
        for y in 0..self.height.min(height) {
            for x in 0..self.width.min(width) {
                if let Some(cell) = self.get(x, y) {
                    resized.cells[usize::from(y) * usize::from(width) + usize::from(x)] = *cell;
                }
            }
        }
        *self = resized;
    }

    /// Iterate rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width.max(1)))
    }

    /// The symbols of one row as a string, skipping continuation cells.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.is_continuation())
            .map(Cell::symbol)
            .collect()
    }
}
