//! In-memory character grid.
//!
//! Mirrors what the LCD shows cell by cell, with the same cursor rules as
//! the hardware driver. Handy as a render target for tests and for dumping
//! the current screen over RTT.

use super::CharDisplay;

/// A `C` columns by `R` rows character buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer<const C: usize, const R: usize> {
    cells: [[char; C]; R],
    column: usize,
    row: usize,
}

impl<const C: usize, const R: usize> FrameBuffer<C, R> {
    const GEOMETRY_FITS_U8: () = assert!(
        C <= u8::MAX as usize && R <= u8::MAX as usize,
        "frame buffer geometry must fit in u8"
    );

    pub const fn new() -> Self {
        let () = Self::GEOMETRY_FITS_U8;
        Self {
            cells: [[' '; C]; R],
            column: 0,
            row: 0,
        }
    }

    /// One row of cells. Panics if `row >= R`.
    pub fn row(&self, row: usize) -> &[char; C] {
        &self.cells[row]
    }

    /// Character at (column, row), `None` outside the grid.
    pub fn cell(&self, column: usize, row: usize) -> Option<char> {
        self.cells.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Current write position as (column, row).
    pub fn cursor(&self) -> (usize, usize) {
        (self.column, self.row)
    }

    /// True if `row` reads exactly `text` followed by blanks.
    pub fn row_reads(&self, row: usize, text: &str) -> bool {
        let Some(cells) = self.cells.get(row) else {
            return false;
        };
        let mut expected = text.chars();
        cells
            .iter()
            .all(|&cell| cell == expected.next().unwrap_or(' '))
            && expected.next().is_none()
    }
}

impl<const C: usize, const R: usize> Default for FrameBuffer<C, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const C: usize, const R: usize> CharDisplay for FrameBuffer<C, R> {
    fn clear(&mut self) {
        self.cells = [[' '; C]; R];
        self.column = 0;
        self.row = 0;
    }

    fn move_to(&mut self, column: u8, row: u8) {
        self.column = column as usize;
        self.row = row as usize;
    }

    fn put_str(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.row += 1;
                self.column = 0;
                continue;
            }
            if self.row < R && self.column < C {
                self.cells[self.row][self.column] = c;
            }
            self.column += 1;
        }
    }

    fn columns(&self) -> u8 {
        C as u8
    }

    fn rows(&self) -> u8 {
        R as u8
    }
}
