//! Board module - manages the game grid
//!
//! The board is a fixed-size grid (10x20 by default) where each cell is empty,
//! holds a locked piece kind, or holds garbage. Storage is a flat row-major
//! vector allocated once; the size never changes after construction.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Rows above the top (y < 0) are tolerated for placement checks so pieces can
//! spawn or be pushed partly off-screen.

use crate::pieces::cells_of;
use crate::rng::RandomSource;
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    ///
    /// Dimensions are clamped to at least 4 columns and 2 rows, the smallest
    /// grid every piece fits in and garbage can leave a surviving row on.
    pub fn new(width: u8, height: u8) -> Self {
        let width = width.clamp(4, i8::MAX as u8);
        let height = height.clamp(2, i8::MAX as u8);
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    /// Rebuild a board from wire values (row-major, 0..=8).
    ///
    /// Returns `None` when the length does not match or a value is out of range.
    pub fn from_u8(width: u8, height: u8, values: &[u8]) -> Option<Self> {
        if values.len() != width as usize * height as usize {
            return None;
        }
        let cells = values
            .iter()
            .map(|&v| Cell::from_u8(v))
            .collect::<Option<Vec<Cell>>>()?;
        let board = Self::new(width, height);
        if board.cells.len() != cells.len() {
            return None;
        }
        Some(Self { cells, ..board })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Empty))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8
    }

    /// Whether a single mino may sit at (x, y): inside the columns, above the
    /// floor, and on an empty cell unless it is still above the top edge.
    fn accepts_mino(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= self.width as i8 || y >= self.height as i8 {
            return false;
        }
        y < 0 || self.is_valid(x, y)
    }

    /// True iff all four cells of the piece fit at anchor (x, y)
    pub fn can_place(&self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
        cells_of(kind, rotation)
            .iter()
            .all(|&(dx, dy)| self.accepts_mino(x + dx, y + dy))
    }

    /// Write the piece into the grid. Cells above the top edge are dropped.
    ///
    /// No legality check; callers validate with [`Board::can_place`] first.
    pub fn place(&mut self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) {
        for &(dx, dy) in cells_of(kind, rotation).iter() {
            self.set(x + dx, y + dy, Cell::Piece(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| !cell.is_empty())
    }

    /// Row slice for y in 0..height
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = self.width as usize;
        let start = y * width;
        &self.cells[start..start + width]
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Two-pointer compaction from the bottom: every surviving row moves down
    /// by the number of full rows beneath it, and the vacated rows at the top
    /// are emptied.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = Cell::Empty;
        }

        cleared
    }

    /// Push `lines` garbage rows in from the bottom.
    ///
    /// The top `lines` rows are discarded and everything else moves up. Each new
    /// row is garbage except for one random hole. `lines` is clamped to
    /// `height - 1`; the clamped count is returned.
    pub fn inject_garbage<R: RandomSource>(&mut self, lines: usize, rng: &mut R) -> usize {
        let lines = lines.min(self.height as usize - 1);
        if lines == 0 {
            return 0;
        }

        let width = self.width as usize;
        let total = self.cells.len();
        self.cells.copy_within(lines * width..total, 0);

        for y in (self.height as usize - lines)..self.height as usize {
            let hole = rng.next_range(self.width as u32) as usize;
            let start = y * width;
            for (x, cell) in self.cells[start..start + width].iter_mut().enumerate() {
                *cell = if x == hole { Cell::Empty } else { Cell::Garbage };
            }
        }

        lines
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major wire values (0..=8)
    pub fn to_u8_vec(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.as_u8()).collect()
    }

    /// Create from rows of wire values for testing
    #[cfg(test)]
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len() as u8;
        let width = rows[0].len() as u8;
        let flat: Vec<u8> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::from_u8(width, height, &flat).unwrap()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}
