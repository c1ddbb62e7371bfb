//! The unbounded memory tape.

use std::collections::TryReserveError;

/// A lazily growable tape of wrapping byte cells with a single cursor.
///
/// Conceptually the tape is infinite in both directions and every cell
/// starts at 0. Physically it is two growable arrays: one for offsets
/// 0, 1, 2, … and one for offsets -1, -2, …, each extended by one zero
/// cell when the cursor crosses its materialized boundary. Cells are
/// never freed during a run; the tape only grows.
pub struct Tape {
    /// Cells at offsets 0, 1, 2, … (index == offset).
    right: Vec<u8>,
    /// Cells at offsets -1, -2, … (index == -offset - 1).
    left: Vec<u8>,
    cursor: isize,
}

impl Tape {
    /// Create a tape with a single materialized cell at offset 0.
    pub fn new() -> Self {
        Self {
            right: vec![0],
            left: Vec::new(),
            cursor: 0,
        }
    }

    /// The value of the cell under the cursor.
    pub fn current(&self) -> u8 {
        self.get(self.cursor)
    }

    /// Overwrite the cell under the cursor.
    pub fn set(&mut self, value: u8) {
        *self.cell_mut() = value;
    }

    /// Increment the cell under the cursor, wrapping 255 to 0.
    pub fn increment(&mut self) {
        let cell = self.cell_mut();
        *cell = cell.wrapping_add(1);
    }

    /// Decrement the cell under the cursor, wrapping 0 to 255.
    pub fn decrement(&mut self) {
        let cell = self.cell_mut();
        *cell = cell.wrapping_sub(1);
    }

    /// Move the cursor one cell to the right, materializing a zero cell if
    /// none exists there yet. The only failure is allocation.
    pub fn move_right(&mut self) -> Result<(), TryReserveError> {
        self.cursor += 1;
        if self.cursor >= 0 && self.cursor as usize == self.right.len() {
            grow(&mut self.right)?;
        }
        Ok(())
    }

    /// Move the cursor one cell to the left, materializing a zero cell if
    /// none exists there yet. The only failure is allocation.
    pub fn move_left(&mut self) -> Result<(), TryReserveError> {
        self.cursor -= 1;
        if self.cursor < 0 && (-self.cursor - 1) as usize == self.left.len() {
            grow(&mut self.left)?;
        }
        Ok(())
    }

    /// The cursor's offset from the starting cell.
    pub fn cursor(&self) -> isize {
        self.cursor
    }

    /// The value at an arbitrary offset; 0 for cells never visited.
    pub fn get(&self, offset: isize) -> u8 {
        if offset >= 0 {
            self.right.get(offset as usize).copied().unwrap_or(0)
        } else {
            self.left.get((-offset - 1) as usize).copied().unwrap_or(0)
        }
    }

    fn cell_mut(&mut self) -> &mut u8 {
        // move_left/move_right keep the cell under the cursor materialized.
        if self.cursor >= 0 {
            &mut self.right[self.cursor as usize]
        } else {
            &mut self.left[(-self.cursor - 1) as usize]
        }
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

/// Append one zero cell, surfacing allocation failure instead of aborting.
fn grow(cells: &mut Vec<u8>) -> Result<(), TryReserveError> {
    if cells.len() == cells.capacity() {
        cells.try_reserve(cells.capacity().max(1))?;
    }
    cells.push(0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_tape_starts_at_zero() {
        let tape = Tape::new();
        assert_eq!(tape.current(), 0);
        assert_eq!(tape.cursor(), 0);
    }

    #[test]
    fn increment_and_decrement_wrap_at_byte_width() {
        let mut tape = Tape::new();
        tape.decrement();
        assert_eq!(tape.current(), 255);
        tape.increment();
        assert_eq!(tape.current(), 0);
        for _ in 0..256 {
            tape.increment();
        }
        assert_eq!(tape.current(), 0);
    }

    #[test]
    fn moving_right_materializes_zero_cells() {
        let mut tape = Tape::new();
        tape.set(7);
        for _ in 0..100 {
            tape.move_right().unwrap();
            assert_eq!(tape.current(), 0);
        }
        assert_eq!(tape.cursor(), 100);
        assert_eq!(tape.get(0), 7);
    }

    #[test]
    fn moving_left_of_the_origin_materializes_zero_cells() {
        let mut tape = Tape::new();
        tape.move_left().unwrap();
        assert_eq!(tape.cursor(), -1);
        assert_eq!(tape.current(), 0);
        tape.set(42);
        tape.move_left().unwrap();
        assert_eq!(tape.current(), 0);
        assert_eq!(tape.get(-1), 42);
    }

    #[test]
    fn cells_survive_round_trips() {
        let mut tape = Tape::new();
        tape.set(1);
        tape.move_right().unwrap();
        tape.set(2);
        tape.move_left().unwrap();
        tape.move_left().unwrap();
        tape.set(3);
        assert_eq!(tape.get(0), 1);
        assert_eq!(tape.get(1), 2);
        assert_eq!(tape.get(-1), 3);
    }

    #[test]
    fn unvisited_offsets_read_as_zero() {
        let tape = Tape::new();
        assert_eq!(tape.get(1_000), 0);
        assert_eq!(tape.get(-1_000), 0);
    }
}
