//! The machine's tape: a two-way unbounded sequence of symbols, materialized lazily.
//!
//! Only the cells the head has visited (plus the initial content) exist in memory. Moving the
//! head past either end materializes exactly one blank cell there, so the head always points
//! at a real cell and the tape never shrinks.

use crate::types::{Direction, TuringMachineError};
use std::collections::VecDeque;
use std::fmt;

/// A growable tape with a read/write head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<char>,
    head: usize,
    blank: char,
}

impl Tape {
    /// Creates a tape from its initial content and head position.
    ///
    /// An empty content is materialized as a single blank cell. A head outside the content is
    /// rejected with [`TuringMachineError::InvalidHead`].
    pub fn new(
        content: impl IntoIterator<Item = char>,
        head: usize,
        blank: char,
    ) -> Result<Self, TuringMachineError> {
        let mut cells: VecDeque<char> = content.into_iter().collect();
        if cells.is_empty() {
            cells.push_back(blank);
        }

        if head >= cells.len() {
            return Err(TuringMachineError::InvalidHead {
                head,
                len: cells.len(),
            });
        }

        Ok(Self { cells, head, blank })
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> char {
        self.cells[self.head]
    }

    /// Overwrites the cell under the head.
    pub fn write(&mut self, symbol: char) {
        self.cells[self.head] = symbol;
    }

    /// Moves the head one cell, growing the tape when the head would leave it.
    ///
    /// Returns `true` if a blank cell was materialized. When growing on the left the new cell
    /// becomes index 0 and the head stays at 0, so every existing cell shifts right by one.
    pub fn shift(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Left => {
                if self.head == 0 {
                    self.cells.push_front(self.blank);
                    true
                } else {
                    self.head -= 1;
                    false
                }
            }
            Direction::Right => {
                self.head += 1;
                if self.head >= self.cells.len() {
                    self.cells.push_back(self.blank);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Returns the head index into the materialized cells.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the number of materialized cells. Never zero.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn blank(&self) -> char {
        self.blank
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.cells.iter().copied()
    }

    /// Returns the materialized cells as a vector.
    pub fn symbols(&self) -> Vec<char> {
        self.iter().collect()
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|c| write!(f, "{}", c))
    }
}
