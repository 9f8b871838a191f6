use itertools::iproduct;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_within(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Every position of a `size`x`size` board in row-major order.
    pub fn all(size: usize) -> impl Iterator<Item = Position> {
        iproduct!(0..size, 0..size).map(|(row, col)| Position::new(row, col))
    }

    pub(crate) fn index(&self) -> [usize; 2] {
        [self.row, self.col]
    }
}
