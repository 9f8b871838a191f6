use crate::{GameError, Position, Result};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
}

/// Cells the player commits to before mines are placed. These are guaranteed mine-free.
#[derive(Debug, Clone)]
pub struct Selection {
    cells: HashSet<Position>,
    max: usize,
}

impl Selection {
    pub fn new(max: usize) -> Self {
        Self {
            cells: HashSet::with_capacity(max),
            max,
        }
    }

    /// Adds `pos` if absent, removes it if present. Adding to a full selection is rejected
    /// and leaves the selection untouched.
    pub fn toggle(&mut self, pos: Position) -> Result<SelectionChange> {
        if self.cells.remove(&pos) {
            return Ok(SelectionChange::Removed);
        }
        if self.is_complete() {
            return Err(GameError::SelectionFull { max: self.max });
        }
        self.cells.insert(pos);
        Ok(SelectionChange::Added)
    }

    pub fn count(&self) -> usize {
        self.cells.len()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_complete(&self) -> bool {
        self.cells.len() == self.max
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.cells.contains(pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }

    pub fn as_set(&self) -> &HashSet<Position> {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}
