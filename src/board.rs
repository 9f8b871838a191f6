use crate::{GameError, Position, Result, VisualState};
use itertools::Itertools;
use ndarray::Array2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellContents {
    #[default]
    Empty,
    Mine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub contents: CellContents,
    pub selected: bool,
    pub revealed: bool,
    /// Shown to the player at the end of a round without counting as a reveal.
    pub disclosed: bool,
}

impl Cell {
    pub fn is_mine(&self) -> bool {
        self.contents == CellContents::Mine
    }

    /// Projection of the cell onto what the display should draw.
    pub fn visual_state(&self) -> VisualState {
        if self.selected {
            VisualState::Selected
        } else if self.revealed || self.disclosed {
            match self.contents {
                CellContents::Empty => VisualState::RevealedSafe,
                CellContents::Mine => VisualState::RevealedMine,
            }
        } else {
            VisualState::Plain
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    cells: Array2<Cell>,
    mines_placed: bool,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            cells: Array2::default((size, size)),
            mines_placed: false,
        }
    }

    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
        self.mines_placed = false;
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn get_cell(&self, pos: Position) -> Result<&Cell> {
        self.cells.get(pos.index()).ok_or(GameError::OutOfBounds(pos))
    }

    fn cell_mut(&mut self, pos: Position) -> Result<&mut Cell> {
        self.cells
            .get_mut(pos.index())
            .ok_or(GameError::OutOfBounds(pos))
    }

    /// Marks exactly `positions` as mines. Allowed once per reset.
    pub fn set_mines<'a>(
        &mut self,
        positions: impl IntoIterator<Item = &'a Position>,
    ) -> Result<()> {
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }

        let positions: Vec<Position> = positions.into_iter().copied().collect();
        if let Some(pos) = positions.iter().find(|p| !p.is_within(self.size())) {
            return Err(GameError::OutOfBounds(*pos));
        }
        if let Some(pos) = positions.iter().duplicates().next() {
            return Err(GameError::DuplicatePosition(*pos));
        }

        for cell in self.cells.iter_mut() {
            cell.contents = CellContents::Empty;
        }
        for pos in positions {
            self.cells[pos.index()].contents = CellContents::Mine;
        }
        self.mines_placed = true;
        Ok(())
    }

    pub fn mark_selected(&mut self, pos: Position) -> Result<()> {
        let cell = self.cell_mut(pos)?;
        if cell.revealed {
            return Err(GameError::AlreadyRevealed(pos));
        }
        cell.selected = true;
        Ok(())
    }

    pub fn reveal(&mut self, pos: Position) -> Result<CellContents> {
        let cell = self.cell_mut(pos)?;
        if cell.revealed {
            return Err(GameError::AlreadyRevealed(pos));
        }
        if cell.selected {
            return Err(GameError::CellSelected(pos));
        }
        cell.revealed = true;
        Ok(cell.contents)
    }

    /// True once every empty cell outside the selection has been revealed.
    pub fn is_fully_cleared(&self) -> bool {
        self.cells
            .iter()
            .filter(|cell| !cell.is_mine() && !cell.selected)
            .all(|cell| cell.revealed)
    }

    /// Discloses every mine and every hidden empty cell outside the selection, returning the
    /// positions whose visual state changed. `revealed` flags are left untouched.
    pub fn disclose_all(&mut self) -> Vec<Position> {
        let mut changed = Vec::new();
        for ((row, col), cell) in self.cells.indexed_iter_mut() {
            if cell.revealed || cell.disclosed || cell.selected {
                continue;
            }
            cell.disclosed = true;
            changed.push(Position::new(row, col));
        }
        changed
    }

    pub fn mine_positions(&self) -> Vec<Position> {
        self.positions_where(|cell| cell.is_mine())
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.revealed).count()
    }

    fn positions_where(&self, predicate: impl Fn(&Cell) -> bool) -> Vec<Position> {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| predicate(cell))
            .map(|((row, col), _)| Position::new(row, col))
            .collect()
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = Position> {
        Position::all(self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn armed_board() -> Board {
        let mut board = Board::new(3);
        board.set_mines(&[p(0, 1), p(1, 0), p(2, 1)]).unwrap();
        for pos in [p(0, 0), p(1, 1), p(2, 2)] {
            board.mark_selected(pos).unwrap();
        }
        board
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(3);
        assert_eq!(board.size(), 3);
        assert!(board.mine_positions().is_empty());
        assert_eq!(board.revealed_count(), 0);
        assert_eq!(board.iter_positions().count(), 9);
    }

    #[test]
    fn test_set_mines_twice_without_reset() {
        let mut board = armed_board();
        assert_eq!(
            board.set_mines(&[p(0, 2)]),
            Err(GameError::MinesAlreadyPlaced)
        );

        board.reset();
        assert!(board.set_mines(&[p(0, 2)]).is_ok());
        assert_eq!(board.mine_positions(), vec![p(0, 2)]);
    }

    #[test]
    fn test_set_mines_rejects_bad_input() {
        let mut board = Board::new(3);
        assert_eq!(
            board.set_mines(&[p(0, 0), p(0, 0)]),
            Err(GameError::DuplicatePosition(p(0, 0)))
        );
        assert_eq!(
            board.set_mines(&[p(3, 0)]),
            Err(GameError::OutOfBounds(p(3, 0)))
        );
        assert!(!board.mines_placed());
    }

    #[test]
    fn test_reveal() {
        let mut board = armed_board();

        assert_eq!(board.reveal(p(0, 2)), Ok(CellContents::Empty));
        assert_eq!(board.reveal(p(0, 2)), Err(GameError::AlreadyRevealed(p(0, 2))));
        assert_eq!(board.reveal(p(1, 1)), Err(GameError::CellSelected(p(1, 1))));
        assert_eq!(board.reveal(p(0, 1)), Ok(CellContents::Mine));
        assert_eq!(board.reveal(p(5, 5)), Err(GameError::OutOfBounds(p(5, 5))));
        assert_eq!(board.revealed_count(), 2);
    }

    #[test]
    fn test_fully_cleared_ignores_mines_and_selection() {
        let mut board = armed_board();
        assert!(!board.is_fully_cleared());

        board.reveal(p(0, 2)).unwrap();
        board.reveal(p(1, 2)).unwrap();
        assert!(!board.is_fully_cleared());

        board.reveal(p(2, 0)).unwrap();
        assert!(board.is_fully_cleared());
    }

    #[test]
    fn test_disclose_all_keeps_revealed_flags() {
        let mut board = armed_board();
        board.reveal(p(0, 2)).unwrap();

        let changed = board.disclose_all();

        assert_eq!(changed.len(), 5);
        assert!(!changed.contains(&p(0, 2)));
        assert!(!changed.contains(&p(1, 1)));
        assert_eq!(board.revealed_count(), 1);
        assert_eq!(board.get_cell(p(0, 1)).unwrap().visual_state(), VisualState::RevealedMine);
        assert_eq!(board.get_cell(p(2, 0)).unwrap().visual_state(), VisualState::RevealedSafe);
        assert_eq!(board.get_cell(p(2, 2)).unwrap().visual_state(), VisualState::Selected);
        assert!(board.disclose_all().is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut board = armed_board();
        board.reveal(p(2, 0)).unwrap();
        board.disclose_all();

        board.reset();

        for pos in board.iter_positions() {
            assert_eq!(*board.get_cell(pos).unwrap(), Cell::default());
        }
        assert!(!board.mines_placed());
    }
}
