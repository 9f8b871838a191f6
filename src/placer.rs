use crate::{GameError, Position, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashSet, VecDeque};

/// Chooses where mines go at the start of a round.
pub trait MinePlacer {
    /// Returns `mine_count` distinct positions on a `board_size`x`board_size` board, none of
    /// them in `excluded`.
    fn place(
        &mut self,
        board_size: usize,
        mine_count: usize,
        excluded: &HashSet<Position>,
    ) -> Result<HashSet<Position>>;
}

fn check_capacity(
    board_size: usize,
    mine_count: usize,
    excluded: &HashSet<Position>,
) -> Result<()> {
    let excluded_on_board = excluded.iter().filter(|p| p.is_within(board_size)).count();
    let fits = mine_count
        .checked_add(excluded_on_board)
        .zip(board_size.checked_mul(board_size))
        .is_some_and(|(needed, total)| needed <= total);
    if !fits {
        return Err(GameError::TooManyMines {
            size: board_size,
            mines: mine_count,
            excluded: excluded_on_board,
        });
    }
    Ok(())
}

/// Uniform rejection sampling over the whole board.
#[derive(Debug, Clone)]
pub struct RandomMinePlacer<R = StdRng> {
    rng: R,
}

impl RandomMinePlacer<StdRng> {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomMinePlacer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomMinePlacer<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MinePlacer for RandomMinePlacer<R> {
    fn place(
        &mut self,
        board_size: usize,
        mine_count: usize,
        excluded: &HashSet<Position>,
    ) -> Result<HashSet<Position>> {
        check_capacity(board_size, mine_count, excluded)?;

        let mut mines = HashSet::with_capacity(mine_count);
        while mines.len() < mine_count {
            let row = self.rng.gen_range(0..board_size);
            let col = self.rng.gen_range(0..board_size);
            let pos = Position::new(row, col);

            if !excluded.contains(&pos) {
                mines.insert(pos);
            }
        }

        log::debug!("Mines placed: {:?}", sorted(&mines));
        Ok(mines)
    }
}

/// Replays predetermined layouts, one per round. Used for replays and deterministic tests.
#[derive(Debug, Clone, Default)]
pub struct FixedMinePlacer {
    layouts: VecDeque<Vec<Position>>,
}

impl FixedMinePlacer {
    pub fn new(layout: impl IntoIterator<Item = Position>) -> Self {
        let mut placer = Self::default();
        placer.push_layout(layout);
        placer
    }

    pub fn push_layout(&mut self, layout: impl IntoIterator<Item = Position>) {
        self.layouts.push_back(layout.into_iter().collect());
    }
}

impl MinePlacer for FixedMinePlacer {
    /// Pops the next layout; the last one is reused once the queue would run dry.
    fn place(
        &mut self,
        board_size: usize,
        mine_count: usize,
        excluded: &HashSet<Position>,
    ) -> Result<HashSet<Position>> {
        check_capacity(board_size, mine_count, excluded)?;

        let layout = if self.layouts.len() > 1 {
            self.layouts.pop_front()
        } else {
            self.layouts.front().cloned()
        }
        .ok_or(GameError::InvalidConfig("no fixed mine layout available"))?;

        let mut mines = HashSet::with_capacity(layout.len());
        for pos in layout {
            if !pos.is_within(board_size) {
                return Err(GameError::OutOfBounds(pos));
            }
            if excluded.contains(&pos) {
                return Err(GameError::MineOnExcludedCell(pos));
            }
            if !mines.insert(pos) {
                return Err(GameError::DuplicatePosition(pos));
            }
        }
        if mines.len() != mine_count {
            return Err(GameError::InvalidConfig("fixed layout has the wrong mine count"));
        }
        Ok(mines)
    }
}

fn sorted(positions: &HashSet<Position>) -> Vec<Position> {
    let mut positions: Vec<Position> = positions.iter().copied().collect();
    positions.sort();
    positions
}
