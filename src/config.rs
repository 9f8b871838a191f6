use crate::{GameError, Result};
use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 3;
pub const TOTAL_MINES: usize = 3;
pub const MAX_SELECT_CELLS: usize = 3;
pub const INITIAL_BET: u64 = 300;
pub const INITIAL_BALANCE: u64 = 1000;
pub const MAX_BOARD_SIZE: usize = u8::MAX as usize;

/// Fixed parameters of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board_size: usize,
    pub total_mines: usize,
    pub max_select_cells: usize,
    pub bet: u64,
    pub initial_balance: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            total_mines: TOTAL_MINES,
            max_select_cells: MAX_SELECT_CELLS,
            bet: INITIAL_BET,
            initial_balance: INITIAL_BALANCE,
        }
    }
}

impl GameConfig {
    pub fn with_initial_balance(mut self, initial_balance: u64) -> Self {
        self.initial_balance = initial_balance;
        self
    }

    /// `None` when the cell count does not fit in a `usize`.
    pub fn total_cells(&self) -> Option<usize> {
        self.board_size.checked_mul(self.board_size)
    }

    /// Cells a player has to reveal to win a round.
    pub fn revealable_cells(&self) -> usize {
        self.total_cells()
            .unwrap_or(usize::MAX)
            .saturating_sub(self.total_mines.saturating_add(self.max_select_cells))
    }

    pub fn validate(&self) -> Result<()> {
        if self.board_size == 0 {
            return Err(GameError::InvalidConfig("board size must be positive"));
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidConfig("board size is too large"));
        }
        if self.max_select_cells == 0 {
            return Err(GameError::InvalidConfig("selection quota must be positive"));
        }
        if self.bet == 0 {
            return Err(GameError::InvalidConfig("bet must be positive"));
        }
        // A win credits twice the bet.
        if self.bet > u64::MAX / 2 {
            return Err(GameError::InvalidConfig("bet is too large to be paid out"));
        }
        let total_cells = self
            .total_cells()
            .ok_or(GameError::InvalidConfig("board size is too large"))?;
        let too_many_mines = GameError::TooManyMines {
            size: self.board_size,
            mines: self.total_mines,
            excluded: self.max_select_cells,
        };
        // At least one cell must remain to be revealed, otherwise a round is won on placement.
        match self.total_mines.checked_add(self.max_select_cells) {
            Some(occupied) if occupied < total_cells => Ok(()),
            _ => Err(too_many_mines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 3);
        assert_eq!(config.total_mines, 3);
        assert_eq!(config.max_select_cells, 3);
        assert_eq!(config.bet, 300);
        assert_eq!(config.initial_balance, 1000);
        assert_eq!(config.revealable_cells(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_board_is_rejected() {
        let config = GameConfig {
            total_mines: 6,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::TooManyMines { mines: 6, .. })
        ));
    }

    #[test]
    fn test_zero_bet_is_rejected() {
        let config = GameConfig {
            bet: 0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_bet_must_leave_room_for_payout() {
        let largest = GameConfig {
            bet: u64::MAX / 2,
            initial_balance: u64::MAX / 2,
            ..GameConfig::default()
        };
        assert!(largest.validate().is_ok());

        let too_large = GameConfig {
            bet: u64::MAX / 2 + 1,
            initial_balance: u64::MAX / 2 + 1,
            ..GameConfig::default()
        };
        assert!(matches!(
            too_large.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_huge_board_is_rejected_without_overflow() {
        let config = GameConfig {
            board_size: usize::MAX,
            ..GameConfig::default()
        };
        assert_eq!(config.total_cells(), None);
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

        let config = GameConfig {
            board_size: MAX_BOARD_SIZE + 1,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

        let config = GameConfig {
            total_mines: usize::MAX,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::TooManyMines { .. })
        ));
        assert_eq!(config.revealable_cells(), 0);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = GameConfig::default().with_initial_balance(50);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
