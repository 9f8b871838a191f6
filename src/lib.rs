pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod ledger;
pub mod placer;
pub mod position;
pub mod selection;

pub use board::{Board, Cell, CellContents};
pub use config::GameConfig;
pub use error::{GameError, Result};
pub use events::{Controls, DisplaySurface, Notification, Outcome, VisualState};
pub use game::{Action, Phase, RevealOutcome, RoundController};
pub use ledger::Ledger;
pub use placer::{FixedMinePlacer, MinePlacer, RandomMinePlacer};
pub use position::Position;
pub use selection::{Selection, SelectionChange};
