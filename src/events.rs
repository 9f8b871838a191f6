use crate::Position;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualState {
    Plain,
    Selected,
    RevealedSafe,
    RevealedMine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Pending,
    Win,
    Lose,
}

/// Which inputs the frontend should currently offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Controls {
    pub activate: bool,
    pub start_or_bet: bool,
    pub reset: bool,
}

/// State changes emitted by the round controller, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    BoardReset {
        size: usize,
    },
    CellChanged {
        pos: Position,
        state: VisualState,
    },
    SelectionCount {
        count: usize,
        quota: usize,
    },
    BalanceChanged(u64),
    RoundResolved {
        outcome: Outcome,
        message: String,
        payout: u64,
    },
    ControlsChanged(Controls),
    PlayerMessage(String),
}

/// A frontend that projects controller state. It never feeds state back.
pub trait DisplaySurface {
    fn render(&mut self, notification: &Notification);
}

impl DisplaySurface for Vec<Notification> {
    fn render(&mut self, notification: &Notification) {
        self.push(notification.clone());
    }
}
