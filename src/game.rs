use crate::{
    Board, CellContents, Controls, DisplaySurface, GameConfig, GameError, Ledger, MinePlacer,
    Notification, Outcome, Position, RandomMinePlacer, Result, Selection, SelectionChange,
    VisualState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Selecting,
    ReadyToBet,
    Playing,
    Resolved,
}

impl Phase {
    pub fn accepts_selection(self) -> bool {
        matches!(self, Phase::Idle | Phase::Selecting | Phase::ReadyToBet)
    }

    pub fn controls(self) -> Controls {
        Controls {
            activate: self != Phase::Resolved,
            start_or_bet: self == Phase::ReadyToBet,
            reset: self != Phase::Idle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

/// Inputs a frontend can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Activate(Position),
    StartOrBet,
    Reset,
}

/// Owns every piece of game state for one session and drives the round lifecycle.
pub struct RoundController<P = RandomMinePlacer> {
    config: GameConfig,
    board: Board,
    selection: Selection,
    ledger: Ledger,
    placer: P,
    phase: Phase,
    outcome: Outcome,
    pending: Vec<Notification>,
}

impl RoundController<RandomMinePlacer> {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_placer(config, RandomMinePlacer::new())
    }
}

impl<P: MinePlacer> RoundController<P> {
    pub fn with_placer(config: GameConfig, placer: P) -> Result<Self> {
        config.validate()?;

        let mut controller = Self {
            config,
            board: Board::new(config.board_size),
            selection: Selection::new(config.max_select_cells),
            ledger: Ledger::new(config.initial_balance, config.bet),
            placer,
            phase: Phase::Idle,
            outcome: Outcome::Pending,
            pending: Vec::new(),
        };
        controller.announce_fresh_board();
        controller.emit(Notification::BalanceChanged(controller.ledger.balance()));
        Ok(controller)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    pub fn controls(&self) -> Controls {
        self.phase.controls()
    }

    /// What the display should currently draw at `pos`. Pending selections count as selected.
    pub fn visual_state(&self, pos: Position) -> Result<VisualState> {
        let cell = self.board.get_cell(pos)?;
        if self.selection.contains(&pos) {
            return Ok(VisualState::Selected);
        }
        Ok(cell.visual_state())
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub fn flush_to(&mut self, surface: &mut impl DisplaySurface) {
        for notification in self.pending.drain(..) {
            surface.render(&notification);
        }
    }

    pub fn perform_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Activate(pos) => self.activate_cell(pos.row, pos.col),
            Action::StartOrBet => self.start_or_bet(),
            Action::Reset => {
                self.reset_round();
                Ok(())
            }
        }
    }

    /// Cell click: selects before the bet, reveals after it, and is ignored once resolved.
    pub fn activate_cell(&mut self, row: usize, col: usize) -> Result<()> {
        let pos = Position::new(row, col);
        match self.phase {
            Phase::Idle | Phase::Selecting | Phase::ReadyToBet => match self.select_cell(pos) {
                Ok(_) => Ok(()),
                Err(e) if e.is_recoverable() => {
                    log::debug!("Selection of {:?} rejected: {}", pos, e);
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Phase::Playing => self.reveal_cell(pos).map(|_| ()),
            Phase::Resolved => Ok(()),
        }
    }

    pub fn start_or_bet(&mut self) -> Result<()> {
        match self.phase {
            Phase::ReadyToBet => match self.place_bet() {
                Err(e @ GameError::InsufficientFunds { .. }) => {
                    log::warn!("Bet rejected: {}", e);
                    self.emit(Notification::PlayerMessage(
                        "Insufficient balance for this bet!".to_string(),
                    ));
                    Ok(())
                }
                other => other,
            },
            Phase::Idle | Phase::Selecting => {
                self.emit(Notification::PlayerMessage(format!(
                    "Please select exactly {} cells to bet.",
                    self.selection.max()
                )));
                Ok(())
            }
            Phase::Playing | Phase::Resolved => Ok(()),
        }
    }

    pub fn reset_round(&mut self) {
        self.new_round();
    }

    pub fn select_cell(&mut self, pos: Position) -> Result<SelectionChange> {
        if !self.phase.accepts_selection() {
            return Err(GameError::InvalidGameState);
        }
        if !pos.is_within(self.board.size()) {
            return Err(GameError::OutOfBounds(pos));
        }

        let change = self.selection.toggle(pos)?;
        let state = match change {
            SelectionChange::Added => VisualState::Selected,
            SelectionChange::Removed => VisualState::Plain,
        };
        self.emit(Notification::CellChanged { pos, state });
        self.emit(Notification::SelectionCount {
            count: self.selection.count(),
            quota: self.selection.max(),
        });

        let next = match self.selection.count() {
            0 => Phase::Idle,
            _ if self.selection.is_complete() => Phase::ReadyToBet,
            _ => Phase::Selecting,
        };
        self.set_phase(next);
        Ok(change)
    }

    /// Stakes the bet and arms the board. Nothing changes if any check fails.
    pub fn place_bet(&mut self) -> Result<()> {
        if self.phase != Phase::ReadyToBet {
            return Err(GameError::InvalidGameState);
        }
        let bet = self.ledger.current_bet();
        if !self.ledger.can_afford(bet) {
            return Err(GameError::InsufficientFunds {
                balance: self.ledger.balance(),
                required: bet,
            });
        }

        let mines = self.placer.place(
            self.config.board_size,
            self.config.total_mines,
            self.selection.as_set(),
        )?;
        self.board.reset();
        self.board.set_mines(&mines)?;
        for &pos in self.selection.iter() {
            self.board.mark_selected(pos)?;
        }

        self.ledger.debit(bet)?;
        self.emit(Notification::BalanceChanged(self.ledger.balance()));
        self.outcome = Outcome::Pending;
        log::debug!(
            "Bet of {} placed, {} cells to clear",
            bet,
            self.config.revealable_cells()
        );
        self.set_phase(Phase::Playing);
        Ok(())
    }

    pub fn reveal_cell(&mut self, pos: Position) -> Result<RevealOutcome> {
        if self.phase != Phase::Playing {
            return Err(GameError::InvalidGameState);
        }

        let cell = self.board.get_cell(pos)?;
        if cell.selected || cell.revealed {
            return Ok(RevealOutcome::NoChange);
        }

        let contents = self.board.reveal(pos)?;
        let state = match contents {
            CellContents::Empty => VisualState::RevealedSafe,
            CellContents::Mine => VisualState::RevealedMine,
        };
        self.emit(Notification::CellChanged { pos, state });

        Ok(match contents {
            CellContents::Mine => {
                self.resolve(Outcome::Lose);
                RevealOutcome::HitMine
            }
            CellContents::Empty if self.board.is_fully_cleared() => {
                self.resolve(Outcome::Win);
                RevealOutcome::Won
            }
            CellContents::Empty => RevealOutcome::Revealed,
        })
    }

    /// Starts over with the same balance. Leaving a round in progress forfeits the stake.
    pub fn new_round(&mut self) {
        if self.phase == Phase::Playing {
            log::info!("Round forfeited");
            self.resolve(Outcome::Lose);
        }

        self.selection.clear();
        self.board.reset();
        self.outcome = Outcome::Pending;
        self.phase = Phase::Idle;
        self.announce_fresh_board();
    }

    fn resolve(&mut self, outcome: Outcome) {
        let bet = self.ledger.current_bet();
        let (payout, message) = match outcome {
            Outcome::Win => {
                let payout = bet.saturating_mul(2);
                (payout, format!("Congratulations! You won {}!", payout - bet))
            }
            _ => (0, format!("Unfortunately, you lost {}.", bet)),
        };

        if payout > 0 {
            self.ledger.credit(payout);
            self.emit(Notification::BalanceChanged(self.ledger.balance()));
        }

        for pos in self.board.disclose_all() {
            if let Ok(state) = self.board.get_cell(pos).map(|cell| cell.visual_state()) {
                self.emit(Notification::CellChanged { pos, state });
            }
        }

        log::info!(
            "Round resolved: {:?}, payout {}, balance {}",
            outcome,
            payout,
            self.ledger.balance()
        );
        self.outcome = outcome;
        self.emit(Notification::RoundResolved {
            outcome,
            message,
            payout,
        });
        self.set_phase(Phase::Resolved);
    }

    fn announce_fresh_board(&mut self) {
        self.emit(Notification::BoardReset {
            size: self.board.size(),
        });
        self.emit(Notification::SelectionCount {
            count: 0,
            quota: self.selection.max(),
        });
        self.emit(Notification::ControlsChanged(self.phase.controls()));
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase == phase {
            return;
        }
        log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.emit(Notification::ControlsChanged(phase.controls()));
    }

    fn emit(&mut self, notification: Notification) {
        self.pending.push(notification);
    }
}
