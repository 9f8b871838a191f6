use clap::Parser;
use minebet::{
    Action, Controls, DisplaySurface, GameConfig, GameError, Notification, Position,
    RandomMinePlacer, RoundController, VisualState,
};
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random mine placement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Starting balance
    #[arg(short, long, default_value_t = minebet::config::INITIAL_BALANCE)]
    balance: u64,
}

/// Terminal projection of the notifications emitted by the controller.
struct TerminalDisplay {
    cells: Vec<Vec<VisualState>>,
    balance: u64,
    selected: (usize, usize),
    controls: Controls,
    messages: Vec<String>,
}

impl TerminalDisplay {
    fn new() -> Self {
        Self {
            cells: Vec::new(),
            balance: 0,
            selected: (0, 0),
            controls: Controls::default(),
            messages: Vec::new(),
        }
    }

    fn print(&mut self, bet: u64) {
        print!("  ");
        for col in 0..self.cells.len() {
            print!("{} ", col);
        }
        println!();

        for (row, cells) in self.cells.iter().enumerate() {
            print!("{} ", row);
            for state in cells {
                match state {
                    VisualState::Plain => print!("□ "),
                    VisualState::Selected => print!("★ "),
                    VisualState::RevealedSafe => print!("✓ "),
                    VisualState::RevealedMine => print!("✗ "),
                }
            }
            println!();
        }

        println!(
            "Balance: {}  Bet: {}  Selected: {}/{}",
            self.balance, bet, self.selected.0, self.selected.1
        );
        for message in self.messages.drain(..) {
            println!("{}", message);
        }
    }

    fn prompt(&self) -> String {
        let mut options = Vec::new();
        if self.controls.activate {
            options.push("row col");
        }
        if self.controls.start_or_bet {
            options.push("b = bet");
        }
        if self.controls.reset {
            options.push("n = new round");
        }
        options.push("q = quit");
        format!("Enter command ({}): ", options.join(", "))
    }
}

impl DisplaySurface for TerminalDisplay {
    fn render(&mut self, notification: &Notification) {
        match notification {
            Notification::BoardReset { size } => {
                self.cells = vec![vec![VisualState::Plain; *size]; *size];
            }
            Notification::CellChanged { pos, state } => {
                if let Some(cell) = self
                    .cells
                    .get_mut(pos.row)
                    .and_then(|row| row.get_mut(pos.col))
                {
                    *cell = *state;
                }
            }
            Notification::SelectionCount { count, quota } => self.selected = (*count, *quota),
            Notification::BalanceChanged(balance) => self.balance = *balance,
            Notification::RoundResolved { message, .. } => self.messages.push(message.clone()),
            Notification::ControlsChanged(controls) => self.controls = *controls,
            Notification::PlayerMessage(message) => self.messages.push(message.clone()),
        }
    }
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match run_game(&args) {
        Ok(_) => println!("Thanks for playing!"),
        Err(e) => eprintln!("Game error: {}", e),
    }
}

fn run_game(args: &Args) -> Result<(), GameError> {
    let config = GameConfig::default().with_initial_balance(args.balance);
    let placer = args
        .seed
        .map(RandomMinePlacer::with_seed)
        .unwrap_or_default();
    let mut game = RoundController::with_placer(config, placer)?;
    let mut display = TerminalDisplay::new();

    loop {
        game.flush_to(&mut display);
        display.print(game.ledger().current_bet());

        let Some(action) = get_user_input(&display) else {
            return Ok(());
        };
        if let Some(action) = action {
            game.perform_action(action)?;
        }
    }
}

/// `None` means quit, `Some(None)` means the input was not understood.
fn get_user_input(display: &TerminalDisplay) -> Option<Option<Action>> {
    print!("{}", display.prompt());
    io::stdout().flush().ok()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input).ok()? == 0 {
        return None;
    }

    let mut parts = input.split_whitespace();
    let action = match parts.next() {
        Some("q") => return None,
        Some("b") => Some(Action::StartOrBet),
        Some("n") => Some(Action::Reset),
        Some(row) => {
            let cell = row
                .parse()
                .ok()
                .zip(parts.next().and_then(|col| col.parse().ok()));
            match cell {
                Some((row, col)) if row < display.cells.len() && col < display.cells.len() => {
                    Some(Action::Activate(Position::new(row, col)))
                }
                _ => {
                    println!("Invalid command. Use 'row col', 'b', 'n' or 'q'");
                    None
                }
            }
        }
        None => None,
    };
    Some(action)
}
