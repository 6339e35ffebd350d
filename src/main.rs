use std::io;
use std::panic;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use grid_snake::config::{
    GameConfig, BOOST_TICK_REDUCTION_MS, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_TICK_INTERVAL_MS,
    DEFAULT_WALL_DENSITY,
};
use grid_snake::game::GameState;
use grid_snake::input::{poll_input, GameInput};
use grid_snake::renderer::{self, FrameView, Overlay};
use grid_snake::score::Leaderboard;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);
const COUNTDOWN_STEP: Duration = Duration::from_millis(500);
const MIN_TICK_INTERVAL_MS: u64 = 10;

#[derive(Debug, Parser)]
#[command(about = "Grid-based terminal Snake with scattered walls")]
struct Cli {
    /// Board height in cells.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: u16,

    /// Board width in cells.
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: u16,

    /// Fraction of empty cells scattered as walls, within [0, 1].
    #[arg(long, default_value_t = DEFAULT_WALL_DENSITY)]
    wall_density: f64,

    /// Make walls block movement instead of ending the game.
    #[arg(long)]
    walls_passable: bool,

    /// Milliseconds between simulation ticks.
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_interval: u64,

    /// Fixed RNG seed for reproducible wall and food placement.
    #[arg(long)]
    seed: Option<u64>,
}

/// Where the front end is in one play-through.
#[derive(Debug, Clone, Copy)]
enum Phase {
    Start,
    Countdown { remaining: u8, next_step: Instant },
    Playing,
    DeathAnimation { revealed: usize, next_step: Instant },
    GameOver,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = GameConfig::new(cli.rows, cli.cols, cli.wall_density, !cli.walls_passable)?;

    install_panic_hook();
    let result = run(config, &cli);
    cleanup_terminal()?;
    result?;
    Ok(())
}

fn run(config: GameConfig, cli: &Cli) -> io::Result<()> {
    let mut terminal = setup_terminal()?;
    let mut leaderboard = Leaderboard::new();
    let mut state = new_state(config, cli.seed);
    let mut phase = Phase::Start;
    let mut boost = false;
    let mut last_tick = Instant::now();

    loop {
        let view = FrameView {
            state: &state,
            leaderboard: &leaderboard,
            boost,
            overlay: overlay_for(phase),
            dead_segments: match phase {
                Phase::DeathAnimation { revealed, .. } => revealed,
                Phase::GameOver => state.body_len(),
                _ => 0,
            },
        };
        terminal.draw(|frame| renderer::render(frame, &view))?;

        if let Some(input) = poll_input(INPUT_POLL_INTERVAL)? {
            if matches!(input, GameInput::Quit) {
                break;
            }

            match phase {
                Phase::Start if matches!(input, GameInput::Confirm) => {
                    phase = Phase::Countdown {
                        remaining: 3,
                        next_step: Instant::now() + COUNTDOWN_STEP,
                    };
                }
                Phase::Playing => match input {
                    GameInput::Direction(direction) => state.change_direction(direction),
                    GameInput::Boost => boost = !boost,
                    _ => {}
                },
                Phase::GameOver if matches!(input, GameInput::Confirm) => {
                    // Restart is a full reconstruction, never an in-place
                    // reset.
                    state = new_state(config, cli.seed);
                    boost = false;
                    phase = Phase::Countdown {
                        remaining: 3,
                        next_step: Instant::now() + COUNTDOWN_STEP,
                    };
                }
                _ => {}
            }
        }

        let now = Instant::now();
        match phase {
            Phase::Countdown {
                remaining,
                next_step,
            } if now >= next_step => {
                if remaining > 1 {
                    phase = Phase::Countdown {
                        remaining: remaining - 1,
                        next_step: now + COUNTDOWN_STEP,
                    };
                } else {
                    last_tick = now;
                    phase = Phase::Playing;
                }
            }
            Phase::Playing => {
                if now.duration_since(last_tick) >= tick_interval(cli.tick_interval, boost) {
                    state.advance();
                    last_tick = now;

                    if state.is_game_over() {
                        leaderboard.record(state.score());
                        boost = false;
                        phase = Phase::DeathAnimation {
                            revealed: 0,
                            next_step: now,
                        };
                    }
                }
            }
            Phase::DeathAnimation {
                revealed,
                next_step,
            } if now >= next_step => {
                if revealed >= state.body_len() {
                    phase = Phase::GameOver;
                } else {
                    phase = Phase::DeathAnimation {
                        revealed: revealed + 1,
                        next_step: now + death_reveal_delay(revealed),
                    };
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn new_state(config: GameConfig, seed: Option<u64>) -> GameState {
    match seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    }
}

fn overlay_for(phase: Phase) -> Overlay {
    match phase {
        Phase::Start => Overlay::Start,
        Phase::Countdown { remaining, .. } => Overlay::Countdown(remaining),
        Phase::Playing | Phase::DeathAnimation { .. } => Overlay::None,
        Phase::GameOver => Overlay::GameOver,
    }
}

fn tick_interval(base_ms: u64, boost: bool) -> Duration {
    let reduction = if boost { BOOST_TICK_REDUCTION_MS } else { 0 };
    Duration::from_millis(base_ms.saturating_sub(reduction).max(MIN_TICK_INTERVAL_MS))
}

/// Per-segment reveal delay: quick ramp-up, floored at 10ms.
fn death_reveal_delay(revealed: usize) -> Duration {
    let step = 50u64.saturating_sub(revealed as u64 * 2).max(10);
    Duration::from_millis(step)
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn cleanup_terminal() -> io::Result<()> {
    disable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)?;

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_after_panic();
        default_hook(panic_info);
    }));
}

fn restore_terminal_after_panic() {
    let _ = disable_raw_mode();

    let mut stdout = io::stdout();
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
}
