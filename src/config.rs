use thiserror::Error;

/// Default board height in cells.
pub const DEFAULT_ROWS: u16 = 15;

/// Default board width in cells.
pub const DEFAULT_COLS: u16 = 15;

/// Default fraction of empty cells converted to walls at startup.
pub const DEFAULT_WALL_DENSITY: f64 = 0.05;

/// Cells in the freshly seeded snake body.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Points granted per food eaten.
pub const FOOD_POINTS: u32 = 1;

/// Maximum number of pending direction changes buffered between ticks.
pub const DIRECTION_QUEUE_DEPTH: usize = 2;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Milliseconds shaved off the tick interval while boost is active.
pub const BOOST_TICK_REDUCTION_MS: u64 = 50;

/// Number of scores kept on the session leaderboard.
pub const LEADERBOARD_CAPACITY: usize = 5;

/// Smallest board edge that leaves room for the seed body plus food.
pub const MIN_BOARD_EDGE: u16 = 5;

/// Construction-time configuration failures.
///
/// These represent programmer error rather than runtime conditions, so
/// `GameState::new` fails fast instead of clamping.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("board must be at least {MIN_BOARD_EDGE}x{MIN_BOARD_EDGE} cells, got {rows}x{cols}")]
    BoardTooSmall { rows: u16, cols: u16 },
    #[error("wall density must lie within [0, 1], got {0}")]
    WallDensityOutOfRange(f64),
}

/// Validated board and rule parameters for one game session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    rows: u16,
    cols: u16,
    wall_density: f64,
    walls_fatal: bool,
}

impl GameConfig {
    /// Validates and builds a configuration.
    pub fn new(
        rows: u16,
        cols: u16,
        wall_density: f64,
        walls_fatal: bool,
    ) -> Result<Self, ConfigError> {
        if rows < MIN_BOARD_EDGE || cols < MIN_BOARD_EDGE {
            return Err(ConfigError::BoardTooSmall { rows, cols });
        }
        if wall_density.is_nan() || !(0.0..=1.0).contains(&wall_density) {
            return Err(ConfigError::WallDensityOutOfRange(wall_density));
        }

        Ok(Self {
            rows,
            cols,
            wall_density,
            walls_fatal,
        })
    }

    /// Returns the number of rows on the board.
    #[must_use]
    pub fn rows(self) -> u16 {
        self.rows
    }

    /// Returns the number of columns on the board.
    #[must_use]
    pub fn cols(self) -> u16 {
        self.cols
    }

    /// Returns the fraction of empty cells scattered as walls.
    #[must_use]
    pub fn wall_density(self) -> f64 {
        self.wall_density
    }

    /// Returns whether hitting a wall ends the game.
    #[must_use]
    pub fn walls_fatal(self) -> bool {
        self.walls_fatal
    }

    /// Returns the total number of cells on the board.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }
}

impl Default for GameConfig {
    /// The classic ruleset: 15x15 board, 5% walls, walls fatal.
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            wall_density: DEFAULT_WALL_DENSITY,
            walls_fatal: true,
        }
    }
}
