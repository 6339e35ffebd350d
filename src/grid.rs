use crate::config::GameConfig;
use crate::input::Direction;

/// Board position in logical cell coordinates, row-major and 0-indexed.
///
/// Signed so that a head stepping off the board is representable before the
/// bounds check rejects it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Returns the neighboring position one cell towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (row_delta, col_delta) = direction.delta();
        Self {
            row: self.row + row_delta,
            col: self.col + col_delta,
        }
    }
}

/// What a single grid cell holds. Exactly one value per coordinate.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Snake,
    Food,
    Wall,
}

/// Fixed-size cell matrix backing one game session.
///
/// Pure storage plus bounds queries. The game state machine is the only
/// mutator after initialization and owns every semantic invariant.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: u16,
    cols: u16,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-empty grid with the configured dimensions.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            rows: config.rows(),
            cols: config.cols(),
            cells: vec![Cell::Empty; config.total_cells()],
        }
    }

    /// Returns true when `position` lies on the board.
    #[must_use]
    pub fn in_bounds(&self, position: Position) -> bool {
        position.row >= 0
            && position.col >= 0
            && position.row < i32::from(self.rows)
            && position.col < i32::from(self.cols)
    }

    /// Returns the cell at `position`.
    ///
    /// # Panics
    ///
    /// Panics when `position` is out of bounds; callers check `in_bounds`
    /// first.
    #[must_use]
    pub fn get(&self, position: Position) -> Cell {
        self.cells[self.index(position)]
    }

    /// Overwrites the cell at `position`.
    pub fn set(&mut self, position: Position, cell: Cell) {
        let index = self.index(position);
        self.cells[index] = cell;
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Iterates over every position/cell pair in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(index, cell)| {
            let position = Position {
                row: (index / usize::from(self.cols)) as i32,
                col: (index % usize::from(self.cols)) as i32,
            };
            (position, *cell)
        })
    }

    /// Collects every position currently holding `cell`, row-major order.
    #[must_use]
    pub fn positions_of(&self, cell: Cell) -> Vec<Position> {
        self.iter()
            .filter(|(_, held)| *held == cell)
            .map(|(position, _)| position)
            .collect()
    }

    fn index(&self, position: Position) -> usize {
        debug_assert!(self.in_bounds(position));
        position.row as usize * usize::from(self.cols) + position.col as usize
    }
}
