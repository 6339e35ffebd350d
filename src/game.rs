use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{GameConfig, FOOD_POINTS, INITIAL_SNAKE_LENGTH};
use crate::grid::{Cell, Grid, Position};
use crate::input::Direction;
use crate::placement::{scatter_walls, spawn_food};
use crate::snake::Snake;

/// What ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    OutOfBounds,
    WallCollision,
    SelfCollision,
}

/// Complete simulation state for one session.
///
/// Sole mutator of the grid after construction, and the single authority
/// for body, direction, score, and the terminal flag. Central invariant:
/// the set of grid cells marked `Cell::Snake` always equals the set of
/// body segments, with no duplicates on either side.
///
/// Not thread-safe by design; `advance` and `change_direction` must be
/// serialized by the caller. The machine never looks at wall-clock time,
/// it only reacts to discrete `advance` calls.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Option<Position>,
    score: u32,
    tick_count: u64,
    death_reason: Option<DeathReason>,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh game with an entropy-seeded RNG.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::new_with_seed(config, rand::thread_rng().r#gen())
    }

    /// Creates a deterministic game for tests and reproducible runs.
    ///
    /// Seeds a straight three-segment snake on the middle row, centered and
    /// facing right, then scatters walls over the remaining empty cells and
    /// spawns the first food.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = Grid::new(config);

        let row = i32::from(config.rows() / 2);
        let head_col = i32::from(config.cols() / 2);
        let segments: Vec<Position> = (0..INITIAL_SNAKE_LENGTH)
            .map(|offset| Position {
                row,
                col: head_col - offset as i32,
            })
            .collect();
        for segment in &segments {
            grid.set(*segment, Cell::Snake);
        }
        let snake = Snake::from_segments(segments, Direction::Right);

        scatter_walls(&mut rng, &mut grid, config.wall_density());
        let food = spawn_food(&mut rng, &mut grid);

        Self {
            config,
            grid,
            snake,
            food,
            score: 0,
            tick_count: 0,
            death_reason: None,
            rng,
        }
    }

    /// Creates a game from an explicit board layout.
    ///
    /// Used by tests and scripted demos that need full control over where
    /// the snake, walls, and food start. Segments are head first.
    ///
    /// # Panics
    ///
    /// Panics when any given position is off the board or two entities
    /// overlap.
    #[must_use]
    pub fn with_layout(
        config: GameConfig,
        segments: Vec<Position>,
        direction: Direction,
        walls: &[Position],
        food: Option<Position>,
        seed: u64,
    ) -> Self {
        let mut grid = Grid::new(config);

        for segment in &segments {
            assert!(grid.in_bounds(*segment), "snake segment off the board");
            assert_eq!(grid.get(*segment), Cell::Empty, "overlapping layout");
            grid.set(*segment, Cell::Snake);
        }
        for wall in walls {
            assert!(grid.in_bounds(*wall), "wall off the board");
            assert_eq!(grid.get(*wall), Cell::Empty, "overlapping layout");
            grid.set(*wall, Cell::Wall);
        }
        if let Some(position) = food {
            assert!(grid.in_bounds(position), "food off the board");
            assert_eq!(grid.get(position), Cell::Empty, "overlapping layout");
            grid.set(position, Cell::Food);
        }

        Self {
            config,
            grid,
            snake: Snake::from_segments(segments, direction),
            food,
            score: 0,
            tick_count: 0,
            death_reason: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Buffers a direction change for an upcoming tick.
    ///
    /// Silently dropped after game over, when the two-deep queue is full,
    /// or when the request repeats or reverses the effective direction of
    /// travel. Never an error: input is forgiving by design.
    pub fn change_direction(&mut self, direction: Direction) {
        if self.is_game_over() {
            return;
        }
        self.snake.queue_direction(direction);
    }

    /// Advances the simulation by one discrete tick.
    ///
    /// No-op once the game is over. Fatal collisions set the terminal flag
    /// and leave the board exactly as it was before the tick.
    pub fn advance(&mut self) {
        if self.is_game_over() {
            return;
        }

        self.tick_count += 1;
        let previous_direction = self.snake.apply_queued_direction();
        let new_head = self.snake.next_head_position();

        if !self.grid.in_bounds(new_head) {
            self.death_reason = Some(DeathReason::OutOfBounds);
            return;
        }

        match self.grid.get(new_head) {
            Cell::Wall if self.config.walls_fatal() => {
                self.death_reason = Some(DeathReason::WallCollision);
            }
            Cell::Wall => {
                // Impassable but not deadly: the move is blocked and the
                // turn that led into the wall is undone.
                self.snake.restore_direction(previous_direction);
            }
            // The tail cell is vacated by this same tick, so entering it is
            // legal. Evaluated against the pre-tick body on purpose.
            Cell::Snake if new_head != self.snake.tail() => {
                self.death_reason = Some(DeathReason::SelfCollision);
            }
            Cell::Food => {
                self.snake.push_head(new_head);
                self.grid.set(new_head, Cell::Snake);
                self.score += FOOD_POINTS;
                self.food = spawn_food(&mut self.rng, &mut self.grid);
            }
            _ => {
                let vacated = self.snake.pop_tail();
                self.grid.set(vacated, Cell::Empty);
                self.snake.push_head(new_head);
                self.grid.set(new_head, Cell::Snake);
            }
        }
    }

    /// Returns the head position.
    #[must_use]
    pub fn head_position(&self) -> Position {
        self.snake.head()
    }

    /// Returns the current travel direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    /// Iterates over body positions from head to tail.
    ///
    /// The ordering drives the presentation layer's segment-by-segment
    /// death animation.
    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.snake.segments()
    }

    /// Returns the current body length.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.snake.len()
    }

    /// Returns the score accumulated so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Returns true once a fatal collision has occurred.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.death_reason.is_some()
    }

    /// Returns what ended the game, if anything has.
    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Returns the read-only grid snapshot.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the active food position, absent only on a full board.
    #[must_use]
    pub fn food_position(&self) -> Option<Position> {
        self.food
    }

    /// Returns the configuration this session was built with.
    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Returns how many ticks have been simulated.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::grid::{Cell, Position};
    use crate::input::Direction;

    use super::{DeathReason, GameState};

    fn open_config(rows: u16, cols: u16) -> GameConfig {
        GameConfig::new(rows, cols, 0.0, true).expect("valid test config")
    }

    /// Checks the body/grid bidirectional consistency invariant.
    fn assert_board_consistent(state: &GameState) {
        let mut body: Vec<Position> = state.body().copied().collect();
        let mut marked = state.grid().positions_of(Cell::Snake);

        let deduped: std::collections::HashSet<Position> = body.iter().copied().collect();
        assert_eq!(deduped.len(), body.len(), "duplicate body segments");

        body.sort_by_key(|p| (p.row, p.col));
        marked.sort_by_key(|p| (p.row, p.col));
        assert_eq!(body, marked, "grid and body disagree");

        let food_cells = state.grid().positions_of(Cell::Food);
        assert!(food_cells.len() <= 1, "more than one food on the board");
        match state.food_position() {
            Some(position) => assert_eq!(food_cells, vec![position]),
            None => assert!(food_cells.is_empty()),
        }
    }

    #[test]
    fn new_game_seeds_centered_snake_facing_right() {
        let state = GameState::new_with_seed(open_config(15, 15), 7);

        assert_eq!(state.head_position(), Position { row: 7, col: 7 });
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.body_len(), 3);
        assert_eq!(state.score(), 0);
        assert!(!state.is_game_over());
        assert!(state.food_position().is_some());
        assert_board_consistent(&state);
    }

    #[test]
    fn two_straight_moves_then_a_growing_bite() {
        // 15x15, length 3 at center facing right, food three cells ahead.
        let config = open_config(15, 15);
        let mut state = GameState::with_layout(
            config,
            vec![
                Position { row: 7, col: 7 },
                Position { row: 7, col: 6 },
                Position { row: 7, col: 5 },
            ],
            Direction::Right,
            &[],
            Some(Position { row: 7, col: 10 }),
            11,
        );

        state.advance();
        state.advance();
        assert_eq!(state.head_position(), Position { row: 7, col: 9 });
        assert_eq!(state.body_len(), 3);
        assert_eq!(state.score(), 0);

        // Third tick lands on the food: +1 segment, +1 point, no tail pop.
        state.advance();
        assert_eq!(state.head_position(), Position { row: 7, col: 10 });
        assert_eq!(state.body_len(), 4);
        assert_eq!(state.score(), 1);
        assert!(state.food_position().is_some());
        assert_board_consistent(&state);
    }

    #[test]
    fn running_off_the_right_edge_ends_the_game() {
        let config = open_config(7, 7);
        let mut state = GameState::with_layout(
            config,
            vec![
                Position { row: 3, col: 6 },
                Position { row: 3, col: 5 },
                Position { row: 3, col: 4 },
            ],
            Direction::Right,
            &[],
            None,
            0,
        );

        state.advance();

        assert!(state.is_game_over());
        assert_eq!(state.death_reason(), Some(DeathReason::OutOfBounds));
        assert_eq!(state.head_position(), Position { row: 3, col: 6 });
        assert_board_consistent(&state);
    }

    #[test]
    fn fatal_wall_leaves_pre_tick_body_intact() {
        let config = open_config(9, 9);
        let mut state = GameState::with_layout(
            config,
            vec![
                Position { row: 4, col: 4 },
                Position { row: 4, col: 3 },
                Position { row: 4, col: 2 },
            ],
            Direction::Right,
            &[Position { row: 4, col: 5 }],
            None,
            0,
        );
        let body_before: Vec<Position> = state.body().copied().collect();

        state.advance();

        assert!(state.is_game_over());
        assert_eq!(state.death_reason(), Some(DeathReason::WallCollision));
        let body_after: Vec<Position> = state.body().copied().collect();
        assert_eq!(body_before, body_after);
        assert_board_consistent(&state);
    }

    #[test]
    fn non_fatal_wall_blocks_movement_and_reverts_the_turn() {
        let config = GameConfig::new(9, 9, 0.0, false).expect("valid test config");
        let mut state = GameState::with_layout(
            config,
            vec![
                Position { row: 4, col: 4 },
                Position { row: 4, col: 3 },
                Position { row: 4, col: 2 },
            ],
            Direction::Right,
            &[Position { row: 3, col: 4 }],
            None,
            0,
        );

        state.change_direction(Direction::Up);
        state.advance();

        // Blocked: no death, no movement, and the turn into the wall undone.
        assert!(!state.is_game_over());
        assert_eq!(state.head_position(), Position { row: 4, col: 4 });
        assert_eq!(state.direction(), Direction::Right);
        assert_board_consistent(&state);

        // The next tick travels right as if the turn never happened.
        state.advance();
        assert_eq!(state.head_position(), Position { row: 4, col: 5 });
    }

    #[test]
    fn moving_into_own_body_ends_the_game() {
        let config = open_config(8, 8);
        // A hook shape where turning up hits the body.
        let mut state = GameState::with_layout(
            config,
            vec![
                Position { row: 4, col: 3 },
                Position { row: 3, col: 3 },
                Position { row: 3, col: 4 },
                Position { row: 4, col: 4 },
                Position { row: 5, col: 4 },
            ],
            Direction::Down,
            &[],
            None,
            0,
        );

        state.change_direction(Direction::Right);
        state.advance();

        assert!(state.is_game_over());
        assert_eq!(state.death_reason(), Some(DeathReason::SelfCollision));
        assert_board_consistent(&state);
    }

    #[test]
    fn vacating_tail_cell_is_not_a_collision() {
        let config = open_config(8, 8);
        // A 2x2 loop: the head re-enters the tail cell it vacates this tick.
        let mut state = GameState::with_layout(
            config,
            vec![
                Position { row: 3, col: 3 },
                Position { row: 3, col: 4 },
                Position { row: 4, col: 4 },
                Position { row: 4, col: 3 },
            ],
            Direction::Left,
            &[],
            None,
            0,
        );

        // Turning down points the head at the tail cell (4,3), which the
        // tail leaves during this same tick.
        state.change_direction(Direction::Down);
        state.advance();

        assert!(!state.is_game_over());
        assert_eq!(state.head_position(), Position { row: 4, col: 3 });
        assert_eq!(state.body_len(), 4);
        assert_board_consistent(&state);
    }

    #[test]
    fn advance_after_game_over_changes_nothing() {
        let config = open_config(7, 7);
        let mut state = GameState::with_layout(
            config,
            vec![
                Position { row: 3, col: 6 },
                Position { row: 3, col: 5 },
                Position { row: 3, col: 4 },
            ],
            Direction::Right,
            &[],
            Some(Position { row: 1, col: 1 }),
            0,
        );

        state.advance();
        assert!(state.is_game_over());

        let head = state.head_position();
        let body: Vec<Position> = state.body().copied().collect();
        let score = state.score();
        let ticks = state.tick_count();

        state.change_direction(Direction::Up);
        state.advance();
        state.advance();

        assert_eq!(state.head_position(), head);
        assert_eq!(state.body().copied().collect::<Vec<_>>(), body);
        assert_eq!(state.score(), score);
        assert_eq!(state.tick_count(), ticks);
        assert_board_consistent(&state);
    }

    #[test]
    fn reversal_request_never_causes_immediate_self_collision() {
        let config = open_config(15, 15);
        let mut state = GameState::new_with_seed(config, 5);

        state.change_direction(Direction::Left);
        state.advance();

        assert_ne!(state.death_reason(), Some(DeathReason::SelfCollision));
        assert_eq!(state.direction(), Direction::Right);
        assert_board_consistent(&state);
    }

    #[test]
    fn queued_up_then_left_is_consumed_one_tick_at_a_time() {
        let config = open_config(15, 15);
        let mut state = GameState::with_layout(
            config,
            vec![
                Position { row: 7, col: 7 },
                Position { row: 7, col: 6 },
                Position { row: 7, col: 5 },
            ],
            Direction::Right,
            &[],
            None,
            0,
        );

        state.change_direction(Direction::Up);
        state.change_direction(Direction::Left);

        state.advance();
        assert_eq!(state.direction(), Direction::Up);
        assert_eq!(state.head_position(), Position { row: 6, col: 7 });

        state.advance();
        assert_eq!(state.direction(), Direction::Left);
        assert_eq!(state.head_position(), Position { row: 6, col: 6 });
        assert_board_consistent(&state);
    }

    #[test]
    fn eating_respawns_food_away_from_snake_and_walls() {
        let config = GameConfig::new(15, 15, 0.2, true).expect("valid test config");
        let mut state = GameState::new_with_seed(config, 9);

        // Drive the snake around for a while; whenever food respawns it
        // must land on what was an empty cell.
        for tick in 0..200 {
            if state.is_game_over() {
                break;
            }
            if tick % 7 == 0 {
                state.change_direction(Direction::Up);
            } else if tick % 11 == 0 {
                state.change_direction(Direction::Left);
            } else if tick % 13 == 0 {
                state.change_direction(Direction::Down);
            }
            state.advance();
            assert_board_consistent(&state);
            if let Some(food) = state.food_position() {
                assert_eq!(state.grid().get(food), Cell::Food);
            }
        }
    }
}
