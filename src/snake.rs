use std::collections::VecDeque;

use crate::config::DIRECTION_QUEUE_DEPTH;
use crate::grid::Position;
use crate::input::Direction;

/// Snake body and buffered-turn state.
///
/// The body is ordered front to back, head first. Pending direction changes
/// sit in a bounded FIFO so that two quick key presses within one tick both
/// take effect, one per tick, instead of the second overwriting the first.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending: VecDeque<Direction>,
}

impl Snake {
    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake body cannot be empty");

        Self {
            body: VecDeque::from(segments),
            direction,
            pending: VecDeque::with_capacity(DIRECTION_QUEUE_DEPTH),
        }
    }

    /// Queues a direction change for an upcoming tick.
    ///
    /// The request is silently dropped when the queue is full, or when it
    /// repeats or reverses the direction the snake will be travelling once
    /// the queue drains (the last queued entry, or the current travel
    /// direction when nothing is queued). Checking against the effective
    /// direction rather than only the current one lets a player queue a
    /// U-turn as two perpendicular steps.
    pub fn queue_direction(&mut self, direction: Direction) {
        if self.pending.len() >= DIRECTION_QUEUE_DEPTH {
            return;
        }

        let effective = self.pending.back().copied().unwrap_or(self.direction);
        if direction == effective || direction == effective.opposite() {
            return;
        }

        self.pending.push_back(direction);
    }

    /// Adopts the oldest queued direction as the travel direction, if any.
    ///
    /// Returns the travel direction that was in effect before the change so
    /// the caller can restore it when movement ends up blocked.
    pub fn apply_queued_direction(&mut self) -> Direction {
        let previous = self.direction;
        if let Some(next) = self.pending.pop_front() {
            self.direction = next;
        }
        previous
    }

    /// Restores a travel direction saved by `apply_queued_direction`.
    pub fn restore_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Returns the cell the head would enter on the next step.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().step(self.direction)
    }

    /// Prepends a new head segment.
    pub fn push_head(&mut self, position: Position) {
        self.body.push_front(position);
    }

    /// Removes and returns the tail segment.
    ///
    /// # Panics
    ///
    /// Panics when the body is empty, which no reachable state produces.
    pub fn pop_tail(&mut self) -> Position {
        self.body
            .pop_back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns the current travel direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the number of queued direction changes.
    #[must_use]
    pub fn pending_directions(&self) -> usize {
        self.pending.len()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
