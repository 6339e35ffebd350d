//! Grid-based Snake with randomly scattered walls.
//!
//! The simulation core (`grid`, `snake`, `placement`, `game`) is a pure
//! state machine: it reacts to `advance` ticks and buffered direction
//! changes, and exposes a read-only board snapshot. Everything about real
//! time, keys, and drawing lives in the terminal front end (`input`,
//! `renderer`, `ui`, the binary).

pub mod config;
pub mod game;
pub mod grid;
pub mod input;
pub mod placement;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod ui;
