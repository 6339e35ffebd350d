use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::game::GameState;
use crate::grid::{Cell, Position};
use crate::input::Direction;
use crate::score::Leaderboard;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{render_countdown, render_game_over_menu, render_start_menu};

const GLYPH_SOLID: &str = "█";
const GLYPH_FOOD: &str = "●";
const GLYPH_HEAD_UP: &str = "▲";
const GLYPH_HEAD_DOWN: &str = "▼";
const GLYPH_HEAD_LEFT: &str = "◄";
const GLYPH_HEAD_RIGHT: &str = "►";

const COLOR_SNAKE: Color = Color::Green;
const COLOR_SNAKE_HEAD: Color = Color::White;
const COLOR_DEAD: Color = Color::DarkGray;
const COLOR_FOOD: Color = Color::Red;
const COLOR_WALL: Color = Color::Gray;

/// Which overlay, if any, sits on top of the board this frame.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Overlay {
    None,
    Start,
    Countdown(u8),
    GameOver,
}

/// Everything the renderer needs for one frame, read-only.
#[derive(Debug)]
pub struct FrameView<'a> {
    pub state: &'a GameState,
    pub leaderboard: &'a Leaderboard,
    pub boost: bool,
    pub overlay: Overlay,
    /// Head-first count of body segments drawn in the dead style during the
    /// death animation.
    pub dead_segments: usize,
}

/// Renders the full game frame from an immutable view.
pub fn render(frame: &mut Frame<'_>, view: &FrameView<'_>) {
    let area = frame.area();
    let play_area = render_hud(
        frame,
        area,
        HudInfo {
            score: view.state.score(),
            best: view.leaderboard.best(),
            body_len: view.state.body_len(),
            boost: view.boost,
        },
    );

    let block = Block::bordered().border_style(Style::new().fg(Color::White));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_board(frame, inner, view);
    render_snake(frame, inner, view);

    match view.overlay {
        Overlay::None => {}
        Overlay::Start => render_start_menu(frame, play_area, view.leaderboard),
        Overlay::Countdown(seconds) => render_countdown(frame, play_area, seconds),
        Overlay::GameOver => render_game_over_menu(
            frame,
            play_area,
            view.state.score(),
            view.state.death_reason(),
            view.leaderboard,
        ),
    }
}

/// Draws static board contents: walls and food.
fn render_board(frame: &mut Frame<'_>, inner: Rect, view: &FrameView<'_>) {
    let buffer = frame.buffer_mut();

    for (position, cell) in view.state.grid().iter() {
        let Some((x, y)) = logical_to_terminal(inner, position) else {
            continue;
        };

        match cell {
            Cell::Wall => buffer.set_string(x, y, GLYPH_SOLID, Style::new().fg(COLOR_WALL)),
            Cell::Food => buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(COLOR_FOOD)),
            Cell::Empty | Cell::Snake => {}
        }
    }
}

/// Draws the snake head-first so the death animation can grey segments out
/// in the same order the core reports them.
fn render_snake(frame: &mut Frame<'_>, inner: Rect, view: &FrameView<'_>) {
    let head = view.state.head_position();
    let buffer = frame.buffer_mut();

    for (index, segment) in view.state.body().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, *segment) else {
            continue;
        };

        let dead = index < view.dead_segments;
        if *segment == head {
            let color = if dead { COLOR_DEAD } else { COLOR_SNAKE_HEAD };
            buffer.set_string(
                x,
                y,
                head_glyph(view.state.direction()),
                Style::new().fg(color).add_modifier(Modifier::BOLD),
            );
            continue;
        }

        let color = if dead { COLOR_DEAD } else { COLOR_SNAKE };
        buffer.set_string(x, y, GLYPH_SOLID, Style::new().fg(color));
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_HEAD_UP,
        Direction::Down => GLYPH_HEAD_DOWN,
        Direction::Left => GLYPH_HEAD_LEFT,
        Direction::Right => GLYPH_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    let col_offset = u16::try_from(position.col).ok()?;
    let row_offset = u16::try_from(position.row).ok()?;

    let x = inner.x.saturating_add(col_offset);
    let y = inner.y.saturating_add(row_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
