//! Assorted constants & hard-coded configuration
use crate::game::{Cell, Direction};
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Width & height of the (square) playing field, in cells
pub(crate) const GRID_SIZE: i16 = 20;

/// Where the snake's head is placed at the start of every game
pub(crate) const START_CELL: Cell = Cell::new(10, 10);

/// The direction the snake faces at the start of every game
pub(crate) const START_DIRECTION: Direction = Direction::Right;

/// Number of terminal columns used to draw one grid cell.  Terminal cells are
/// about twice as tall as they are wide, so this keeps the field square.
pub(crate) const CELL_WIDTH: u16 = 2;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Number of ticks for which the wrap-mode banner stays up after toggling
pub(crate) const MODE_BANNER_TICKS: u32 = 12;

/// Initial tick interval of both built-in speed curves
pub(crate) const INITIAL_TICK_PERIOD: Duration = Duration::from_millis(200);

/// Glyph for the snake's head
pub(crate) const SNAKE_HEAD_SYMBOL: &str = "██";

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: &str = "▓▓";

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: &str = "◖◗";

/// Glyph drawn where the snake crashed
pub(crate) const COLLISION_SYMBOL: &str = "××";

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the banner line below the playing field
pub(crate) const BANNER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
