use crate::consts;
use crate::game::{Cell, Snapshot};
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// The areas of the screen that make up the game display
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Geometry {
    score_bar: Rect,
    /// The board including its border
    block: Rect,
    banner: Rect,
}

impl Geometry {
    pub(crate) fn new(area: Rect, grid_size: i16) -> Geometry {
        let display = get_display_area(area);
        let [score_bar, board_area, banner] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        let side = u16::try_from(grid_size).unwrap_or_default();
        let block_size = Size {
            width: side.saturating_mul(consts::CELL_WIDTH).saturating_add(2),
            height: side.saturating_add(2),
        };
        Geometry {
            score_bar,
            block: center_rect(board_area, block_size),
            banner,
        }
    }

    /// The board without its border
    fn field(self) -> Rect {
        self.block.inner(Margin::new(1, 1))
    }

    /// Return the board cell drawn at the given terminal position, if any
    pub(crate) fn cell_at(self, column: u16, row: u16) -> Option<Cell> {
        let field = self.field();
        if !field.contains(Position::new(column, row)) {
            return None;
        }
        let x = (column - field.x) / consts::CELL_WIDTH + 1;
        let y = row - field.y + 1;
        Some(Cell::new(i16::try_from(x).ok()?, i16::try_from(y).ok()?))
    }
}

impl Widget for &Snapshot {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let geometry = Geometry::new(area, self.grid_size);

        let mut score_line = Line::from_iter([
            Span::raw(" Score: "),
            Span::raw(self.score.as_str()),
            Span::raw("   High: "),
            Span::raw(self.high_score.as_str()),
        ]);
        if self.wraparound {
            score_line.push_span("   WRAP");
        }
        score_line
            .style(consts::SCORE_BAR_STYLE)
            .render(geometry.score_bar, buf);

        if self.wraparound {
            DottedBorder.render(geometry.block, buf);
        } else {
            Block::bordered().render(geometry.block, buf);
        }

        let mut field = Canvas {
            area: geometry.field(),
            grid_size: self.grid_size,
            buf,
        };
        if let Some(food) = self.food {
            field.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        // Draw the head last so that it's on top of anything it's run into
        for seg in self.snake.iter().rev() {
            let symbol = if seg.head {
                consts::SNAKE_HEAD_SYMBOL
            } else {
                consts::SNAKE_BODY_SYMBOL
            };
            field.draw_cell(seg.cell, symbol, consts::SNAKE_STYLE);
        }
        if let Some(cell) = self.collision {
            field.draw_cell(cell, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        }

        if let Some(banner) = self.banner {
            Line::from_iter(banner.pieces().into_iter().map(|(text, is_key)| {
                if is_key {
                    Span::styled(text, consts::KEY_STYLE)
                } else {
                    Span::raw(text)
                }
            }))
            .style(consts::BANNER_STYLE)
            .centered()
            .render(geometry.banner, buf);
        }
    }
}

/// The inside of the board, addressed by 1-indexed cells
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    grid_size: i16,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Draw `symbol` (which should be [`CELL_WIDTH`][consts::CELL_WIDTH]
    /// columns wide) at `cell`.  Cells off the board are not drawn.
    fn draw_cell(&mut self, cell: Cell, symbol: &str, style: Style) {
        let range = 1..=self.grid_size;
        if !range.contains(&cell.x) || !range.contains(&cell.y) {
            return;
        }
        let Ok(col) = u16::try_from(cell.x - 1) else {
            return;
        };
        let Ok(row) = u16::try_from(cell.y - 1) else {
            return;
        };
        let Some(x) = col
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|c| self.area.x.checked_add(c))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(row) else {
            return;
        };
        for (ch, x) in symbol.chars().zip(x..) {
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}

/// Border drawn around the board in wrap mode, to show that the edges are
/// passable
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let right = area.right().saturating_sub(1);
        let bottom = area.bottom().saturating_sub(1);
        let mut put = |x: u16, y: u16, ch: char| {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(ch);
            }
        };
        for (x, y) in [
            (area.x, area.y),
            (right, area.y),
            (area.x, bottom),
            (right, bottom),
        ] {
            put(x, y, '·');
        }
        for x in area.x.saturating_add(1)..right {
            put(x, area.y, '⋯');
            put(x, bottom, '⋯');
        }
        for y in area.y.saturating_add(1)..bottom {
            put(area.x, y, '⋮');
            put(right, y, '⋮');
        }
    }
}
