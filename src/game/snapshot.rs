use super::cell::Cell;
use super::Crash;
use std::fmt;

/// Everything a renderer needs to draw one frame of the game
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot {
    /// Width & height of the board
    pub(crate) grid_size: i16,

    /// The snake's cells from head to tail
    pub(crate) snake: Vec<Segment>,

    /// `None` before the first game has started
    pub(crate) food: Option<Cell>,

    /// The current score as a zero-padded three-digit string
    pub(crate) score: String,

    /// The high score as a zero-padded three-digit string
    pub(crate) high_score: String,

    pub(crate) banner: Option<Banner>,

    /// Where to mark a crash after the game has ended
    pub(crate) collision: Option<Cell>,

    pub(crate) wraparound: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Segment {
    pub(crate) cell: Cell,
    pub(crate) head: bool,
}

/// A one-line message shown beneath the board
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Banner {
    /// How to play, shown before the first game
    Instructions,
    Paused,
    GameOver(Crash),
    /// Wrap mode was just switched on (`true`) or off (`false`)
    WrapMode(bool),
}

impl Banner {
    /// Break the banner into `(text, is_key)` pieces so that the renderer can
    /// highlight key names
    pub(crate) fn pieces(self) -> Vec<(&'static str, bool)> {
        match self {
            Banner::Instructions => vec![
                ("Press ", false),
                ("Space", true),
                (" to start · ", false),
                ("arrows", true),
                ("/", false),
                ("wasd", true),
                (" to steer · ", false),
                ("p", true),
                (" pause · ", false),
                ("m", true),
                (" wrap · ", false),
                ("q", true),
                (" quit", false),
            ],
            Banner::Paused => vec![
                ("PAUSED · press ", false),
                ("p", true),
                (" to resume", false),
            ],
            Banner::GameOver(crash) => vec![
                ("GAME OVER: ", false),
                (crash.describe(), false),
                (" · press ", false),
                ("Space", true),
                (" to play again", false),
            ],
            Banner::WrapMode(true) => vec![("Wrap mode: ON", false)],
            Banner::WrapMode(false) => vec![("Wrap mode: OFF", false)],
        }
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (text, _) in self.pieces() {
            write!(f, "{text}")?;
        }
        Ok(())
    }
}

/// Format a score for display: zero-padded to three digits
pub(crate) fn format_score(score: u32) -> String {
    format!("{score:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "000")]
    #[case(7, "007")]
    #[case(14, "014")]
    #[case(399, "399")]
    #[case(1234, "1234")]
    fn test_format_score(#[case] score: u32, #[case] s: &str) {
        assert_eq!(format_score(score), s);
    }

    #[rstest]
    #[case(Banner::Paused, "PAUSED · press p to resume")]
    #[case(
        Banner::GameOver(Crash::Wall),
        "GAME OVER: you hit the wall · press Space to play again"
    )]
    #[case(
        Banner::GameOver(Crash::Body),
        "GAME OVER: you ran into yourself · press Space to play again"
    )]
    #[case(Banner::WrapMode(true), "Wrap mode: ON")]
    fn banner_text(#[case] banner: Banner, #[case] text: &str) {
        assert_eq!(banner.to_string(), text);
    }

    #[test]
    fn instructions_fit_display() {
        assert!(Banner::Instructions.to_string().chars().count() <= 78);
    }
}
