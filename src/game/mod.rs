mod cell;
mod direction;
mod snake;
mod snapshot;
mod speed;
use self::cell::Board;
pub(crate) use self::cell::Cell;
pub(crate) use self::direction::Direction;
use self::snake::Snake;
use self::snapshot::{format_score, Segment};
pub(crate) use self::snapshot::{Banner, Snapshot};
pub(crate) use self::speed::{SpeedCurve, SpeedCurveError, SpeedPreset, SpeedStep};
use crate::audio::AudioCue;
use crate::consts;
use crate::options::Options;
use rand::{seq::IteratorRandom, Rng};
use std::time::Duration;

/// The complete state of a play session: the current game plus the high score
/// carried over between games.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Session<R = rand::rngs::ThreadRng> {
    rng: R,
    board: Board,
    snake: Snake,
    food: Option<Cell>,
    /// Time between ticks
    speed: Duration,
    curve: SpeedCurve,
    high_score: u32,
    phase: Phase,
    /// A temporary banner and the number of ticks it has left
    notice: Option<(Banner, u32)>,
    /// Where the last game ended, if it ended in a crash
    crash_at: Option<Cell>,
}

impl Session<rand::rngs::ThreadRng> {
    pub(crate) fn new(options: Options) -> Self {
        Session::new_with_rng(options, rand::rng())
    }
}

impl<R: Rng> Session<R> {
    pub(crate) fn new_with_rng(options: Options, rng: R) -> Session<R> {
        Session {
            rng,
            board: Board::new(consts::GRID_SIZE, options.wraparound),
            snake: Snake::new(consts::START_CELL, consts::START_DIRECTION),
            food: None,
            speed: options.speed_curve.initial(),
            curve: options.speed_curve,
            high_score: 0,
            phase: Phase::Idle,
            notice: None,
            crash_at: None,
        }
    }

    /// Apply a player intent to the session
    pub(crate) fn handle(&mut self, intent: Intent) {
        match (self.phase, intent) {
            (Phase::Idle | Phase::GameOver(_), Intent::Start | Intent::Tap(_)) => self.start(),
            (Phase::Idle, _) => (),
            (Phase::Running, Intent::PauseToggle) => {
                log::debug!("Game paused");
                self.phase = Phase::Paused;
            }
            (Phase::Paused, Intent::PauseToggle | Intent::Tap(_)) => {
                log::debug!("Game resumed");
                self.phase = Phase::Running;
            }
            (_, Intent::WrapToggle) => {
                self.board.toggle_wrap();
                log::debug!("Wrap mode is now {}", on_off(self.board.wrap()));
                self.notice = Some((
                    Banner::WrapMode(self.board.wrap()),
                    consts::MODE_BANNER_TICKS,
                ));
            }
            (Phase::Running, Intent::Turn(direction)) => self.turn(direction),
            (Phase::Running, Intent::Tap(cell)) => {
                if let Some(direction) = Direction::toward(self.snake.head(), cell) {
                    self.turn(direction);
                }
            }
            _ => (),
        }
    }

    /// Advance the game by one step: move the snake, then check for a crash.
    /// Does nothing unless the game is running.
    pub(crate) fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.phase != Phase::Running {
            return outcome;
        }
        self.notice = self
            .notice
            .and_then(|(banner, left)| left.checked_sub(1).map(|left| (banner, left)))
            .filter(|&(_, left)| left > 0);
        outcome.ate = self.move_snake();
        if outcome.ate {
            outcome.cues.push(AudioCue::Eat);
        }
        let crash = self.check_collision().or_else(|| {
            (outcome.ate && self.food.is_none()).then_some(Crash::BoardFull)
        });
        if let Some(crash) = crash {
            if self.game_over(crash) {
                outcome.cues.push(AudioCue::GameOver);
            }
        }
        outcome
    }

    /// Move the snake one cell in its queued direction, eating the food if
    /// it's there.  Returns `true` if food was eaten.
    fn move_snake(&mut self) -> bool {
        let direction = self.snake.commit_turn();
        let head = self.board.step(self.snake.head(), direction);
        let ate = self.food == Some(head);
        self.snake.advance(head, ate);
        if ate {
            let speed = self.curve.next(self.speed);
            if speed != self.speed {
                log::debug!(
                    "Tick interval reduced from {}ms to {}ms",
                    self.speed.as_millis(),
                    speed.as_millis()
                );
                self.speed = speed;
            }
            self.place_food();
        }
        ate
    }

    /// Place the food on a random cell not occupied by the snake.  If there
    /// is no such cell, the food is removed.
    fn place_food(&mut self) {
        self.food = self
            .board
            .cells()
            .filter(|&c| !self.snake.occupies(c))
            .choose(&mut self.rng);
    }

    fn start(&mut self) {
        self.snake = Snake::new(consts::START_CELL, consts::START_DIRECTION);
        self.speed = self.curve.initial();
        self.crash_at = None;
        self.phase = Phase::Running;
        self.place_food();
        log::info!(
            "Starting new game (wrap mode {}, high score {})",
            on_off(self.board.wrap()),
            self.high_score
        );
    }
}

impl<R> Session<R> {
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// The current time between ticks
    pub(crate) fn speed(&self) -> Duration {
        self.speed
    }

    pub(crate) fn score(&self) -> u32 {
        u32::try_from(self.snake.len() - 1).unwrap_or(u32::MAX)
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        let snake = self
            .snake
            .cells()
            .enumerate()
            .filter(|&(_, cell)| self.board.contains(cell))
            .map(|(i, cell)| Segment { cell, head: i == 0 })
            .collect();
        let banner = match self.phase {
            Phase::Idle => Some(Banner::Instructions),
            Phase::Running => self.notice.map(|(banner, _)| banner),
            Phase::Paused => Some(Banner::Paused),
            Phase::GameOver(crash) => Some(Banner::GameOver(crash)),
        };
        Snapshot {
            grid_size: self.board.size(),
            snake,
            food: self.food,
            score: format_score(self.score()),
            high_score: format_score(self.high_score),
            banner,
            collision: self.crash_at,
            wraparound: self.board.wrap(),
        }
    }

    fn turn(&mut self, direction: Direction) {
        if !self.snake.turn(direction) {
            log::debug!(
                "Ignoring turn {direction} while heading {}",
                self.snake.direction()
            );
        }
    }

    /// Determine whether the snake has crashed.  Hitting a wall takes
    /// precedence over hitting its own body.
    fn check_collision(&self) -> Option<Crash> {
        if !self.board.wrap() && !self.board.contains(self.snake.head()) {
            Some(Crash::Wall)
        } else if self.snake.bites_itself() {
            Some(Crash::Body)
        } else {
            None
        }
    }

    /// End the current game.  Returns `false` if the game was already over.
    fn game_over(&mut self, crash: Crash) -> bool {
        if matches!(self.phase, Phase::GameOver(_)) {
            return false;
        }
        self.phase = Phase::GameOver(crash);
        self.crash_at = match crash {
            Crash::Wall => Some(self.board.clamp(self.snake.head())),
            Crash::Body => Some(self.snake.head()),
            Crash::BoardFull => None,
        };
        let score = self.score();
        log::info!("Game over: {} (score {score})", crash.describe());
        if score > self.high_score {
            log::info!("New high score: {score} (was {})", self.high_score);
            self.high_score = score;
        }
        true
    }
}

fn on_off(b: bool) -> &'static str {
    if b {
        "on"
    } else {
        "off"
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// Waiting for the first game to start
    Idle,
    Running,
    Paused,
    GameOver(Crash),
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Crash {
    Wall,
    Body,
    /// The snake takes up the entire board, so there's nowhere to put food
    BoardFull,
}

impl Crash {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            Crash::Wall => "you hit the wall",
            Crash::Body => "you ran into yourself",
            Crash::BoardFull => "the board is full; you win!",
        }
    }
}

/// Player input, independent of where it came from
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Intent {
    Start,
    PauseToggle,
    WrapToggle,
    Turn(Direction),
    /// The player clicked on a cell of the board
    Tap(Cell),
}

/// What happened during a tick
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct TickOutcome {
    pub(crate) ate: bool,
    pub(crate) cues: Vec<AudioCue>,
}
