use crate::audio::{SoundPlayer, Speaker};
use crate::command::Command;
use crate::driver::TickDriver;
use crate::game::{Intent, Session};
use crate::view::Geometry;
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{poll, read, Event, MouseButton, MouseEvent, MouseEventKind};
use rand::{rngs::ThreadRng, Rng};
use ratatui::{backend::Backend, Terminal};
use std::collections::VecDeque;
use std::io;
use std::time::Instant;

#[derive(Clone, Debug)]
pub(crate) struct App<R = ThreadRng> {
    session: Session<R>,
    driver: TickDriver,
    speaker: SoundPlayer,
    /// Warnings waiting to be acknowledged; the first one is on screen and
    /// receives all input
    warnings: VecDeque<Warning>,
    /// Layout of the most recently drawn frame, for mapping clicks to cells
    geometry: Option<Geometry>,
    quitting: bool,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(
        session: Session<R>,
        speaker: SoundPlayer,
        warnings: Vec<Warning>,
    ) -> App<R> {
        App {
            session,
            driver: TickDriver::new(),
            speaker,
            warnings: warnings.into(),
            geometry: None,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let snapshot = self.session.snapshot();
        let warning = self.warnings.front();
        let frame = terminal.draw(|frame| {
            frame.render_widget(&snapshot, frame.area());
            if let Some(w) = warning {
                frame.render_widget(w, frame.area());
            }
        })?;
        self.geometry = Some(Geometry::new(frame.area, snapshot.grid_size));
        Ok(())
    }

    /// Wait for either an input event or the next tick, whichever comes
    /// first, and handle it
    fn process_input(&mut self) -> io::Result<()> {
        let event = match self
            .driver
            .time_until_tick(Instant::now(), self.session.speed())
        {
            Some(timeout) => {
                if poll(timeout)? {
                    Some(read()?)
                } else {
                    None
                }
            }
            None => Some(read()?),
        };
        self.update(event, Instant::now());
        Ok(())
    }

    fn update(&mut self, event: Option<Event>, now: Instant) {
        if let Some(ev) = event {
            self.handle_event(ev);
        }
        self.sync_driver(now);
        if self.driver.poll(now, self.session.speed()) {
            let outcome = self.session.tick();
            for cue in outcome.cues {
                if let Err(e) = self.speaker.play(cue) {
                    log::warn!("Failed to play sound cue {cue}: {e}");
                }
            }
            self.sync_driver(now);
        }
    }

    /// Keep the tick driver running exactly while the game is
    fn sync_driver(&mut self, now: Instant) {
        if self.session.is_running() {
            self.driver.start(now);
        } else if self.driver.is_running() {
            log::trace!("Stopping tick driver");
            self.driver.stop();
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => self.handle_click(column, row),
            Event::FocusLost => {
                if self.session.is_running() {
                    log::debug!("Terminal lost focus");
                    self.session.handle(Intent::PauseToggle);
                }
            }
            _ => {
                if let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) {
                    self.handle_command(cmd);
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        if let Some(warning) = self.warnings.front_mut() {
            match warning.handle_command(cmd) {
                Some(WarningOutcome::Dismissed) => {
                    self.warnings.pop_front();
                }
                Some(WarningOutcome::Quit) => self.quit(),
                None => (),
            }
        } else if cmd.is_quit() {
            self.quit();
        } else if let Some(intent) = cmd.intent() {
            self.session.handle(intent);
        }
    }

    /// A click on the board is a tap on that cell.  A click elsewhere only
    /// starts a game.
    fn handle_click(&mut self, column: u16, row: u16) {
        if !self.warnings.is_empty() {
            return;
        }
        match self.geometry.and_then(|geo| geo.cell_at(column, row)) {
            Some(cell) => self.session.handle(Intent::Tap(cell)),
            None if !self.session.is_running() => self.session.handle(Intent::Start),
            None => (),
        }
    }

    fn quit(&mut self) {
        log::info!("Quitting with high score {}", self.session.high_score());
        self.quitting = true;
    }
}
