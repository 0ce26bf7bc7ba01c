use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use std::borrow::Cow;
use std::error::Error;

/// A pop-up reporting a problem that the program recovered from, shown over
/// the game until the user dismisses it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
    scroll_offset: usize,
    max_scroll: usize,
}

impl Warning {
    const MAX_LINES: u16 = 16;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    /// Describe `err` and its chain of sources underneath a one-line summary
    /// of what the program did about it
    pub(crate) fn new(summary: &str, err: &(dyn Error + 'static)) -> Warning {
        let msgs = std::iter::once(summary.to_owned())
            .chain(std::iter::successors(Some(err), |&e| e.source()).map(ToString::to_string))
            .collect();
        Warning::from_error_messages(msgs)
    }

    pub(crate) fn handle_command(&mut self, cmd: Command) -> Option<WarningOutcome> {
        if cmd.is_quit() {
            return Some(WarningOutcome::Quit);
        }
        match (cmd, self.scrolling()) {
            (Command::Enter, _) => return Some(WarningOutcome::Dismissed),
            (Command::Up, true) => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            (Command::Down, true) => {
                if self.scroll_offset < self.max_scroll.saturating_sub(1) {
                    self.scroll_offset += 1;
                }
            }
            _ => (),
        }
        None
    }

    fn scrolling(&self) -> bool {
        self.lines.len() > usize::from(Self::MAX_LINES)
    }

    /// Size of the pop-up including its border, padding, and button.  A
    /// scrollbar adds two columns.
    fn size(&self) -> Size {
        let text_height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .min(Warning::MAX_LINES);
        Size {
            width: Warning::WIDTH.saturating_add(u16::from(self.scrolling()) * 2),
            height: text_height.saturating_add(4),
        }
    }

    fn visible_lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines
            .iter()
            .skip(self.scroll_offset)
            .take(usize::from(Warning::MAX_LINES))
            .map(String::as_str)
    }

    fn wrap_into(lines: &mut Vec<String>, text: &str, opts: textwrap::Options<'_>) {
        lines.extend(textwrap::wrap(text, opts).into_iter().map(Cow::into_owned));
    }

    fn from_error_messages(msgs: Vec<String>) -> Warning {
        let width = usize::from(Warning::TEXT_WIDTH);
        let mut lines = Vec::new();
        let mut msgs = msgs.into_iter();
        if let Some(summary) = msgs.next() {
            Warning::wrap_into(
                &mut lines,
                &summary,
                textwrap::Options::new(width).break_words(true),
            );
        }
        let causes = msgs.collect::<Vec<_>>();
        match causes.as_slice() {
            [] => (),
            [cause] => {
                lines.push(String::new());
                lines.push(String::from("Caused by:"));
                let opts = textwrap::Options::new(width)
                    .break_words(true)
                    .initial_indent("    ")
                    .subsequent_indent("    ");
                Warning::wrap_into(&mut lines, cause, opts);
            }
            causes => {
                lines.push(String::new());
                lines.push(String::from("Caused by:"));
                for (i, cause) in causes.iter().enumerate() {
                    let init_indent = format!("{i:>5}: ");
                    let opts = textwrap::Options::new(width)
                        .break_words(true)
                        .initial_indent(&init_indent)
                        .subsequent_indent("       ");
                    Warning::wrap_into(&mut lines, cause, opts);
                }
            }
        }
        let max_scroll = lines
            .len()
            .saturating_sub(usize::from(Warning::MAX_LINES) - 1);
        Warning {
            lines,
            scroll_offset: 0,
            max_scroll,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl Widget for &Warning {
    // `area` is the area of the entire terminal; the pop-up centers itself
    // within it.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = center_rect(area, self.size());
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [mut text_area, ok_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
                .spacing(1)
                .areas(block.inner(popup));
        Clear.render(popup, buf);
        block.render(popup, buf);
        if self.scrolling() {
            let [lines_area, _, scrollbar_area] = Layout::horizontal([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(text_area);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .track_symbol(Some(ratatui::symbols::shade::MEDIUM))
                .render(
                    scrollbar_area,
                    buf,
                    &mut ScrollbarState::new(self.max_scroll).position(self.scroll_offset),
                );
            text_area = lines_area;
        }
        Text::from_iter(self.visible_lines()).render(text_area, buf);
        Line::from("[OK]").centered().render(ok_area, buf);
    }
}
