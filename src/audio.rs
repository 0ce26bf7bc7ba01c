use crate::util::EnumExt;
use enum_dispatch::enum_dispatch;
use enum_map::{Enum, EnumMap};
use std::fmt;
use std::io::{self, Write};

/// Named sound events emitted by the game
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum AudioCue {
    /// The snake ate the food
    Eat,
    /// The game just ended
    GameOver,
}

impl AudioCue {
    pub(crate) fn name(self) -> &'static str {
        match self {
            AudioCue::Eat => "eat",
            AudioCue::GameOver => "game-over",
        }
    }
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Something that can make noise in response to an [`AudioCue`]
#[enum_dispatch]
pub(crate) trait Speaker {
    fn play(&mut self, cue: AudioCue) -> io::Result<()>;
}

#[enum_dispatch(Speaker)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum SoundPlayer {
    Bell,
    Mute,
}

impl SoundPlayer {
    /// Ring the terminal bell for each cue enabled in `cues`, or say nothing
    /// at all if `enabled` is false
    pub(crate) fn new(enabled: bool, cues: EnumMap<AudioCue, bool>) -> SoundPlayer {
        if enabled && AudioCue::iter().any(|cue| cues[cue]) {
            Bell { cues }.into()
        } else {
            Mute.into()
        }
    }
}

/// Rings the terminal bell
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Bell {
    cues: EnumMap<AudioCue, bool>,
}

impl Bell {
    fn rings_for(&self, cue: AudioCue) -> bool {
        self.cues[cue]
    }
}

impl Speaker for Bell {
    fn play(&mut self, cue: AudioCue) -> io::Result<()> {
        if self.rings_for(cue) {
            let mut out = io::stdout();
            out.write_all(b"\x07")?;
            out.flush()?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Mute;

impl Speaker for Mute {
    fn play(&mut self, cue: AudioCue) -> io::Result<()> {
        log::trace!("Muted sound cue {cue:?}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enum_map::enum_map;

    #[test]
    fn cue_names() {
        let names = AudioCue::iter().map(AudioCue::name).collect::<Vec<_>>();
        assert_eq!(names, ["eat", "game-over"]);
    }

    #[test]
    fn disabled_is_mute() {
        let player = SoundPlayer::new(false, EnumMap::from_fn(|_| true));
        assert_eq!(player, SoundPlayer::Mute(Mute));
    }

    #[test]
    fn no_cues_is_mute() {
        let player = SoundPlayer::new(true, EnumMap::from_fn(|_| false));
        assert_eq!(player, SoundPlayer::Mute(Mute));
    }

    #[test]
    fn bell_filters_cues() {
        let cues = enum_map! {
            AudioCue::Eat => false,
            AudioCue::GameOver => true,
        };
        let SoundPlayer::Bell(bell) = SoundPlayer::new(true, cues) else {
            panic!("expected a Bell");
        };
        assert!(!bell.rings_for(AudioCue::Eat));
        assert!(bell.rings_for(AudioCue::GameOver));
    }

    #[test]
    fn mute_plays_silently() {
        let mut player = SoundPlayer::from(Mute);
        for cue in AudioCue::iter() {
            assert!(player.play(cue).is_ok());
        }
    }
}
