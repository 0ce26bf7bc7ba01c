use crate::audio::{AudioCue, SoundPlayer};
use crate::game::{SpeedCurve, SpeedCurveError, SpeedPreset, SpeedStep};
use crate::options::Options;
use enum_map::enum_map;
use serde::Deserialize;
use simplelog::LevelFilter;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) game: GameConfig,
    pub(crate) speed: SpeedConfig,
    pub(crate) sound: SoundConfig,
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read, if the file's contents
    /// could not be deserialized, or if the `[speed]` table does not describe
    /// a valid speed curve.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        let config = toml::from_str::<Config>(&content)?;
        config.speed.curve()?;
        Ok(config)
    }

    /// Gameplay options for a new [`Session`][crate::game::Session]
    pub(crate) fn options(&self) -> Result<Options, SpeedCurveError> {
        Ok(Options {
            wraparound: self.game.wrap,
            speed_curve: self.speed.curve()?,
        })
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    /// Whether wrap mode is on at startup
    pub(crate) wrap: bool,
}

/// The `[speed]` table: a preset, optionally with some or all of its values
/// replaced
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct SpeedConfig {
    preset: SpeedPreset,
    initial_ms: Option<u64>,
    floor_ms: Option<u64>,
    steps: Option<Vec<StepConfig>>,
}

impl SpeedConfig {
    /// Discard any custom values and use the given preset as-is
    pub(crate) fn use_preset(&mut self, preset: SpeedPreset) {
        *self = SpeedConfig {
            preset,
            ..SpeedConfig::default()
        };
    }

    pub(crate) fn curve(&self) -> Result<SpeedCurve, SpeedCurveError> {
        let base = self.preset.curve();
        let initial = self.initial_ms.map_or(base.initial(), Duration::from_millis);
        let floor = self.floor_ms.map_or(base.floor(), Duration::from_millis);
        let steps = match self.steps {
            Some(ref steps) => steps
                .iter()
                .map(|st| SpeedStep::from_millis(st.above_ms, st.decrement_ms))
                .collect(),
            None => base.steps().to_vec(),
        };
        SpeedCurve::new(initial, floor, steps)
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct StepConfig {
    above_ms: u64,
    decrement_ms: u64,
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct SoundConfig {
    /// Master switch for all sound
    pub(crate) enabled: bool,
    eat: bool,
    game_over: bool,
}

impl SoundConfig {
    pub(crate) fn player(self) -> SoundPlayer {
        SoundPlayer::new(
            self.enabled,
            enum_map! {
                AudioCue::Eat => self.eat,
                AudioCue::GameOver => self.game_over,
            },
        )
    }
}

impl Default for SoundConfig {
    fn default() -> SoundConfig {
        SoundConfig {
            enabled: true,
            eat: true,
            game_over: true,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(try_from = "RawLogConfig")]
pub(crate) struct LogConfig {
    pub(crate) level: LogLevel,

    /// Path to the log file, if not the default
    pub(crate) file: Option<PathBuf>,
}

impl LogConfig {
    /// Return the path to log to: the file given in the configuration or, if
    /// that is not set, the default log file path.  Return `None` if no path
    /// is configured and the default could not be computed.
    pub(crate) fn path(&self) -> Option<PathBuf> {
        self.file.clone().or_else(|| {
            dirs::state_dir()
                .or_else(dirs::cache_dir)
                .map(|p| p.join("gridsnake").join("gridsnake.log"))
        })
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
struct RawLogConfig {
    level: LogLevel,
    file: Option<String>,
}

impl TryFrom<RawLogConfig> for LogConfig {
    type Error = std::io::Error;

    fn try_from(value: RawLogConfig) -> Result<LogConfig, std::io::Error> {
        Ok(LogConfig {
            level: value.level,
            file: value.file.map(expanduser::expanduser).transpose()?,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub(crate) fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid speed curve in configuration file")]
    SpeedCurve(#[from] SpeedCurveError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load_str(content: &str) -> Result<Config, ConfigError> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        Config::load(file.path(), false)
    }

    #[test]
    fn empty_file_is_default() {
        let config = load_str("").unwrap();
        assert_eq!(config, Config::default());
        let options = config.options().unwrap();
        assert!(!options.wraparound);
        assert_eq!(options.speed_curve, SpeedCurve::capped());
        assert_eq!(config.sound.player(), SoundConfig::default().player());
        assert_eq!(config.log.level.filter(), LevelFilter::Info);
    }

    #[test]
    fn missing_file_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
    }

    #[test]
    fn missing_file_not_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn full_config() {
        let config = load_str(concat!(
            "[game]\n",
            "wrap = true\n",
            "\n",
            "[speed]\n",
            "preset = \"classic\"\n",
            "\n",
            "[sound]\n",
            "enabled = true\n",
            "eat = false\n",
            "\n",
            "[log]\n",
            "level = \"debug\"\n",
            "file = \"/var/tmp/snake.log\"\n",
        ))
        .unwrap();
        let options = config.options().unwrap();
        assert!(options.wraparound);
        assert_eq!(options.speed_curve, SpeedCurve::classic());
        assert!(config.sound.enabled);
        assert!(!config.sound.eat);
        assert!(config.sound.game_over);
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(
            config.log.path(),
            Some(PathBuf::from("/var/tmp/snake.log"))
        );
    }

    #[test]
    fn custom_steps() {
        let config = load_str(concat!(
            "[speed]\n",
            "initial-ms = 300\n",
            "floor-ms = 100\n",
            "steps = [{ above-ms = 200, decrement-ms = 20 }, { above-ms = 100, decrement-ms = 10 }]\n",
        ))
        .unwrap();
        let curve = config.options().unwrap().speed_curve;
        assert_eq!(curve.initial(), Duration::from_millis(300));
        assert_eq!(curve.floor(), Duration::from_millis(100));
        assert_eq!(
            curve.steps(),
            [
                SpeedStep::from_millis(200, 20),
                SpeedStep::from_millis(100, 10)
            ]
        );
    }

    #[test]
    fn partial_override_keeps_preset_steps() {
        let config = load_str("[speed]\npreset = \"classic\"\nfloor-ms = 50\n").unwrap();
        let curve = config.options().unwrap().speed_curve;
        assert_eq!(curve.initial(), Duration::from_millis(200));
        assert_eq!(curve.floor(), Duration::from_millis(50));
        assert_eq!(curve.steps(), SpeedCurve::classic().steps());
    }

    #[test]
    fn use_preset_discards_custom_values() {
        let mut config = load_str("[speed]\nfloor-ms = 100\n").unwrap();
        config.speed.use_preset(SpeedPreset::Classic);
        assert_eq!(
            config.options().unwrap().speed_curve,
            SpeedCurve::classic()
        );
    }

    #[test]
    fn invalid_curve() {
        let r = load_str("[speed]\ninitial-ms = 50\nfloor-ms = 100\n");
        assert!(matches!(
            r,
            Err(ConfigError::SpeedCurve(
                SpeedCurveError::InitialBelowFloor { .. }
            ))
        ));
    }

    #[test]
    fn unordered_steps() {
        let r = load_str(concat!(
            "[speed]\n",
            "steps = [{ above-ms = 80, decrement-ms = 5 }, { above-ms = 120, decrement-ms = 5 }]\n",
        ));
        assert!(matches!(
            r,
            Err(ConfigError::SpeedCurve(SpeedCurveError::Unordered))
        ));
    }

    #[test]
    fn unknown_preset() {
        let r = load_str("[speed]\npreset = \"ludicrous\"\n");
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn unknown_key() {
        let r = load_str("[game]\nwrap = true\nwalls = false\n");
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn unknown_log_level() {
        let r = load_str("[log]\nlevel = \"loud\"\n");
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn muted() {
        let config = load_str("[sound]\nenabled = false\n").unwrap();
        assert_eq!(
            config.sound.player(),
            SoundPlayer::from(crate::audio::Mute)
        );
    }
}
