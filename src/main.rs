mod app;
mod audio;
mod command;
mod config;
mod consts;
mod driver;
mod game;
mod options;
mod util;
mod view;
mod warning;
use crate::app::App;
use crate::config::{Config, ConfigError, LogConfig};
use crate::game::{Session, SpeedPreset};
use crate::options::Options;
use crate::warning::Warning;
use anyhow::Context;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use lexopt::{Arg, Parser, ValueExt};
use simplelog::{LevelFilter, WriteLogger};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

static USAGE: &str = "\
Usage: gridsnake [<options>]

Play Snake in the terminal

Options:
  --config <path>          Read configuration from the given file
  --wrap                   Start with wrap mode on
  --speed-curve <curve>    Use the \"classic\" or \"capped\" speed curve
  --mute                   Turn off all sound
  --log-file <path>        Write the log to the given file
  -h, --help               Display this help message and exit
  -V, --version            Show the program version and exit

Keys:
  Space/Enter              Start a game
  arrows, hjkl, wasd       Steer
  p/Esc                    Pause or resume
  m                        Toggle wrap mode
  q                        Quit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum CliCommand {
    Run(Arguments),
    Help,
    Version,
}

impl CliCommand {
    fn from_parser(mut parser: Parser) -> Result<CliCommand, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(CliCommand::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(CliCommand::Version),
                Arg::Long("config") => args.config = Some(PathBuf::from(parser.value()?)),
                Arg::Long("wrap") => args.wrap = true,
                Arg::Long("speed-curve") => args.speed_curve = Some(parser.value()?.parse()?),
                Arg::Long("mute") => args.mute = true,
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(CliCommand::Run(args))
    }
}

/// Settings given on the command line, which take precedence over the
/// configuration file
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    wrap: bool,
    speed_curve: Option<SpeedPreset>,
    mute: bool,
    log_file: Option<PathBuf>,
}

impl Arguments {
    fn run(self) -> io::Result<()> {
        let (config, options, config_error) = match self.settings() {
            Ok((config, options)) => (config, options, None),
            Err(e) => {
                let mut config = Config::default();
                self.apply(&mut config);
                let options = config.options().unwrap_or_default();
                (config, options, Some(e))
            }
        };
        let log_error = init_logging(&config.log).err();
        log::info!("Starting gridsnake {}", env!("CARGO_PKG_VERSION"));
        match self.config {
            Some(ref path) => log::info!("Configuration file: {}", path.display()),
            None => {
                if let Ok(path) = Config::default_path() {
                    log::info!("Configuration file: {} (default)", path.display());
                }
            }
        }
        let mut warnings = Vec::new();
        match config_error {
            Some(e) => {
                log::warn!("Ignoring configuration: {e}");
                warnings.push(Warning::new(
                    "Configuration ignored; using default settings",
                    &e,
                ));
            }
            None => log::info!("Configuration: {config:?}"),
        }
        if let Some(e) = log_error {
            warnings.push(Warning::new("Logging is disabled", &*e));
        }
        let app = App::new(Session::new(options), config.sound.player(), warnings);

        let terminal = ratatui::init();
        let r = crossterm::execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
            .and_then(|()| app.run(terminal));
        let cleanup = crossterm::execute!(io::stdout(), DisableMouseCapture, DisableFocusChange);
        ratatui::restore();
        r.and(cleanup)
    }

    /// Load the configuration file and apply the command-line overrides to it
    fn settings(&self) -> Result<(Config, Options), ConfigError> {
        let mut config = match self.config {
            Some(ref path) => Config::load(path, false)?,
            None => Config::load(&Config::default_path()?, true)?,
        };
        self.apply(&mut config);
        let options = config.options()?;
        Ok((config, options))
    }

    fn apply(&self, config: &mut Config) {
        if self.wrap {
            config.game.wrap = true;
        }
        if let Some(preset) = self.speed_curve {
            config.speed.use_preset(preset);
        }
        if self.mute {
            config.sound.enabled = false;
        }
        if let Some(ref path) = self.log_file {
            config.log.file = Some(path.clone());
        }
    }
}

fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let level = log.level.filter();
    if level == LevelFilter::Off {
        return Ok(());
    }
    let path = log
        .path()
        .context("failed to determine path to local state directory")?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context("failed to open log file")?;
    WriteLogger::init(level, simplelog::Config::default(), file)
        .context("failed to install logger")?;
    Ok(())
}

fn main() -> ExitCode {
    match CliCommand::from_parser(Parser::from_env()) {
        Ok(CliCommand::Run(args)) => io_exit(args.run()),
        Ok(CliCommand::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(CliCommand::Version) => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            ExitCode::from(2)
        }
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gridsnake: {e}");
            ExitCode::from(2)
        }
    }
}
