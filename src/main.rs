mod app;
mod command;
mod config;
mod consts;
mod game;
mod input;
mod logging;
mod render;
mod score;
mod sound;
mod ticker;
mod title;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::score::{FileStore, ScoreStore};
use crate::sound::{Bell, Silent, SoundSink};
use crate::util::Globals;
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

static USAGE: &str = concat!(
    "Usage: rainbow-snake [-c|--config <PATH>]\n",
    "\n",
    "Play a game of snake in the terminal\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>   Read configuration from the given file\n",
    "  -h, --help            Display this help message and exit\n",
    "  -V, --version         Show the program version and exit\n",
    "\n",
    "Set RAINBOW_SNAKE_LOG to a log filter (e.g. \"info\") to write logs to\n",
    "RAINBOW_SNAKE_LOG_FILE or to rainbow-snake.log in the local data directory.\n",
);

/// What the command line asked for
#[derive(Clone, Debug, Eq, PartialEq)]
enum Arguments {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Arguments {
    fn from_parser(mut parser: Parser) -> Result<Arguments, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run { config })
    }
}

fn main() -> ExitCode {
    match Arguments::from_parser(Parser::from_env()) {
        Ok(Arguments::Run { config }) => error_exit(run(config)),
        Ok(Arguments::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Arguments::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("rainbow-snake: {e}");
            eprintln!("Run with --help for usage");
            ExitCode::from(2)
        }
    }
}

fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(ref p) => Config::load(p, false),
        None => Config::load(&Config::default_path()?, true),
    }
    .context("failed to load configuration")?;
    let log_path = logging::init()?;
    let grid = config
        .canvas
        .grid()
        .context("invalid canvas configuration")?;
    let store = FileStore::open(config.store_path()?);
    tracing::info!(
        config = ?config_path,
        log = ?log_path,
        store = %store.path().display(),
        "Starting up"
    );
    let sound: Box<dyn SoundSink> = if config.sound.enabled {
        Box::new(Bell::new())
    } else {
        Box::new(Silent)
    };
    let globals = Globals {
        scores: ScoreStore::new(store),
        sound,
        grid,
        cell_size: config.canvas.cell_size,
    };
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
        .and_then(|()| App::new(globals).run(terminal));
    let cleanup = execute!(io::stdout(), DisableMouseCapture, DisableFocusChange);
    ratatui::restore();
    r.and(cleanup)?;
    Ok(())
}

fn error_exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rainbow-snake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|ioe| ioe.kind() == ErrorKind::BrokenPipe)
}
