use std::fmt;
use std::io::{self, Write};

/// Audio cues emitted by the game
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Cue {
    Eat,
    GameOver,
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::Eat => write!(f, "eat"),
            Cue::GameOver => write!(f, "game over"),
        }
    }
}

/// Something that can play audio cues
pub(crate) trait SoundSink: fmt::Debug {
    fn play(&mut self, cue: Cue) -> io::Result<()>;

    /// Play a cue, ignoring any failure to do so
    fn cue(&mut self, cue: Cue) {
        if let Err(e) = self.play(cue) {
            tracing::debug!(%cue, error = %e, "Failed to play sound");
        }
    }
}

/// Plays every cue by ringing the terminal bell
#[derive(Debug)]
pub(crate) struct Bell<W = io::Stdout> {
    out: W,
}

impl Bell<io::Stdout> {
    pub(crate) fn new() -> Bell<io::Stdout> {
        Bell { out: io::stdout() }
    }
}

impl<W: Write + fmt::Debug> SoundSink for Bell<W> {
    fn play(&mut self, _cue: Cue) -> io::Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _cue: Cue) -> io::Result<()> {
        Ok(())
    }
}
