use crate::consts;
use crate::game::{Grid, GridError};
use crate::score::FileStore;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Size of the playing field
    #[serde(default)]
    pub(crate) canvas: CanvasConfig,

    #[serde(default)]
    pub(crate) sound: SoundConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("rainbow-snake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which the key-value store should be kept: the
    /// file given in the configuration or, if that is not set, the default
    /// store path.
    pub(crate) fn store_path(&self) -> Result<PathBuf, ConfigError> {
        match self.files.store_file {
            Some(ref p) => Ok(p.clone()),
            None => FileStore::default_path().ok_or(ConfigError::NoDataPath),
        }
    }
}

/// Dimensions of the pixel canvas the game is drawn on
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct CanvasConfig {
    /// Width in pixels; one pixel is one terminal column
    pub(crate) width: u16,

    /// Height in pixels; one terminal row holds two pixels
    pub(crate) height: u16,

    /// Edge length of a grid cell in pixels
    pub(crate) cell_size: u16,
}

impl CanvasConfig {
    /// Compute the grid of cells the canvas is divided into
    pub(crate) fn grid(&self) -> Result<Grid, GridError> {
        Grid::from_canvas(self.width, self.height, self.cell_size)
    }
}

impl Default for CanvasConfig {
    fn default() -> CanvasConfig {
        CanvasConfig {
            width: consts::DEFAULT_CANVAS_WIDTH,
            height: consts::DEFAULT_CANVAS_HEIGHT,
            cell_size: consts::DEFAULT_CELL_SIZE,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct SoundConfig {
    /// Whether to ring the terminal bell on audio cues
    pub(crate) enabled: bool,
}

impl Default for SoundConfig {
    fn default() -> SoundConfig {
        SoundConfig { enabled: true }
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(try_from = "RawFileConfig")]
pub(crate) struct FileConfig {
    /// Path at which the key-value store holding the high score is kept
    store_file: Option<PathBuf>,
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    store_file: Option<String>,
}

impl TryFrom<RawFileConfig> for FileConfig {
    type Error = std::io::Error;

    fn try_from(value: RawFileConfig) -> Result<FileConfig, std::io::Error> {
        Ok(FileConfig {
            store_file: value.store_file.map(expanduser::expanduser).transpose()?,
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to determine path to local data directory")]
    NoDataPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
