//! Tagger configuration.
//!
//! Only naming templates and batch settings live here. Every key has a
//! default, so an empty file (or no file) is a valid configuration.
//!
//! ```toml
//! [file-formatting]
//! dir = "%GENRE%/%ALBARTIST%/%ALBTITLE%-(%CATNO%)-%YEAR%"
//! song = "%TRACKNO%-%ARTIST%-%TITLE%%TYPE%"
//!
//! [source]
//! id_file = "id.txt"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

pub const DEFAULT_DIR_FORMAT: &str = "%ALBARTIST%-%ALBTITLE%-(%CATNO%)-%YEAR%";
pub const DEFAULT_SONG_FORMAT: &str = "%TRACKNO%-%ARTIST%-%TITLE%%TYPE%";
pub const DEFAULT_M3U_FORMAT: &str = "00-%ALBARTIST%-%ALBTITLE%.m3u";
pub const DEFAULT_NFO_FORMAT: &str = "00-%ALBARTIST%-%ALBTITLE%.nfo";
pub const DEFAULT_ID_FILE: &str = "id.txt";

/// Naming templates (`[file-formatting]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileFormatting {
    pub dir: String,
    pub song: String,
    pub va_song: String, // used instead of `song` for compilations
    pub m3u: String,
    pub nfo: String,
}

impl Default for FileFormatting {
    fn default() -> Self {
        Self {
            dir: DEFAULT_DIR_FORMAT.to_string(),
            song: DEFAULT_SONG_FORMAT.to_string(),
            va_song: DEFAULT_SONG_FORMAT.to_string(),
            m3u: DEFAULT_M3U_FORMAT.to_string(),
            nfo: DEFAULT_NFO_FORMAT.to_string(),
        }
    }
}

/// Batch settings (`[source]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// File in a source directory that holds the release id.
    pub id_file: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            id_file: DEFAULT_ID_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    #[serde(rename = "file-formatting")]
    pub file_formatting: FileFormatting,
    pub source: SourceConfig,
}

impl TaggerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
