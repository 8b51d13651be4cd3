//! Error types for release mapping and name rendering.
//!
//! Mapping errors are fatal for the whole release: downstream naming needs
//! every track to carry a valid disc/track pair, so nothing is recovered
//! per track.

use thiserror::Error;

/// Failure to turn a tracklist position string into a disc/track pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// Contains a separator but matches none of the known numbering schemes.
    #[error("position '{0}' matches no known numbering scheme")]
    Unmatched(String),

    /// Single-disc form whose track part is not an integer (e.g. vinyl "A1").
    #[error("position '{0}' is not a valid track number")]
    NotNumeric(String),

    /// Parsed, but the disc or track number is zero.
    #[error("position '{0}' yields a zero disc or track number")]
    Zero(String),
}

/// Fatal failure while mapping one release.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("release {release_id}: cannot convert position '{position}' to a valid track-/discnumber: {source}")]
    Position {
        release_id: String,
        position: String,
        #[source]
        source: PositionError,
    },

    #[error("release {release_id}: required field '{field}' is missing")]
    MissingField {
        release_id: String,
        field: &'static str,
    },

    #[error("release {release_id}: field '{field}' has invalid value '{value}'")]
    InvalidField {
        release_id: String,
        field: &'static str,
        value: String,
    },

    #[error("release {release_id}: no usable album artist credit")]
    NoArtists { release_id: String },

    #[error("release {release_id}: expected {expected} disc(s) numbered from 1, tracklist yields {found:?}")]
    DiscLayout {
        release_id: String,
        expected: u32,
        found: Vec<u32>,
    },
}

impl MappingError {
    /// Identifier of the release that failed to map.
    pub fn release_id(&self) -> &str {
        match self {
            MappingError::Position { release_id, .. }
            | MappingError::MissingField { release_id, .. }
            | MappingError::InvalidField { release_id, .. }
            | MappingError::NoArtists { release_id }
            | MappingError::DiscLayout { release_id, .. } => release_id,
        }
    }
}

/// Failure to render a naming template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unknown template token '%{0}%'")]
    UnknownToken(String),

    #[error("template token '%{0}%' needs a track to render")]
    TrackRequired(String),
}

/// Failure to obtain a raw release record.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read release {release_id} from {path}: {source}")]
    Io {
        release_id: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("release {release_id} is not a valid release document: {source}")]
    Json {
        release_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot read id file {path}: {source}")]
    IdFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("id file {path} holds no release id")]
    MissingId { path: String },
}

/// Failure to load tagger configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}
