//! Discogs release tagging library: release mapping, name rendering and
//! batch helpers shared by the `discogs-tagger` binary.

pub mod config;
pub mod credits;
pub mod error;
pub mod format;
pub mod mapping;
pub mod models;
pub mod naming;
pub mod normalize;
pub mod position;
pub mod progress;
pub mod source;

pub use config::TaggerConfig;
pub use error::{ConfigError, FormatError, MappingError, PositionError, SourceError};
pub use format::{RenderMode, TagFormatter, TrackContext};
pub use mapping::map_release;
pub use models::{Album, Disc, RawRelease, Track};
pub use naming::{plan_release, ReleasePlan};
pub use source::{JsonDirectorySource, ReleaseSource};
