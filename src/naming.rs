//! File and directory naming for a mapped album.
//!
//! All names are rendered in filesystem-safe mode; `tag_value` is the only
//! raw rendering and is meant for tag fields.

use serde::Serialize;
use std::path::{Component, Path, PathBuf};

use crate::config::FileFormatting;
use crate::error::FormatError;
use crate::format::{RenderMode, TagFormatter, TrackContext};
use crate::models::{Album, Track};

/// Target directory of an album: `base_dir` joined with the rendered
/// template. `.` components are dropped, so "./dest" and "dest" give the
/// same result; a leading root is kept.
pub fn destination_directory_name(
    album: &Album,
    base_dir: &Path,
    dir_template: &str,
) -> Result<PathBuf, FormatError> {
    let rendered = TagFormatter::new(album).render(dir_template, None, RenderMode::FilesystemSafe)?;
    let joined = base_dir.join(rendered);

    Ok(joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect())
}

/// File name of one track, using the compilation template for compilations.
pub fn track_file_name(
    album: &Album,
    track: &Track,
    extension: &str,
    formatting: &FileFormatting,
) -> Result<String, FormatError> {
    let template = if album.is_compilation {
        &formatting.va_song
    } else {
        &formatting.song
    };
    let ctx = TrackContext::new(track, extension);
    TagFormatter::new(album).render(template, Some(&ctx), RenderMode::FilesystemSafe)
}

pub fn playlist_file_name(album: &Album, formatting: &FileFormatting) -> Result<String, FormatError> {
    TagFormatter::new(album).render(&formatting.m3u, None, RenderMode::FilesystemSafe)
}

pub fn info_file_name(album: &Album, formatting: &FileFormatting) -> Result<String, FormatError> {
    TagFormatter::new(album).render(&formatting.nfo, None, RenderMode::FilesystemSafe)
}

/// Raw rendering of a template for a tag field.
pub fn tag_value(
    album: &Album,
    template: &str,
    track: Option<&TrackContext>,
) -> Result<String, FormatError> {
    TagFormatter::new(album).render(template, track, RenderMode::Raw)
}

// ============================================================================
// Release Plan
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedTrack {
    pub discnumber: u32,
    pub tracknumber: u32,
    pub file_name: String,
}

/// Every name derived for one album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleasePlan {
    pub release_id: String,
    pub directory: PathBuf,
    pub playlist: String,
    pub info: String,
    pub tracks: Vec<PlannedTrack>,
}

impl ReleasePlan {
    /// Full path of every track file, in tracklist order.
    pub fn track_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.tracks.iter().map(|t| self.directory.join(&t.file_name))
    }
}

pub fn plan_release(
    album: &Album,
    formatting: &FileFormatting,
    base_dir: &Path,
    extension: &str,
) -> Result<ReleasePlan, FormatError> {
    let directory = destination_directory_name(album, base_dir, &formatting.dir)?;

    let tracks = album
        .tracks()
        .map(|track| {
            Ok(PlannedTrack {
                discnumber: track.discnumber,
                tracknumber: track.tracknumber,
                file_name: track_file_name(album, track, extension, formatting)?,
            })
        })
        .collect::<Result<Vec<_>, FormatError>>()?;

    Ok(ReleasePlan {
        release_id: album.id.clone(),
        directory,
        playlist: playlist_file_name(album, formatting)?,
        info: info_file_name(album, formatting)?,
        tracks,
    })
}
