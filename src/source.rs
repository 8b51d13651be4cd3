//! Release record sources and batch job discovery.
//!
//! Fetching a release is a seam: the mapping pipeline only needs something
//! that turns a release id into a `RawRelease`. The bundled source reads
//! `<dir>/<id>.json` documents saved from the catalog API.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::SourceError;
use crate::models::RawRelease;

/// Provider of raw release records.
pub trait ReleaseSource: Send + Sync {
    fn fetch_release(&self, release_id: &str) -> Result<RawRelease, SourceError>;
}

/// Reads release documents from a directory of `<id>.json` files.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    dir: PathBuf,
}

impl JsonDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, release_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", release_id))
    }
}

impl ReleaseSource for JsonDirectorySource {
    fn fetch_release(&self, release_id: &str) -> Result<RawRelease, SourceError> {
        let path = self.path_for(release_id);
        debug!("reading release {} from {}", release_id, path.display());

        let json = fs::read_to_string(&path).map_err(|source| SourceError::Io {
            release_id: release_id.to_string(),
            path: path.display().to_string(),
            source,
        })?;
        RawRelease::from_json_str(release_id, &json)
    }
}

// ============================================================================
// Job Discovery
// ============================================================================

/// One release to process, and the directory it was found for (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseJob {
    pub release_id: String,
    pub source_dir: Option<PathBuf>,
}

/// Parse the content of an id file.
///
/// Accepts a bare id on the first non-empty line, or a `id=<value>` /
/// `id: <value>` line anywhere in the file.
pub fn parse_id_file(content: &str) -> Option<String> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect();

    let keyed = lines.iter().find_map(|line| {
        let (key, value) = line.split_once('=').or_else(|| line.split_once(':'))?;
        key.trim()
            .eq_ignore_ascii_case("id")
            .then(|| value.trim().to_string())
            .filter(|v| !v.is_empty())
    });

    keyed.or_else(|| {
        lines
            .first()
            .filter(|l| l.chars().all(|c| c.is_ascii_digit()))
            .map(|l| l.to_string())
    })
}

pub fn read_id_file(path: &Path) -> Result<String, SourceError> {
    let content = fs::read_to_string(path).map_err(|source| SourceError::IdFile {
        path: path.display().to_string(),
        source,
    })?;
    parse_id_file(&content).ok_or_else(|| SourceError::MissingId {
        path: path.display().to_string(),
    })
}

/// Find release jobs under `root`.
///
/// Without `recursive` only `root` itself is checked for `id_file`;
/// otherwise every directory below it is. Unreadable entries and id files
/// without an id are logged and skipped.
pub fn discover_jobs(root: &Path, id_file: &str, recursive: bool) -> Vec<ReleaseJob> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut jobs = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("error accessing entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() || entry.file_name() != id_file {
            continue;
        }

        match read_id_file(entry.path()) {
            Ok(release_id) => jobs.push(ReleaseJob {
                release_id,
                source_dir: entry.path().parent().map(Path::to_path_buf),
            }),
            Err(e) => warn!("{}", e),
        }
    }

    debug!("found {} release job(s) under {}", jobs.len(), root.display());
    jobs
}
