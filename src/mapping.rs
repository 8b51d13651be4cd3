//! Release mapping: raw catalog record → Album/Disc/Track graph.
//!
//! The tracklist is walked once. Each entry is classified first (video
//! item, subtitle heading, index entry or real track) and only real tracks
//! produce a `Track`. Headings and index entries set the disc subtitle that
//! is attached to every following track until another heading replaces it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::mem;
use tracing::{debug, error, info, warn};

use crate::credits::{album_artists, sort_artist, track_artists};
use crate::error::MappingError;
use crate::models::{
    Album, CreditEntry, Disc, LabelCredit, RawFormat, RawRelease, RawScalar, RawTrack, Track,
};
use crate::normalize::strip_duplicate_suffix;
use crate::position::parse_position;

/// Year used when the record has no recognizable year.
pub const DEFAULT_YEAR: &str = "1900";

/// Album artist name that marks a various-artists release.
pub const VARIOUS_ARTISTS: &str = "Various";

/// Format description that marks a compilation.
pub const COMPILATION_DESCRIPTION: &str = "Compilation";

/// Format name of digital releases; always mapped to a single disc.
pub const DIGITAL_FORMAT: &str = "File";

/// Position prefixes of video items mixed into audio tracklists.
pub const VIDEO_PREFIXES: [&str; 3] = ["Video", "video", "DVD"];

static YEAR_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

// ============================================================================
// Tracklist Classification
// ============================================================================

/// What a raw tracklist entry represents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TracklistEntry<'a> {
    /// A playable track.
    Track(&'a RawTrack),
    /// Index/header entry (`type_` other than "track"); carries its title.
    IndexMarker(&'a str),
    /// Title-only heading without position or duration.
    SubtitleMarker(&'a str),
    /// Video or DVD item; skipped.
    VideoEntry,
}

impl TracklistEntry<'_> {
    pub fn is_track(&self) -> bool {
        matches!(self, TracklistEntry::Track(_))
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Classify one tracklist entry. Checks run in a fixed order: video
/// prefix, subtitle heading, non-track type.
pub fn classify(entry: &RawTrack) -> TracklistEntry<'_> {
    let position = entry.position.as_deref().unwrap_or("");
    let title = entry.title.as_deref().unwrap_or("");

    if VIDEO_PREFIXES.iter().any(|p| position.starts_with(p)) {
        return TracklistEntry::VideoEntry;
    }

    if !title.is_empty() && is_blank(entry.position.as_deref()) && is_blank(entry.duration.as_deref()) {
        return TracklistEntry::SubtitleMarker(title);
    }

    match entry.kind.as_deref() {
        Some(kind) if !kind.eq_ignore_ascii_case("track") => TracklistEntry::IndexMarker(title),
        _ => TracklistEntry::Track(entry),
    }
}

// ============================================================================
// Album Fields
// ============================================================================

/// First run of four digits in the year value, "1900" if there is none.
pub fn extract_year(year: Option<&RawScalar>) -> String {
    let Some(year) = year else {
        warn!("no year set, using {}", DEFAULT_YEAR);
        return DEFAULT_YEAR.to_string();
    };
    let text = year.to_string();
    match YEAR_DIGITS.find(&text) {
        Some(m) => m.as_str().to_string(),
        None => {
            warn!("cannot read a year from '{}', using {}", text, DEFAULT_YEAR);
            DEFAULT_YEAR.to_string()
        }
    }
}

/// Number of discs stated by the first format entry.
pub fn disc_total(release_id: &str, formats: &[RawFormat]) -> Result<u32, MappingError> {
    let first = formats.first().ok_or_else(|| MappingError::MissingField {
        release_id: release_id.to_string(),
        field: "formats",
    })?;

    // Digital releases are tagged as one disc whatever their quantity says
    if first.name == DIGITAL_FORMAT {
        info!("release {}: digital release, using 1 disc", release_id);
        return Ok(1);
    }

    let qty = first.qty.as_ref().ok_or_else(|| MappingError::MissingField {
        release_id: release_id.to_string(),
        field: "formats.qty",
    })?;

    let parsed = match qty {
        RawScalar::Number(n) => u32::try_from(*n).ok(),
        RawScalar::Text(s) => s.trim().parse::<u32>().ok(),
    };

    match parsed {
        Some(n) if n > 0 => {
            info!("release {}: determined {} disc(s) total", release_id, n);
            Ok(n)
        }
        _ => Err(MappingError::InvalidField {
            release_id: release_id.to_string(),
            field: "formats.qty",
            value: qty.to_string(),
        }),
    }
}

/// Compilation if the first album artist is literally "Various" or any
/// format is described as "Compilation".
pub fn is_compilation(release: &RawRelease) -> bool {
    let various = release.artists.first().is_some_and(|entry| match entry {
        CreditEntry::Artist(a) => a.name.as_deref() == Some(VARIOUS_ARTISTS),
        CreditEntry::Join(_) => false,
    });

    various
        || release
            .formats
            .iter()
            .any(|f| f.descriptions.iter().any(|d| d == COMPILATION_DESCRIPTION))
}

fn labels(release: &RawRelease) -> Vec<LabelCredit> {
    release
        .labels
        .iter()
        .map(|l| LabelCredit {
            name: strip_duplicate_suffix(&l.name),
            catno: l.catno.clone(),
        })
        .collect()
}

// ============================================================================
// Mapping
// ============================================================================

/// Map a raw release into an `Album`.
pub fn map_release(release: &RawRelease) -> Result<Album, MappingError> {
    let release_id = release.release_id();
    debug!("mapping release {}", release_id);

    let title = release.title.clone().ok_or_else(|| MappingError::MissingField {
        release_id: release_id.clone(),
        field: "title",
    })?;

    let artists = album_artists(&release.artists);
    if artists.is_empty() {
        error!("release {} has no usable album artist", release_id);
        return Err(MappingError::NoArtists { release_id });
    }
    let sort_artist = sort_artist(&release.artists).unwrap_or_else(|| artists[0].clone());

    let styles = match &release.styles {
        Some(styles) => styles.clone(),
        None => {
            debug!("no styles set for release {}", release_id);
            vec![String::new()]
        }
    };

    let country = match &release.country {
        Some(country) => country.clone(),
        None => {
            warn!("no country set for release {}", release_id);
            String::new()
        }
    };

    let master_id = release.master_id.as_ref().map(RawScalar::to_string);
    if master_id.is_none() {
        debug!("release {} has no master release", release_id);
    }

    let disctotal = disc_total(&release_id, &release.formats)?;
    let discs = discs_and_tracks(&release_id, &release.tracklist, &artists, &sort_artist)?;
    check_disc_layout(&release_id, disctotal, &discs)?;

    let album = Album {
        id: release_id,
        title,
        artists,
        sort_artist,
        labels: labels(release),
        images: release.images.iter().map(|i| i.uri.clone()).collect(),
        year: extract_year(release.year.as_ref()),
        genres: release.genres.clone(),
        styles,
        country,
        notes: release.notes.clone(),
        disctotal,
        is_compilation: is_compilation(release),
        master_id,
        discs,
    };

    info!(
        "mapped release {}: '{} - {}', {} disc(s), {} track(s)",
        album.id,
        album.artist(),
        album.title,
        album.disctotal,
        album.track_count()
    );

    Ok(album)
}

/// Walk the tracklist and group tracks into discs.
///
/// A new disc is opened whenever a track's disc number differs from the
/// open one; the last open disc is always appended, so an empty tracklist
/// yields one empty disc.
///
/// Tracks carry the active subtitle across discs. A disc only gets a
/// subtitle from a heading seen after the previous disc's last track.
pub fn discs_and_tracks(
    release_id: &str,
    tracklist: &[RawTrack],
    inherited_artists: &[String],
    inherited_sort_artist: &str,
) -> Result<Vec<Disc>, MappingError> {
    let mut discs = Vec::new();
    let mut disc = Disc::new(1);
    let mut discsubtitle: Option<String> = None;
    let mut fresh_heading: Option<String> = None;

    for (index, entry) in tracklist.iter().enumerate() {
        let raw = match classify(entry) {
            TracklistEntry::Track(raw) => raw,
            TracklistEntry::VideoEntry => {
                debug!("skipping video entry {:?}", entry.position);
                continue;
            }
            TracklistEntry::SubtitleMarker(title) | TracklistEntry::IndexMarker(title) => {
                discsubtitle = Some(title.to_string()).filter(|t| !t.is_empty());
                fresh_heading = discsubtitle.clone();
                continue;
            }
        };

        let position = raw.position.as_deref().unwrap_or("");
        let parsed = parse_position(position).map_err(|source| {
            error!("release {}: cannot map position '{}': {}", release_id, position, source);
            MappingError::Position {
                release_id: release_id.to_string(),
                position: position.to_string(),
                source,
            }
        })?;

        let mut artists = track_artists(&raw.artists);
        let sort = if artists.is_empty() {
            artists = inherited_artists.to_vec();
            inherited_sort_artist.to_string()
        } else {
            sort_artist(&raw.artists).unwrap_or_else(|| inherited_sort_artist.to_string())
        };

        let track = Track {
            position: index,
            title: raw.title.clone().unwrap_or_default(),
            artists,
            sort_artist: sort,
            tracknumber: parsed.tracknumber,
            discnumber: parsed.discnumber,
            discsubtitle: discsubtitle.clone(),
            source_position: position.to_string(),
        };

        if track.discnumber != disc.discnumber {
            let next = Disc::new(track.discnumber);
            discs.push(mem::replace(&mut disc, next));
        }

        // A heading names a disc only if it directly precedes the disc's first track
        let heading = fresh_heading.take();
        if disc.tracks.is_empty() {
            disc.discsubtitle = heading;
        }

        disc.tracks.push(track);
    }

    discs.push(disc);

    Ok(discs)
}

/// Disc numbers must run 1..=disctotal without gaps or repeats.
///
/// A release without any track is exempt: it maps to the single empty disc
/// whatever its format quantity states.
fn check_disc_layout(release_id: &str, disctotal: u32, discs: &[Disc]) -> Result<(), MappingError> {
    if discs.iter().all(|d| d.tracks.is_empty()) {
        if disctotal != 1 {
            warn!(
                "release {}: no tracks but {} disc(s) stated, keeping one empty disc",
                release_id, disctotal
            );
        }
        return Ok(());
    }

    let found: Vec<u32> = discs.iter().map(|d| d.discnumber).collect();
    if found.iter().copied().eq(1..=disctotal) {
        return Ok(());
    }

    error!(
        "release {}: expected {} disc(s), tracklist yields discs {:?}",
        release_id, disctotal, found
    );
    Err(MappingError::DiscLayout {
        release_id: release_id.to_string(),
        expected: disctotal,
        found,
    })
}

// ============================================================================
// TESTS
// ============================================================================
