//! Core data models for release tagging.
//!
//! Two layers live here: the raw catalog record exactly as the catalog
//! serves it (loosely typed, every field optional or defaulted), and the
//! normalized Album/Disc/Track graph the mapper builds from it.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::SourceError;

/// Base URL of a release page on the catalog site.
pub const RELEASE_URL_BASE: &str = "http://www.discogs.com/release/";

/// Separator used when a list of artist names is shown as one value.
pub const ARTIST_SEPARATOR: &str = ", ";

// ============================================================================
// Raw Catalog Record
// ============================================================================

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A JSON scalar the catalog serves either as a number or as a string
/// (release ids, years, format quantities).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawScalar {
    Number(i64),
    Text(String),
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawScalar::Number(n) => write!(f, "{}", n),
            RawScalar::Text(s) => f.write_str(s),
        }
    }
}

/// One element of an artist credit list.
///
/// Most entries are artist objects, but some records carry bare strings
/// such as "Presents" between two artists.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CreditEntry {
    Join(String),
    Artist(RawArtist),
}

/// Artist reference inside a credit list.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawArtist {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub anv: Option<String>, // artist name variation, informational only
    #[serde(default)]
    pub join: Option<String>, // connective to the next artist ("&", "Feat.", ",")
    #[serde(default)]
    pub id: Option<RawScalar>,
}

impl RawArtist {
    /// The artist name if it is present and not blank.
    pub fn usable_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawLabel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub catno: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawImage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>, // "primary" / "secondary"
}

/// Physical or digital format entry ("CD", "Vinyl", "File", ...).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawFormat {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub qty: Option<RawScalar>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// One tracklist entry: a real track, a heading, an index or a video item.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawTrack {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default, rename = "type_")]
    pub kind: Option<String>, // "track", "index", "heading"
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<CreditEntry>,
}

/// Release record as returned by the catalog, already deserialized.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawRelease {
    pub id: RawScalar,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<CreditEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<RawLabel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<RawImage>,
    #[serde(default)]
    pub year: Option<RawScalar>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub formats: Vec<RawFormat>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tracklist: Vec<RawTrack>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Option<Vec<String>>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub master_id: Option<RawScalar>,
}

impl RawRelease {
    /// Parse a single release document.
    pub fn from_json_str(release_id: &str, json: &str) -> Result<Self, SourceError> {
        serde_json::from_str(json).map_err(|source| SourceError::Json {
            release_id: release_id.to_string(),
            source,
        })
    }

    pub fn release_id(&self) -> String {
        self.id.to_string()
    }
}

// ============================================================================
// Mapped Entity Graph
// ============================================================================

/// Label credit of a release.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LabelCredit {
    pub name: String,  // duplicate suffix stripped
    pub catno: String, // verbatim
}

/// One playable track.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Track {
    pub position: usize, // 0-based index in the raw tracklist, debug only
    pub title: String,
    pub artists: Vec<String>,
    pub sort_artist: String,
    pub tracknumber: u32, // 1-based within the disc
    pub discnumber: u32,  // 1-based
    pub discsubtitle: Option<String>,
    pub source_position: String, // position string as the catalog wrote it
}

impl Track {
    /// Track artists as one display value.
    pub fn artist(&self) -> String {
        self.artists.join(ARTIST_SEPARATOR)
    }
}

/// One disc of a release. Tracks keep tracklist order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Disc {
    pub discnumber: u32,
    pub tracks: Vec<Track>,
    pub discsubtitle: Option<String>,
}

impl Disc {
    pub fn new(discnumber: u32) -> Self {
        Self {
            discnumber,
            tracks: Vec::new(),
            discsubtitle: None,
        }
    }
}

/// A mapped release.
///
/// ## Invariants after mapping
///
/// - `artists` is never empty
/// - `discs.len() == disctotal`, disc numbers run 1..=disctotal; a release
///   without tracks is the exception and has one empty disc
/// - every track has positive `tracknumber` and `discnumber`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artists: Vec<String>,
    pub sort_artist: String,
    pub labels: Vec<LabelCredit>,
    pub images: Vec<String>,
    pub year: String, // 4 digits, "1900" when unknown
    pub genres: Vec<String>,
    pub styles: Vec<String>, // [""] when the record has none
    pub country: String,
    pub notes: Option<String>,
    pub disctotal: u32,
    pub is_compilation: bool,
    pub master_id: Option<String>,
    pub discs: Vec<Disc>,
}

impl Album {
    /// Catalog page of this release.
    pub fn url(&self) -> String {
        format!("{}{}", RELEASE_URL_BASE, self.id)
    }

    /// Album artists as one display value.
    pub fn artist(&self) -> String {
        self.artists.join(ARTIST_SEPARATOR)
    }

    pub fn label(&self) -> &str {
        self.labels.first().map(|l| l.name.as_str()).unwrap_or("")
    }

    pub fn catno(&self) -> &str {
        self.labels.first().map(|l| l.catno.as_str()).unwrap_or("")
    }

    pub fn genre(&self) -> &str {
        self.genres.first().map(String::as_str).unwrap_or("")
    }

    pub fn style(&self) -> &str {
        self.styles.first().map(String::as_str).unwrap_or("")
    }

    /// All tracks across discs, in disc order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.discs.iter().flat_map(|d| d.tracks.iter())
    }

    pub fn track_count(&self) -> usize {
        self.discs.iter().map(|d| d.tracks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credit_entry_accepts_strings_and_objects() {
        let entries: Vec<CreditEntry> = serde_json::from_value(json!([
            {"name": "A.D.N.Y*", "join": ""},
            "Presents",
            {"name": "Leiva"}
        ]))
        .unwrap();

        assert_eq!(entries.len(), 3);
        assert!(matches!(&entries[1], CreditEntry::Join(s) if s == "Presents"));
        match &entries[2] {
            CreditEntry::Artist(a) => assert_eq!(a.usable_name(), Some("Leiva")),
            other => panic!("unexpected entry {:?}", other),
        }
    }

    #[test]
    fn test_raw_scalar_display() {
        let id: RawScalar = serde_json::from_value(json!(1448190)).unwrap();
        let qty: RawScalar = serde_json::from_value(json!("2")).unwrap();
        assert_eq!(id.to_string(), "1448190");
        assert_eq!(qty.to_string(), "2");
    }

    #[test]
    fn test_release_defaults_for_absent_fields() {
        let release = RawRelease::from_json_str("1", r#"{"id": 1}"#).unwrap();
        assert_eq!(release.release_id(), "1");
        assert!(release.title.is_none());
        assert!(release.tracklist.is_empty());
        assert!(release.styles.is_none());
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let release = RawRelease::from_json_str(
            "9",
            r#"{"id": 9, "genres": null, "tracklist": null,
                "labels": [{"name": null, "catno": null}],
                "formats": [{"name": "CD", "qty": 1, "descriptions": null}]}"#,
        )
        .unwrap();

        assert!(release.genres.is_empty());
        assert!(release.tracklist.is_empty());
        assert_eq!(release.labels[0], RawLabel::default());
        assert!(release.formats[0].descriptions.is_empty());
    }

    #[test]
    fn test_invalid_document_is_reported_with_release_id() {
        let err = RawRelease::from_json_str("42", "{not json").unwrap_err();
        assert!(err.to_string().contains("release 42"));
    }

    #[test]
    fn test_album_accessors() {
        let album = Album {
            id: "1448190".to_string(),
            title: "Megahits 2001 Die Erste".to_string(),
            artists: vec!["Various".to_string()],
            sort_artist: "Various".to_string(),
            labels: vec![LabelCredit {
                name: "Polystar".to_string(),
                catno: "560 938-2".to_string(),
            }],
            images: vec![],
            year: "2001".to_string(),
            genres: vec!["Electronic".to_string(), "Hip Hop".to_string()],
            styles: vec![String::new()],
            country: "Germany".to_string(),
            notes: None,
            disctotal: 1,
            is_compilation: true,
            master_id: None,
            discs: vec![Disc::new(1)],
        };

        assert_eq!(album.url(), "http://www.discogs.com/release/1448190");
        assert_eq!(album.label(), "Polystar");
        assert_eq!(album.catno(), "560 938-2");
        assert_eq!(album.genre(), "Electronic");
        assert_eq!(album.style(), "");
        assert_eq!(album.track_count(), 0);
    }
}
