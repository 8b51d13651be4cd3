//! Tag-format engine: `%TOKEN%` substitution over a mapped album.
//!
//! Templates are plain text with tokens such as `%ALBARTIST%` or
//! `%TRACKNO%`. Only token values are transformed by the render mode;
//! literal template text (including `/`) is copied as is.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::FormatError;
use crate::models::{Album, Track};
use crate::normalize::slugify;

/// Matches one `%NAME%` token. Wider than the known names so misspelled
/// tokens are reported instead of copied through.
pub static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"%([A-Za-z0-9_]+)%").unwrap());

/// How token values are written into the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Values as they are, for tag values.
    Raw,
    /// Slugified values, for paths and file names.
    FilesystemSafe,
}

/// Recognized template tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    AlbumArtist,
    AlbumTitle,
    CatalogNumber,
    Year,
    Genre,
    Style,
    Label,
    Country,
    DiscNumber,
    TrackNumber,
    Artist,
    Title,
    FileType,
    DiscSubtitle,
}

impl Token {
    pub fn from_name(name: &str) -> Option<Token> {
        let token = match name {
            "ALBARTIST" => Token::AlbumArtist,
            "ALBTITLE" => Token::AlbumTitle,
            "CATNO" => Token::CatalogNumber,
            "YEAR" => Token::Year,
            "GENRE" => Token::Genre,
            "STYLE" => Token::Style,
            "LABEL" => Token::Label,
            "COUNTRY" => Token::Country,
            "DISCNO" => Token::DiscNumber,
            "TRACKNO" => Token::TrackNumber,
            "ARTIST" => Token::Artist,
            "TITLE" => Token::Title,
            "TYPE" => Token::FileType,
            "DISCSUBTITLE" => Token::DiscSubtitle,
            _ => return None,
        };
        Some(token)
    }

    pub fn name(self) -> &'static str {
        match self {
            Token::AlbumArtist => "ALBARTIST",
            Token::AlbumTitle => "ALBTITLE",
            Token::CatalogNumber => "CATNO",
            Token::Year => "YEAR",
            Token::Genre => "GENRE",
            Token::Style => "STYLE",
            Token::Label => "LABEL",
            Token::Country => "COUNTRY",
            Token::DiscNumber => "DISCNO",
            Token::TrackNumber => "TRACKNO",
            Token::Artist => "ARTIST",
            Token::Title => "TITLE",
            Token::FileType => "TYPE",
            Token::DiscSubtitle => "DISCSUBTITLE",
        }
    }

    /// Tokens whose value comes from a track rather than the album.
    pub fn needs_track(self) -> bool {
        matches!(
            self,
            Token::DiscNumber
                | Token::TrackNumber
                | Token::Artist
                | Token::Title
                | Token::FileType
                | Token::DiscSubtitle
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}%", self.name())
    }
}

/// A track plus the extension of the file it will be written to.
#[derive(Debug, Clone, Copy)]
pub struct TrackContext<'a> {
    pub track: &'a Track,
    pub extension: &'a str, // with leading dot: ".mp3"
}

impl<'a> TrackContext<'a> {
    pub fn new(track: &'a Track, extension: &'a str) -> Self {
        Self { track, extension }
    }
}

/// Renders templates against one album.
#[derive(Debug, Clone, Copy)]
pub struct TagFormatter<'a> {
    album: &'a Album,
}

impl<'a> TagFormatter<'a> {
    pub fn new(album: &'a Album) -> Self {
        Self { album }
    }

    /// Raw value of a token.
    fn value(&self, token: Token, track: Option<&TrackContext>) -> Result<String, FormatError> {
        let album = self.album;
        let ctx = || track.ok_or_else(|| FormatError::TrackRequired(token.name().to_string()));
        let value = match token {
            Token::AlbumArtist => album.artist(),
            Token::AlbumTitle => album.title.clone(),
            Token::CatalogNumber => album.catno().to_string(),
            Token::Year => album.year.clone(),
            Token::Genre => album.genre().to_string(),
            Token::Style => album.style().to_string(),
            Token::Label => album.label().to_string(),
            Token::Country => album.country.clone(),
            Token::DiscNumber => ctx()?.track.discnumber.to_string(),
            Token::TrackNumber => format!("{:02}", ctx()?.track.tracknumber),
            Token::Artist => ctx()?.track.artist(),
            Token::Title => ctx()?.track.title.clone(),
            Token::FileType => ctx()?.extension.to_string(),
            Token::DiscSubtitle => ctx()?.track.discsubtitle.clone().unwrap_or_default(),
        };
        Ok(value)
    }

    /// Substitute every token of `template`.
    ///
    /// Unknown tokens are an error rather than an empty substitution, so a
    /// typo in a template never produces a silently wrong path.
    pub fn render(
        &self,
        template: &str,
        track: Option<&TrackContext>,
        mode: RenderMode,
    ) -> Result<String, FormatError> {
        let mut out = String::with_capacity(template.len() * 2);
        let mut last = 0;

        for caps in TOKEN_PATTERN.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            out.push_str(&template[last..whole.start()]);

            let token = Token::from_name(name.as_str())
                .ok_or_else(|| FormatError::UnknownToken(name.as_str().to_string()))?;
            let value = self.value(token, track)?;

            match (mode, token) {
                // Extensions keep their dot in both modes
                (RenderMode::Raw, _) | (_, Token::FileType) => out.push_str(&value),
                (RenderMode::FilesystemSafe, _) => out.push_str(&slugify(&value)),
            }

            last = whole.end();
        }

        out.push_str(&template[last..]);
        Ok(out)
    }
}
