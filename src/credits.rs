//! Artist credit resolution.
//!
//! Album credits are a list of independent co-artists. Track credits are
//! phrases: an artist's `join` field ("&", "Feat.") connects it to the next
//! artist, and bare strings between artists are part of the phrase.

use tracing::debug;

use crate::models::CreditEntry;
use crate::normalize::{clean_name, strip_duplicate_suffix};

/// Album-level names: one cleaned name per named artist, order kept, join
/// tokens ignored. Entries without a usable name are dropped.
pub fn album_artists(credits: &[CreditEntry]) -> Vec<String> {
    credits
        .iter()
        .filter_map(|entry| match entry {
            CreditEntry::Artist(artist) => artist.usable_name().map(clean_name),
            CreditEntry::Join(_) => None,
        })
        .collect()
}

/// Track-level names.
///
/// Artists are paired: the first artist of a pair is held together with its
/// `join`, the next artist is appended with that join as connective and the
/// pair is emitted. Bare strings are appended to the held text, and a bare
/// string seen before any artist is held on its own. Whatever is still held
/// at the end becomes the last entry.
///
/// ["A" join "&", "B"] → ["A & B"]; ["Presents", "B"] → ["Presents B"].
/// The join is not trimmed, so an empty join yields "A  B".
pub fn track_artists(credits: &[CreditEntry]) -> Vec<String> {
    let mut artists = Vec::new();
    let mut current: Option<String> = None;
    let mut join: Option<String> = None;

    for entry in credits {
        match entry {
            CreditEntry::Join(text) => {
                current = Some(match current.take() {
                    Some(held) => format!("{} {}", held, text),
                    None => text.clone(),
                });
            }
            CreditEntry::Artist(artist) => {
                let Some(name) = artist.usable_name() else {
                    debug!("skipping artist credit without a name: {:?}", artist);
                    continue;
                };
                let name = clean_name(name);

                match current.take() {
                    Some(held) => {
                        // Taken as is: an empty join leaves two spaces
                        let connective = match join.as_deref() {
                            Some(j) => format!(" {} ", j),
                            None => " ".to_string(),
                        };
                        artists.push(format!("{}{}{}", held, connective, name));
                    }
                    None => {
                        join = artist.join.clone();
                        current = Some(name);
                    }
                }
            }
        }
    }

    if let Some(held) = current {
        artists.push(held);
    }

    artists
}

/// Sort artist: the first usable artist name, duplicate suffix removed but
/// article left in place.
pub fn sort_artist(credits: &[CreditEntry]) -> Option<String> {
    credits.iter().find_map(|entry| match entry {
        CreditEntry::Artist(artist) => artist.usable_name().map(strip_duplicate_suffix),
        CreditEntry::Join(_) => None,
    })
}
