//! Tracklist position parsing.
//!
//! Catalog positions come in several notations. Positions without a "-" or
//! "." are single-disc track numbers; everything else must match one of
//! the numbering schemes below, tried in order.
//!
//! "1.05" is read as disc 1, track 5. On some releases that notation means
//! sub-track 5 of track 1 instead; the two cannot be told apart from the
//! position alone and the disc reading is kept.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::PositionError;

/// Multi-disc numbering schemes in priority order. Add patterns here as new
/// notations are encountered.
pub static NUMBERING_SCHEMES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // CD01-12
        Regex::new(r"^CD(?P<disc>\d+)-(?P<track>\d+)$").unwrap(),
        // 1-02
        Regex::new(r"^(?P<disc>\d+)-(?P<track>\d+)$").unwrap(),
        // 1.05
        Regex::new(r"^(?P<disc>\d+)\.(?P<track>\d+)$").unwrap(),
    ]
});

/// Disc and track number of one tracklist entry, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscPosition {
    pub discnumber: u32,
    pub tracknumber: u32,
}

/// Parse a raw position string.
pub fn parse_position(position: &str) -> Result<DiscPosition, PositionError> {
    let position = position.trim();

    let (disc, track) = if !position.contains('-') && !position.contains('.') {
        ("1", position)
    } else {
        let caps = NUMBERING_SCHEMES
            .iter()
            .find_map(|scheme| scheme.captures(position))
            .ok_or_else(|| PositionError::Unmatched(position.to_string()))?;
        // Both groups exist in every scheme
        match (caps.name("disc"), caps.name("track")) {
            (Some(d), Some(t)) => (d.as_str(), t.as_str()),
            _ => return Err(PositionError::Unmatched(position.to_string())),
        }
    };

    let discnumber: u32 = disc
        .parse()
        .map_err(|_| PositionError::NotNumeric(position.to_string()))?;
    let tracknumber: u32 = track
        .parse()
        .map_err(|_| PositionError::NotNumeric(position.to_string()))?;

    if discnumber == 0 || tracknumber == 0 {
        return Err(PositionError::Zero(position.to_string()));
    }

    Ok(DiscPosition {
        discnumber,
        tracknumber,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(discnumber: u32, tracknumber: u32) -> DiscPosition {
        DiscPosition {
            discnumber,
            tracknumber,
        }
    }

    #[test]
    fn test_single_disc_positions() {
        assert_eq!(parse_position("1"), Ok(pos(1, 1)));
        assert_eq!(parse_position("07"), Ok(pos(1, 7)));
        assert_eq!(parse_position(" 12 "), Ok(pos(1, 12)));
    }

    #[test]
    fn test_numbering_schemes() {
        assert_eq!(parse_position("CD01-12"), Ok(pos(1, 12)));
        assert_eq!(parse_position("1-02"), Ok(pos(1, 2)));
        assert_eq!(parse_position("2-20"), Ok(pos(2, 20)));
        assert_eq!(parse_position("1.05"), Ok(pos(1, 5)));
    }

    #[test]
    fn test_vinyl_side_is_not_numeric() {
        assert_eq!(
            parse_position("A1"),
            Err(PositionError::NotNumeric("A1".to_string()))
        );
        assert!(parse_position("").is_err());
    }

    #[test]
    fn test_unmatched_separator_forms() {
        assert_eq!(
            parse_position("A-1"),
            Err(PositionError::Unmatched("A-1".to_string()))
        );
        assert_eq!(
            parse_position("1.2.3"),
            Err(PositionError::Unmatched("1.2.3".to_string()))
        );
        // The dot is literal, not a wildcard
        assert!(parse_position("1x05").is_err());
    }

    #[test]
    fn test_zero_is_rejected() {
        assert_eq!(parse_position("0"), Err(PositionError::Zero("0".to_string())));
        assert_eq!(parse_position("0-3"), Err(PositionError::Zero("0-3".to_string())));
    }
}
