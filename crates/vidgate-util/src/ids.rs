//! Strongly-typed video identifier
//!
//! Video IDs come from the external content platform and have a fixed
//! 11-character format over `[A-Za-z0-9_-]`. Every boundary that accepts an
//! ID from a client goes through [`VideoId::parse`] so a malformed or
//! truncated ID is rejected before it reaches the ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Length of a platform video identifier.
pub const VIDEO_ID_LEN: usize = 11;

/// Error returned when a string is not a valid platform video ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidVideoId {
    #[error("video id must be {VIDEO_ID_LEN} characters, got {0}")]
    WrongLength(usize),

    #[error("video id contains invalid character '{0}'")]
    BadCharacter(char),
}

/// Validated identifier for a video in the curated catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct VideoId(String);

impl VideoId {
    /// Parse and validate a platform video ID.
    pub fn parse(s: impl Into<String>) -> Result<Self, InvalidVideoId> {
        let s = s.into();
        if s.len() != VIDEO_ID_LEN {
            return Err(InvalidVideoId::WrongLength(s.len()));
        }
        if let Some(c) = s
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '_' && *c != '-')
        {
            return Err(InvalidVideoId::BadCharacter(c));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for VideoId {
    type Err = InvalidVideoId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for VideoId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_ids() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");

        VideoId::parse("a-b_c123XYZ").unwrap();
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            VideoId::parse("short"),
            Err(InvalidVideoId::WrongLength(5))
        );
        assert!(matches!(
            VideoId::parse("waaaaaaaay-too-long"),
            Err(InvalidVideoId::WrongLength(_))
        ));
    }

    #[test]
    fn rejects_bad_characters() {
        assert_eq!(
            VideoId::parse("dQw4w9WgXc!"),
            Err(InvalidVideoId::BadCharacter('!'))
        );
        assert_eq!(
            VideoId::parse("dQw4 9WgXcQ"),
            Err(InvalidVideoId::BadCharacter(' '))
        );
    }

    #[test]
    fn serde_round_trip_validates() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: VideoId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);

        let bad: Result<VideoId, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
