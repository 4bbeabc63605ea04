//! Episode types
//!
//! `EpisodeRecord` is the raw shape served by the content API. It is mapped
//! into an `EpisodeListing` for lists and an `Episode` for the player.

use crate::error::{CoreError, Result};
use crate::format::{format_duration, format_published_at};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

/// A playable episode
///
/// Immutable once loaded into the player. Episodes carry no identity of their
/// own: the player tells them apart by position inside a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode title
    pub title: String,

    /// Hosts and guests, as one display string
    pub members: String,

    /// Cover image
    pub thumbnail: Url,

    /// Length in whole seconds
    pub duration: u64,

    /// Audio stream
    pub url: Url,
}

impl Episode {
    /// Create a new episode
    pub fn new(
        title: impl Into<String>,
        members: impl Into<String>,
        thumbnail: Url,
        duration: u64,
        url: Url,
    ) -> Self {
        Self {
            title: title.into(),
            members: members.into(),
            thumbnail,
            duration,
            url,
        }
    }
}

/// Audio file attached to a raw record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeFile {
    /// Audio URL (validated on conversion)
    pub url: String,

    /// MIME type, when the API provides one
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Length in seconds; the API serves either a number or a numeric string
    #[serde(deserialize_with = "seconds_from_number_or_string")]
    pub duration: u64,
}

/// Raw episode record as served by the content API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// API identifier (slug)
    pub id: String,

    /// Episode title
    pub title: String,

    /// Hosts and guests
    pub members: String,

    /// Publish timestamp, RFC 3339 or `YYYY-MM-DD HH:MM:SS` (UTC)
    pub published_at: String,

    /// Cover image URL (validated on conversion)
    pub thumbnail: String,

    /// Show notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Attached audio file
    pub file: EpisodeFile,
}

impl EpisodeRecord {
    /// Parse the publish timestamp
    pub fn published_at(&self) -> Result<DateTime<Utc>> {
        parse_published_at(&self.published_at)
            .ok_or_else(|| CoreError::invalid_record(&self.id, "unparseable published_at"))
    }
}

impl TryFrom<&EpisodeRecord> for Episode {
    type Error = CoreError;

    fn try_from(record: &EpisodeRecord) -> Result<Self> {
        let thumbnail = Url::parse(&record.thumbnail)
            .map_err(|e| CoreError::invalid_record(&record.id, format!("thumbnail: {}", e)))?;
        let url = Url::parse(&record.file.url)
            .map_err(|e| CoreError::invalid_record(&record.id, format!("file url: {}", e)))?;

        Ok(Episode {
            title: record.title.clone(),
            members: record.members.clone(),
            thumbnail,
            duration: record.file.duration,
            url,
        })
    }
}

/// One row of an episode list
///
/// Carries the playable episode plus the labels a list renders next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeListing {
    /// API identifier (slug)
    pub id: String,

    /// The playable episode
    pub episode: Episode,

    /// Publish timestamp
    pub published_at: DateTime<Utc>,

    /// Short publish date (`8 Jan 21`)
    pub published_label: String,

    /// Length as `HH:MM:SS`
    pub duration_label: String,
}

impl TryFrom<EpisodeRecord> for EpisodeListing {
    type Error = CoreError;

    fn try_from(record: EpisodeRecord) -> Result<Self> {
        let episode = Episode::try_from(&record)?;
        let published_at = record.published_at()?;

        Ok(EpisodeListing {
            published_label: format_published_at(&published_at),
            duration_label: format_duration(episode.duration),
            id: record.id,
            episode,
            published_at,
        })
    }
}

/// Parse RFC 3339, falling back to a naive `YYYY-MM-DD HH:MM:SS` taken as UTC
pub(crate) fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn seconds_from_number_or_string<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Number(u64),
        Text(String),
    }

    match Seconds::deserialize(deserializer)? {
        Seconds::Number(seconds) => Ok(seconds),
        Seconds::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_record(id: &str) -> EpisodeRecord {
        EpisodeRecord {
            id: id.to_string(),
            title: format!("Episode {}", id),
            members: "Diego e Richard".to_string(),
            published_at: "2021-01-08 16:00:00".to_string(),
            thumbnail: format!("https://cdn.example.com/{}.jpg", id),
            description: None,
            file: EpisodeFile {
                url: format!("https://cdn.example.com/{}.m4a", id),
                mime_type: Some("audio/x-m4a".to_string()),
                duration: 3981,
            },
        }
    }

    #[test]
    fn record_maps_to_episode() {
        let record = create_test_record("a-importancia-da-contribuicao");
        let episode = Episode::try_from(&record).unwrap();

        assert_eq!(episode.title, "Episode a-importancia-da-contribuicao");
        assert_eq!(episode.duration, 3981);
        assert_eq!(
            episode.url.as_str(),
            "https://cdn.example.com/a-importancia-da-contribuicao.m4a"
        );
    }

    #[test]
    fn listing_carries_labels() {
        let listing = EpisodeListing::try_from(create_test_record("ep1")).unwrap();

        assert_eq!(listing.id, "ep1");
        assert_eq!(listing.duration_label, "01:06:21");
        assert_eq!(listing.published_label, "8 Jan 21");
        assert_eq!(
            listing.published_at,
            Utc.with_ymd_and_hms(2021, 1, 8, 16, 0, 0).unwrap()
        );
    }

    #[test]
    fn invalid_audio_url_is_rejected() {
        let mut record = create_test_record("broken");
        record.file.url = "not a url".to_string();

        let err = Episode::try_from(&record).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecord { ref id, .. } if id == "broken"));
    }

    #[test]
    fn invalid_published_at_is_rejected() {
        let mut record = create_test_record("late");
        record.published_at = "yesterday".to_string();

        assert!(EpisodeListing::try_from(record).is_err());
    }

    #[test]
    fn published_at_accepts_rfc3339() {
        let parsed = parse_published_at("2021-01-08T16:00:00-03:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2021, 1, 8, 19, 0, 0).unwrap());
    }

    #[test]
    fn duration_accepts_numeric_string() {
        let json = r#"{
            "id": "ep2",
            "title": "Como virar lead dev",
            "members": "Tiago, Diego e Pellizzetti",
            "published_at": "2021-01-14 16:00:00",
            "thumbnail": "https://cdn.example.com/ep2.jpg",
            "file": { "url": "https://cdn.example.com/ep2.m4a", "type": "audio/x-m4a", "duration": "2245" }
        }"#;

        let record: EpisodeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.file.duration, 2245);
        assert_eq!(record.file.mime_type.as_deref(), Some("audio/x-m4a"));
        assert!(record.description.is_none());
    }

    #[test]
    fn duration_rejects_non_numeric_string() {
        let json = r#"{ "url": "https://cdn.example.com/x.m4a", "duration": "long" }"#;
        assert!(serde_json::from_str::<EpisodeFile>(json).is_err());
    }
}
