//! Song domain models and wire types
//!
//! Wire names follow the public API: the title travels as `song` and the
//! release date as `releaseDate`.

use serde::{Deserialize, Deserializer, Serialize};

/// Persisted song record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Store-assigned identity, immutable after creation
    pub id: i64,
    /// Performer name
    pub group: String,
    /// Song title
    #[serde(rename = "song")]
    pub title: String,
    /// Opaque release date string
    pub release_date: String,
    /// Raw lyric body, may contain escaped `\n` markers
    pub text: String,
    /// Opaque reference URL
    pub link: String,
}

/// Song fields ready to be inserted; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub group: String,
    pub title: String,
    pub release_date: String,
    pub text: String,
    pub link: String,
}

impl NewSong {
    /// Combine a validated add-request with the enriched attributes
    pub fn from_parts(request: AddSongRequest, detail: SongDetail) -> Self {
        Self {
            group: request.group,
            title: request.song,
            release_date: detail.release_date,
            text: detail.text,
            link: detail.link,
        }
    }

    /// Attach the identity assigned by the store
    pub fn with_id(self, id: i64) -> Song {
        Song {
            id,
            group: self.group,
            title: self.title,
            release_date: self.release_date,
            text: self.text,
            link: self.link,
        }
    }
}

/// Incoming request body for adding a song
///
/// Missing fields deserialize as empty strings so validation can report them
/// uniformly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSongRequest {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub song: String,
}

/// Attributes returned by the external song-info lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDetail {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
}

/// Explicit `null` counts as an empty attribute, not a malformed body
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SongDetail {
    /// Names of the attributes that came back empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.release_date.is_empty() {
            missing.push("releaseDate");
        }
        if self.text.is_empty() {
            missing.push("text");
        }
        if self.link.is_empty() {
            missing.push("link");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Incoming request body for updating a song
///
/// Absent or blank fields leave the stored value unchanged. An `id` in the
/// body is ignored; the identity comes from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, rename = "song", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl SongUpdate {
    /// Drop blank values so they are treated the same as absent fields
    ///
    /// `group` and `song` are trimmed the same way an add-request is, so
    /// neither can be updated to a blank value.
    pub fn normalized(self) -> Self {
        fn trimmed(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        fn non_blank(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            group: trimmed(self.group),
            title: trimmed(self.title),
            release_date: non_blank(self.release_date),
            text: non_blank(self.text),
            link: non_blank(self.link),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_wire_names() {
        let song = Song {
            id: 7,
            group: "Muse".to_string(),
            title: "Supermassive Black Hole".to_string(),
            release_date: "16.07.2006".to_string(),
            text: "Ooh baby".to_string(),
            link: "https://example.com".to_string(),
        };

        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["song"], "Supermassive Black Hole");
        assert_eq!(value["releaseDate"], "16.07.2006");
        assert!(value.get("title").is_none());
    }

    #[test]
    fn test_add_request_missing_fields_default_empty() {
        let request: AddSongRequest = serde_json::from_str(r#"{"group":"Muse"}"#).unwrap();
        assert_eq!(request.group, "Muse");
        assert!(request.song.is_empty());
    }

    #[test]
    fn test_song_detail_missing_fields() {
        let detail: SongDetail =
            serde_json::from_str(r#"{"releaseDate":"","text":"la la","link":"x"}"#).unwrap();
        assert_eq!(detail.missing_fields(), vec!["releaseDate"]);
        assert!(!detail.is_complete());

        let empty: SongDetail = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.missing_fields(), vec!["releaseDate", "text", "link"]);
    }

    #[test]
    fn test_song_detail_null_is_missing() {
        let detail: SongDetail =
            serde_json::from_str(r#"{"releaseDate":null,"text":"la la","link":null}"#).unwrap();
        assert_eq!(detail.missing_fields(), vec!["releaseDate", "link"]);
    }

    #[test]
    fn test_update_normalized_drops_blank_strings() {
        let update: SongUpdate = serde_json::from_str(
            r#"{"group":"   ","song":"  Uprising ","text":" \n ","link":" https://x "}"#,
        )
        .unwrap();
        let update = update.normalized();

        assert_eq!(update.group, None);
        assert_eq!(update.title.as_deref(), Some("Uprising"));
        assert_eq!(update.text, None);
        assert_eq!(update.link.as_deref(), Some(" https://x "));
    }

    #[test]
    fn test_update_normalized_drops_empty_strings() {
        let update: SongUpdate =
            serde_json::from_str(r#"{"id":99,"group":"","song":"New title","link":""}"#).unwrap();
        let update = update.normalized();

        assert_eq!(update.group, None);
        assert_eq!(update.title.as_deref(), Some("New title"));
        assert_eq!(update.link, None);
        assert_eq!(update.text, None);
    }

    #[test]
    fn test_new_song_from_parts() {
        let request = AddSongRequest {
            group: "Beatles".to_string(),
            song: "Yesterday".to_string(),
        };
        let detail = SongDetail {
            release_date: "1965-09-13".to_string(),
            text: "Yesterday\\nall my troubles".to_string(),
            link: "https://example.com/yesterday".to_string(),
        };

        let song = NewSong::from_parts(request, detail).with_id(3);
        assert_eq!(song.id, 3);
        assert_eq!(song.title, "Yesterday");
        assert_eq!(song.release_date, "1965-09-13");
    }
}
