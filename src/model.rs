use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

pub const WORKS_COLLECTION: &str = "ranobe";
pub const CHAPTERS_COLLECTION: &str = "chapters";
pub const BOOKMARKS_COLLECTION: &str = "bookmarks";

/// The identifier stored when a chapter arrives without a work reference.
pub fn zero_id() -> ObjectId {
    ObjectId::from_bytes([0; 12])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
}

/// A chapter as stored. `(ranobe_id, chapter_id)` is the natural key used for
/// every lookup and upsert; `id` is only carried along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub ranobe_id: ObjectId,
    pub chapter_id: i64,
    #[serde(default)]
    pub chapter_number_origin: i64,
    #[serde(default)]
    pub title_ru: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub content_ru: String,
    #[serde(default)]
    pub content_en: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub ranobe_id: ObjectId,
    pub chapter_id: i64,
    // never written by the upsert, so usually absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationUpdate {
    #[serde(default)]
    pub title_ru: String,
    #[serde(default)]
    pub content_ru: String,
}
