use chrono::{DateTime, Utc};
use mongodb::bson::oid::{self, ObjectId};
use serde::{Deserialize, Serialize};

use crate::model::{BookmarkDocument, ChapterDocument, WorkDocument, zero_id};

fn hex_or_empty(id: Option<ObjectId>) -> String {
    id.map(|id| id.to_hex()).unwrap_or_default()
}

/// A work as returned by the API, with its chapters joined in at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Work {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Chapters", default)]
    pub chapters: Vec<Chapter>,
    /// Set when the chapters of this work could not be loaded.
    #[serde(rename = "ChaptersError", default, skip_serializing_if = "Option::is_none")]
    pub chapters_error: Option<String>,
}

impl Work {
    pub fn new(doc: WorkDocument, chapters: Vec<ChapterDocument>) -> Self {
        Work {
            id: hex_or_empty(doc.id),
            title: doc.title,
            chapters: chapters.into_iter().map(Chapter::from).collect(),
            chapters_error: None,
        }
    }

    pub fn without_chapters(doc: WorkDocument, reason: &str) -> Self {
        Work {
            chapters_error: Some(reason.to_owned()),
            ..Work::new(doc, vec![])
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chapter {
    pub id: String,
    pub ranobe_id: String,
    pub chapter_id: i64,
    pub chapter_number_origin: i64,
    pub title_ru: String,
    pub title_en: String,
    pub content_ru: String,
    pub content_en: String,
}

impl Chapter {
    /// An empty reference is accepted and stored as the zero id.
    pub fn parse_ranobe_id(&self) -> Result<ObjectId, oid::Error> {
        if self.ranobe_id.is_empty() {
            return Ok(zero_id());
        }
        ObjectId::parse_str(&self.ranobe_id)
    }

    pub fn to_document(&self, ranobe_id: ObjectId) -> ChapterDocument {
        ChapterDocument {
            id: None,
            ranobe_id,
            chapter_id: self.chapter_id,
            chapter_number_origin: self.chapter_number_origin,
            title_ru: self.title_ru.clone(),
            title_en: self.title_en.clone(),
            content_ru: self.content_ru.clone(),
            content_en: self.content_en.clone(),
        }
    }
}

impl From<ChapterDocument> for Chapter {
    fn from(doc: ChapterDocument) -> Self {
        Chapter {
            id: hex_or_empty(doc.id),
            ranobe_id: doc.ranobe_id.to_hex(),
            chapter_id: doc.chapter_id,
            chapter_number_origin: doc.chapter_number_origin,
            title_ru: doc.title_ru,
            title_en: doc.title_en,
            content_ru: doc.content_ru,
            content_en: doc.content_en,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "RanobeID")]
    pub ranobe_id: String,
    #[serde(rename = "ChapterID")]
    pub chapter_id: i64,
    #[serde(rename = "CreatedAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<BookmarkDocument> for Bookmark {
    fn from(doc: BookmarkDocument) -> Self {
        Bookmark {
            id: hex_or_empty(doc.id),
            ranobe_id: doc.ranobe_id.to_hex(),
            chapter_id: doc.chapter_id,
            created_at: doc.created_at.map(|t| t.to_chrono()),
            updated_at: doc.updated_at.map(|t| t.to_chrono()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkRequest {
    pub title: String,
}

impl CreateWorkRequest {
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct BookmarkRequest {
    pub ranobe_id: String,
    pub chapter_id: i64,
}

impl BookmarkRequest {
    /// Both fields are required: a malformed or zero work id, or a zero
    /// chapter, yields `None`.
    pub fn key(&self) -> Option<(ObjectId, i64)> {
        let ranobe_id = ObjectId::parse_str(&self.ranobe_id).ok()?;
        if ranobe_id == zero_id() || self.chapter_id == 0 {
            return None;
        }
        Some((ranobe_id, self.chapter_id))
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
