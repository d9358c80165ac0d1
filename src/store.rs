//! Persistence handle
//!
//! Handlers only talk to the [`Store`] trait. The process builds one
//! implementation at startup and hands it to the router through
//! [`AppState`](crate::handler::AppState):
//!
//! - [`Database`](crate::db::Database) for MongoDB
//! - [`MemoryStore`] for tests and local runs without a database
//!
//! No operation spans more than one document, and nothing here retries.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::model::{BookmarkDocument, ChapterDocument, TranslationUpdate, WorkDocument};

#[async_trait]
pub trait Store: Send + Sync {
    async fn list_works(&self) -> StoreResult<Vec<WorkDocument>>;

    async fn get_work(&self, id: ObjectId) -> StoreResult<Option<WorkDocument>>;

    /// Inserts a new work and returns it with its generated id.
    async fn insert_work(&self, title: &str) -> StoreResult<WorkDocument>;

    /// Deletes the work if present. Chapters and bookmarks are left alone.
    async fn delete_work(&self, id: ObjectId) -> StoreResult<()>;

    async fn list_chapters(&self, ranobe_id: ObjectId) -> StoreResult<Vec<ChapterDocument>>;

    async fn get_chapter(
        &self,
        ranobe_id: ObjectId,
        chapter_id: i64,
    ) -> StoreResult<Option<ChapterDocument>>;

    /// Overwrites the chapter matching `(ranobe_id, chapter_id)` or inserts it.
    async fn upsert_chapter(&self, chapter: &ChapterDocument) -> StoreResult<()>;

    /// Returns `false` when no chapter matched. Never inserts.
    async fn update_translation(
        &self,
        ranobe_id: ObjectId,
        chapter_id: i64,
        translation: &TranslationUpdate,
    ) -> StoreResult<bool>;

    async fn list_bookmarks(&self) -> StoreResult<Vec<BookmarkDocument>>;

    /// Keyed by work alone: a work holds at most one bookmark.
    async fn upsert_bookmark(&self, ranobe_id: ObjectId, chapter_id: i64) -> StoreResult<()>;
}

#[derive(Debug, Default)]
struct Collections {
    works: Vec<WorkDocument>,
    chapters: Vec<ChapterDocument>,
    bookmarks: Vec<BookmarkDocument>,
}

/// Keeps every collection in insertion order, the way a fresh MongoDB
/// collection returns documents without a sort.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_works(&self) -> StoreResult<Vec<WorkDocument>> {
        Ok(self.inner.read().await.works.clone())
    }

    async fn get_work(&self, id: ObjectId) -> StoreResult<Option<WorkDocument>> {
        let inner = self.inner.read().await;
        Ok(inner.works.iter().find(|w| w.id == Some(id)).cloned())
    }

    async fn insert_work(&self, title: &str) -> StoreResult<WorkDocument> {
        let work = WorkDocument {
            id: Some(ObjectId::new()),
            title: title.to_owned(),
        };
        self.inner.write().await.works.push(work.clone());
        Ok(work)
    }

    async fn delete_work(&self, id: ObjectId) -> StoreResult<()> {
        self.inner.write().await.works.retain(|w| w.id != Some(id));
        Ok(())
    }

    async fn list_chapters(&self, ranobe_id: ObjectId) -> StoreResult<Vec<ChapterDocument>> {
        let inner = self.inner.read().await;
        Ok(inner
            .chapters
            .iter()
            .filter(|c| c.ranobe_id == ranobe_id)
            .cloned()
            .collect())
    }

    async fn get_chapter(
        &self,
        ranobe_id: ObjectId,
        chapter_id: i64,
    ) -> StoreResult<Option<ChapterDocument>> {
        let inner = self.inner.read().await;
        Ok(inner
            .chapters
            .iter()
            .find(|c| c.ranobe_id == ranobe_id && c.chapter_id == chapter_id)
            .cloned())
    }

    async fn upsert_chapter(&self, chapter: &ChapterDocument) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let existing = inner
            .chapters
            .iter_mut()
            .find(|c| c.ranobe_id == chapter.ranobe_id && c.chapter_id == chapter.chapter_id);

        match existing {
            Some(stored) => {
                let id = stored.id;
                *stored = ChapterDocument {
                    id,
                    ..chapter.clone()
                };
            }
            None => inner.chapters.push(ChapterDocument {
                id: Some(ObjectId::new()),
                ..chapter.clone()
            }),
        }
        Ok(())
    }

    async fn update_translation(
        &self,
        ranobe_id: ObjectId,
        chapter_id: i64,
        translation: &TranslationUpdate,
    ) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let Some(chapter) = inner
            .chapters
            .iter_mut()
            .find(|c| c.ranobe_id == ranobe_id && c.chapter_id == chapter_id)
        else {
            return Ok(false);
        };

        chapter.title_ru = translation.title_ru.clone();
        chapter.content_ru = translation.content_ru.clone();
        Ok(true)
    }

    async fn list_bookmarks(&self) -> StoreResult<Vec<BookmarkDocument>> {
        Ok(self.inner.read().await.bookmarks.clone())
    }

    async fn upsert_bookmark(&self, ranobe_id: ObjectId, chapter_id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        match inner.bookmarks.iter_mut().find(|b| b.ranobe_id == ranobe_id) {
            Some(bookmark) => bookmark.chapter_id = chapter_id,
            None => inner.bookmarks.push(BookmarkDocument {
                id: Some(ObjectId::new()),
                ranobe_id,
                chapter_id,
                created_at: None,
                updated_at: None,
            }),
        }
        Ok(())
    }
}
