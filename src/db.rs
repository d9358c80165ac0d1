use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_document};
use mongodb::options::{ClientOptions, UpdateOptions};
use mongodb::{Client, Collection};

use crate::config::DatabaseConfig;
use crate::error::{StoreError, StoreResult};
use crate::model::*;
use crate::store::Store;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// MongoDB-backed store. The driver's client pools connections and is safe
/// to share across requests.
pub struct Database {
    works: Collection<WorkDocument>,
    chapters: Collection<ChapterDocument>,
    bookmarks: Collection<BookmarkDocument>,
}

impl Database {
    /// Connects and pings once. There is no reconnect logic past this check.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(&cfg.uri)
            .await
            .context("invalid mongodb uri")?;
        options.app_name = Some("ranoberead".to_string());
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);

        let client = Client::with_options(options)?;
        let db = client.database(&cfg.name);
        db.run_command(doc! { "ping": 1 }, None)
            .await
            .context("failed to ping mongodb")?;

        tracing::info!(database = %cfg.name, "connected to mongodb");

        Ok(Database {
            works: db.collection(WORKS_COLLECTION),
            chapters: db.collection(CHAPTERS_COLLECTION),
            bookmarks: db.collection(BOOKMARKS_COLLECTION),
        })
    }

    fn upsert() -> UpdateOptions {
        UpdateOptions::builder().upsert(true).build()
    }
}

#[async_trait]
impl Store for Database {
    async fn list_works(&self) -> StoreResult<Vec<WorkDocument>> {
        let cursor = self.works.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn get_work(&self, id: ObjectId) -> StoreResult<Option<WorkDocument>> {
        Ok(self.works.find_one(doc! { "_id": id }, None).await?)
    }

    async fn insert_work(&self, title: &str) -> StoreResult<WorkDocument> {
        let mut work = WorkDocument {
            id: None,
            title: title.to_owned(),
        };
        let result = self.works.insert_one(&work, None).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Malformed(format!("inserted id {}", result.inserted_id)))?;
        work.id = Some(id);
        Ok(work)
    }

    async fn delete_work(&self, id: ObjectId) -> StoreResult<()> {
        let result = self.works.delete_one(doc! { "_id": id }, None).await?;
        tracing::debug!(id = %id, deleted = result.deleted_count, "deleted ranobe");
        Ok(())
    }

    async fn list_chapters(&self, ranobe_id: ObjectId) -> StoreResult<Vec<ChapterDocument>> {
        let cursor = self
            .chapters
            .find(doc! { "ranobe_id": ranobe_id }, None)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn get_chapter(
        &self,
        ranobe_id: ObjectId,
        chapter_id: i64,
    ) -> StoreResult<Option<ChapterDocument>> {
        let filter = doc! { "ranobe_id": ranobe_id, "chapter_id": chapter_id };
        Ok(self.chapters.find_one(filter, None).await?)
    }

    async fn upsert_chapter(&self, chapter: &ChapterDocument) -> StoreResult<()> {
        let mut fields = to_document(chapter)?;
        // _id is immutable on an existing document
        fields.remove("_id");

        let filter = doc! { "ranobe_id": chapter.ranobe_id, "chapter_id": chapter.chapter_id };
        let result = self
            .chapters
            .update_one(filter, doc! { "$set": fields }, Self::upsert())
            .await?;
        tracing::debug!(
            matched = result.matched_count,
            upserted = result.upserted_id.is_some(),
            "upserted chapter"
        );
        Ok(())
    }

    async fn update_translation(
        &self,
        ranobe_id: ObjectId,
        chapter_id: i64,
        translation: &TranslationUpdate,
    ) -> StoreResult<bool> {
        let filter = doc! { "ranobe_id": ranobe_id, "chapter_id": chapter_id };
        let update = doc! {
            "$set": {
                "title_ru": translation.title_ru.clone(),
                "content_ru": translation.content_ru.clone(),
            }
        };
        let result = self.chapters.update_one(filter, update, None).await?;
        Ok(result.matched_count > 0)
    }

    async fn list_bookmarks(&self) -> StoreResult<Vec<BookmarkDocument>> {
        let cursor = self.bookmarks.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn upsert_bookmark(&self, ranobe_id: ObjectId, chapter_id: i64) -> StoreResult<()> {
        self.bookmarks
            .update_one(
                doc! { "ranobe_id": ranobe_id },
                doc! { "$set": { "chapter_id": chapter_id } },
                Self::upsert(),
            )
            .await?;
        Ok(())
    }
}
