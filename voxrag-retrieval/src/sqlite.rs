//! SQLite-backed persistent vector store.
//!
//! This module is only available when the `sqlite` feature is enabled.
//! Embeddings are stored as little-endian `f32` BLOBs and metadata as JSON;
//! queries brute-force scan the corpus and sort by cosine distance, which
//! is adequate for the corpus sizes this service targets.
//!
//! The database path is a constructor argument, never a hard-coded
//! location, and the corpus survives process restart.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::document::{Chunk, ChunkMetadata, QueryMatch};
use crate::error::{RagError, Result};
use crate::vectorstore::{cosine_distance, VectorStore};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS chunks (\
    id TEXT PRIMARY KEY, \
    text TEXT NOT NULL, \
    embedding BLOB NOT NULL, \
    metadata TEXT NOT NULL\
)";

/// A persistent [`VectorStore`] backed by SQLite via sqlx.
pub struct SqliteVectorStore {
    pool: SqlitePool,
}

impl SqliteVectorStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(Self::map_err)?;
        sqlx::query(CREATE_TABLE_SQL).execute(&pool).await.map_err(Self::map_err)?;
        Ok(Self { pool })
    }

    /// Open a database from a sqlx connection URL (e.g. `sqlite://voxrag.db`).
    pub async fn connect_url(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(Self::map_err)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(Self::map_err)?;
        sqlx::query(CREATE_TABLE_SQL).execute(&pool).await.map_err(Self::map_err)?;
        Ok(Self { pool })
    }

    fn map_err(e: sqlx::Error) -> RagError {
        RagError::Store { backend: "sqlite".to_string(), message: e.to_string() }
    }

    fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(embedding.len() * 4);
        for value in embedding {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    fn decode_embedding(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect()
    }
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
    async fn add(&self, chunk: &Chunk) -> Result<()> {
        let metadata_json = serde_json::to_string(&chunk.metadata)
            .map_err(|e| RagError::Store { backend: "sqlite".into(), message: e.to_string() })?;

        let result = sqlx::query(
            "INSERT INTO chunks (id, text, embedding, metadata) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&chunk.id)
        .bind(&chunk.text)
        .bind(Self::encode_embedding(&chunk.embedding))
        .bind(&metadata_json)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                    return Err(RagError::DuplicateId(chunk.id.clone()));
                }
                Err(Self::map_err(e))
            }
        }
    }

    async fn query(&self, embedding: &[f32], n: usize) -> Result<Vec<QueryMatch>> {
        let rows = sqlx::query("SELECT text, embedding, metadata FROM chunks")
            .fetch_all(&self.pool)
            .await
            .map_err(Self::map_err)?;

        let mut matches = Vec::with_capacity(rows.len());
        for row in &rows {
            let text: String = row.get("text");
            let blob: Vec<u8> = row.get("embedding");
            let metadata_json: String = row.get("metadata");
            let metadata: ChunkMetadata = serde_json::from_str(&metadata_json).map_err(|e| {
                RagError::Store { backend: "sqlite".into(), message: e.to_string() }
            })?;
            let stored = Self::decode_embedding(&blob);
            matches.push(QueryMatch {
                text,
                distance: cosine_distance(&stored, embedding),
                metadata,
            });
        }

        matches.sort_by(|a, b| {
            a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(n);
        Ok(matches)
    }

    async fn count(&self) -> Result<usize> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM chunks")
            .fetch_one(&self.pool)
            .await
            .map_err(Self::map_err)?;
        let n: i64 = row.get("n");
        Ok(n as usize)
    }

    async fn clear(&self) -> Result<()> {
        // Drop-and-recreate inside one transaction so concurrent queries
        // see either the full corpus or an empty one.
        let mut tx = self.pool.begin().await.map_err(Self::map_err)?;
        sqlx::query("DROP TABLE IF EXISTS chunks")
            .execute(&mut *tx)
            .await
            .map_err(Self::map_err)?;
        sqlx::query(CREATE_TABLE_SQL).execute(&mut *tx).await.map_err(Self::map_err)?;
        tx.commit().await.map_err(Self::map_err)?;
        debug!("cleared chunk corpus");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ChunkMetadata;

    fn chunk(id: &str, embedding: Vec<f32>) -> Chunk {
        Chunk {
            id: id.to_string(),
            text: format!("text for {id}"),
            embedding,
            metadata: ChunkMetadata {
                source: "notes.pdf".into(),
                chunk_index: 0,
                total_chunks: 1,
                total_pages: Some(3),
                chunk_length: Some(11),
            },
        }
    }

    #[tokio::test]
    async fn round_trips_chunks_with_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteVectorStore::connect(dir.path().join("t.db")).await.unwrap();

        store.add(&chunk("a", vec![1.0, 0.0])).await.unwrap();
        let matches = store.query(&[1.0, 0.0], 5).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "text for a");
        assert_eq!(matches[0].metadata.source, "notes.pdf");
        assert_eq!(matches[0].metadata.total_pages, Some(3));
        assert!(matches[0].distance.abs() < 1e-6);
    }

    #[tokio::test]
    async fn orders_by_ascending_distance() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteVectorStore::connect(dir.path().join("t.db")).await.unwrap();

        store.add(&chunk("near", vec![1.0, 0.0])).await.unwrap();
        store.add(&chunk("far", vec![0.0, 1.0])).await.unwrap();

        let matches = store.query(&[1.0, 0.1], 2).await.unwrap();
        assert_eq!(matches[0].text, "text for near");
        assert!(matches[0].distance <= matches[1].distance);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteVectorStore::connect(dir.path().join("t.db")).await.unwrap();

        store.add(&chunk("a", vec![1.0])).await.unwrap();
        let err = store.add(&chunk("a", vec![1.0])).await.unwrap_err();
        assert!(matches!(err, RagError::DuplicateId(_)));
    }

    #[tokio::test]
    async fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist.db");

        {
            let store = SqliteVectorStore::connect(&path).await.unwrap();
            store.add(&chunk("a", vec![1.0, 0.0])).await.unwrap();
        }

        let reopened = SqliteVectorStore::connect(&path).await.unwrap();
        assert_eq!(reopened.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn clear_then_count_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteVectorStore::connect(dir.path().join("t.db")).await.unwrap();

        store.add(&chunk("a", vec![1.0])).await.unwrap();
        store.add(&chunk("b", vec![0.5])).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.query(&[1.0], 5).await.unwrap().is_empty());
    }
}
