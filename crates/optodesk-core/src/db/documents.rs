//! Generic document operations, keyed by collection and id.

use std::fmt;

use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{Database, DbError, DbResult};

/// Document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    Patients,
    Bills,
    /// Dropdown option sources for the general table
    Data,
    /// Systemic condition sets
    HealthData,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Patients,
        Collection::Bills,
        Collection::Data,
        Collection::HealthData,
    ];

    /// Collection name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Patients => "patients",
            Collection::Bills => "bills",
            Collection::Data => "data",
            Collection::HealthData => "healthData",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document read back from the store, with its id.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<T> {
    pub id: String,
    pub data: T,
    pub created_at: String,
    pub updated_at: String,
}

impl<T> Stored<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Stored<U> {
        Stored {
            id: self.id,
            data: f(self.data),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Intermediate row struct for database mapping.
struct DocumentRow {
    id: String,
    body: String,
    created_at: String,
    updated_at: String,
}

impl DocumentRow {
    fn decode<T: DeserializeOwned>(self) -> DbResult<Stored<T>> {
        Ok(Stored {
            data: serde_json::from_str(&self.body)?,
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl Database {
    /// Add a document, returning its generated id.
    pub fn add_document<T: Serialize>(&self, collection: Collection, doc: &T) -> DbResult<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let body = serde_json::to_string(doc)?;

        self.conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)",
            params![collection.as_str(), id, body],
        )?;

        tracing::debug!(event = "core.store.add_completed", collection = %collection, id = %id);
        Ok(id)
    }

    /// Get a document by id.
    pub fn get_document<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
    ) -> DbResult<Option<Stored<T>>> {
        self.conn
            .query_row(
                r#"
                SELECT id, body, created_at, updated_at
                FROM documents
                WHERE collection = ?1 AND id = ?2
                "#,
                params![collection.as_str(), id],
                |row| {
                    Ok(DocumentRow {
                        id: row.get(0)?,
                        body: row.get(1)?,
                        created_at: row.get(2)?,
                        updated_at: row.get(3)?,
                    })
                },
            )
            .optional()?
            .map(DocumentRow::decode)
            .transpose()
    }

    /// List every document of a collection in insertion order.
    pub fn list_documents<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> DbResult<Vec<Stored<T>>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, body, created_at, updated_at
            FROM documents
            WHERE collection = ?
            ORDER BY seq
            "#,
        )?;

        let rows = stmt.query_map([collection.as_str()], |row| {
            Ok(DocumentRow {
                id: row.get(0)?,
                body: row.get(1)?,
                created_at: row.get(2)?,
                updated_at: row.get(3)?,
            })
        })?;

        let mut docs = Vec::new();
        for row in rows {
            docs.push(row?.decode()?);
        }
        Ok(docs)
    }

    /// Replace a document body. Returns false if the id is unknown.
    pub fn update_document<T: Serialize>(
        &self,
        collection: Collection,
        id: &str,
        doc: &T,
    ) -> DbResult<bool> {
        let body = serde_json::to_string(doc)?;
        let rows_affected = self.conn.execute(
            r#"
            UPDATE documents SET
                body = ?3,
                updated_at = datetime('now')
            WHERE collection = ?1 AND id = ?2
            "#,
            params![collection.as_str(), id, body],
        )?;

        tracing::debug!(
            event = "core.store.update_completed",
            collection = %collection,
            id = %id,
            found = rows_affected > 0
        );
        Ok(rows_affected > 0)
    }

    /// Delete a document. Returns false if the id is unknown.
    pub fn delete_document(&self, collection: Collection, id: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection.as_str(), id],
        )?;

        tracing::debug!(
            event = "core.store.delete_completed",
            collection = %collection,
            id = %id,
            found = rows_affected > 0
        );
        Ok(rows_affected > 0)
    }

    /// Number of documents in a collection.
    pub fn count_documents(&self, collection: Collection) -> DbResult<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?",
            [collection.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Get a document that must exist.
    pub fn require_document<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
    ) -> DbResult<Stored<T>> {
        self.get_document(collection, id)?
            .ok_or_else(|| DbError::NotFound(format!("{}/{}", collection, id)))
    }
}
