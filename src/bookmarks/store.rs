use anyhow::Result;
use libsql::Connection;

use crate::model::{Bookmark, BookmarkPatch, NewBookmark};

const COLUMNS: &str = "id, title, url, description, rating";

/// Row-level access to the `bookmarks` table. Holds no state of its own;
/// callers construct one per request from the shared connection.
pub struct Bookmarks<'a> {
    conn: &'a Connection,
}

impl<'a> Bookmarks<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<Bookmark>> {
        let query = format!("SELECT {COLUMNS} FROM bookmarks ORDER BY id");

        let mut rows = self.conn.query(&query, ()).await?;
        let mut bookmarks = Vec::new();

        while let Some(row) = rows.next().await? {
            bookmarks.push(self.row_to_bookmark(&row)?);
        }

        Ok(bookmarks)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>> {
        let query = format!("SELECT {COLUMNS} FROM bookmarks WHERE id = ?");

        let mut rows = self.conn.query(&query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(self.row_to_bookmark(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn insert(&self, input: NewBookmark) -> Result<Bookmark> {
        let query = format!(
            "INSERT INTO bookmarks (title, url, description, rating) VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
        );

        let mut rows = self
            .conn
            .query(
                &query,
                libsql::params![input.title, input.url, input.description, input.rating],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(self.row_to_bookmark(&row)?)
        } else {
            anyhow::bail!("Failed to create bookmark")
        }
    }

    /// Returns whether a row was actually removed.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let result = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?", libsql::params![id])
            .await?;
        Ok(result > 0)
    }

    /// Writes the supplied columns and returns the affected-row count.
    ///
    /// An empty patch never reaches the store and reports 0.
    pub async fn update_by_id(&self, id: i64, patch: BookmarkPatch) -> Result<u64> {
        let mut updates = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(title) = patch.title {
            updates.push("title = ?");
            params.push(title.into());
        }
        if let Some(url) = patch.url {
            updates.push("url = ?");
            params.push(url.into());
        }
        if let Some(description) = patch.description {
            updates.push("description = ?");
            params.push(description.into());
        }
        if let Some(rating) = patch.rating {
            updates.push("rating = ?");
            params.push(rating.into());
        }

        if updates.is_empty() {
            return Ok(0);
        }

        params.push(id.into());
        let query = format!("UPDATE bookmarks SET {} WHERE id = ?", updates.join(", "));

        Ok(self.conn.execute(&query, params).await?)
    }

    fn row_to_bookmark(&self, row: &libsql::Row) -> Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            description: row.get(3)?,
            rating: row.get(4)?,
        })
    }
}
