use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::models::{Book, BookDraft};

/// Storage for books. Implementations own id generation.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Every stored book, in insertion order
    async fn all(&self) -> Result<Vec<Book>>;
    async fn find(&self, id: &str) -> Result<Option<Book>>;
    async fn insert(&self, draft: &BookDraft) -> Result<Book>;
    /// `None` when no book has this id
    async fn replace(&self, id: &str, draft: &BookDraft) -> Result<Option<Book>>;
    /// `false` when no book has this id
    async fn remove(&self, id: &str) -> Result<bool>;
}

/// Row shape of the `books` table.
#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    id: String,
    title: String,
    author: String,
    description: Option<String>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            title: row.title,
            author: row.author,
            description: row.description,
        }
    }
}

pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn all(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            "SELECT id, title, author, description FROM books ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list books")?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            "SELECT id, title, author, description FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("failed to load book {}", id))?;

        Ok(row.map(Book::from))
    }

    async fn insert(&self, draft: &BookDraft) -> Result<Book> {
        let id = Uuid::now_v7().to_string();

        sqlx::query("INSERT INTO books (id, title, author, description) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(&draft.title)
            .bind(&draft.author)
            .bind(&draft.description)
            .execute(&self.pool)
            .await
            .context("failed to insert book")?;

        Ok(Book {
            id,
            title: draft.title.clone(),
            author: draft.author.clone(),
            description: draft.description.clone(),
        })
    }

    async fn replace(&self, id: &str, draft: &BookDraft) -> Result<Option<Book>> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?, author = ?, description = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.description)
        .bind(id)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to update book {}", id))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Book {
            id: id.to_string(),
            title: draft.title.clone(),
            author: draft.author.clone(),
            description: draft.description.clone(),
        }))
    }

    async fn remove(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete book {}", id))?;

        Ok(result.rows_affected() > 0)
    }
}
