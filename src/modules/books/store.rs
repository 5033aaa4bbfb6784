use std::sync::Arc;

use thiserror::Error;

use super::models::{Book, BookInput, FieldError};
use super::repository::BookRepository;

/// Named failure outcomes of book operations.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("invalid book: {}", describe_fields(.0))]
    ValidationFailed(Vec<FieldError>),

    #[error("book '{0}' not found")]
    NotFound(String),

    #[error("storage unavailable")]
    StorageUnavailable(#[source] anyhow::Error),
}

fn describe_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.error))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Canonical owner of book records.
///
/// Cheap to clone; every clone shares the injected repository.
#[derive(Clone)]
pub struct BookStore {
    repository: Arc<dyn BookRepository>,
}

impl BookStore {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<Book>, BookError> {
        self.repository
            .all()
            .await
            .map_err(BookError::StorageUnavailable)
    }

    pub async fn get(&self, id: &str) -> Result<Book, BookError> {
        self.repository
            .find(id)
            .await
            .map_err(BookError::StorageUnavailable)?
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }

    pub async fn create(&self, input: &BookInput) -> Result<Book, BookError> {
        let draft = input.validate().map_err(BookError::ValidationFailed)?;

        let book = self
            .repository
            .insert(&draft)
            .await
            .map_err(BookError::StorageUnavailable)?;

        tracing::info!(book_id = %book.id, title = %book.title, "book created");
        Ok(book)
    }

    /// Replace title, author and description of an existing book.
    pub async fn update(&self, id: &str, input: &BookInput) -> Result<Book, BookError> {
        let draft = input.validate().map_err(BookError::ValidationFailed)?;

        let book = self
            .repository
            .replace(id, &draft)
            .await
            .map_err(BookError::StorageUnavailable)?
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        tracing::info!(book_id = %book.id, "book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: &str) -> Result<(), BookError> {
        let removed = self
            .repository
            .remove(id)
            .await
            .map_err(BookError::StorageUnavailable)?;

        if !removed {
            return Err(BookError::NotFound(id.to_string()));
        }

        tracing::info!(book_id = %id, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::{self, repository::SqliteBookRepository};
    use bookshelf_kernel::settings::DatabaseSettings;
    use sqlx::SqlitePool;

    async fn test_pool() -> SqlitePool {
        let pool = bookshelf_db::connect(&DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
        .expect("in-memory database");

        let migrations: Vec<_> = books::migrations()
            .into_iter()
            .map(|m| ("books".to_string(), m))
            .collect();
        bookshelf_db::migrate(&pool, &migrations)
            .await
            .expect("books migrations");

        pool
    }

    async fn test_store() -> BookStore {
        BookStore::new(Arc::new(SqliteBookRepository::new(test_pool().await)))
    }

    fn input(title: &str, author: &str, description: Option<&str>) -> BookInput {
        BookInput {
            title: title.to_string(),
            author: author.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn created_book_can_be_fetched() {
        let store = test_store().await;

        let created = store
            .create(&input("Dune", "Herbert", Some("Desert planet")))
            .await
            .unwrap();
        assert!(!created.id.is_empty());

        let fetched = store.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let store = test_store().await;
        let created = store
            .create(&input("Dune", "Herbert", Some("first draft")))
            .await
            .unwrap();

        let updated = store
            .update(&created.id, &input("Dune Messiah", "Frank Herbert", None))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);

        let fetched = store.get(&created.id).await.unwrap();
        assert_eq!(fetched.title, "Dune Messiah");
        assert_eq!(fetched.author, "Frank Herbert");
        assert_eq!(fetched.description, None);
    }

    #[tokio::test]
    async fn deleted_book_is_not_found() {
        let store = test_store().await;
        let created = store.create(&input("Dune", "Herbert", None)).await.unwrap();

        store.delete(&created.id).await.unwrap();

        assert!(matches!(
            store.get(&created.id).await,
            Err(BookError::NotFound(id)) if id == created.id
        ));
        assert!(matches!(
            store.delete(&created.id).await,
            Err(BookError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn invalid_create_persists_nothing() {
        let store = test_store().await;
        store.create(&input("Dune", "Herbert", None)).await.unwrap();

        let err = store.create(&input("", "Herbert", None)).await.unwrap_err();
        match err {
            BookError::ValidationFailed(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "title");
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }

        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_update_leaves_record_untouched() {
        let store = test_store().await;
        let created = store.create(&input("Dune", "Herbert", None)).await.unwrap();

        let err = store
            .update(&created.id, &input("Dune", " ", None))
            .await
            .unwrap_err();
        assert!(matches!(err, BookError::ValidationFailed(_)));
        assert_eq!(store.get(&created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_of_missing_book_is_not_found() {
        let store = test_store().await;
        let err = store
            .update("missing", &input("Dune", "Herbert", None))
            .await
            .unwrap_err();
        assert!(matches!(err, BookError::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = test_store().await;
        let err = store.get("nonexistent-id").await.unwrap_err();
        assert_eq!(err.to_string(), "book 'nonexistent-id' not found");
    }

    #[tokio::test]
    async fn list_is_stable_and_in_insertion_order() {
        let store = test_store().await;
        for title in ["Dune", "Hyperion", "Solaris"] {
            store.create(&input(title, "Someone", None)).await.unwrap();
        }

        let first = store.list().await.unwrap();
        let second = store.list().await.unwrap();
        assert_eq!(first, second);

        let titles: Vec<&str> = first.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Hyperion", "Solaris"]);
    }

    #[tokio::test]
    async fn closed_pool_is_storage_unavailable() {
        let pool = test_pool().await;
        let store = BookStore::new(Arc::new(SqliteBookRepository::new(pool.clone())));
        pool.close().await;

        assert!(matches!(
            store.list().await,
            Err(BookError::StorageUnavailable(_))
        ));
        assert!(matches!(
            store.create(&input("Dune", "Herbert", None)).await,
            Err(BookError::StorageUnavailable(_))
        ));
    }
}
