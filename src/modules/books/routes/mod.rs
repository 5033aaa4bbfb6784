//! HTTP handlers for the books module, mounted under `/books`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bookshelf_http::error::AppError;
use serde_json::json;

use super::models::{Book, BookInput};
use super::store::{BookError, BookStore};

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::ValidationFailed(fields) => {
                let details = fields
                    .iter()
                    .map(|f| json!({ "field": f.field, "error": f.error }))
                    .collect();
                AppError::validation(details, "book is invalid")
            }
            BookError::NotFound(id) => AppError::not_found(format!("book '{}' not found", id)),
            BookError::StorageUnavailable(source) => {
                AppError::unavailable(format!("{:#}", source))
            }
        }
    }
}

/// Routes relative to the module mount point
pub fn router(store: BookStore) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/{id}",
            get(show_book).put(update_book).delete(delete_book),
        )
        .with_state(store)
}

async fn list_books(State(store): State<BookStore>) -> Result<Json<Vec<Book>>, AppError> {
    Ok(Json(store.list().await?))
}

async fn show_book(
    State(store): State<BookStore>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(store.get(&id).await?))
}

async fn create_book(
    State(store): State<BookStore>,
    body: Result<Json<BookInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = body.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let book = store.create(&input).await?;
    let location = format!("/books/{}", book.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

async fn update_book(
    State(store): State<BookStore>,
    Path(id): Path<String>,
    body: Result<Json<BookInput>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let Json(input) = body.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    Ok(Json(store.update(&id, &input).await?))
}

async fn delete_book(
    State(store): State<BookStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
