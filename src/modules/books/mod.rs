pub mod models;
pub mod repository;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Migration, Module};
use serde_json::json;

use repository::SqliteBookRepository;
use store::BookStore;

/// Books module: CRUD over the catalog, backed by an injected [`BookStore`]
pub struct BooksModule {
    store: BookStore,
}

impl BooksModule {
    pub fn new(store: BookStore) -> Self {
        Self { store }
    }
}

/// Schema owned by the books module
pub fn migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_init",
        up: r#"
            CREATE TABLE IF NOT EXISTS books (
                id          TEXT PRIMARY KEY NOT NULL,
                title       TEXT NOT NULL CHECK (title <> ''),
                author      TEXT NOT NULL CHECK (author <> ''),
                description TEXT,
                created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            "#,
    }]
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let book_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Book" }
                    }
                }
            })
        };
        let book_input_body = json!({
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/BookInput" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "All books in insertion order",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "503": error_response("Storage unavailable")
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": book_input_body.clone(),
                        "responses": {
                            "201": book_response("Created book"),
                            "400": error_response("Missing title or author"),
                            "503": error_response("Storage unavailable")
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Show a book",
                        "tags": ["Books"],
                        "responses": {
                            "200": book_response("The book"),
                            "404": error_response("Book not found"),
                            "503": error_response("Storage unavailable")
                        }
                    },
                    "put": {
                        "summary": "Replace a book's title, author and description",
                        "tags": ["Books"],
                        "requestBody": book_input_body,
                        "responses": {
                            "200": book_response("Updated book"),
                            "400": error_response("Missing title or author"),
                            "404": error_response("Book not found"),
                            "503": error_response("Storage unavailable")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "responses": {
                            "204": { "description": "Deleted" },
                            "404": error_response("Book not found"),
                            "503": error_response("Storage unavailable")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "description": "Unique identifier for the book"
                            },
                            "title": {
                                "type": "string",
                                "description": "Title of the book"
                            },
                            "author": {
                                "type": "string",
                                "description": "Author of the book"
                            },
                            "description": {
                                "type": "string",
                                "description": "Optional description"
                            }
                        },
                        "required": ["id", "title", "author"]
                    },
                    "BookInput": {
                        "type": "object",
                        "properties": {
                            "title": {
                                "type": "string",
                                "description": "Title of the book, must not be blank"
                            },
                            "author": {
                                "type": "string",
                                "description": "Author of the book, must not be blank"
                            },
                            "description": {
                                "type": "string",
                                "description": "Optional description"
                            }
                        },
                        "required": ["title", "author"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        migrations()
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create the books module over a SQLite pool
pub fn create_module(pool: sqlx::SqlitePool) -> Arc<dyn Module> {
    let store = BookStore::new(Arc::new(SqliteBookRepository::new(pool)));
    Arc::new(BooksModule::new(store))
}
