//! `reqwest` implementation of [`BookApi`] against the `/books` endpoints.

use async_trait::async_trait;
use bookshelf_app::{Book, BookInput, FieldError};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::api::{ApiError, BookApi};

/// Error envelope written by the server for every non-2xx response
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

pub struct HttpBookClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBookClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn books_url(&self) -> Result<Url, ApiError> {
        self.url_for(&["books"])
    }

    /// `id` is pushed as one encoded segment, so `/`, `?` and `#` stay part of it.
    fn book_url(&self, id: &str) -> Result<Url, ApiError> {
        if id.is_empty() {
            return Err(ApiError::NotFound("book '' not found".to_string()));
        }
        self.url_for(&["books", id])
    }

    fn url_for(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let invalid = || ApiError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl BookApi for HttpBookClient {
    async fn list(&self) -> Result<Vec<Book>, ApiError> {
        let response = self.http.get(self.books_url()?).send().await?;
        read_json(response).await
    }

    async fn get(&self, id: &str) -> Result<Book, ApiError> {
        let response = self.http.get(self.book_url(id)?).send().await?;
        read_json(response).await
    }

    async fn create(&self, input: &BookInput) -> Result<Book, ApiError> {
        let response = self.http.post(self.books_url()?).json(input).send().await?;
        read_json(response).await
    }

    async fn update(&self, id: &str, input: &BookInput) -> Result<Book, ApiError> {
        let response = self.http.put(self.book_url(id)?).json(input).send().await?;
        read_json(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self.http.delete(self.book_url(id)?).send().await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(read_error(response).await)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if response.status().is_success() {
        return Ok(response.json::<T>().await?);
    }
    Err(read_error(response).await)
}

async fn read_error(response: Response) -> ApiError {
    let status = response.status();
    let url = response.url().clone();
    let text = match response.text().await {
        Ok(text) => text,
        Err(err) => return ApiError::Transport(err),
    };

    tracing::debug!(status = status.as_u16(), body = %text, "book store returned an error");

    match serde_json::from_str::<ErrorEnvelope>(&text) {
        Ok(envelope) => classify(status, envelope.error),
        // No route matched on the server, e.g. an empty id
        Err(_) if status == StatusCode::NOT_FOUND => {
            ApiError::NotFound(format!("nothing at {}", url.path()))
        }
        Err(_) => ApiError::Unexpected {
            status: status.as_u16(),
            message: text,
        },
    }
}

fn classify(status: StatusCode, body: ErrorBody) -> ApiError {
    match (status, body.code.as_str()) {
        (_, "validation_error") => ApiError::ValidationFailed(field_errors(&body.details)),
        (StatusCode::NOT_FOUND, _) => ApiError::NotFound(body.message),
        (StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE, _) => {
            ApiError::StorageUnavailable(body.message)
        }
        (StatusCode::BAD_REQUEST, _) => ApiError::BadRequest(body.message),
        _ => ApiError::Unexpected {
            status: status.as_u16(),
            message: body.message,
        },
    }
}

fn field_errors(details: &[serde_json::Value]) -> Vec<FieldError> {
    details
        .iter()
        .filter_map(|detail| serde_json::from_value::<FieldError>(detail.clone()).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(code: &str, message: &str, details: Vec<serde_json::Value>) -> ErrorBody {
        ErrorBody {
            code: code.to_string(),
            message: message.to_string(),
            details,
        }
    }

    #[test]
    fn validation_details_become_field_errors() {
        let err = classify(
            StatusCode::BAD_REQUEST,
            body(
                "validation_error",
                "book is invalid",
                vec![
                    json!({"field": "title", "error": "required"}),
                    json!("not a field error"),
                ],
            ),
        );

        match err {
            ApiError::ValidationFailed(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "title");
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn status_codes_map_to_conditions() {
        assert!(matches!(
            classify(StatusCode::NOT_FOUND, body("not_found", "gone", vec![])),
            ApiError::NotFound(message) if message == "gone"
        ));
        assert!(matches!(
            classify(
                StatusCode::SERVICE_UNAVAILABLE,
                body("storage_unavailable", "down", vec![])
            ),
            ApiError::StorageUnavailable(_)
        ));
        assert!(matches!(
            classify(StatusCode::BAD_REQUEST, body("bad_request", "junk", vec![])),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            classify(StatusCode::IM_A_TEAPOT, body("teapot", "short", vec![])),
            ApiError::Unexpected { status: 418, .. }
        ));
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let client = HttpBookClient::new("http://localhost:8082/");
        assert_eq!(
            client.books_url().unwrap().as_str(),
            "http://localhost:8082/books"
        );
        assert_eq!(
            client.book_url("b-1").unwrap().as_str(),
            "http://localhost:8082/books/b-1"
        );
    }

    #[test]
    fn id_is_one_encoded_path_segment() {
        let client = HttpBookClient::new("http://localhost:8082/api");
        assert_eq!(
            client.book_url("x?y#z").unwrap().as_str(),
            "http://localhost:8082/api/books/x%3Fy%23z"
        );
        assert_eq!(
            client.book_url("a/b").unwrap().as_str(),
            "http://localhost:8082/api/books/a%2Fb"
        );
    }

    #[test]
    fn empty_id_is_not_found_without_a_request() {
        let client = HttpBookClient::new("http://localhost:8082");
        assert!(matches!(client.book_url(""), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn unparsable_base_url_is_reported() {
        let client = HttpBookClient::new("not a url");
        assert!(matches!(
            client.books_url(),
            Err(ApiError::InvalidUrl(url)) if url == "not a url"
        ));
    }
}
