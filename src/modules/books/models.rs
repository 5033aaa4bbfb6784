use serde::{Deserialize, Serialize};

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier assigned when the book is stored
    pub id: String,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Free-form description, absent when not provided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for creating or replacing a book.
///
/// Missing fields deserialize as empty so that validation, not the JSON
/// extractor, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One offending field of a rejected [`BookInput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

impl FieldError {
    fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            error: "required".to_string(),
        }
    }
}

/// Validated, normalised book fields ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
}

impl BookInput {
    /// Trim every field and check that `title` and `author` are present.
    ///
    /// A blank description becomes `None`. Errors list fields in declaration order.
    pub fn validate(&self) -> Result<BookDraft, Vec<FieldError>> {
        let title = self.title.trim();
        let author = self.author.trim();

        let mut errors = Vec::new();
        if title.is_empty() {
            errors.push(FieldError::required("title"));
        }
        if author.is_empty() {
            errors.push(FieldError::required("author"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(BookDraft {
            title: title.to_string(),
            author: author.to_string(),
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, author: &str, description: Option<&str>) -> BookInput {
        BookInput {
            title: title.to_string(),
            author: author.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn valid_input_is_trimmed() {
        let draft = input("  Dune ", "Herbert\n", Some("  spice  "))
            .validate()
            .unwrap();
        assert_eq!(draft.title, "Dune");
        assert_eq!(draft.author, "Herbert");
        assert_eq!(draft.description.as_deref(), Some("spice"));
    }

    #[test]
    fn blank_description_is_dropped() {
        let draft = input("Dune", "Herbert", Some("   ")).validate().unwrap();
        assert_eq!(draft.description, None);
    }

    #[test]
    fn every_missing_field_is_reported() {
        let errors = input("", "   ", None).validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "author"]);
        assert!(errors.iter().all(|e| e.error == "required"));
    }

    #[test]
    fn missing_json_fields_default_to_empty() {
        let parsed: BookInput = serde_json::from_str(r#"{"author": "Le Guin"}"#).unwrap();
        assert_eq!(parsed.title, "");
        assert_eq!(parsed.description, None);

        let errors = parsed.validate().unwrap_err();
        assert_eq!(errors, vec![FieldError::required("title")]);
    }

    #[test]
    fn absent_description_is_not_serialized() {
        let book = Book {
            id: "b-1".to_string(),
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            description: None,
        };
        let json = serde_json::to_value(&book).unwrap();
        assert!(json.get("description").is_none());
    }
}
