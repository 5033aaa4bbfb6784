//! Console views. Each one is a plain async function over route params, the
//! Book Store API and whatever the user submitted.

use std::fmt;

use bookshelf_app::{Book, BookInput};

use crate::api::{ApiError, BookApi};
use crate::routes::{Params, View};

/// What a view produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub heading: String,
    pub lines: Vec<String>,
    /// Path to navigate to after this screen is shown
    pub redirect: Option<String>,
    /// Set when the screen reports a failed call
    pub failed: bool,
}

impl Screen {
    fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            ..Self::default()
        }
    }

    fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect = Some(path.into());
        self
    }

    /// Render `err` as a visible message under `heading`.
    fn failure(heading: impl Into<String>, err: &ApiError) -> Self {
        let mut screen = Self::new(heading);
        screen.failed = true;
        match err {
            ApiError::ValidationFailed(fields) => {
                screen.lines.push("The book was not saved:".to_string());
                screen.lines.extend(
                    fields
                        .iter()
                        .map(|f| format!("  {}: {}", f.field, f.error)),
                );
            }
            ApiError::NotFound(message) => {
                screen.lines.push(format!("Book not found ({}).", message));
            }
            ApiError::StorageUnavailable(message) => {
                screen.lines.push(format!(
                    "The book store is unavailable, try again later ({}).",
                    message
                ));
            }
            other => screen.lines.push(other.to_string()),
        }
        screen
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.heading)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Form fields and actions submitted with a navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub delete: bool,
}

impl Submission {
    fn has_fields(&self) -> bool {
        self.title.is_some() || self.author.is_some() || self.description.is_some()
    }

    /// Fields from this submission, falling back to `current` for the rest.
    fn merged_over(&self, current: &Book) -> BookInput {
        BookInput {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            author: self.author.clone().unwrap_or_else(|| current.author.clone()),
            description: self
                .description
                .clone()
                .or_else(|| current.description.clone()),
        }
    }

    fn as_input(&self) -> BookInput {
        BookInput {
            title: self.title.clone().unwrap_or_default(),
            author: self.author.clone().unwrap_or_default(),
            description: self.description.clone(),
        }
    }
}

impl View {
    pub async fn render(
        self,
        params: &Params,
        api: &dyn BookApi,
        submission: &Submission,
    ) -> Screen {
        match self {
            View::List => list_view(api).await,
            View::Create => create_view(api, submission).await,
            View::Detail => match params.get("id") {
                Some(id) => detail_view(id, api, submission).await,
                None => missing_id("Book details"),
            },
            View::Edit => match params.get("id") {
                Some(id) => edit_view(id, api, submission).await,
                None => missing_id("Edit book"),
            },
        }
    }
}

fn missing_id(heading: &str) -> Screen {
    let mut screen = Screen::new(heading).line("No book id in the path.");
    screen.failed = true;
    screen
}

fn book_lines(book: &Book) -> Vec<String> {
    vec![
        format!("Title:       {}", book.title),
        format!("Author:      {}", book.author),
        format!(
            "Description: {}",
            book.description.as_deref().unwrap_or("(none)")
        ),
    ]
}

pub async fn list_view(api: &dyn BookApi) -> Screen {
    let books = match api.list().await {
        Ok(books) => books,
        Err(err) => return Screen::failure("Books", &err),
    };

    let mut screen = Screen::new("Books");
    if books.is_empty() {
        return screen.line("No books yet. Add one at /create-book");
    }
    for book in &books {
        screen.lines.push(format!(
            "- {} by {}  [/show-book/{}]",
            book.title, book.author, book.id
        ));
    }
    screen
}

pub async fn create_view(api: &dyn BookApi, submission: &Submission) -> Screen {
    if !submission.has_fields() {
        return Screen::new("Create book")
            .line("Title:       ")
            .line("Author:      ")
            .line("Description: ")
            .line("Submit with --title, --author and optionally --description.");
    }

    match api.create(&submission.as_input()).await {
        Ok(book) => Screen::new("Create book")
            .line(format!("Added \"{}\" by {}.", book.title, book.author))
            .redirect_to("/"),
        Err(err) => Screen::failure("Create book", &err),
    }
}

pub async fn detail_view(id: &str, api: &dyn BookApi, submission: &Submission) -> Screen {
    let book = match api.get(id).await {
        Ok(book) => book,
        Err(err) => return Screen::failure("Book details", &err),
    };

    if submission.delete {
        return match api.delete(id).await {
            Ok(()) => Screen::new("Book details")
                .line(format!("Deleted \"{}\".", book.title))
                .redirect_to("/"),
            Err(err) => Screen::failure("Book details", &err),
        };
    }

    let mut screen = Screen::new("Book details");
    screen.lines = book_lines(&book);
    screen
        .line(format!("Edit: /edit-book/{}", book.id))
        .line("Back: /")
}

pub async fn edit_view(id: &str, api: &dyn BookApi, submission: &Submission) -> Screen {
    let current = match api.get(id).await {
        Ok(book) => book,
        Err(err) => return Screen::failure("Edit book", &err),
    };

    if !submission.has_fields() {
        let mut screen = Screen::new("Edit book");
        screen.lines = book_lines(&current);
        return screen.line("Submit changes with --title, --author or --description.");
    }

    match api.update(id, &submission.merged_over(&current)).await {
        Ok(book) => Screen::new("Edit book")
            .line(format!("Updated \"{}\".", book.title))
            .redirect_to("/"),
        Err(err) => Screen::failure("Edit book", &err),
    }
}
