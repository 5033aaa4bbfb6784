//! Bookshelf application library
//!
//! Domain modules for the book catalog service.

pub mod modules;

pub use modules::books::models::{Book, BookInput, FieldError};
