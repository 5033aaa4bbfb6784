//! Book console: a terminal front end for the bookshelf API.
//!
//! Paths mirror the web front end (`/`, `/create-book`, `/show-book/:id`,
//! `/edit-book/:id`) and resolve through a [`routes::RouteTable`] to views.

pub mod api;
pub mod client;
pub mod console;
pub mod routes;
pub mod views;

pub use api::{ApiError, BookApi};
pub use client::HttpBookClient;
pub use console::{Console, ConsoleError};
pub use views::{Screen, Submission};
