//! Navigation: resolve a path, render its view, follow redirects.

use thiserror::Error;

use crate::api::BookApi;
use crate::routes::RouteTable;
use crate::views::{Screen, Submission};

/// Upper bound on redirects followed from one navigation
const MAX_REDIRECTS: usize = 4;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("no route matches '{0}'")]
    NoRoute(String),

    #[error("too many redirects starting at '{0}'")]
    RedirectLoop(String),
}

pub struct Console<A> {
    api: A,
    routes: RouteTable,
}

impl<A: BookApi> Console<A> {
    pub fn new(api: A) -> Self {
        Self::with_routes(api, RouteTable::standard())
    }

    pub fn with_routes(api: A, routes: RouteTable) -> Self {
        Self { api, routes }
    }

    /// Render `path` with `submission`, then every view it redirects to.
    ///
    /// Only the first view sees the submission; redirect targets render as
    /// plain page loads.
    pub async fn navigate(
        &self,
        path: &str,
        submission: Submission,
    ) -> Result<Vec<Screen>, ConsoleError> {
        let mut screens = Vec::new();
        let mut current = path.to_string();
        let mut submission = submission;

        for _ in 0..=MAX_REDIRECTS {
            let (view, params) = self
                .routes
                .resolve(&current)
                .ok_or_else(|| ConsoleError::NoRoute(current.clone()))?;

            tracing::debug!(path = %current, ?view, "rendering view");
            let screen = view.render(&params, &self.api, &submission).await;
            let redirect = screen.redirect.clone();
            screens.push(screen);

            match redirect {
                Some(next) => {
                    current = next;
                    submission = Submission::default();
                }
                None => return Ok(screens),
            }
        }

        Err(ConsoleError::RedirectLoop(path.to_string()))
    }
}
