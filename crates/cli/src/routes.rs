//! Path pattern → view table, resolved on every navigation.

use std::collections::HashMap;

/// The console's views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Create,
    Detail,
    Edit,
}

/// Values captured from `:name` segments.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Params(HashMap<String, String>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

pub struct RouteTable {
    routes: Vec<(&'static str, View)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// The console's four screens.
    pub fn standard() -> Self {
        Self::new()
            .route("/", View::List)
            .route("/create-book", View::Create)
            .route("/edit-book/:id", View::Edit)
            .route("/show-book/:id", View::Detail)
    }

    pub fn route(mut self, pattern: &'static str, view: View) -> Self {
        self.routes.push((pattern, view));
        self
    }

    /// First registered pattern matching `path` wins. Query strings and
    /// trailing slashes are ignored.
    pub fn resolve(&self, path: &str) -> Option<(View, Params)> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        self.routes.iter().find_map(|(pattern, view)| {
            match_pattern(pattern, path).map(|params| (*view, params))
        })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn match_pattern(pattern: &str, path: &str) -> Option<Params> {
    let expected = segments(pattern);
    let actual = segments(path);
    if expected.len() != actual.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (want, got) in expected.iter().zip(actual.iter()) {
        match want.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_string(), got.to_string());
            }
            None if want == got => {}
            None => return None,
        }
    }
    Some(Params(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_resolves_to_list() {
        let (view, params) = RouteTable::standard().resolve("/").unwrap();
        assert_eq!(view, View::List);
        assert_eq!(params, Params::default());
    }

    #[test]
    fn id_is_captured() {
        let table = RouteTable::standard();

        let (view, params) = table.resolve("/show-book/0193-abc").unwrap();
        assert_eq!(view, View::Detail);
        assert_eq!(params.get("id"), Some("0193-abc"));

        let (view, params) = table.resolve("/edit-book/42/").unwrap();
        assert_eq!(view, View::Edit);
        assert_eq!(params.get("id"), Some("42"));
    }

    #[test]
    fn query_string_is_ignored() {
        let (view, _) = RouteTable::standard()
            .resolve("/create-book?from=list")
            .unwrap();
        assert_eq!(view, View::Create);
    }

    #[test]
    fn unknown_or_partial_paths_do_not_resolve() {
        let table = RouteTable::standard();
        assert!(table.resolve("/show-book").is_none());
        assert!(table.resolve("/show-book/1/extra").is_none());
        assert!(table.resolve("/books").is_none());
    }
}
