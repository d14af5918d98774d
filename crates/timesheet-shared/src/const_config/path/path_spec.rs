use std::fmt::Display;

use reqwest::Method;

/// Placeholder in a path that gets replaced by a record id
const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone)]
pub struct PathSpec {
    pub path: &'static str,
    pub method: reqwest::Method,
}

impl PathSpec {
    pub const fn get(path: &'static str) -> Self {
        Self {
            path,
            method: Method::GET,
        }
    }

    pub const fn post(path: &'static str) -> Self {
        Self {
            path,
            method: Method::POST,
        }
    }

    pub const fn put(path: &'static str) -> Self {
        Self {
            path,
            method: Method::PUT,
        }
    }

    pub const fn delete(path: &'static str) -> Self {
        Self {
            path,
            method: Method::DELETE,
        }
    }

    pub fn has_id_placeholder(&self) -> bool {
        self.path.contains(ID_PLACEHOLDER)
    }

    /// Returns the path with the id placeholder filled in
    pub fn with_id<T: Display>(&self, id: T) -> String {
        debug_assert!(
            self.has_id_placeholder(),
            "attempted to set an id on a path without a placeholder: {}",
            self.path
        );
        self.path.replace(ID_PLACEHOLDER, &id.to_string())
    }
}
