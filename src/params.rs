//! Path parameters captured by the matched route.

use std::collections::HashMap;
use std::num::ParseIntError;

use thiserror::Error;

/// Failure to read a path parameter as an integer.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("path parameter `{0}` not found")]
    NotFound(String),

    #[error("path parameter `{name}` is not an integer: {source}")]
    Parse {
        name: String,
        #[source]
        source: ParseIntError,
    },
}

/// Read-only view over the named captures of the route that matched.
///
/// Obtain it inside a handler with [`Request::params`](crate::Request::params):
///
/// ```rust,no_run
/// use strata::{Request, Response, json, json_error};
/// use http::StatusCode;
///
/// // registered as  r"/people/(?P<id>\d+)"
/// async fn get_person(req: Request) -> Response {
///     match req.params().get_int("id") {
///         Ok(id)  => json(StatusCode::OK, &serde_json::json!({ "id": id })),
///         Err(_)  => json_error(StatusCode::BAD_REQUEST, "bad id"),
///     }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    pub(crate) fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Returns the named parameter, or `""` if the route has no such capture.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Parses the named parameter as a base-10 integer.
    pub fn get_int(&self, name: &str) -> Result<i64, ParamError> {
        let raw = self.values
            .get(name)
            .ok_or_else(|| ParamError::NotFound(name.to_owned()))?;
        raw.parse().map_err(|source| ParamError::Parse { name: name.to_owned(), source })
    }

    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Iterates over `(name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
