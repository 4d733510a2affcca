//! The ordered route table.
//!
//! Routes are tried in the order they were registered and the first one whose
//! method and pattern both match wins. There is no specificity ranking: if
//! `/item/(?P<id>.+)` is registered before `/item/new`, the second route is
//! unreachable.

use std::collections::HashMap;

use http::Method;

use crate::error::Error;
use crate::handler::{BoxedHandler, Endpoint};
use crate::pattern::Pattern;

/// A (method, pattern, handler) registration.
#[derive(Clone)]
pub(crate) struct Route {
    pub(crate) method: Method,
    pub(crate) pattern: Pattern,
    pub(crate) handler: BoxedHandler,
}

#[derive(Clone, Default)]
pub(crate) struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Compiles `template` and appends the route.
    pub(crate) fn register(
        &mut self,
        method: Method,
        template: &str,
        endpoint: Endpoint,
    ) -> Result<(), Error> {
        let pattern = Pattern::compile(template)?;
        self.routes.push(Route { method, pattern, handler: endpoint.into_boxed_handler() });
        Ok(())
    }

    /// First route matching `method` exactly and `path` in full, with its
    /// named captures.
    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(&Route, HashMap<String, String>)> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| route.pattern.captures(path).map(|caps| (route, caps)))
    }

    pub(crate) fn len(&self) -> usize {
        self.routes.len()
    }
}
