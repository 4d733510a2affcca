//! Request router.
//!
//! Routes are regular expressions tried in registration order; the first one
//! whose method and pattern match the whole path handles the request. Named
//! groups become path parameters. Middleware wraps the whole dispatch.

use std::sync::{Arc, OnceLock};

use http::{Method, StatusCode};
use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::error::Error;
use crate::handler::{BoxFuture, BoxedHandler, Endpoint, Handler};
use crate::json::json_error;
use crate::middleware::{self, Middleware};
use crate::params::Params;
use crate::request::Request;
use crate::route::RouteTable;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve)
/// or call it directly through [`Handler::call`]. Every builder method returns
/// `self` so registrations chain; route registration returns a `Result`
/// because the pattern is compiled on the spot.
///
/// ```rust,no_run
/// # use strata::{Request, Response, Router, middleware::{Logger, Recoverer}};
/// # async fn list_people(_: Request) -> Response { Response::text("") }
/// # async fn get_person(_: Request) -> Response { Response::text("") }
/// # fn main() -> Result<(), strata::Error> {
/// let app = Router::new()
///     .get("/people", list_people)?
///     .get(r"/people/(?P<id>\d+)", get_person)?
///     .with(Recoverer)
///     .with(Logger);
/// # Ok(())
/// # }
/// ```
pub struct Router {
    routes: Arc<RouteTable>,
    middleware: Vec<Arc<dyn Middleware>>,
    chain: OnceLock<BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: Arc::default(),
            middleware: Vec::new(),
            chain: OnceLock::new(),
        }
    }

    /// Register `endpoint` for `method` requests whose whole path matches
    /// `pattern`.
    ///
    /// `endpoint` is either a bare `async fn(Request) -> impl IntoResponse`
    /// or [`Endpoint::handler`] wrapping a [`Handler`] value.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPattern`] if `pattern` is not a valid regular expression.
    pub fn handle(
        mut self,
        method: Method,
        pattern: &str,
        endpoint: impl Into<Endpoint>,
    ) -> Result<Self, Error> {
        Arc::make_mut(&mut self.routes).register(method.clone(), pattern, endpoint.into())?;
        self.chain = OnceLock::new();
        debug!(%method, pattern, routes = self.routes.len(), "route registered");
        Ok(self)
    }

    pub fn get(self, pattern: &str, endpoint: impl Into<Endpoint>) -> Result<Self, Error> {
        self.handle(Method::GET, pattern, endpoint)
    }

    pub fn post(self, pattern: &str, endpoint: impl Into<Endpoint>) -> Result<Self, Error> {
        self.handle(Method::POST, pattern, endpoint)
    }

    pub fn put(self, pattern: &str, endpoint: impl Into<Endpoint>) -> Result<Self, Error> {
        self.handle(Method::PUT, pattern, endpoint)
    }

    pub fn patch(self, pattern: &str, endpoint: impl Into<Endpoint>) -> Result<Self, Error> {
        self.handle(Method::PATCH, pattern, endpoint)
    }

    pub fn delete(self, pattern: &str, endpoint: impl Into<Endpoint>) -> Result<Self, Error> {
        self.handle(Method::DELETE, pattern, endpoint)
    }

    /// Append a middleware. The last one added runs first; see
    /// [`middleware`](crate::middleware#ordering).
    pub fn with(mut self, mw: impl Middleware) -> Self {
        self.middleware.push(Arc::new(mw));
        self.chain = OnceLock::new();
        self
    }

    /// The middleware chain around the dispatch core, built on first use.
    fn chain(&self) -> &BoxedHandler {
        self.chain.get_or_init(|| {
            let core: BoxedHandler = Arc::new(Dispatch { routes: Arc::clone(&self.routes) });
            middleware::compose(&self.middleware, core)
        })
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

impl Handler for Router {
    fn call(&self, req: Request) -> BoxFuture {
        self.chain().call(req)
    }
}

/// Innermost handler: route lookup, parameter attachment, 404.
///
/// Patterns see the percent-decoded path; invalid UTF-8 after decoding is
/// replaced with U+FFFD.
struct Dispatch {
    routes: Arc<RouteTable>,
}

impl Handler for Dispatch {
    fn call(&self, mut req: Request) -> BoxFuture {
        let found = {
            let path = percent_decode_str(req.path()).decode_utf8_lossy();
            self.routes.lookup(req.method(), &path)
        };
        let Some((route, captures)) = found else {
            return Box::pin(async {
                json_error(StatusCode::NOT_FOUND, "resource could not be found")
            });
        };
        let handler = Arc::clone(&route.handler);
        req.set_params(Params::new(captures));
        handler.call(req)
    }
}
