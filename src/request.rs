//! Incoming HTTP request type.

use bytes::Bytes;
use http::{Extensions, HeaderMap, Method, Uri};

use crate::params::Params;

/// Extension key under which the dispatcher stores the matched [`Params`].
///
/// Private so nothing outside the router can plant or replace them.
#[derive(Clone)]
struct RouteParams(Params);

/// An incoming HTTP request with its body fully buffered.
///
/// The [`extensions`](Request::extensions) map is the request's scope: values
/// inserted by a middleware are visible to everything it calls.
pub struct Request {
    inner: http::Request<Bytes>,
}

impl Request {
    pub fn new(inner: http::Request<Bytes>) -> Self {
        Self { inner }
    }

    pub fn method(&self) -> &Method { self.inner.method() }
    pub fn uri(&self) -> &Uri { self.inner.uri() }
    pub fn path(&self) -> &str { self.inner.uri().path() }
    pub fn headers(&self) -> &HeaderMap { self.inner.headers() }
    pub fn body(&self) -> &[u8] { self.inner.body() }

    /// Header lookup. Names are case-insensitive; non-UTF-8 values yield `None`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    pub fn extensions(&self) -> &Extensions { self.inner.extensions() }
    pub fn extensions_mut(&mut self) -> &mut Extensions { self.inner.extensions_mut() }

    /// Path parameters of the route that matched this request.
    ///
    /// # Panics
    ///
    /// Panics if the request did not go through a [`Router`](crate::Router)
    /// dispatch that matched a route. Inside a routed handler this never
    /// happens; use [`try_params`](Request::try_params) from middleware.
    pub fn params(&self) -> &Params {
        match self.try_params() {
            Some(params) => params,
            None => panic!("Request::params called on a request that was not routed"),
        }
    }

    /// Like [`params`](Request::params), but `None` for unrouted requests.
    pub fn try_params(&self) -> Option<&Params> {
        self.inner.extensions().get::<RouteParams>().map(|p| &p.0)
    }

    pub(crate) fn set_params(&mut self, params: Params) {
        self.inner.extensions_mut().insert(RouteParams(params));
    }

    pub fn into_inner(self) -> http::Request<Bytes> {
        self.inner
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(inner: http::Request<Bytes>) -> Self {
        Self::new(inner)
    }
}
