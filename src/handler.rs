//! Handler trait, route endpoints, and type erasure.
//!
//! # Two kinds of endpoint
//!
//! A route accepts exactly one of:
//!
//! - a **bare function**: any `async fn(Request) -> impl IntoResponse`;
//! - a **full handler**: any value implementing [`Handler`], e.g. a struct
//!   carrying its own state, or a [`Router`](crate::Router).
//!
//! [`Endpoint`] is that closed choice. Both variants are normalised to a
//! [`BoxedHandler`] when the route is registered; nothing else can be passed
//! to [`Router::handle`](crate::Router::handle) because there is no
//! conversion for it.
//!
//! The chain from user code to vtable call is:
//!
//! ```text
//! async fn hello(req: Request) -> Response { … }   ← user writes this
//!        ↓ router.get("/", hello)
//! Endpoint::Func(Box<dyn Fn(Request) -> BoxFuture>)
//!        ↓ at registration
//! Arc::new(FnHandler(f))                           ← BoxedHandler
//!        ↓ at request time
//! handler.call(req)                                ← one vtable dispatch
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Send + 'static` let tokio move the future across threads safely.
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Anything that can turn a [`Request`] into a [`Response`].
///
/// Implement it directly when a handler needs state of its own:
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use strata::{BoxFuture, Handler, Request, Response};
///
/// struct Counter(Arc<AtomicU64>);
///
/// impl Handler for Counter {
///     fn call(&self, _req: Request) -> BoxFuture {
///         let n = self.0.fetch_add(1, Ordering::Relaxed);
///         Box::pin(async move { Response::text(n.to_string()) })
///     }
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
///
/// Middleware receive and return these.
pub type BoxedHandler = Arc<dyn Handler>;

type BoxedFn = Box<dyn Fn(Request) -> BoxFuture + Send + Sync>;

/// What a route dispatches to. See the [module docs](self).
pub enum Endpoint {
    /// A value implementing [`Handler`].
    Handler(BoxedHandler),
    /// A bare `async fn(Request) -> impl IntoResponse`.
    Func(BoxedFn),
}

impl Endpoint {
    pub fn handler(handler: impl Handler) -> Self {
        Self::Handler(Arc::new(handler))
    }

    pub fn func<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + Send + 'static,
    {
        Self::Func(Box::new(move |req: Request| -> BoxFuture {
            let fut = f(req);
            Box::pin(async move { fut.await.into_response() })
        }))
    }

    pub(crate) fn into_boxed_handler(self) -> BoxedHandler {
        match self {
            Self::Handler(handler) => handler,
            Self::Func(f) => Arc::new(FnHandler(f)),
        }
    }
}

impl<F, Fut, R> From<F> for Endpoint
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn from(f: F) -> Self {
        Self::func(f)
    }
}

/// Builds a [`BoxedHandler`] from an async closure. Mostly useful inside
/// middleware:
///
/// ```rust
/// use strata::{BoxedHandler, Handler, handler_fn};
///
/// fn add_header(next: BoxedHandler) -> BoxedHandler {
///     handler_fn(move |req| {
///         let next = next.clone();
///         async move { next.call(req).await }
///     })
/// }
/// ```
pub fn handler_fn<F, Fut, R>(f: F) -> BoxedHandler
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    Endpoint::func(f).into_boxed_handler()
}

/// Newtype bridging a boxed closure to the [`Handler`] trait object.
struct FnHandler(BoxedFn);

impl Handler for FnHandler {
    fn call(&self, req: Request) -> BoxFuture {
        (self.0)(req)
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::StatusCode;

    use super::*;

    struct Fixed(StatusCode);

    impl Handler for Fixed {
        fn call(&self, _req: Request) -> BoxFuture {
            let status = self.0;
            Box::pin(async move { Response::status(status) })
        }
    }

    fn request() -> Request {
        http::Request::builder().uri("/").body(Bytes::new()).unwrap().into()
    }

    #[tokio::test]
    async fn both_variants_normalise_to_a_handler() {
        async fn hello(_req: Request) -> &'static str { "hello" }

        let func = Endpoint::from(hello).into_boxed_handler();
        let full = Endpoint::handler(Fixed(StatusCode::ACCEPTED)).into_boxed_handler();

        let res = func.call(request()).await;
        assert_eq!(res.body(), b"hello");

        let res = full.call(request()).await;
        assert_eq!(res.status_code(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn handler_fn_sees_the_request() {
        let h = handler_fn(|req: Request| async move { req.path().to_owned() });
        let res = h.call(request()).await;
        assert_eq!(res.body(), b"/");
    }
}
