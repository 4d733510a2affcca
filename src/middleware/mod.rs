//! Middleware layer.
//!
//! A middleware maps one handler to another: it receives the rest of the
//! chain as `next` and returns a handler that runs code around it, or
//! answers without calling `next` at all.
//!
//! # Ordering
//!
//! The **last** middleware passed to [`Router::with`](crate::Router::with) is
//! the **outermost** wrapper: it sees the request first and the response
//! last.
//!
//! ```text
//! Router::new().with(Recoverer).with(Logger)
//!
//!   Logger ──▶ Recoverer ──▶ dispatch ──▶ handler
//!   Logger ◀── Recoverer ◀── dispatch ◀──
//! ```
//!
//! With that order a panicking handler is turned into a 500 by `Recoverer`
//! and `Logger` still records the request, timing included.
//!
//! # Built-in middleware
//!
//! - [`Recoverer`]: turns a handler panic into `500`
//! - [`Logger`]: one `tracing` event per request with method, URI, status, latency
//! - [`BasicAuth`]: HTTP Basic authentication against a verify function
//!
//! # Writing your own
//!
//! Any `Fn(BoxedHandler) -> BoxedHandler` is a middleware:
//!
//! ```rust
//! use http::HeaderValue;
//! use strata::{BoxedHandler, Handler, Router, handler_fn};
//!
//! fn server_header(next: BoxedHandler) -> BoxedHandler {
//!     handler_fn(move |req| {
//!         let next = next.clone();
//!         async move {
//!             let mut res = next.call(req).await;
//!             res.headers_mut().insert("server", HeaderValue::from_static("strata"));
//!             res
//!         }
//!     })
//! }
//!
//! let app = Router::new().with(server_header);
//! ```

mod basic_auth;
mod logger;
mod recover;

use std::sync::Arc;

pub use basic_auth::BasicAuth;
pub use logger::Logger;
pub use recover::Recoverer;

use crate::handler::BoxedHandler;

/// A handler-to-handler transformation.
pub trait Middleware: Send + Sync + 'static {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler;
}

impl<F> Middleware for F
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
{
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        self(next)
    }
}

/// Wraps `core` in `middleware`, last element outermost.
///
/// The first element wraps `core` directly; each later one wraps the result.
pub(crate) fn compose(middleware: &[Arc<dyn Middleware>], core: BoxedHandler) -> BoxedHandler {
    middleware.iter().fold(core, |next, mw| mw.wrap(next))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use bytes::Bytes;

    use super::*;
    use crate::handler::handler_fn;
    use crate::request::Request;

    type Trace = Arc<Mutex<Vec<String>>>;

    fn tracer(name: &'static str, trace: Trace) -> Arc<dyn Middleware> {
        Arc::new(move |next: BoxedHandler| -> BoxedHandler {
            let trace = trace.clone();
            handler_fn(move |req| {
                let next = next.clone();
                let trace = trace.clone();
                async move {
                    trace.lock().unwrap().push(format!("{name} in"));
                    let res = next.call(req).await;
                    trace.lock().unwrap().push(format!("{name} out"));
                    res
                }
            })
        })
    }

    #[tokio::test]
    async fn last_registered_is_outermost() {
        let trace = Trace::default();
        let core_trace = trace.clone();
        let core = handler_fn(move |_req| {
            let trace = core_trace.clone();
            async move {
                trace.lock().unwrap().push("core".to_owned());
                "done"
            }
        });

        let chain = compose(
            &[tracer("first", trace.clone()), tracer("second", trace.clone())],
            core,
        );
        let req = http::Request::builder().uri("/").body(Bytes::new()).unwrap();
        chain.call(Request::from(req)).await;

        assert_eq!(
            *trace.lock().unwrap(),
            ["second in", "first in", "core", "first out", "second out"],
        );
    }

    #[tokio::test]
    async fn empty_chain_is_the_core() {
        let core = handler_fn(|_req| async { "core" });
        let chain = compose(&[], core);
        let req = http::Request::builder().uri("/").body(Bytes::new()).unwrap();
        assert_eq!(chain.call(req.into()).await.body(), b"core");
    }
}
