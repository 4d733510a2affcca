use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use http::StatusCode;
use tracing::error;

use super::Middleware;
use crate::handler::{BoxFuture, BoxedHandler, Handler};
use crate::json::json_error;
use crate::request::Request;

/// Turns a panic anywhere below it into `500 {"error":"an unknown error occured"}`.
///
/// The panic message is logged at `error` level and never sent to the client.
/// Register it before [`Logger`](super::Logger) so failed requests are still
/// logged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Recoverer;

impl Middleware for Recoverer {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        Arc::new(Recover { next })
    }
}

struct Recover {
    next: BoxedHandler,
}

impl Handler for Recover {
    fn call(&self, req: Request) -> BoxFuture {
        let next = self.next.clone();
        let method = req.method().clone();
        let path = req.path().to_owned();

        // `next.call` runs inside the async block so a panic while building
        // the inner future is caught the same as one while polling it.
        let inner = AssertUnwindSafe(async move { next.call(req).await });
        Box::pin(async move {
            match inner.catch_unwind().await {
                Ok(res) => res,
                Err(payload) => {
                    error!(%method, %path, panic = panic_message(&*payload), "handler panicked");
                    json_error(StatusCode::INTERNAL_SERVER_ERROR, "an unknown error occured")
                }
            }
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic payload>")
}
