use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use super::Middleware;
use crate::handler::{BoxFuture, BoxedHandler, Handler};
use crate::request::Request;

/// Emits one `info` event per completed request:
///
/// ```text
/// INFO strata::middleware::logger: request method=GET uri=/items/42?page=2 status=200 elapsed=87.2µs
/// ```
///
/// A panic in the inner chain skips the event. Register [`Recoverer`](super::Recoverer)
/// first so failed requests are logged as 500s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logger;

impl Middleware for Logger {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        Arc::new(Log { next })
    }
}

struct Log {
    next: BoxedHandler,
}

impl Handler for Log {
    fn call(&self, req: Request) -> BoxFuture {
        let next = self.next.clone();
        let method = req.method().clone();
        let uri = req.uri().clone();

        Box::pin(async move {
            let start = Instant::now();
            let res = next.call(req).await;
            info!(
                %method,
                %uri,
                status = res.status_code().as_u16(),
                elapsed = ?start.elapsed(),
                "request"
            );
            res
        })
    }
}
