use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use http::StatusCode;
use http::header::AUTHORIZATION;

use super::Middleware;
use crate::handler::{BoxFuture, BoxedHandler, Handler};
use crate::json::json_error;
use crate::request::Request;

type Verify = dyn Fn(&str, &str) -> bool + Send + Sync;

/// HTTP Basic authentication.
///
/// | Request                                  | Response |
/// |------------------------------------------|----------|
/// | no or malformed `Authorization: Basic …` | `400 {"error":"Authorization requiried"}` |
/// | `verify(user, pass)` returns `false`     | `401 {"error":"Invalid username or password"}` |
/// | `verify(user, pass)` returns `true`      | whatever the inner handler returns |
///
/// The 400 message keeps its historical spelling; clients match on it.
///
/// ```rust
/// use strata::{Router, middleware::BasicAuth};
///
/// let app = Router::new().with(BasicAuth::new(|user, pass| user == "admin" && pass == "hunter2"));
/// ```
#[derive(Clone)]
pub struct BasicAuth {
    verify: Arc<Verify>,
}

impl BasicAuth {
    pub fn new<F>(verify: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        Self { verify: Arc::new(verify) }
    }
}

impl Middleware for BasicAuth {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        Arc::new(Auth { verify: self.verify.clone(), next })
    }
}

struct Auth {
    verify: Arc<Verify>,
    next: BoxedHandler,
}

impl Handler for Auth {
    fn call(&self, req: Request) -> BoxFuture {
        let Some((user, pass)) = credentials(&req) else {
            return Box::pin(async {
                json_error(StatusCode::BAD_REQUEST, "Authorization requiried")
            });
        };
        if !(self.verify)(user.as_str(), pass.as_str()) {
            return Box::pin(async {
                json_error(StatusCode::UNAUTHORIZED, "Invalid username or password")
            });
        }
        self.next.call(req)
    }
}

/// Extracts `(user, password)` from `Authorization: Basic <base64(user:password)>`.
///
/// The scheme is case-insensitive; the password may contain `:`.
fn credentials(req: &Request) -> Option<(String, String)> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = String::from_utf8(STANDARD.decode(encoded).ok()?).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_owned(), pass.to_owned()))
}
