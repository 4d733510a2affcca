//! JSON response helpers and request-body decoding.
//!
//! Every error the router or its middleware writes goes through
//! [`json_error`], so clients always see the same shape:
//!
//! ```text
//! HTTP/1.1 404 Not Found
//! content-type: application/json; charset=utf-8
//!
//! {"error":"resource could not be found"}
//! ```
//!
//! Bodies end with a single `\n`.

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use crate::error::Error;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

pub(crate) const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

fn encode<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut body = serde_json::to_vec(value)?;
    body.push(b'\n');
    Ok(body)
}

/// Serialises `value` as the response body with the given status.
///
/// If `value` cannot be serialised the response degrades to
/// `500 {"error":"Error writing JSON"}`.
pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Response {
    match encode(value) {
        Ok(body) => Response::builder().status(status).body(CONTENT_TYPE_JSON, body),
        Err(e) => {
            error!(error = %e, "failed to encode JSON response");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Error writing JSON")
        }
    }
}

/// Writes `{"error":"<message>"}` with the given status.
pub fn json_error(status: StatusCode, message: &str) -> Response {
    let body = encode(&ErrorBody { error: message }).unwrap_or_else(|e| {
        error!(error = %e, "failed to encode JSON error body");
        b"{\"error\":\"Error writing JSON\"}\n".to_vec()
    });
    Response::builder().status(status).body(CONTENT_TYPE_JSON, body)
}

/// Decodes the request body into `T`.
pub fn bind_json<T: DeserializeOwned>(req: &Request) -> Result<T, Error> {
    Ok(serde_json::from_slice(req.body())?)
}

/// Return a serialisable value from a handler as `200 OK` JSON.
///
/// ```rust
/// use strata::{Json, Request};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { id: u64, name: String }
///
/// async fn get_user(_req: Request) -> Json<User> {
///     Json(User { id: 1, name: "alice".into() })
/// }
/// ```
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        json(StatusCode::OK, &self.0)
    }
}
