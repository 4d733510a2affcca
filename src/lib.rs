//! # strata
//!
//! A minimal HTTP router for JSON APIs.
//!
//! - Routes are **regular expressions**, matched against the whole path, tried
//!   in registration order. First match wins.
//! - **Named groups** become path parameters: `(?P<id>\d+)` → `req.params().get_int("id")`.
//! - **Middleware** wraps the entire dispatch: panic recovery, request logging,
//!   HTTP Basic auth ship in [`middleware`].
//! - Every error the router writes is `{"error":"<message>"}` JSON.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use http::StatusCode;
//! use serde::Deserialize;
//! use strata::middleware::{Logger, Recoverer};
//! use strata::{Request, Response, Router, Server, bind_json, json, json_error};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), strata::Error> {
//!     let app = Router::new()
//!         .get(r"/users/(?P<id>\d+)", get_user)?
//!         .post("/users", create_user)?
//!         .with(Recoverer)
//!         .with(Logger);
//!
//!     Server::bind("0.0.0.0:3000")?.serve(app).await
//! }
//!
//! async fn get_user(req: Request) -> Response {
//!     match req.params().get_int("id") {
//!         Ok(id) => json(StatusCode::OK, &serde_json::json!({ "id": id })),
//!         Err(e) => json_error(StatusCode::BAD_REQUEST, &e.to_string()),
//!     }
//! }
//!
//! #[derive(Deserialize)]
//! struct NewUser { name: String }
//!
//! async fn create_user(req: Request) -> Response {
//!     match bind_json::<NewUser>(&req) {
//!         Ok(user) => json(StatusCode::CREATED, &serde_json::json!({ "name": user.name })),
//!         Err(_) => json_error(StatusCode::BAD_REQUEST, "invalid body"),
//!     }
//! }
//! ```

mod error;
mod handler;
mod json;
mod params;
mod pattern;
mod request;
mod response;
mod route;
mod router;
mod server;

pub mod middleware;

pub use error::Error;
pub use handler::{BoxFuture, BoxedHandler, Endpoint, Handler, handler_fn};
pub use json::{Json, bind_json, json, json_error};
pub use params::{ParamError, Params};
pub use pattern::Pattern;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::{DEFAULT_MAX_BODY_SIZE, Server};
