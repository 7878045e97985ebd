//! # sprig
//!
//! A minimal HTTP framework whose router ranks every matching route by how
//! specific it is.
//!
//! ## Routing model
//!
//! Routes live in a [`trie`](crate::trie) keyed by raw pattern segments.
//! Matching a path explores *every* branch that could apply and returns all
//! compatible routes, each with a score computed once at build time:
//!
//! | Segment kind            | Example      | Score per segment |
//! |-------------------------|--------------|-------------------|
//! | literal                 | `users`      | 256³              |
//! | constrained parameter   | `{id:int}`   | 256²              |
//! | parameter               | `{id}`       | 256               |
//! | catch-all               | `{*rest}`    | 1                 |
//!
//! A route's score is the sum over its segments. Patterns are limited to
//! 255 segments, so one more specific segment always beats any number of
//! less specific ones. [`Routes::resolve`] tries candidates from the highest
//! score down, skipping other methods and routes whose [`Guard`] rejects the
//! request.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use sprig::{Request, Response, Router, Server, StatusCode};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .get("/users/{id:int}", get_user)
//!         .get("/users/me",       me)
//!         .post("/users",         create_user);
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn get_user(req: Request) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::json(format!(r#"{{"id":{id}}}"#))
//! }
//!
//! async fn me(_req: Request) -> &'static str {
//!     "you"
//! }
//!
//! async fn create_user(req: Request) -> Response {
//!     if req.body().is_empty() {
//!         return Response::status(StatusCode::BAD_REQUEST);
//!     }
//!     Response::builder()
//!         .status(StatusCode::CREATED)
//!         .header("location", "/users/99")
//!         .json(r#"{"id":99}"#)
//! }
//! ```

mod config;
mod error;
mod guard;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod routes;
mod server;

pub mod path;
pub mod trie;

pub use config::{CaptureConflict, Config, TrailingSlash};
pub use error::{BuildError, BuildErrorKind, Error, MatchError};
pub use guard::Guard;
pub use handler::Handler;
pub use http::StatusCode;
pub use method::{Method, UnknownMethod};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::{Router, DEFAULT_MODULE};
pub use routes::{Endpoint, Resolution, RouteTable, Routes};
pub use server::Server;
