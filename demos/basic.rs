//! Minimal sprig example: overlapping routes, guards and a hot reload.
//!
//! Run with:
//!   RUST_LOG=sprig=debug cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/users/42          # {id:int}
//!   curl http://localhost:3000/users/me          # literal beats {id:int}
//!   curl http://localhost:3000/users/alice       # falls back to {name}
//!   curl http://localhost:3000/en/docs/intro     # static parameter lang=en
//!   curl http://localhost:3000/static/css/a.css  # catch-all
//!   curl -H 'x-beta: on' http://localhost:3000/users/me
//!   curl -X DELETE http://localhost:3000/users/me   # 405, Allow: GET

use std::sync::Arc;
use std::time::Duration;

use sprig::{Guard, Method, Request, Response, RouteTable, Router, Server};

fn app() -> Router {
    let docs = Router::module("docs")
        .get("/{lang=en}/docs/{page}", doc_page)
        .get("/{lang=fr}/docs/{page}", doc_page);

    Router::new()
        .get("/users/{id:int}",  get_user)
        .get("/users/{name}",    get_user_by_name)
        // Same pattern, same score: the earlier registration is tried first.
        .on_when(Method::Get, "/users/me", Guard::header("x-beta", "on"), me_beta)
        .get("/users/me",        me)
        .get("/static/{*path}",  static_file)
        .merge(docs)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let table = match app().build() {
        Ok(routes) => Arc::new(RouteTable::new(routes)),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    for line in table.load().listing() {
        println!("{line}");
    }

    // Rebuild the table every minute; requests in flight keep the old one.
    let reloader = Arc::clone(&table);
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(60));
        tick.tick().await;
        loop {
            tick.tick().await;
            let _ = reloader.reload(app());
        }
    });

    Server::bind("0.0.0.0:3000")
        .serve_table(table)
        .await
        .expect("server error");
}

async fn get_user(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::json(format!(r#"{{"id":{id}}}"#))
}

async fn get_user_by_name(req: Request) -> Response {
    let name = req.param("name").unwrap_or("unknown");
    Response::json(format!(r#"{{"name":"{name}"}}"#))
}

async fn me(_req: Request) -> &'static str {
    "you"
}

async fn me_beta(_req: Request) -> &'static str {
    "you, but beta"
}

async fn doc_page(req: Request) -> String {
    format!(
        "[{}] {}",
        req.param("lang").unwrap_or("?"),
        req.param("page").unwrap_or("index"),
    )
}

async fn static_file(req: Request) -> String {
    format!("would serve {}", req.param("path").unwrap_or_default())
}
