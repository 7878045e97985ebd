//! End-to-end routing: build a router, resolve request heads, run handlers.

use bytes::Bytes;
use http::request::Parts;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use sprig::{
    BuildErrorKind, CaptureConflict, Config, Guard, Method, Request, Resolution, Response,
    RouteTable, Router, StatusCode, TrailingSlash,
};

fn head(method: &str, path: &str) -> Parts {
    head_with(method, path, &[])
}

fn head_with(method: &str, path: &str, headers: &[(&str, &str)]) -> Parts {
    let mut builder = http::Request::builder().method(method).uri(path);
    for (k, v) in headers {
        builder = builder.header(*k, *v);
    }
    builder.body(()).unwrap().into_parts().0
}

fn found_pattern(resolution: &Resolution<'_>) -> Option<String> {
    match resolution {
        Resolution::Found { route, .. } => Some(route.pattern().to_owned()),
        _ => None,
    }
}

async fn body_text(res: Response) -> String {
    let bytes = res.into_inner().into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn echo_id(req: Request) -> String {
    format!("user {}", req.param("id").unwrap_or("-"))
}

async fn admin(_req: Request) -> &'static str {
    "admin"
}

async fn files(req: Request) -> String {
    req.param("path").unwrap_or_default().to_owned()
}

async fn create(req: Request) -> Response {
    Response::builder()
        .status(StatusCode::CREATED)
        .text(String::from_utf8_lossy(req.body()).into_owned())
}

#[test]
fn most_specific_route_wins() {
    let routes = Router::new()
        .get("/users/{id}", echo_id)
        .get("/users/admin", admin)
        .build()
        .unwrap();

    let candidates = routes.candidates("/users/admin");
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].data.pattern(), "/users/admin");
    assert!(candidates[0].score() > candidates[1].score());

    let h = head("GET", "/users/admin");
    assert_eq!(found_pattern(&routes.resolve(&h)).as_deref(), Some("/users/admin"));
    let h = head("GET", "/users/7");
    assert_eq!(found_pattern(&routes.resolve(&h)).as_deref(), Some("/users/{id}"));
}

#[test]
fn method_mismatch_is_405_with_allowed_methods() {
    let routes = Router::new()
        .get("/items/{id}", echo_id)
        .delete("/items/{id}", echo_id)
        .build()
        .unwrap();

    let h = head("POST", "/items/3");
    match routes.resolve(&h) {
        Resolution::MethodNotAllowed(allowed) => assert_eq!(allowed, [Method::Delete, Method::Get]),
        other => panic!("expected 405, got {other:?}"),
    }

    let h = head("GET", "/nothing/here");
    assert!(matches!(routes.resolve(&h), Resolution::NotFound));
}

#[test]
fn rejected_guard_falls_through_to_next_candidate() {
    let routes = Router::new()
        .get("/reports/{id}", echo_id)
        .on_when(Method::Get, "/reports/latest", Guard::header("x-beta", "on"), admin)
        .build()
        .unwrap();

    let beta = head_with("GET", "/reports/latest", &[("x-beta", "on")]);
    assert_eq!(found_pattern(&routes.resolve(&beta)).as_deref(), Some("/reports/latest"));

    let plain = head("GET", "/reports/latest");
    assert_eq!(found_pattern(&routes.resolve(&plain)).as_deref(), Some("/reports/{id}"));
}

#[test]
fn merged_modules_keep_their_ids_and_indices() {
    let billing = Router::module("billing")
        .get("/invoices", admin)
        .get("/invoices/{id}", echo_id);
    let routes = Router::new().get("/", admin).merge(billing).build().unwrap();

    let h = head("GET", "/invoices/12");
    let Resolution::Found { route, params } = routes.resolve(&h) else {
        panic!("expected a match");
    };
    assert_eq!(route.module().as_str(), "billing");
    assert_eq!(route.route_index(), 1);
    assert_eq!(params.get("id").map(String::as_str), Some("12"));

    let listing = routes.listing();
    assert_eq!(listing.len(), 3);
    assert!(listing.iter().any(|l| l.contains("billing#1")), "{listing:#?}");
}

#[test]
fn build_error_names_module_and_index() {
    let err = Router::module("shop")
        .get("/ok", admin)
        .get("/items/{id", echo_id)
        .build()
        .unwrap_err();

    assert_eq!(err.pattern, "/items/{id");
    assert_eq!(err.module.as_str(), "shop");
    assert_eq!(err.route_index, 1);
    assert!(matches!(err.kind, BuildErrorKind::InvalidSegment { .. }));
}

#[test]
fn reject_policy_applies_through_the_router() {
    let err = Router::new()
        .config(Config::default().capture_conflicts(CaptureConflict::Reject))
        .get("/{id}/sub/{id}", echo_id)
        .build()
        .unwrap_err();
    assert_eq!(err.kind, BuildErrorKind::DuplicateParameter { name: "id".into() });
}

#[test]
fn trailing_slash_modes() {
    let lenient = Router::new().get("/docs", admin).build().unwrap();
    assert_eq!(lenient.candidates("/docs/").len(), 1);

    let strict = Router::new()
        .config(Config::default().trailing_slash(TrailingSlash::Strict))
        .get("/docs", admin)
        .build()
        .unwrap();
    assert!(strict.candidates("/docs/").is_empty());
    assert_eq!(strict.candidates("/docs").len(), 1);
}

#[tokio::test]
async fn respond_runs_the_winning_handler() {
    let routes = Router::new()
        .get("/users/{id:int}", echo_id)
        .get("/files/{*path}", files)
        .post("/users", create)
        .build()
        .unwrap();

    let res = routes.respond(head("GET", "/users/42"), Bytes::new()).await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(body_text(res).await, "user 42");

    let res = routes.respond(head("GET", "/files/a/b.txt"), Bytes::new()).await;
    assert_eq!(body_text(res).await, "a/b.txt");

    let res = routes.respond(head("POST", "/users"), Bytes::from_static(b"alice")).await;
    assert_eq!(res.status_code(), StatusCode::CREATED);
    assert_eq!(body_text(res).await, "alice");

    let res = routes.respond(head("GET", "/users/abc"), Bytes::new()).await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    let res = routes.respond(head("DELETE", "/users"), Bytes::new()).await;
    assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.header("allow"), Some("POST"));
}

#[test]
fn reload_swaps_whole_tables_and_keeps_old_one_on_error() {
    let table = RouteTable::new(Router::new().get("/v1", admin).build().unwrap());
    let before = table.load();

    table.reload(Router::new().get("/v2", admin)).unwrap();
    let after = table.load();
    assert!(after.candidates("/v1").is_empty());
    assert_eq!(after.candidates("/v2").len(), 1);
    // Snapshots taken earlier are unaffected.
    assert_eq!(before.candidates("/v1").len(), 1);

    assert!(table.reload(Router::new().get("/{*a}/b", admin)).is_err());
    assert_eq!(table.load().candidates("/v2").len(), 1);
}

#[test]
fn concurrent_readers_see_identical_results() {
    let routes = Router::new()
        .get("/{a}/x", echo_id)
        .get("/{b}/x", echo_id)
        .get("/v/{c}", echo_id)
        .build()
        .unwrap();

    let summarize = || -> Vec<String> {
        routes
            .candidates("/v/x")
            .iter()
            .map(|c| {
                let mut params: Vec<_> = c.params.iter().collect();
                params.sort();
                format!("{} {params:?}", c.data.pattern())
            })
            .collect()
    };
    let expected = summarize();
    assert_eq!(expected.len(), 3);
    // Equal scores keep tree order; each branch only sees its own capture.
    assert_eq!(expected[0], r#"/{a}/x [("a", "v")]"#);
    assert_eq!(expected[1], r#"/{b}/x [("b", "v")]"#);
    assert_eq!(expected[2], r#"/v/{c} [("c", "x")]"#);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(summarize)).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn equal_scores_are_tried_in_registration_order() {
    let routes = Router::new()
        .on_when(Method::Get, "/me", Guard::host("beta.test"), admin)
        .get("/me", echo_id)
        .build()
        .unwrap();

    let beta = head_with("GET", "/me", &[("host", "beta.test")]);
    let plain = head_with("GET", "/me", &[("host", "www.test")]);
    let index = |h: &Parts| match routes.resolve(h) {
        Resolution::Found { route, .. } => Some(route.route_index()),
        _ => None,
    };
    assert_eq!(index(&beta), Some(0));
    assert_eq!(index(&plain), Some(1));
}

#[test]
fn merging_routers_of_the_same_module_keeps_route_ids_unique() {
    let extra = Router::new().get("/b", admin).get("/c", admin);
    let routes = Router::new()
        .get("/a", admin)
        .merge(extra)
        .get("/d", admin)
        .build()
        .unwrap();

    let ids: Vec<_> = ["/a", "/b", "/c", "/d"]
        .iter()
        .map(|path| {
            let h = head("GET", path);
            match routes.resolve(&h) {
                Resolution::Found { route, .. } => {
                    (route.module().to_string(), route.route_index())
                }
                other => panic!("{path}: expected a match, got {other:?}"),
            }
        })
        .collect();
    let expected: Vec<_> = (0..4usize).map(|index| ("app".to_owned(), index)).collect();
    assert_eq!(ids, expected);

    let listing = routes.listing();
    assert_eq!(listing.iter().filter(|l| l.contains("app#0")).count(), 1, "{listing:#?}");

    let err = Router::new()
        .get("/ok", admin)
        .merge(Router::new().get("/{x", admin))
        .build()
        .unwrap_err();
    assert_eq!(err.pattern, "/{x");
    assert_eq!(err.route_index, 1);
}
