//! End-to-end routing behaviour through `Router` as a `Handler`.

use http::{Method, StatusCode};
use strata::{Endpoint, Handler, ParamError, Request, Response, Router, json};

mod common;

use common::{body_str, get, request};

#[tokio::test]
async fn first_registered_route_wins_on_overlap() {
    let router = Router::new()
        .get(r"/files/(?P<name>.+)", |_req: Request| async { "catch-all" })
        .unwrap()
        .get(r"/files/readme", |_req: Request| async { "readme" })
        .unwrap();

    let res = router.call(get("/files/readme")).await;
    assert_eq!(body_str(&res), "catch-all");
}

#[tokio::test]
async fn patterns_match_the_whole_path() {
    let router = Router::new()
        .get("/item", |_req: Request| async { "item" })
        .unwrap()
        .get("/item/x", |_req: Request| async { "item x" })
        .unwrap();

    assert_eq!(body_str(&router.call(get("/item")).await), "item");
    assert_eq!(body_str(&router.call(get("/item/x")).await), "item x");
    assert_eq!(router.call(get("/item/extra")).await.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(router.call(get("/items")).await.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(router.call(get("/item/")).await.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unregistered_route_is_json_404() {
    let router = Router::new()
        .post("/item", |_req: Request| async { "created" })
        .unwrap();

    for req in [get("/item"), request(Method::POST, "/nope")] {
        let res = router.call(req).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(res.header("content-type"), Some("application/json; charset=utf-8"));
        assert_eq!(body_str(&res), "{\"error\":\"resource could not be found\"}\n");
    }
}

#[tokio::test]
async fn named_capture_round_trip() {
    async fn show(req: Request) -> Response {
        let params = req.params();
        let as_int = params.get_int("id").unwrap();
        json(StatusCode::OK, &serde_json::json!({ "get": params.get("id"), "int": as_int }))
    }

    let router = Router::new().get(r"/item/(?P<id>[0-9]+)", show).unwrap();
    let res = router.call(get("/item/42")).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(body_str(&res), "{\"get\":\"42\",\"int\":42}\n");
}

#[tokio::test]
async fn get_int_on_letters_is_a_parse_error() {
    async fn show(req: Request) -> String {
        match req.params().get_int("slug") {
            Ok(n) => format!("int {n}"),
            Err(ParamError::Parse { name, .. }) => format!("parse error on {name}"),
            Err(ParamError::NotFound(name)) => format!("missing {name}"),
        }
    }

    let router = Router::new().get(r"/post/(?P<slug>[a-z0-9]+)", show).unwrap();

    assert_eq!(body_str(&router.call(get("/post/hello")).await), "parse error on slug");
    assert_eq!(body_str(&router.call(get("/post/123")).await), "int 123");
}

#[tokio::test]
async fn missing_capture_reads_as_empty_and_not_found() {
    async fn show(req: Request) -> String {
        let params = req.params();
        let missing = matches!(params.get_int("page"), Err(ParamError::NotFound(_)));
        format!("[{}] {missing} {}", params.get("page"), params.len())
    }

    let router = Router::new().get(r"/list(/(?P<page>\d+))?", show).unwrap();

    assert_eq!(body_str(&router.call(get("/list")).await), "[] true 0");
    assert_eq!(body_str(&router.call(get("/list/3")).await), "[3] false 1");
}

#[tokio::test]
async fn routes_without_groups_get_empty_params() {
    let router = Router::new()
        .get("/health", |req: Request| async move { req.params().len().to_string() })
        .unwrap();

    assert_eq!(body_str(&router.call(get("/health")).await), "0");
}

#[tokio::test]
async fn custom_methods_are_matched_exactly() {
    let purge = Method::from_bytes(b"PURGE").unwrap();
    let router = Router::new()
        .handle(purge.clone(), "/cache", |_req: Request| async { StatusCode::NO_CONTENT })
        .unwrap();

    assert_eq!(router.call(request(purge, "/cache")).await.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(router.call(request(Method::DELETE, "/cache")).await.status_code(), StatusCode::NOT_FOUND);
}

struct Greeter {
    greeting: &'static str,
}

impl Handler for Greeter {
    fn call(&self, req: Request) -> strata::BoxFuture {
        let text = format!("{}, {}", self.greeting, req.params().get("name"));
        Box::pin(async move { Response::text(text) })
    }
}

#[tokio::test]
async fn full_handler_values_are_routed_with_params() {
    let router = Router::new()
        .handle(
            Method::GET,
            r"/hello/(?P<name>\w+)",
            Endpoint::handler(Greeter { greeting: "hi" }),
        )
        .unwrap();

    assert_eq!(body_str(&router.call(get("/hello/ana")).await), "hi, ana");
}

#[tokio::test]
async fn dispatch_is_idempotent() {
    let router = Router::new()
        .get(r"/item/(?P<id>\d+)", |req: Request| async move {
            format!("item {}", req.params().get("id"))
        })
        .unwrap();

    for uri in ["/item/7", "/missing"] {
        let first = router.call(get(uri)).await;
        let second = router.call(get(uri)).await;
        assert_eq!(first.status_code(), second.status_code());
        assert_eq!(first.headers(), second.headers());
        assert_eq!(first.body(), second.body());
    }
}

#[tokio::test]
async fn concurrent_dispatch_shares_one_router() {
    let router = std::sync::Arc::new(
        Router::new()
            .get(r"/n/(?P<n>\d+)", |req: Request| async move {
                (req.params().get_int("n").unwrap() * 2).to_string()
            })
            .unwrap(),
    );

    let tasks: Vec<_> = (0..16)
        .map(|n| tokio::spawn(router.call(get(&format!("/n/{n}")))))
        .collect();

    for (n, task) in tasks.into_iter().enumerate() {
        let res = task.await.unwrap();
        assert_eq!(body_str(&res), (n * 2).to_string());
    }
}
