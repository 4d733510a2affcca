//! Minimal strata example: a small JSON people API behind Basic auth.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl -u admin:secret http://localhost:3000/people
//!   curl -u admin:secret http://localhost:3000/people/1
//!   curl -u admin:secret -X POST http://localhost:3000/people \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"carol"}'
//!   curl -u admin:secret http://localhost:3000/people/abc      # 404
//!   curl http://localhost:3000/people                          # 400

use std::sync::{Arc, RwLock};

use http::StatusCode;
use serde::{Deserialize, Serialize};
use strata::middleware::{BasicAuth, Logger, Recoverer};
use strata::{BoxFuture, Endpoint, Handler, Request, Response, Router, Server, bind_json, json, json_error};

#[derive(Clone, Serialize)]
struct Person {
    id: i64,
    name: String,
}

#[derive(Deserialize)]
struct NewPerson {
    name: String,
}

type People = Arc<RwLock<Vec<Person>>>;

#[tokio::main]
async fn main() -> Result<(), strata::Error> {
    tracing_subscriber::fmt::init();

    let people: People = Arc::new(RwLock::new(vec![
        Person { id: 1, name: "alice".into() },
        Person { id: 2, name: "bob".into() },
    ]));

    let app = Router::new()
        .get("/people", Endpoint::handler(ListPeople(people.clone())))?
        .get(r"/people/(?P<id>\d+)", Endpoint::handler(GetPerson(people.clone())))?
        .post("/people", Endpoint::handler(CreatePerson(people)))?
        .get("/panic", explode)?
        .with(BasicAuth::new(|user, pass| user == "admin" && pass == "secret"))
        .with(Recoverer)
        .with(Logger);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_owned());
    Server::bind(&format!("0.0.0.0:{port}"))?.serve(app).await
}

// GET /people
struct ListPeople(People);

impl Handler for ListPeople {
    fn call(&self, _req: Request) -> BoxFuture {
        let res = match self.0.read() {
            Ok(people) => json(StatusCode::OK, &*people),
            Err(_) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "store unavailable"),
        };
        Box::pin(async move { res })
    }
}

// GET /people/{id}
struct GetPerson(People);

impl Handler for GetPerson {
    fn call(&self, req: Request) -> BoxFuture {
        let res = match (req.params().get_int("id"), self.0.read()) {
            (Err(e), _) => json_error(StatusCode::BAD_REQUEST, &e.to_string()),
            (_, Err(_)) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "store unavailable"),
            (Ok(id), Ok(people)) => match people.iter().find(|p| p.id == id) {
                Some(person) => json(StatusCode::OK, person),
                None => json_error(StatusCode::NOT_FOUND, "person not found"),
            },
        };
        Box::pin(async move { res })
    }
}

// POST /people
struct CreatePerson(People);

impl Handler for CreatePerson {
    fn call(&self, req: Request) -> BoxFuture {
        let res = match (bind_json::<NewPerson>(&req), self.0.write()) {
            (Err(_), _) => json_error(StatusCode::BAD_REQUEST, "invalid body"),
            (_, Err(_)) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "store unavailable"),
            (Ok(new), Ok(mut people)) => {
                let person = Person { id: people.len() as i64 + 1, name: new.name };
                people.push(person.clone());
                json(StatusCode::CREATED, &person)
            }
        };
        Box::pin(async move { res })
    }
}

// GET /panic. Recoverer turns this into a 500, Logger still logs it.
async fn explode(_req: Request) -> Response {
    panic!("demo panic")
}
