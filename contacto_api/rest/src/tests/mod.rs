use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request, StatusCode},
    Router,
};
use contacto_core_contact_contracts::{ContactFeatureService, MockContactFeatureService};
use contacto_core_health_contracts::{HealthFeatureService, MockHealthFeatureService};
use tower::ServiceExt;

use crate::{RestServer, RestServerConfig};

mod contact;

const ALLOWED_ORIGIN: &str = "https://www.example.com";

fn router(health: impl HealthFeatureService, contact: impl ContactFeatureService) -> Router {
    RestServer {
        health,
        contact,
        config: RestServerConfig {
            addr: ([127, 0, 0, 1], 0).into(),
            allowed_origin: HeaderValue::from_static(ALLOWED_ORIGIN),
        },
    }
    .router()
}

fn contact_router(contact: impl ContactFeatureService) -> Router {
    router(MockHealthFeatureService::new(), contact)
}

fn health_router(health: impl HealthFeatureService) -> Router {
    router(health, MockContactFeatureService::new())
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl TestResponse {
    fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(body.to_vec()).unwrap(),
    }
}

fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}
