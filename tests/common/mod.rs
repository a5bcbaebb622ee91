#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::body::{to_bytes, MessageBody};
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use taskvault::auth::{TokenService, AUTH_COOKIE};
use taskvault::config::Config;
use taskvault::models::{UserId, UserResponse};
use taskvault::repository::MemoryStore;
use taskvault::AppState;

pub const TEST_SECRET: &str = "test-secret";

pub fn test_config() -> Config {
    let values: HashMap<&str, &str> = [
        ("DATABASE_URL", "postgres://unused"),
        ("SECRET", TEST_SECRET),
        ("API_DOMAIN", "localhost"),
        ("BCRYPT_COST", "4"),
    ]
    .into_iter()
    .collect();
    Config::from_lookup(|key: &str| values.get(key).map(|v| v.to_string()))
        .expect("test config is valid")
}

/// Application state backed by a fresh in-memory store.
pub fn test_state() -> AppState {
    let store = MemoryStore::new();
    AppState::new(&test_config(), Arc::new(store.clone()), Arc::new(store))
}

pub fn tokens() -> TokenService {
    TokenService::new(TEST_SECRET)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Calls the app and returns status and body, whether the request was
/// answered by a handler or rejected by middleware.
pub async fn send<S, B>(app: &S, req: actix_http::Request) -> (StatusCode, actix_web::web::Bytes)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => {
            let status = resp.status();
            (status, test::read_body(resp).await)
        }
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            (status, to_bytes(resp.into_body()).await.unwrap())
        }
    }
}

/// Decodes a plain-text error body (a JSON string).
pub fn error_text(body: &[u8]) -> String {
    serde_json::from_slice(body).unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned())
}

pub fn auth_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == AUTH_COOKIE)
        .map(|c| c.into_owned())
}

pub async fn sign_up<S, B>(app: &S, email: &str, password: &str) -> UserId
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "signup failed: {}",
        String::from_utf8_lossy(&body)
    );
    let user: UserResponse = serde_json::from_slice(&body).expect("signup body is a user");
    user.id
}

/// Signs up and returns a bearer token for the new user.
pub async fn sign_up_with_token<S, B>(app: &S, email: &str) -> (UserId, String)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let id = sign_up(app, email, "password").await;
    let token = tokens().issue(id).expect("token issued");
    (id, token)
}
