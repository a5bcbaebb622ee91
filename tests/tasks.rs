mod common;

use std::net::TcpListener;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{test, web, App, HttpServer};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{bearer, error_text, send, sign_up_with_token, test_state, tokens};
use taskvault::auth::{Claims, TokenService, AUTH_COOKIE};
use taskvault::models::TaskResponse;
use taskvault::routes;

#[actix_rt::test]
async fn test_tasks_require_a_credential_over_the_wire() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let state = web::Data::new(test_state());
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .workers(1)
    .listen(listener)
    .expect("failed to listen")
    .run();
    let handle = server.handle();
    actix_rt::spawn(server);

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://127.0.0.1:{}/tasks", port))
        .json(&json!({ "title": "Unauthorized Task" }))
        .send()
        .await
        .expect("failed to send request");

    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

    handle.stop(true).await;
}

#[actix_rt::test]
async fn test_rejected_credentials() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::config),
    )
    .await;

    let expired = tokens()
        .sign(&Claims {
            user_id: Some(json!(1)),
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
        })
        .unwrap();
    let foreign = TokenService::new("someone-elses-secret")
        .issue(taskvault::models::UserId(1))
        .unwrap();
    let no_identity = tokens()
        .sign(&Claims {
            user_id: None,
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        })
        .unwrap();

    let cases = vec![
        (None, "no credential"),
        (Some("garbage".to_string()), "malformed token"),
        (Some(expired), "expired token"),
        (Some(foreign), "foreign signature"),
        (Some(no_identity), "missing identity claim"),
    ];

    for (token, description) in cases {
        let mut req = test::TestRequest::get().uri("/tasks");
        if let Some(token) = &token {
            req = req.insert_header(bearer(token));
        }
        let (status, _) = send(&app, req.to_request()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "case: {}", description);
    }
}

#[actix_rt::test]
async fn test_empty_bearer_falls_back_to_cookie() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::config),
    )
    .await;
    let (_, token) = sign_up_with_token(&app, "cookie@test.com").await;

    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(("Authorization", "Bearer "))
        .cookie(Cookie::new(AUTH_COOKIE, token.clone()))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    // a non-empty bearer still takes precedence
    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(bearer("garbage"))
        .cookie(Cookie::new(AUTH_COOKIE, token))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_task_crud_flow() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::config),
    )
    .await;
    let (_, token) = sign_up_with_token(&app, "crud@test.com").await;

    // Create
    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "CRUD Task Original" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: TaskResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.title, "CRUD Task Original");
    assert!(created.created_at <= created.updated_at);

    // Get
    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", created.id))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: TaskResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(fetched, created);

    // Update
    let req = test::TestRequest::put()
        .uri(&format!("/tasks/{}", created.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "CRUD Task Updated" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let updated: TaskResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "CRUD Task Updated");

    // List
    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let tasks: Vec<TaskResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(tasks, vec![updated]);

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", created.id))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    // Gone
    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", created.id))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_text(&body), format!("not found: task {}", created.id));
}

#[actix_rt::test]
async fn test_tasks_listed_in_creation_order() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::config),
    )
    .await;
    let (_, token) = sign_up_with_token(&app, "order@test.com").await;

    for title in ["first", "second", "third"] {
        let req = test::TestRequest::post()
            .uri("/tasks")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": title }))
            .to_request();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(bearer(&token))
        .to_request();
    let (_, body) = send(&app, req).await;
    let titles: Vec<String> = serde_json::from_slice::<Vec<TaskResponse>>(&body)
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[actix_rt::test]
async fn test_title_validation_over_http() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::config),
    )
    .await;
    let (_, token) = sign_up_with_token(&app, "titles@test.com").await;

    let cases = vec![
        (json!({ "title": "" }), Some("title: title is requred.")),
        (json!({}), Some("title: title is requred.")),
        (json!({ "title": "a".repeat(101) }), Some("title: limited max 100 char.")),
        (json!({ "title": "a".repeat(100) }), None),
    ];

    for (payload, expected_error) in cases {
        let req = test::TestRequest::post()
            .uri("/tasks")
            .insert_header(bearer(&token))
            .set_json(&payload)
            .to_request();
        let (status, body) = send(&app, req).await;
        match expected_error {
            Some(message) => {
                assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
                assert_eq!(error_text(&body), message);
            }
            None => assert_eq!(status, StatusCode::CREATED, "payload: {}", payload),
        }
    }
}

#[actix_rt::test]
async fn test_tenants_cannot_touch_each_others_tasks() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::config),
    )
    .await;
    let (_, alice) = sign_up_with_token(&app, "alice@test.com").await;
    let (bob_id, bob) = sign_up_with_token(&app, "bob@test.com").await;

    // Alice creates a task, naming Bob as owner in the body; it is still hers.
    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(bearer(&alice))
        .set_json(json!({ "title": "alice's plan", "userId": bob_id, "user_id": bob_id }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let task: TaskResponse = serde_json::from_slice(&body).unwrap();
    let task_uri = format!("/tasks/{}", task.id);

    // Bob's list is empty
    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(bearer(&bob))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let bob_tasks: Vec<TaskResponse> = serde_json::from_slice(&body).unwrap();
    assert!(bob_tasks.is_empty());

    // Bob cannot get, update or delete it
    let get = test::TestRequest::get()
        .uri(&task_uri)
        .insert_header(bearer(&bob))
        .to_request();
    let update = test::TestRequest::put()
        .uri(&task_uri)
        .insert_header(bearer(&bob))
        .set_json(json!({ "title": "bob was here" }))
        .to_request();
    let delete = test::TestRequest::delete()
        .uri(&task_uri)
        .insert_header(bearer(&bob))
        .to_request();
    for req in [get, update, delete] {
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error_text(&body).starts_with("not found:"));
    }

    // Alice still sees the original
    let req = test::TestRequest::get()
        .uri(&task_uri)
        .insert_header(bearer(&alice))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let unchanged: TaskResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(unchanged.title, "alice's plan");
}

#[actix_rt::test]
async fn test_update_and_delete_of_missing_task_fail() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::config),
    )
    .await;
    let (_, token) = sign_up_with_token(&app, "missing@test.com").await;

    let req = test::TestRequest::put()
        .uri("/tasks/999")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "nothing here" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_text(&body), "not found: task 999");

    let req = test::TestRequest::delete()
        .uri("/tasks/999")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_text(&body), "not found: task 999");
}
