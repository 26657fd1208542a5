use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, app_with, DevOps, Engineer, ServiceOptions, Team};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

// --- list ---

#[tokio::test]
async fn every_collection_starts_empty() {
    let app = app();
    for uri in ["/engineers", "/developers", "/operations", "/devops"] {
        let resp = send(&app, empty_request("GET", uri)).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let items: Vec<serde_json::Value> = body_json(resp).await;
        assert!(items.is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn list_keeps_insertion_order() {
    let app = app();
    for name in ["Zed", "Ada", "Mia"] {
        let body = format!(r#"{{"name":"{name}","email":"{name}@example.com"}}"#);
        let resp = send(&app, json_request("POST", "/engineers", &body)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
    let resp = send(&app, empty_request("GET", "/engineers")).await;
    let engineers: Vec<Engineer> = body_json(resp).await;
    let names: Vec<_> = engineers.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Zed", "Ada", "Mia"]);
}

// --- create ---

#[tokio::test]
async fn create_engineer_assigns_id() {
    let app = app();
    let resp = send(
        &app,
        json_request(
            "POST",
            "/engineers",
            r#"{"id":"client-chosen","name":"John Doe","email":"john.doe@example.com"}"#,
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let engineer: Engineer = body_json(resp).await;
    assert!(!engineer.id.is_empty());
    assert_ne!(engineer.id, "client-chosen");
    assert_eq!(engineer.name, "John Doe");
    assert_eq!(engineer.email, "john.doe@example.com");
}

#[tokio::test]
async fn create_developer_without_engineers() {
    let app = app();
    let resp = send(&app, json_request("POST", "/developers", r#"{"name":"Frontend Team","engineers":[]}"#)).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let team: serde_json::Value = body_json(resp).await;
    assert_eq!(team["name"], "Frontend Team");
    assert_eq!(team["engineers"], serde_json::json!([]));
}

#[tokio::test]
async fn create_engineer_missing_email_returns_422() {
    let app = app();
    let resp = send(&app, json_request("POST", "/engineers", r#"{"name":"Ada"}"#)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_devops_stores_both_teams() {
    let app = app();
    let body = r#"{
        "dev":{"id":"d1","name":"Backend","engineers":[{"id":"e1","name":"Ada","email":"ada@example.com"}]},
        "ops":{"id":"o1","name":"SRE","engineers":[]}
    }"#;
    let resp = send(&app, json_request("POST", "/devops", body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: DevOps = body_json(resp).await;

    let resp = send(&app, empty_request("GET", &format!("/devops/{}", created.id))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: DevOps = body_json(resp).await;
    assert_eq!(fetched, created);
    assert_eq!(fetched.dev.engineers[0].name, "Ada");
}

// --- get ---

#[tokio::test]
async fn get_team_not_found() {
    let app = app();
    let resp = send(&app, empty_request("GET", "/operations/does-not-exist")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn engineer_item_get_is_off_by_default() {
    let app = app();
    let resp = send(&app, empty_request("GET", "/engineers/anything")).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn engineer_item_get_when_enabled() {
    let app = app_with(ServiceOptions {
        engineer_item_get: true,
    });
    let resp = send(&app, json_request("POST", "/engineers", r#"{"name":"Ada","email":"ada@example.com"}"#)).await;
    let created: Engineer = body_json(resp).await;

    let resp = send(&app, empty_request("GET", &format!("/engineers/{}", created.id))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Engineer = body_json(resp).await;
    assert_eq!(fetched, created);

    let resp = send(&app, empty_request("GET", "/engineers/does-not-exist")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- update ---

#[tokio::test]
async fn update_not_found() {
    let app = app();
    let resp = send(
        &app,
        json_request("PUT", "/engineers/does-not-exist", r#"{"name":"Nope","email":"nope@example.com"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_is_full_replace_keeping_path_id() {
    let app = app();
    let body = r#"{"name":"Backend","engineers":[{"id":"e1","name":"Ada","email":"ada@example.com"}]}"#;
    let resp = send(&app, json_request("POST", "/developers", body)).await;
    let created: Team = body_json(resp).await;

    let resp = send(
        &app,
        json_request("PUT", &format!("/developers/{}", created.id), r#"{"id":"other","name":"Platform"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Team = body_json(resp).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Platform");
    assert!(updated.engineers.is_empty());
}

// --- delete ---

#[tokio::test]
async fn delete_not_found() {
    let app = app();
    let resp = send(&app, empty_request("DELETE", "/devops/does-not-exist")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let app = app();

    // create
    let resp = send(&app, json_request("POST", "/operations", r#"{"name":"SRE","engineers":[]}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Team = body_json(resp).await;
    let id = created.id.clone();

    // list: should contain the one team
    let resp = send(&app, empty_request("GET", "/operations")).await;
    let teams: Vec<Team> = body_json(resp).await;
    assert_eq!(teams, vec![created.clone()]);

    // get
    let resp = send(&app, empty_request("GET", &format!("/operations/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Team = body_json(resp).await;
    assert_eq!(fetched, created);

    // update
    let resp = send(
        &app,
        json_request(
            "PUT",
            &format!("/operations/{id}"),
            r#"{"name":"SRE","engineers":[{"id":"e9","name":"Mia","email":"mia@example.com"}]}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Team = body_json(resp).await;
    assert_eq!(updated.engineers.len(), 1);

    // delete
    let resp = send(&app, empty_request("DELETE", &format!("/operations/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete: 404
    let resp = send(&app, empty_request("GET", &format!("/operations/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete: empty
    let resp = send(&app, empty_request("GET", "/operations")).await;
    let teams: Vec<Team> = body_json(resp).await;
    assert!(teams.is_empty());
}
