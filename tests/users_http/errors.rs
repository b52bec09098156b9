use serde_json::{json, Value};

use crate::support::TestServer;

#[tokio::test]
async fn missing_email_is_rejected_without_write() {
    let server = TestServer::start_with(Some(
        r#"[{"id":1,"name":"A","email":"a@x.com","address":"Addr"}]"#,
    ))
    .await;
    let before = server.file();

    let resp = server
        .client
        .post(server.url("/users"))
        .json(&json!({ "name": "B", "address": "Addr" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": "email is required" })
    );

    assert_eq!(server.file(), before);
}

#[tokio::test]
async fn invalid_update_is_rejected_before_lookup() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .put(server.url("/users/99"))
        .json(&json!({ "name": "B", "email": "not-an-email", "address": "Addr" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": "email must be a valid email address" })
    );
}

#[tokio::test]
async fn malformed_json_body_is_400() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .post(server.url("/users"))
        .header("content-type", "application/json")
        .body("{ \"name\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
    assert_eq!(server.file(), "[]");
}

#[tokio::test]
async fn update_and_delete_missing_are_404() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .put(server.url("/users/5"))
        .json(&json!({ "name": "B", "email": "b@x.com", "address": "Addr" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = server.client.delete(server.url("/users/5")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": "User not found" })
    );
}

#[tokio::test]
async fn non_numeric_id_is_404() {
    let server = TestServer::start().await;
    let resp = server.client.get(server.url("/users/abc")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn id_with_trailing_garbage_uses_leading_digits() {
    let server = TestServer::start_with(Some(
        r#"[{"id":1,"name":"A","email":"a@x.com","address":"Addr"}]"#,
    ))
    .await;

    let resp = server.client.get(server.url("/users/1abc")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap()["id"], 1);
}

#[tokio::test]
async fn missing_backing_file_is_500_without_detail() {
    let server = TestServer::start_with(None).await;

    let resp = server.client.get(server.url("/users")).send().await.unwrap();
    assert_eq!(resp.status(), 500);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": "Failed to get users" })
    );

    let resp = server
        .client
        .post(server.url("/users"))
        .json(&json!({ "name": "A", "email": "a@x.com", "address": "Addr" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": "Failed to create user" })
    );
    assert!(!server.path.exists());
}

#[tokio::test]
async fn corrupt_backing_file_is_500() {
    let server = TestServer::start_with(Some("not json")).await;

    let resp = server.client.get(server.url("/users/1")).send().await.unwrap();
    assert_eq!(resp.status(), 500);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": "Failed to get user" })
    );
    assert_eq!(server.file(), "not json");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let server = TestServer::start().await;
    let resp = server.client.get(server.url("/nope")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": "Not found" })
    );
}
