use serde_json::{json, Value};

use crate::support::TestServer;

#[tokio::test]
async fn create_get_update_delete() {
    let server = TestServer::start().await;
    let client = &server.client;

    // Create
    let resp = client
        .post(server.url("/users"))
        .json(&json!({ "name": "A", "email": "a@x.com", "address": "Addr" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(
        created,
        json!({ "id": 1, "name": "A", "email": "a@x.com", "address": "Addr" })
    );

    // Read back
    let resp = client.get(server.url("/users/1")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), created);

    // Update
    let resp = client
        .put(server.url("/users/1"))
        .json(&json!({ "name": "B", "email": "b@x.com", "address": "Addr2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "id": 1, "name": "B", "email": "b@x.com", "address": "Addr2" })
    );

    // Delete
    let resp = client.delete(server.url("/users/1")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "message": "User deleted successfully" })
    );

    // Gone
    let resp = client.get(server.url("/users/1")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": "User not found" })
    );
}

#[tokio::test]
async fn list_returns_stored_order() {
    let server = TestServer::start().await;
    for name in ["A", "B", "C"] {
        let resp = server
            .client
            .post(server.url("/users"))
            .json(&json!({ "name": name, "email": "u@x.com", "address": "Addr" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    let resp = server.client.get(server.url("/users")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let users: Vec<Value> = resp.json().await.unwrap();
    let names: Vec<&str> = users.iter().map(|u| u["name"].as_str().unwrap()).collect();
    let ids: Vec<u64> = users.iter().map(|u| u["id"].as_u64().unwrap()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn writes_land_in_backing_file() {
    let server = TestServer::start().await;
    server
        .client
        .post(server.url("/users"))
        .json(&json!({ "name": "A", "email": "a@x.com", "address": "Addr" }))
        .send()
        .await
        .unwrap();

    let on_disk: Value = serde_json::from_str(&server.file()).unwrap();
    assert_eq!(
        on_disk,
        json!([{ "id": 1, "name": "A", "email": "a@x.com", "address": "Addr" }])
    );
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let server = TestServer::start().await;

    let mut tasks = Vec::new();
    for i in 0..16 {
        let client = server.client.clone();
        let url = server.url("/users");
        tasks.push(tokio::spawn(async move {
            let resp = client
                .post(url)
                .json(&json!({ "name": format!("U{i}"), "email": "u@x.com", "address": "Addr" }))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 201);
            resp.json::<Value>().await.unwrap()["id"].as_u64().unwrap()
        }));
    }

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=16).collect::<Vec<u64>>());

    let users: Vec<Value> = serde_json::from_str(&server.file()).unwrap();
    assert_eq!(users.len(), 16);
}

#[tokio::test]
async fn index_and_health() {
    let server = TestServer::start().await;

    let resp = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(resp.text().await.unwrap(), "<h1>Hello World</h1>");

    let resp = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "ok": true }));
}
