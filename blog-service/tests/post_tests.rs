mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_create_post() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.signed_in("Alice Doe", "alice@x.com").await;

    let response = app
        .post("/api/v1/posts")
        .bearer_auth(&token)
        .json(&json!({ "title": "Hello world", "body": "My first post" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Successfully created post");
    assert_eq!(body["data"]["title"], "Hello world");
    assert_eq!(body["data"]["body"], "My first post");
    assert_eq!(body["data"]["user_id"], user_id);
    assert_eq!(body["data"]["user"]["name"], "Alice Doe");
}

#[tokio::test]
async fn test_create_post_validation() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in("Alice Doe", "alice@x.com").await;

    let response = app
        .post("/api/v1/posts")
        .bearer_auth(&token)
        .json(&json!({ "title": "Short", "body": "" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    let fields: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field_name"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "body"]);
}

#[tokio::test]
async fn test_create_post_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/posts")
        .json(&json!({ "title": "Hello world", "body": "My first post" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_posts_newest_first_with_paging() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in("Alice Doe", "alice@x.com").await;

    let mut ids = Vec::new();
    for i in 0..3 {
        let id = app
            .create_post(&token, &format!("Post number {}", i), "Some post body")
            .await;
        ids.push(id);
    }

    let response = app
        .get("/api/v1/posts")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Successfully fetched posts");
    let listed: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(listed, vec![ids[2], ids[1], ids[0]]);

    let response = app
        .get("/api/v1/posts?page=2&perPage=2")
        .send()
        .await
        .expect("Failed to execute request");

    let body: Value = response.json().await.expect("Failed to parse response");
    let listed: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(listed, vec![ids[0]]);
}

#[tokio::test]
async fn test_list_posts_ignores_bad_paging() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in("Alice Doe", "alice@x.com").await;
    app.create_post(&token, "Hello world", "My first post").await;

    let response = app
        .get("/api/v1/posts?page=abc&perPage=-5")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_posts_repeated_paging_keys() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in("Alice Doe", "alice@x.com").await;
    let id = app.create_post(&token, "Hello world", "My first post").await;

    let response = app
        .get("/api/v1/posts?page=1&page=2")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], true);
    assert_eq!(body["data"][0]["id"], id);
}

#[tokio::test]
async fn test_get_user_repeated_paging_keys() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.signed_in("Alice Doe", "alice@x.com").await;
    app.create_post(&token, "Hello world", "My first post").await;

    let response = app
        .get(&format!("/api/v1/users/{}?perPage=1&perPage=x", user_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["posts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_post() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in("Alice Doe", "alice@x.com").await;
    let id = app.create_post(&token, "Hello world", "My first post").await;

    let response = app
        .get(&format!("/api/v1/posts/{}", id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["title"], "Hello world");
}

#[tokio::test]
async fn test_get_missing_post() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/posts/999")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Post not found");
}

#[tokio::test]
async fn test_get_post_invalid_id() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/posts/abc")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_post() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in("Alice Doe", "alice@x.com").await;
    let id = app.create_post(&token, "Hello world", "My first post").await;

    let response = app
        .put(&format!("/api/v1/posts/{}", id))
        .bearer_auth(&token)
        .json(&json!({ "title": "Hello again" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Successfully updated post");
    assert_eq!(body["data"]["title"], "Hello again");
    assert_eq!(body["data"]["body"], "My first post");
}

#[tokio::test]
async fn test_only_owner_can_modify_post() {
    let app = TestApp::spawn().await;
    let (_, alice) = app.signed_in("Alice Doe", "alice@x.com").await;
    let (_, bob) = app.signed_in("Bob Doe", "bob@x.com").await;
    let id = app.create_post(&alice, "Hello world", "My first post").await;

    let response = app
        .put(&format!("/api/v1/posts/{}", id))
        .bearer_auth(&bob)
        .json(&json!({ "title": "Bob was here" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "You can only modify your own posts");

    let response = app
        .delete(&format!("/api/v1/posts/{}", id))
        .bearer_auth(&bob)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Untouched.
    let response = app
        .get(&format!("/api/v1/posts/{}", id))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "Hello world");
}

#[tokio::test]
async fn test_update_missing_post() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in("Alice Doe", "alice@x.com").await;

    let response = app
        .put("/api/v1/posts/999")
        .bearer_auth(&token)
        .json(&json!({ "title": "Hello again" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_post() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in("Alice Doe", "alice@x.com").await;
    let id = app.create_post(&token, "Hello world", "My first post").await;

    let response = app
        .delete(&format!("/api/v1/posts/{}", id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Successfully deleted post");

    let response = app
        .get(&format!("/api/v1/posts/{}", id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
