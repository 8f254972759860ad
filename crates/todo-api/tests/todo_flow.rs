use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use domain::UserId;
use serde_json::{json, Value};
use shared::{AuthUser, JwtAuthenticator};
use todo_api::{app_with_state, AppState};
use tower::ServiceExt; // for `oneshot`

const SECRET: &str = "integration-secret";

fn token_for(user: &str) -> String {
    let user = AuthUser {
        id: UserId::from_string(user).unwrap(),
        email: format!("{user}@example.com"),
    };
    JwtAuthenticator::new(SECRET)
        .issue(&user, chrono::Duration::hours(1))
        .unwrap()
}

// リクエストを送り、ステータスと JSON ボディを返すヘルパー
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("authorization", format!("Bearer {}", token_for(user)));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_create_get_update_delete_scenario() {
    let app = app_with_state(AppState::in_memory(SECRET));
    let user = Some("user-u");

    // 作成
    let (status, json) = send(
        &app,
        "POST",
        "/todos",
        user,
        Some(json!({"title": "Belajar Spring Boot", "description": "Deskripsi"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = json["data"]["id"].as_str().unwrap().to_string();

    // 取得
    let (status, json) = send(&app, "GET", &format!("/todos/{id}"), user, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["todo"]["title"], "Belajar Spring Boot");
    assert_eq!(json["data"]["todo"]["finished"], false);
    assert_eq!(json["data"]["todo"]["userId"], "user-u");

    // 更新
    let (status, json) = send(
        &app,
        "PUT",
        &format!("/todos/{id}"),
        user,
        Some(json!({"title": "Judul Baru", "description": "Deskripsi Baru", "finished": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["title"], "Judul Baru");
    assert_eq!(json["data"]["description"], "Deskripsi Baru");
    assert_eq!(json["data"]["finished"], true);

    // 削除
    let (status, json) = send(&app, "DELETE", &format!("/todos/{id}"), user, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");

    // 削除後は見つからない
    let (status, json) = send(&app, "GET", &format!("/todos/{id}"), user, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], "fail");
}

#[tokio::test]
async fn test_other_users_cannot_see_or_modify() {
    let app = app_with_state(AppState::in_memory(SECRET));

    let (_, json) = send(
        &app,
        "POST",
        "/todos",
        Some("alice"),
        Some(json!({"title": "private", "description": "alice only"})),
    )
    .await;
    let id = json["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/todos/{id}");

    let (status, _) = send(&app, "GET", &uri, Some("bob"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some("bob"),
        Some(json!({"title": "x", "description": "y", "finished": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, Some("bob"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(&app, "GET", "/todos", Some("bob"), None).await;
    assert_eq!(json["data"]["todos"], json!([]));

    // alice の Todo は変更されていない
    let (status, json) = send(&app, "GET", &uri, Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["todo"]["title"], "private");
    assert_eq!(json["data"]["todo"]["finished"], false);
}

#[tokio::test]
async fn test_search_filters_by_keyword() {
    let app = app_with_state(AppState::in_memory(SECRET));
    let user = Some("searcher");

    for (title, description) in [
        ("Belajar Spring Boot", "framework"),
        ("Belanja", "sayur"),
        ("Olahraga", "Belajar renang"),
    ] {
        let (status, _) = send(
            &app,
            "POST",
            "/todos",
            user,
            Some(json!({"title": title, "description": description})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, json) = send(&app, "GET", "/todos?search=Belajar", user, None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = json["data"]["todos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Belajar Spring Boot", "Olahraga"]);

    let (_, json) = send(&app, "GET", "/todos", user, None).await;
    assert_eq!(json["data"]["todos"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_without_finished_is_bad_request() {
    let app = app_with_state(AppState::in_memory(SECRET));
    let user = Some("user-u");
    let (_, json) = send(
        &app,
        "POST",
        "/todos",
        user,
        Some(json!({"title": "A", "description": "B"})),
    )
    .await;
    let id = json["data"]["id"].as_str().unwrap().to_string();

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/todos/{id}"),
        user,
        Some(json!({"title": "A", "description": "B", "finished": null})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "fail");
}

#[tokio::test]
async fn test_invalid_token_is_forbidden() {
    let app = app_with_state(AppState::in_memory(SECRET));

    let request = Request::builder()
        .method("GET")
        .uri("/todos")
        .header("authorization", "Bearer not.a.jwt")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
