use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{ApiResponse, BearerAuthContext};

use crate::controller::{CreateTodoRequest, UpdateTodoRequest};
use crate::error::ApiError;
use crate::AppState;

type HandlerResult = Result<Json<ApiResponse<Value>>, ApiError>;

/// GET /todos のクエリ
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    /// サービスの簡易ステータス
    status: &'static str,
}

/// ヘルスチェック用ハンドラ
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthBody { status: "ok" }))
}

pub async fn create_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> HandlerResult {
    let Json(req) = payload?;
    let auth = BearerAuthContext::from_headers(&headers, &state.authenticator);
    state.controller.create_todo(&auth, req).map(Json)
}

pub async fn list_todos(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> HandlerResult {
    let Query(query) = query?;
    let auth = BearerAuthContext::from_headers(&headers, &state.authenticator);
    state
        .controller
        .list_todos(&auth, query.search.as_deref())
        .map(Json)
}

pub async fn get_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> HandlerResult {
    let auth = BearerAuthContext::from_headers(&headers, &state.authenticator);
    state.controller.get_todo(&auth, &id).map(Json)
}

pub async fn update_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> HandlerResult {
    let Json(req) = payload?;
    let auth = BearerAuthContext::from_headers(&headers, &state.authenticator);
    state.controller.update_todo(&auth, &id, req).map(Json)
}

pub async fn delete_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> HandlerResult {
    let auth = BearerAuthContext::from_headers(&headers, &state.authenticator);
    state.controller.delete_todo(&auth, &id).map(Json)
}

/// 未定義ルート
pub async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::fail("Route not found")),
    )
}
