//! Todo HTTP API（axum）
//!
//! ルーティングと共有状態の組み立てのみを担当し、
//! 処理本体は `controller` → `domain::TodoService` に委譲します。

use std::sync::Arc;

use axum::{routing::get, Router};
use domain::{TodoRepository, TodoService};
use infrastructure::InMemoryTodoRepository;
use shared::JwtAuthenticator;
use tower_http::trace::TraceLayer;

pub mod controller;
pub mod error;
pub mod handlers;

pub use controller::TodoController;
pub use error::ApiError;

/// アプリケーションの共有状態
#[derive(Clone)]
pub struct AppState {
    controller: Arc<TodoController>,
    authenticator: Arc<JwtAuthenticator>,
}

impl AppState {
    /// リポジトリと認証器を注入して組み立てる
    pub fn new(repository: Arc<dyn TodoRepository>, authenticator: JwtAuthenticator) -> Self {
        let service = Arc::new(TodoService::new(repository));
        Self {
            controller: Arc::new(TodoController::new(service)),
            authenticator: Arc::new(authenticator),
        }
    }

    /// InMemory ストアを使う版（開発/テスト用）
    pub fn in_memory(jwt_secret: &str) -> Self {
        Self::new(
            Arc::new(InMemoryTodoRepository::new()),
            JwtAuthenticator::new(jwt_secret),
        )
    }
}

/// ルータを構築して返します。
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/:id",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .fallback(handlers::route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
