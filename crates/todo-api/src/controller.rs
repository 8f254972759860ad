//! HTTP から独立したコントローラ
//!
//! ボディの入力検証 → 認証確認 → パス ID の解釈 → サービス呼び出しの順に処理する。
//! ボディの検証に失敗した場合は認証コンテキストもサービスも参照しない。

use std::sync::Arc;

use domain::{TodoId, TodoService, UserId};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{ApiResponse, AuthContext};

use crate::error::ApiError;

pub type ApiResult = Result<ApiResponse<Value>, ApiError>;

/// POST /todos リクエスト
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// PUT /todos/{id} リクエスト（全フィールド必須）
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub finished: Option<bool>,
}

pub struct TodoController {
    service: Arc<TodoService>,
}

impl TodoController {
    pub fn new(service: Arc<TodoService>) -> Self {
        Self { service }
    }

    pub fn create_todo(&self, auth: &dyn AuthContext, req: CreateTodoRequest) -> ApiResult {
        let (title, description) = require_content(req.title, req.description)?;
        let user_id = current_user(auth)?;

        let todo = self.service.create_todo(&user_id, title, description)?;
        Ok(ApiResponse::success(
            "Todo created",
            Some(json!({ "id": todo.id })),
        ))
    }

    pub fn list_todos(&self, auth: &dyn AuthContext, search: Option<&str>) -> ApiResult {
        let user_id = current_user(auth)?;

        let todos = self.service.get_all_todos(&user_id, search)?;
        Ok(ApiResponse::success(
            "Todos retrieved",
            Some(json!({ "todos": todos })),
        ))
    }

    pub fn get_todo(&self, auth: &dyn AuthContext, id: &str) -> ApiResult {
        let user_id = current_user(auth)?;
        let id = parse_id(id)?;

        let todo = self
            .service
            .get_todo_by_id(&user_id, &id)?
            .ok_or(ApiError::NotFound)?;
        Ok(ApiResponse::success(
            "Todo retrieved",
            Some(json!({ "todo": todo })),
        ))
    }

    pub fn update_todo(
        &self,
        auth: &dyn AuthContext,
        id: &str,
        req: UpdateTodoRequest,
    ) -> ApiResult {
        let (title, description) = require_content(req.title, req.description)?;
        // null は「変更なし」ではなく検証エラー
        let finished = req
            .finished
            .ok_or_else(|| ApiError::BadRequest("Field 'finished' is required".to_string()))?;
        let user_id = current_user(auth)?;
        let id = parse_id(id)?;

        let todo = self
            .service
            .update_todo(&user_id, &id, Some(title), Some(description), Some(finished))?
            .ok_or(ApiError::NotFound)?;
        Ok(ApiResponse::success("Todo updated", Some(json!(todo))))
    }

    pub fn delete_todo(&self, auth: &dyn AuthContext, id: &str) -> ApiResult {
        let user_id = current_user(auth)?;
        let id = parse_id(id)?;

        if !self.service.delete_todo(&user_id, &id)? {
            return Err(ApiError::NotFound);
        }
        Ok(ApiResponse::success("Todo deleted", None))
    }
}

fn current_user(auth: &dyn AuthContext) -> Result<UserId, ApiError> {
    if !auth.is_authenticated() {
        return Err(ApiError::Forbidden);
    }
    auth.auth_user().map(|user| user.id).ok_or(ApiError::Forbidden)
}

fn require_content(
    title: Option<String>,
    description: Option<String>,
) -> Result<(String, String), ApiError> {
    let title = non_blank(title)
        .ok_or_else(|| ApiError::BadRequest("Field 'title' must not be empty".to_string()))?;
    let description = non_blank(description).ok_or_else(|| {
        ApiError::BadRequest("Field 'description' must not be empty".to_string())
    })?;
    Ok((title, description))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_id(id: &str) -> Result<TodoId, ApiError> {
    TodoId::parse(id).map_err(|e| ApiError::BadRequest(e.to_string()))
}
