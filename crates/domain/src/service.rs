//! Todo のビジネスロジック
//!
//! コントローラと永続化層の間に立ち、所有者スコープを強制する。
//! 「存在しない」と「他人の Todo」は区別せず、どちらも `None` / `false` を返す。

use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::TodoError;
use crate::repository::TodoRepository;
use crate::todo::{Todo, TodoId, UserId};

pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    /// Todo を作成（入力検証はコントローラ側の責務）
    pub fn create_todo(
        &self,
        user_id: &UserId,
        title: String,
        description: String,
    ) -> Result<Todo, TodoError> {
        let todo = Todo::new(self.repository.next_id(), user_id.clone(), title, description);
        let saved = self.repository.save(todo)?;

        info!(user_id = %user_id, todo_id = %saved.id, "todo created");
        Ok(saved)
    }

    /// 一覧取得。キーワードが空なら所有者の全件
    pub fn get_all_todos(
        &self,
        user_id: &UserId,
        keyword: Option<&str>,
    ) -> Result<Vec<Todo>, TodoError> {
        let todos = match keyword.filter(|k| !k.trim().is_empty()) {
            Some(keyword) => {
                debug!(user_id = %user_id, keyword, "searching todos");
                self.repository.find_by_keyword(user_id, keyword)?
            }
            None => self.repository.find_all_by_user_id(user_id)?,
        };
        Ok(todos)
    }

    pub fn get_todo_by_id(
        &self,
        user_id: &UserId,
        id: &TodoId,
    ) -> Result<Option<Todo>, TodoError> {
        Ok(self.repository.find_by_user_id_and_id(user_id, id)?)
    }

    /// 指定されたフィールドのみ更新する
    pub fn update_todo(
        &self,
        user_id: &UserId,
        id: &TodoId,
        title: Option<String>,
        description: Option<String>,
        finished: Option<bool>,
    ) -> Result<Option<Todo>, TodoError> {
        let Some(mut todo) = self.repository.find_by_user_id_and_id(user_id, id)? else {
            debug!(user_id = %user_id, todo_id = %id, "update target not found");
            return Ok(None);
        };

        todo.apply_update(title, description, finished);
        let saved = self.repository.save(todo)?;

        info!(user_id = %user_id, todo_id = %id, finished = saved.finished, "todo updated");
        Ok(Some(saved))
    }

    pub fn delete_todo(&self, user_id: &UserId, id: &TodoId) -> Result<bool, TodoError> {
        if self.repository.find_by_user_id_and_id(user_id, id)?.is_none() {
            debug!(user_id = %user_id, todo_id = %id, "delete target not found");
            return Ok(false);
        }

        self.repository.delete_by_id(id)?;
        info!(user_id = %user_id, todo_id = %id, "todo deleted");
        Ok(true)
    }
}
