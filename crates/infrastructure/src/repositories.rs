use std::sync::{Mutex, MutexGuard};

use domain::{RepositoryError, Todo, TodoId, TodoRepository, UserId};

/// メモリ上の Todo ストア（開発/テスト用）
///
/// `Vec` で保持するため一覧は挿入順。`save` で既存 ID を置き換えても位置は変わらない。
/// `save` は upsert のため最後の書き込みが勝つ。削除後に古い読み取りから `save` すると復活する。
#[derive(Default)]
pub struct InMemoryTodoRepository {
    todos: Mutex<Vec<Todo>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Todo>>, RepositoryError> {
        self.todos.lock().map_err(|e| {
            tracing::error!(error = %e, "todo store lock poisoned");
            RepositoryError::Unavailable("todo store lock poisoned".to_string())
        })
    }

    fn select<F>(&self, predicate: F) -> Result<Vec<Todo>, RepositoryError>
    where
        F: Fn(&Todo) -> bool,
    {
        let todos = self.lock()?;
        Ok(todos.iter().filter(|t| predicate(t)).cloned().collect())
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn save(&self, todo: Todo) -> Result<Todo, RepositoryError> {
        let mut todos = self.lock()?;
        match todos.iter_mut().find(|t| t.id == todo.id) {
            Some(existing) => {
                if existing.user_id != todo.user_id {
                    return Err(RepositoryError::Conflict(format!(
                        "todo {} belongs to another user",
                        todo.id
                    )));
                }
                *existing = todo.clone();
            }
            None => todos.push(todo.clone()),
        }
        Ok(todo)
    }

    fn find_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        self.select(|_| true)
    }

    fn find_all_by_user_id(&self, user_id: &UserId) -> Result<Vec<Todo>, RepositoryError> {
        self.select(|t| t.is_owned_by(user_id))
    }

    fn find_by_keyword(
        &self,
        user_id: &UserId,
        keyword: &str,
    ) -> Result<Vec<Todo>, RepositoryError> {
        self.select(|t| t.is_owned_by(user_id) && t.matches_keyword(keyword))
    }

    fn find_by_user_id_and_id(
        &self,
        user_id: &UserId,
        id: &TodoId,
    ) -> Result<Option<Todo>, RepositoryError> {
        let todos = self.lock()?;
        Ok(todos
            .iter()
            .find(|t| &t.id == id && t.is_owned_by(user_id))
            .cloned())
    }

    fn delete_by_id(&self, id: &TodoId) -> Result<(), RepositoryError> {
        self.lock()?.retain(|t| &t.id != id);
        Ok(())
    }
}
