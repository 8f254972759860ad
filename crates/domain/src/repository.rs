use crate::errors::RepositoryError;
use crate::todo::{Todo, TodoId, UserId};

/// Todo の永続化インターフェース
///
/// 読み取り・更新・削除の前段は必ず `find_by_user_id_and_id` などの
/// 所有者で絞り込むクエリを通すこと。全件取得後にアプリ側で絞り込まない。
pub trait TodoRepository: Send + Sync {
    /// 新しい ID を払い出す
    fn next_id(&self) -> TodoId {
        TodoId::new()
    }

    /// 追加または同一 ID の置き換え。保存後のエンティティを返す
    fn save(&self, todo: Todo) -> Result<Todo, RepositoryError>;

    /// 全件（所有者を問わない）。診断用途
    fn find_all(&self) -> Result<Vec<Todo>, RepositoryError>;

    fn find_all_by_user_id(&self, user_id: &UserId) -> Result<Vec<Todo>, RepositoryError>;

    /// 所有者のうち、タイトルまたは説明にキーワードを含むもの
    fn find_by_keyword(
        &self,
        user_id: &UserId,
        keyword: &str,
    ) -> Result<Vec<Todo>, RepositoryError>;

    fn find_by_user_id_and_id(
        &self,
        user_id: &UserId,
        id: &TodoId,
    ) -> Result<Option<Todo>, RepositoryError>;

    fn delete_by_id(&self, id: &TodoId) -> Result<(), RepositoryError>;
}
