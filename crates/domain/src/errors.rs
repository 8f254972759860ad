use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid TodoId: {0}")]
    InvalidTodoId(String),

    #[error("Invalid UserId: {0}")]
    InvalidUserId(String),
}

/// 永続化層のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// ストアが利用できない（ロックの汚染、接続断など）
    #[error("Repository unavailable: {0}")]
    Unavailable(String),

    #[error("Repository conflict: {0}")]
    Conflict(String),
}

/// サービス層のエラー
///
/// 「見つからない / 所有者でない」はエラーではなく `None` / `false` で表現する。
/// ここに来るのは永続化層の失敗のみ。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
