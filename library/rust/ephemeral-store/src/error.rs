use thiserror::Error;

/// StoreError はエフェメラルストア操作の失敗を表す。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// バックエンド接続がエラーを返した、または送信に失敗した。
    #[error("connection error: {0}")]
    Connection(String),
    /// 期待した型と異なる応答を受け取った。
    #[error("unexpected reply: {0}")]
    UnexpectedReply(String),
    /// 書き込みが反映されなかった。
    #[error("{0}")]
    NotApplied(String),
}

impl StoreError {
    /// トランスポート層の失敗かどうかを返す。
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::Connection(_))
    }
}
