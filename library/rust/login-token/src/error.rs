use thiserror::Error;

/// TokenError はトークン発行の失敗を表す。
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// 鍵の形式不正・アルゴリズム不一致を含む署名失敗。
    #[error("signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("signing task failed: {0}")]
    Task(String),
}

/// ValidationErrors は入力デコード時のフィールド単位のエラー一覧。
///
/// 表示時は全メッセージを `" / "` で連結した 1 行になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", .messages.join(" / "))]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 単一メッセージのエラーを生成する。
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// フィールド名付きのメッセージを追加する。
    pub fn add(&mut self, field: &str, message: &str) {
        self.messages.push(format!("{}: {}", field, message));
    }

    /// 別のエラー一覧をフィールド名のプレフィックス付きで取り込む。
    pub fn merge_nested(&mut self, prefix: &str, other: ValidationErrors) {
        self.messages.extend(
            other
                .messages
                .into_iter()
                .map(|m| format!("{}.{}", prefix, m)),
        );
    }

    pub fn has_errors(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// エラーが無ければ `Ok(())` を返す。
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.has_errors() {
            Err(self)
        } else {
            Ok(())
        }
    }
}
