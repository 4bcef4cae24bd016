//! バックエンド接続の抽象。
//!
//! ストアは 1 操作につき 1 往復の `Command` を送り、`Reply` を 1 つ受け取る。
//! 接続の確立・切断・再設定はこの境界の外側で行う。

use async_trait::async_trait;

use crate::StoreError;

/// Command はバックエンドへ送る 1 リクエスト。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET key value [EX seconds]`
    Set {
        key: String,
        value: String,
        expire_seconds: Option<u64>,
    },
    /// `GET key`
    Get { key: String },
    /// `DEL key`
    Del { key: String },
    /// `EXISTS key`
    Exists { key: String },
}

impl Command {
    /// コマンド名を返す。ログ出力用。
    pub fn name(&self) -> &'static str {
        match self {
            Command::Set { .. } => "SET",
            Command::Get { .. } => "GET",
            Command::Del { .. } => "DEL",
            Command::Exists { .. } => "EXISTS",
        }
    }

    /// 対象キーを返す。
    pub fn key(&self) -> &str {
        match self {
            Command::Set { key, .. }
            | Command::Get { key }
            | Command::Del { key }
            | Command::Exists { key } => key,
        }
    }
}

/// Reply はバックエンドから返る生の応答。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// キーが存在しない、または書き込み条件を満たさなかった。
    Nil,
    /// ステータス応答（`OK` など）。
    Status(String),
    /// 整数応答。
    Int(i64),
    /// 値の応答。
    Bulk(String),
}

/// StoreConnection は確立済みで共有されるバックエンド接続。
///
/// 実装は `execute` の途中で Future が破棄されても、次の呼び出しで再利用できる状態を保つこと。
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait StoreConnection: Send + Sync {
    async fn execute(&self, command: Command) -> Result<Reply, StoreError>;
}
