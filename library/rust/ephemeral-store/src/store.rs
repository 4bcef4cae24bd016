use std::sync::Arc;

use tracing::{debug, warn};

use crate::reply::{falsy_to_error, integer_reply, status_reply, value_reply};
use crate::{Command, Reply, StoreConnection, StoreError};

/// 書き込みが反映されなかった場合の既定メッセージ。
pub const DEFAULT_SET_ERROR_MESSAGE: &str = "Error setting key value pair on redis";

/// EphemeralStore は共有接続上のキー・バリュー操作を提供する。
///
/// 各操作はバックエンドへの 1 往復だけを行い、状態を持たない。
/// 書き込みは「成功」か「失敗」のどちらかで返し、読み取りの「見つからない」は正常な結果として返す。
#[derive(Clone)]
pub struct EphemeralStore {
    conn: Arc<dyn StoreConnection>,
    key_prefix: Option<String>,
}

impl EphemeralStore {
    pub fn new(conn: Arc<dyn StoreConnection>) -> Self {
        Self {
            conn,
            key_prefix: None,
        }
    }

    /// 名前空間分離のためのキープレフィックスを設定する。
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    fn prefixed_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }

    async fn round_trip(&self, command: Command) -> Result<Reply, StoreError> {
        let name = command.name();
        let key = command.key().to_string();
        let result = self.conn.execute(command).await;
        match &result {
            Ok(reply) => debug!(command = name, key = %key, reply = ?reply, "store round trip"),
            Err(e) => warn!(command = name, key = %key, error = %e, "store round trip failed"),
        }
        result
    }

    /// TTL（秒）付きで値を書き込む。
    pub async fn set_with_expiration(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
        error_msg: Option<&str>,
    ) -> Result<(), StoreError> {
        let reply = self
            .round_trip(Command::Set {
                key: self.prefixed_key(key),
                value: value.to_string(),
                expire_seconds: Some(ttl_seconds),
            })
            .await;
        falsy_to_error(status_reply(reply), not_applied(error_msg))
    }

    /// 有効期限なしで値を書き込む。
    pub async fn set(
        &self,
        key: &str,
        value: &str,
        error_msg: Option<&str>,
    ) -> Result<(), StoreError> {
        let reply = self
            .round_trip(Command::Set {
                key: self.prefixed_key(key),
                value: value.to_string(),
                expire_seconds: None,
            })
            .await;
        falsy_to_error(status_reply(reply), not_applied(error_msg))
    }

    /// キーを削除する。実際に削除された場合のみ `true`。
    pub async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let reply = self
            .round_trip(Command::Del {
                key: self.prefixed_key(key),
            })
            .await;
        integer_reply(reply, Some(1))
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let reply = self
            .round_trip(Command::Get {
                key: self.prefixed_key(key),
            })
            .await;
        value_reply(reply)
    }

    pub async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let reply = self
            .round_trip(Command::Exists {
                key: self.prefixed_key(key),
            })
            .await;
        integer_reply(reply, Some(1))
    }
}

fn not_applied(error_msg: Option<&str>) -> StoreError {
    StoreError::NotApplied(error_msg.unwrap_or(DEFAULT_SET_ERROR_MESSAGE).to_string())
}
