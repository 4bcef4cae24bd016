use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Command, Reply, StoreConnection, StoreError};

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| exp <= Instant::now())
    }
}

/// InMemoryConnection はプロセス内で完結するバックエンド実装。
///
/// 応答は Redis と同じ形で返す。`SET ... EX 0` は Redis と同様にエラーとする。
/// 期限切れエントリは GET / EXISTS / DEL で触れた時点で取り除く。
#[derive(Clone, Default)]
pub struct InMemoryConnection {
    store: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生きている値を返す。期限切れなら書き込みロックを取り直して取り除く。
    async fn live_value(&self, key: &str) -> Option<String> {
        {
            let store = self.store.read().await;
            match store.get(key) {
                Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        let mut store = self.store.write().await;
        // ロックを取り直す間に上書きされていれば残す
        if store.get(key).is_some_and(Entry::is_expired) {
            store.remove(key);
        }
        store
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    /// 期限切れエントリを取り除き、除去件数を返す。
    ///
    /// 一度も読まれないまま期限切れになったキーはここでしか消えないため、
    /// 長時間動かす場合は定期的に呼ぶ。
    pub async fn purge_expired(&self) -> usize {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|_, entry| !entry.is_expired());
        before - store.len()
    }
}

#[async_trait]
impl StoreConnection for InMemoryConnection {
    async fn execute(&self, command: Command) -> Result<Reply, StoreError> {
        match command {
            Command::Set {
                key,
                value,
                expire_seconds,
            } => {
                if expire_seconds == Some(0) {
                    return Err(StoreError::Connection(
                        "ERR invalid expire time in 'set' command".to_string(),
                    ));
                }
                let mut store = self.store.write().await;
                store.insert(
                    key,
                    Entry {
                        value,
                        // 表現できないほど遠い期限は無期限として扱う
                        expires_at: expire_seconds
                            .and_then(|s| Instant::now().checked_add(Duration::from_secs(s))),
                    },
                );
                Ok(Reply::Status("OK".to_string()))
            }
            Command::Get { key } => Ok(self
                .live_value(&key)
                .await
                .map_or(Reply::Nil, Reply::Bulk)),
            Command::Del { key } => {
                let mut store = self.store.write().await;
                let removed = store.remove(&key).is_some_and(|e| !e.is_expired());
                Ok(Reply::Int(i64::from(removed)))
            }
            Command::Exists { key } => {
                let found = self.live_value(&key).await.is_some();
                Ok(Reply::Int(i64::from(found)))
            }
        }
    }
}
