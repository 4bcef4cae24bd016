use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use k1s0_ephemeral_store::{
    Command, EphemeralStore, InMemoryConnection, Reply, StoreConnection, StoreError,
};

fn new_store() -> EphemeralStore {
    EphemeralStore::new(Arc::new(InMemoryConnection::new()))
}

/// 常に接続エラーを返すバックエンド。
struct BrokenConnection;

#[async_trait]
impl StoreConnection for BrokenConnection {
    async fn execute(&self, _command: Command) -> Result<Reply, StoreError> {
        Err(StoreError::Connection("connection reset by peer".to_string()))
    }
}

/// `slow:` で始まるキーへの書き込みだけ遅延させてから委譲するバックエンド。
struct SlowConnection {
    inner: InMemoryConnection,
    delay: Duration,
}

impl SlowConnection {
    fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryConnection::new(),
            delay,
        }
    }
}

#[async_trait]
impl StoreConnection for SlowConnection {
    async fn execute(&self, command: Command) -> Result<Reply, StoreError> {
        if matches!(command, Command::Set { .. }) && command.key().starts_with("slow:") {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.execute(command).await
    }
}

#[tokio::test]
async fn test_session_lifecycle() {
    let store = new_store();

    store.set("session:abc", "user42", None).await.unwrap();
    assert_eq!(
        store.get("session:abc").await.unwrap(),
        Some("user42".to_string())
    );
    assert!(store.delete("session:abc").await.unwrap());
    assert_eq!(store.get("session:abc").await.unwrap(), None);
}

#[tokio::test]
async fn test_get_never_set_key_is_absent_not_error() {
    let store = new_store();
    assert_eq!(store.get("missing").await, Ok(None));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = new_store();
    store.set("k", "v", None).await.unwrap();
    assert_eq!(store.delete("k").await, Ok(true));
    assert_eq!(store.delete("k").await, Ok(false));
}

#[tokio::test]
async fn test_exists_tracks_set_and_delete() {
    let store = new_store();
    assert!(!store.exists("k").await.unwrap());
    store.set("k", "v", None).await.unwrap();
    assert!(store.exists("k").await.unwrap());
    store.delete("k").await.unwrap();
    assert!(!store.exists("k").await.unwrap());
}

#[tokio::test]
async fn test_set_with_expiration_expires() {
    let store = new_store();
    store
        .set_with_expiration("tmp", "v", 1, None)
        .await
        .unwrap();
    assert_eq!(store.get("tmp").await.unwrap(), Some("v".to_string()));
    assert!(store.exists("tmp").await.unwrap());

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert_eq!(store.get("tmp").await.unwrap(), None);
    assert!(!store.exists("tmp").await.unwrap());
    assert!(!store.delete("tmp").await.unwrap());
}

#[tokio::test]
async fn test_set_without_expiration_persists() {
    let store = new_store();
    store.set("k", "v", None).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
}

#[tokio::test]
async fn test_overwrite_replaces_value_and_ttl() {
    let store = new_store();
    store.set_with_expiration("k", "v1", 1, None).await.unwrap();
    store.set("k", "v2", None).await.unwrap();

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert_eq!(store.get("k").await.unwrap(), Some("v2".to_string()));
}

#[tokio::test]
async fn test_zero_ttl_write_fails() {
    let store = new_store();
    let result = store.set_with_expiration("k", "v", 0, None).await;
    assert!(matches!(result, Err(StoreError::Connection(_))));
    assert_eq!(store.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn test_prefixed_stores_are_isolated() {
    let conn = Arc::new(InMemoryConnection::new());
    let spid = EphemeralStore::new(conn.clone()).with_prefix("spid");
    let plain = EphemeralStore::new(conn);

    spid.set("req-1", "payload", None).await.unwrap();
    assert_eq!(
        plain.get("spid:req-1").await.unwrap(),
        Some("payload".to_string())
    );
    assert_eq!(plain.get("req-1").await.unwrap(), None);
}

#[tokio::test]
async fn test_transport_failure_yields_error_on_every_operation() {
    let store = EphemeralStore::new(Arc::new(BrokenConnection));

    assert!(store.set("k", "v", None).await.unwrap_err().is_connection());
    assert!(store
        .set_with_expiration("k", "v", 10, Some("custom"))
        .await
        .unwrap_err()
        .is_connection());
    assert!(store.get("k").await.unwrap_err().is_connection());
    assert!(store.delete("k").await.unwrap_err().is_connection());
    assert!(store.exists("k").await.unwrap_err().is_connection());
}

#[tokio::test]
async fn test_concurrent_operations_on_shared_connection() {
    let store = new_store();

    let mut handles = Vec::new();
    for i in 0..32 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let key = format!("session:{}", i);
            store
                .set_with_expiration(&key, &format!("user{}", i), 60, None)
                .await
                .unwrap();
            store.get(&key).await.unwrap()
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap(), Some(format!("user{}", i)));
    }
}

#[tokio::test]
async fn test_store_usable_after_timed_out_call() {
    let store = EphemeralStore::new(Arc::new(SlowConnection::new(Duration::from_secs(5))));

    let result = tokio::time::timeout(
        Duration::from_millis(50),
        store.set("slow:abandoned", "v", None),
    )
    .await;
    assert!(result.is_err());

    store.set("session:abc", "user42", None).await.unwrap();
    assert_eq!(
        store.get("session:abc").await.unwrap(),
        Some("user42".to_string())
    );
    // 中断された書き込みは適用されない
    assert!(!store.exists("slow:abandoned").await.unwrap());
}

#[tokio::test]
async fn test_store_usable_after_aborted_task() {
    let store = EphemeralStore::new(Arc::new(SlowConnection::new(Duration::from_secs(5))));

    let in_flight = {
        let store = store.clone();
        tokio::spawn(async move {
            store
                .set_with_expiration("slow:pending", "v", 60, None)
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    in_flight.abort();
    assert!(in_flight.await.unwrap_err().is_cancelled());

    store
        .set_with_expiration("session:def", "user7", 60, None)
        .await
        .unwrap();
    assert_eq!(
        store.get("session:def").await.unwrap(),
        Some("user7".to_string())
    );
    assert_eq!(store.get("slow:pending").await.unwrap(), None);
}
