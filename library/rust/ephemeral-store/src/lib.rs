//! k1s0-ephemeral-store: 有効期限付きキー・バリューストアの型付きファサード
//!
//! 共有済みのバックエンド接続に対し、1 操作 1 往復で書き込み・読み取り・削除・存在確認を行う。
//! 生の応答は [`reply`] の関数で成功・不在・失敗に正規化する。
//!
//! # 使い方
//!
//! ```ignore
//! use std::sync::Arc;
//! use k1s0_ephemeral_store::{EphemeralStore, RedisConnection};
//!
//! let conn = RedisConnection::connect("redis://127.0.0.1:6379").await?;
//! let store = EphemeralStore::new(Arc::new(conn));
//!
//! store.set_with_expiration("session:abc", "user42", 3600, None).await?;
//! let user = store.get("session:abc").await?;
//! ```

pub mod connection;
pub mod error;
pub mod memory;
pub mod reply;
pub mod store;

#[cfg(feature = "redis")]
pub mod redis;

pub use connection::{Command, Reply, StoreConnection};
pub use error::StoreError;
pub use memory::InMemoryConnection;
pub use store::{EphemeralStore, DEFAULT_SET_ERROR_MESSAGE};

#[cfg(feature = "redis")]
pub use self::redis::RedisConnection;

#[cfg(feature = "mock")]
pub use connection::MockStoreConnection;
