//! 設定からエフェメラルストアとトークン発行器を組み立てる。
//!
//! ```ignore
//! let config = k1s0_login_config::load("config/config.yaml", None)?;
//! let store = k1s0_login_config::connect_store(&config.redis).await?;
//! let issuer = k1s0_login_config::build_token_issuer(&config.jwt)?;
//! ```

use std::sync::Arc;

use k1s0_ephemeral_store::{EphemeralStore, RedisConnection, StoreConnection};
use k1s0_login_token::TokenIssuer;

use crate::{ConfigError, JwtConfig, RedisConfig};

/// 既存の接続に `redis.key_prefix` を適用したストアを返す。
pub fn build_store(config: &RedisConfig, conn: Arc<dyn StoreConnection>) -> EphemeralStore {
    let store = EphemeralStore::new(conn);
    match config.key_prefix.as_deref().filter(|p| !p.is_empty()) {
        Some(prefix) => store.with_prefix(prefix),
        None => store,
    }
}

/// Redis に接続し、設定済みのストアを返す。
pub async fn connect_store(config: &RedisConfig) -> Result<EphemeralStore, ConfigError> {
    let conn = RedisConnection::connect(&config.url()?).await?;
    tracing::info!(host = %config.host, port = config.port, "connected to redis");
    Ok(build_store(config, Arc::new(conn)))
}

/// 秘密鍵を解決して TokenIssuer を作る。
pub fn build_token_issuer(config: &JwtConfig) -> Result<TokenIssuer, ConfigError> {
    let pem = config.private_key_pem()?;
    Ok(TokenIssuer::new(
        &pem,
        &config.issuer,
        config.token_ttl_seconds,
    )?)
}
