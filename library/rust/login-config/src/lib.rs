//! k1s0-login-config: ログインサービスの YAML 設定とログ初期化、ストア・発行器の組み立て

pub mod logger;
mod merge;
mod types;
pub mod wiring;

use thiserror::Error;

pub use logger::init_logger;
pub use merge::merge_yaml;
pub use types::*;
pub use wiring::{build_store, build_token_issuer, connect_store};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("store error: {0}")]
    Store(#[from] k1s0_ephemeral_store::StoreError),
    #[error("token issuer error: {0}")]
    Token(#[from] k1s0_login_token::TokenError),
}

/// YAML を読み込み Config を返す。env_path があればマージする。
pub fn load(base_path: &str, env_path: Option<&str>) -> Result<Config, ConfigError> {
    let base = std::fs::read_to_string(base_path)?;
    let mut value: serde_yaml::Value = serde_yaml::from_str(&base)?;

    if let Some(env) = env_path {
        let env_data = std::fs::read_to_string(env)?;
        let overlay: serde_yaml::Value = serde_yaml::from_str(&env_data)?;
        merge_yaml(&mut value, &overlay);
    }

    Ok(serde_yaml::from_value(value)?)
}

/// 設定値のバリデーション。
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.app.name.is_empty() {
        return Err(ConfigError::Validation("app.name is required".into()));
    }
    if !["dev", "staging", "prod"].contains(&config.app.environment.as_str()) {
        return Err(ConfigError::Validation(
            "app.environment must be dev, staging, or prod".into(),
        ));
    }
    if config.jwt.issuer.trim().is_empty() {
        return Err(ConfigError::Validation("jwt.issuer is required".into()));
    }
    let has_inline_key = config
        .jwt
        .private_key
        .as_ref()
        .is_some_and(|k| !k.trim().is_empty());
    if !has_inline_key && config.jwt.private_key_path.is_none() {
        return Err(ConfigError::Validation(
            "jwt.private_key or jwt.private_key_path is required".into(),
        ));
    }
    if config.redis.host.is_empty() {
        return Err(ConfigError::Validation("redis.host is required".into()));
    }
    if config.redis.port == 0 {
        return Err(ConfigError::Validation("redis.port must be > 0".into()));
    }
    if !["json", "text"].contains(&config.log.format.as_str()) {
        return Err(ConfigError::Validation(
            "log.format must be json or text".into(),
        ));
    }
    Ok(())
}
