use serde::Deserialize;
use url::Url;

use crate::ConfigError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub jwt: JwtConfig,
    pub redis: RedisConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub name: String,
    pub environment: String,
}

/// JwtConfig はトークン発行の設定。秘密鍵は PEM 直書きかファイルパスのどちらかで指定する。
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub token_ttl_seconds: u64,
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default)]
    pub private_key_path: Option<String>,
}

impl JwtConfig {
    /// 署名用の秘密鍵 PEM を返す。直書きがあればそちらを優先する。
    pub fn private_key_pem(&self) -> Result<String, ConfigError> {
        if let Some(pem) = self.private_key.as_ref().filter(|k| !k.trim().is_empty()) {
            return Ok(pem.clone());
        }
        match &self.private_key_path {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => Err(ConfigError::Validation(
                "jwt.private_key or jwt.private_key_path is required".into(),
            )),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("private_key", &self.private_key.as_ref().map(|_| "[REDACTED]"))
            .field("private_key_path", &self.private_key_path)
            .finish()
    }
}

#[derive(Deserialize, Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub db: Option<u8>,
    /// キーの名前空間。未指定ならプレフィックスなし。
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl RedisConfig {
    /// 接続 URL を組み立てる（例: `redis://:secret@127.0.0.1:6379/0`）。
    ///
    /// パスワードは予約文字と `%` を含めてパーセントエンコードする。
    pub fn url(&self) -> Result<String, ConfigError> {
        let mut url = Url::parse(&format!("redis://{}:{}", self.host, self.port))
            .map_err(|e| ConfigError::Validation(format!("invalid redis address: {}", e)))?;

        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            // set_password は `%` をエンコードしないため、先に全体をエンコードしておく
            let encoded = urlencoding::encode(password);
            url.set_password(Some(encoded.as_ref())).map_err(|()| {
                ConfigError::Validation("redis URL cannot carry a password".into())
            })?;
        }
        if let Some(db) = self.db {
            url.set_path(&format!("/{}", db));
        }
        Ok(url.to_string())
    }
}

impl std::fmt::Debug for RedisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("db", &self.db)
            .field("key_prefix", &self.key_prefix)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// 未指定なら環境から決める。
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: default_log_format(),
        }
    }
}

fn default_log_format() -> String {
    "json".to_string()
}
