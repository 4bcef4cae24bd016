//! RS256 でユーザートークンを発行する。

use jsonwebtoken::{encode, get_current_timestamp, Algorithm, EncodingKey, Header};
use tracing::debug;
use uuid::Uuid;

use crate::claims::TokenClaims;
use crate::error::TokenError;
use crate::user::TokenUser;

/// IssuedToken は署名済みトークンと、その中身の Claims。
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
}

/// TokenIssuer は設定済みの鍵・発行者・有効期間でトークンを発行する。
///
/// 秘密鍵は生成時に一度だけ解析する。
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    issuer: String,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("key", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(private_key: &str, issuer: &str, ttl_seconds: u64) -> Result<Self, TokenError> {
        require_non_empty("private key", private_key)?;
        require_non_empty("issuer", issuer)?;
        let key = EncodingKey::from_rsa_pem(private_key.as_bytes())?;
        Ok(Self {
            key,
            issuer: issuer.to_string(),
            ttl_seconds,
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub async fn issue(&self, user: &TokenUser) -> Result<IssuedToken, TokenError> {
        sign(self.key.clone(), user, self.ttl_seconds, &self.issuer).await
    }
}

/// ユーザー情報を含むトークンを発行し、シリアライズ済みの文字列を返す。
///
/// * `private_key` - 署名に使う RSA 秘密鍵（PEM）
/// * `user` - ログイン済みユーザー
/// * `token_ttl_seconds` - 有効期間（秒）
/// * `issuer` - トークン発行者
pub async fn get_user_jwt(
    private_key: &str,
    user: &TokenUser,
    token_ttl_seconds: u64,
    issuer: &str,
) -> Result<String, TokenError> {
    require_non_empty("private key", private_key)?;
    require_non_empty("issuer", issuer)?;
    let key = EncodingKey::from_rsa_pem(private_key.as_bytes())?;
    let issued = sign(key, user, token_ttl_seconds, issuer).await?;
    Ok(issued.token)
}

fn require_non_empty(name: &str, value: &str) -> Result<(), TokenError> {
    if value.trim().is_empty() {
        return Err(TokenError::InvalidArgument(format!(
            "{} must not be empty",
            name
        )));
    }
    Ok(())
}

/// Claims を組み立てて署名する。署名は CPU 処理のため spawn_blocking で実行する。
async fn sign(
    key: EncodingKey,
    user: &TokenUser,
    ttl_seconds: u64,
    issuer: &str,
) -> Result<IssuedToken, TokenError> {
    let iat = get_current_timestamp();
    let exp = iat.checked_add(ttl_seconds).ok_or_else(|| {
        TokenError::InvalidArgument(format!("token ttl out of range: {}", ttl_seconds))
    })?;

    let claims = TokenClaims {
        user: user.clone(),
        iss: issuer.to_string(),
        iat,
        exp,
        jti: Uuid::now_v7().to_string(),
    };

    let payload = claims.clone();
    let token = tokio::task::spawn_blocking(move || {
        encode(&Header::new(Algorithm::RS256), &payload, &key)
    })
    .await
    .map_err(|e| TokenError::Task(e.to_string()))??;

    debug!(claims = %claims, "user token issued");

    Ok(IssuedToken { token, claims })
}
