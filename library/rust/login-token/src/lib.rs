//! k1s0-login-token: ログインユーザー向けトークン発行ライブラリ
//!
//! IdP 属性から検証済みのユーザー情報を作り、RS256 で署名したトークンを発行する。
//! トークンには発行ごとに一意で時系列順に並ぶ `jti`（UUID v7）と、秒単位の有効期限が入る。
//!
//! # 使い方
//!
//! ```ignore
//! use k1s0_login_token::{to_token_user, TokenIssuer};
//!
//! let issuer = TokenIssuer::new(&private_key_pem, "https://spid-login.example.com", 3600)?;
//! let user = to_token_user(&spid_user)?;
//! let issued = issuer.issue(&user).await?;
//! store.set_with_expiration(&issued.claims.jti, &issued.token, 3600, None).await?;
//! ```

pub mod claims;
pub mod decode;
pub mod error;
pub mod issuer;
pub mod user;

pub use claims::TokenClaims;
pub use decode::{decode, Validate};
pub use error::{TokenError, ValidationErrors};
pub use issuer::{get_user_jwt, IssuedToken, TokenIssuer};
pub use user::{
    to_token_user, to_token_user_l2, SpidUser, TokenUser, UserCompany,
    FISCAL_NUMBER_INTERNATIONAL_PREFIX,
};
