//! 署名対象の Claims。

use serde::{Deserialize, Serialize};

use crate::user::TokenUser;

/// TokenClaims はユーザー情報と登録済み Claim をまとめた署名ペイロード。
///
/// ユーザー情報はトップレベルに展開される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub user: TokenUser,

    /// トークン発行者
    pub iss: String,

    /// 発行時刻（Unix タイムスタンプ、秒）
    pub iat: u64,

    /// 有効期限（Unix タイムスタンプ、秒）
    pub exp: u64,

    /// 発行ごとに一意な JWT ID
    pub jti: String,
}

impl TokenClaims {
    /// 有効期間（秒）を返す。
    pub fn ttl_seconds(&self) -> u64 {
        self.exp.saturating_sub(self.iat)
    }
}

/// ログ用の表示。個人情報は含めない。
impl std::fmt::Display for TokenClaims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TokenClaims{{iss={}, jti={}, iat={}, exp={}, company={}}}",
            self.iss,
            self.jti,
            self.iat,
            self.exp,
            self.user.company.is_some(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserCompany;

    fn claims() -> TokenClaims {
        TokenClaims {
            user: TokenUser {
                name: "Mario".to_string(),
                family_name: "Rossi".to_string(),
                fiscal_number: "RSSMRA80A01H501U".to_string(),
                email: Some("mario.rossi@example.it".to_string()),
                mobile_phone: Some("+393331234567".to_string()),
                from_aa: None,
                company: Some(UserCompany {
                    company_name: "Acme S.p.A.".to_string(),
                    email: "pec@acme.it".to_string(),
                    organization_fiscal_code: "12345678901".to_string(),
                }),
            },
            iss: "https://spid-login.example.com".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
            jti: "0190a8d2-7f3e-7c4b-9a1d-2b3c4d5e6f70".to_string(),
        }
    }

    #[test]
    fn test_ttl_seconds() {
        assert_eq!(claims().ttl_seconds(), 3600);
    }

    #[test]
    fn test_display_shows_registered_claims_only() {
        let shown = claims().to_string();
        assert_eq!(
            shown,
            "TokenClaims{iss=https://spid-login.example.com, \
             jti=0190a8d2-7f3e-7c4b-9a1d-2b3c4d5e6f70, iat=1700000000, exp=1700003600, company=true}"
        );
        for personal in [
            "Mario",
            "Rossi",
            "RSSMRA80A01H501U",
            "mario.rossi@example.it",
            "+393331234567",
            "Acme",
            "pec@acme.it",
            "12345678901",
        ] {
            assert!(!shown.contains(personal), "{} leaked into {}", personal, shown);
        }
    }
}
