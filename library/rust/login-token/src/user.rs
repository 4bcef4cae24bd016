//! ログインユーザーのレコードと変換。

use serde::{Deserialize, Serialize};

use crate::decode::{
    check_email, check_fiscal_code, check_non_empty, check_organization_fiscal_code, Validate,
};
use crate::error::ValidationErrors;

/// IdP が国際形式で返す税番号のプレフィックス。
pub const FISCAL_NUMBER_INTERNATIONAL_PREFIX: &str = "TINIT-";

/// SpidUser は IdP アサーションから取り出した属性。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpidUser {
    pub fiscal_number: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile_phone: Option<String>,
    /// 認証リクエストの ID。
    #[serde(default)]
    pub in_response_to: Option<String>,
}

impl SpidUser {
    /// ストアのキーとして使う認証リクエスト ID を返す。
    pub fn request_id(&self) -> Option<&str> {
        self.in_response_to.as_deref().filter(|id| !id.is_empty())
    }
}

/// UserCompany はユーザーが代理する法人。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCompany {
    pub company_name: String,
    pub email: String,
    pub organization_fiscal_code: String,
}

impl Validate for UserCompany {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_non_empty(&mut errors, "company_name", &self.company_name);
        check_email(&mut errors, "email", &self.email);
        check_organization_fiscal_code(
            &mut errors,
            "organization_fiscal_code",
            &self.organization_fiscal_code,
        );
        errors.into_result()
    }
}

/// TokenUser はトークンに埋め込むユーザー情報。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUser {
    pub name: String,
    pub family_name: String,
    pub fiscal_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    /// 属性発行機関（Attribute Authority）経由のログインかどうか。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_aa: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<UserCompany>,
}

impl Validate for TokenUser {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_non_empty(&mut errors, "name", &self.name);
        check_non_empty(&mut errors, "family_name", &self.family_name);
        check_fiscal_code(&mut errors, "fiscal_number", &self.fiscal_number);
        if let Some(email) = &self.email {
            check_email(&mut errors, "email", email);
        }
        if let Some(phone) = &self.mobile_phone {
            check_non_empty(&mut errors, "mobile_phone", phone);
        }
        if let Some(company) = &self.company {
            if let Err(nested) = company.validate() {
                errors.merge_nested("company", nested);
            }
        }
        errors.into_result()
    }
}

/// IdP 属性からトークンユーザーを作る。税番号の国際プレフィックスは取り除く。
pub fn to_token_user(from: &SpidUser) -> Result<TokenUser, ValidationErrors> {
    let fiscal_number = from
        .fiscal_number
        .strip_prefix(FISCAL_NUMBER_INTERNATIONAL_PREFIX)
        .unwrap_or(&from.fiscal_number);
    let user = TokenUser {
        name: from.name.clone().unwrap_or_default(),
        family_name: from.family_name.clone().unwrap_or_default(),
        fiscal_number: fiscal_number.to_string(),
        email: from.email.clone(),
        mobile_phone: from.mobile_phone.clone(),
        from_aa: None,
        company: None,
    };
    user.validate()?;
    Ok(user)
}

/// 法人を代理するレベル 2 のユーザーを作る。
pub fn to_token_user_l2(
    from: &TokenUser,
    company: UserCompany,
) -> Result<TokenUser, ValidationErrors> {
    let user = TokenUser {
        company: Some(company),
        ..from.clone()
    };
    user.validate()?;
    Ok(user)
}
