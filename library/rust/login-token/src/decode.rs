//! 型なし入力から検証済みの型付きレコードを作る。

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::ValidationErrors;

// 個人の税番号（codice fiscale）。オモコディア文字を含む形式も受け付ける
static FISCAL_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Z]{6}[0-9LMNPQRSTUV]{2}[ABCDEHLMPRST][0-9LMNPQRSTUV]{2}[A-Z][0-9LMNPQRSTUV]{3}[A-Z]$",
    )
    .expect("fiscal code pattern must compile")
});

static ORGANIZATION_FISCAL_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{11}$").expect("organization fiscal code pattern must compile")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern must compile")
});

/// Validate は値の意味的な検証を行う。
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// JSON 値を `T` にデコードし、検証まで行う。
///
/// 形の不一致（必須フィールド欠落・型違い）とフィールド単位の検証エラーは同じ経路で返る。
pub fn decode<T>(raw: serde_json::Value) -> Result<T, ValidationErrors>
where
    T: DeserializeOwned + Validate,
{
    let value: T =
        serde_json::from_value(raw).map_err(|e| ValidationErrors::single(e.to_string()))?;
    value.validate()?;
    Ok(value)
}

pub(crate) fn check_non_empty(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "must not be empty");
    }
}

pub(crate) fn check_fiscal_code(errors: &mut ValidationErrors, field: &str, value: &str) {
    if !FISCAL_CODE.is_match(value) {
        errors.add(field, "is not a valid fiscal code");
    }
}

pub(crate) fn check_organization_fiscal_code(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
) {
    if !ORGANIZATION_FISCAL_CODE.is_match(value) {
        errors.add(field, "is not a valid organization fiscal code");
    }
}

pub(crate) fn check_email(errors: &mut ValidationErrors, field: &str, value: &str) {
    if !EMAIL.is_match(value) {
        errors.add(field, "is not a valid email address");
    }
}
