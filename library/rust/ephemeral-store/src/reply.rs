//! バックエンド応答を型付きの結果へ変換する純粋関数群。
//!
//! | 応答の形 | 関数 | 成功値 |
//! |---|---|---|
//! | ステータス | [`status_reply`] | `OK` なら `true` |
//! | 値 | [`value_reply`] | 値があれば `Some`、キーが無ければ `None` |
//! | 整数 | [`integer_reply`] | 整数なら `true`、期待値と不一致なら `false` |
//!
//! 書き込み系は [`falsy_to_error`] で「成功」か「失敗」の二値に畳み込む。
//! 読み取り系の `false` / `None` は正常な結果として扱う。

use crate::{Reply, StoreError};

pub fn status_reply(reply: Result<Reply, StoreError>) -> Result<bool, StoreError> {
    let reply = reply?;
    Ok(matches!(reply, Reply::Status(ref s) if s == "OK"))
}

/// 整数応答は値として解釈しない。呼び出し側の型の取り違えを隠さないため。
pub fn value_reply(reply: Result<Reply, StoreError>) -> Result<Option<String>, StoreError> {
    match reply? {
        Reply::Nil => Ok(None),
        Reply::Bulk(value) | Reply::Status(value) => Ok(Some(value)),
        Reply::Int(n) => Err(StoreError::UnexpectedReply(format!(
            "expected a value reply, got integer {}",
            n
        ))),
    }
}

/// `expected` が指定され応答と一致しない場合は `Ok(false)`。エラーにはしない。
pub fn integer_reply(
    reply: Result<Reply, StoreError>,
    expected: Option<i64>,
) -> Result<bool, StoreError> {
    let reply = reply?;
    if let Some(expected) = expected {
        if reply != Reply::Int(expected) {
            return Ok(false);
        }
    }
    Ok(matches!(reply, Reply::Int(_)))
}

pub fn falsy_to_error(
    response: Result<bool, StoreError>,
    error: StoreError,
) -> Result<(), StoreError> {
    match response {
        Ok(true) => Ok(()),
        Ok(false) => Err(error),
        Err(e) => Err(e),
    }
}
