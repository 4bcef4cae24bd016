//! 構造化ログの初期化。
//! ライブラリ側は tracing のイベントを出すだけで、subscriber はバイナリが一度だけ設定する。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 環境ごとの既定ログレベル。prod 以外は debug。
pub fn default_level(env: &str) -> &'static str {
    if env == "prod" {
        "info"
    } else {
        "debug"
    }
}

/// init_logger は tracing-subscriber を初期化する。
///
/// `level` が指定されていればそれを使い、なければ [`default_level`] に従う。
/// format が "text" の場合はプレーンテキスト出力、それ以外は JSON 出力。
/// 既に subscriber が設定済みの場合は何もしない。
pub fn init_logger(env: &str, level: Option<&str>, format: &str) {
    let filter = EnvFilter::new(level.unwrap_or_else(|| default_level(env)));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if format == "text" {
        registry.with(fmt::layer().with_target(true)).try_init()
    } else {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level("prod"), "info");
        assert_eq!(default_level("staging"), "debug");
        assert_eq!(default_level("dev"), "debug");
    }

    #[test]
    fn test_init_logger_twice_does_not_panic() {
        init_logger("dev", None, "text");
        init_logger("prod", Some("warn"), "json");
    }
}
