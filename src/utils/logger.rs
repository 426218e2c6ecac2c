use crate::config::toml_config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("agenda={level},tower_http={level}")))
}

fn init_compact(filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("agenda=debug,tower_http=debug,info"))
    } else {
        filter_for("info")
    };
    init_compact(filter);
}

pub fn init_json_logger(level: &str) {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // 給日誌收集器用
        )
        .init();
}

/// 依設定檔選擇輸出格式；`verbose` 會覆蓋設定的層級
pub fn init_logger(config: &LoggingConfig, verbose: bool) {
    match config.format {
        LogFormat::Json if verbose => init_json_logger("debug"),
        LogFormat::Json => init_json_logger(&config.level),
        LogFormat::Compact if verbose => init_cli_logger(true),
        LogFormat::Compact => init_compact(filter_for(&config.level)),
    }
}
