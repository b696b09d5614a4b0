/*
 * HASHEQ BENCH - NON-BLOCKING LOGGER
 * =================================================================
 * Component Name: src/utils/logger.rs
 * Core Responsibility: تسجيل الأحداث دون تلويث stdout (المخصص لسطر نتيجة العمليات الفرعية والتقرير).
 * Design Pattern: Layered Subscriber / Async Appender
 * =================================================================
 */

use std::io::IsTerminal;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config_loader::LoggingConfig;
use crate::error::{HarnessError, HarnessResult};

/// تهيئة نظام التسجيل العالمي (مرة واحدة لكل عملية).
/// يعيد `WorkerGuard` عند تفعيل ملف السجل، ويجب الاحتفاظ به حياً حتى نهاية البرنامج.
pub fn init_logger(config: &LoggingConfig) -> HarnessResult<Option<WorkerGuard>> {
    // أ. الفلتر: RUST_LOG يتقدم على الإعدادات
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| HarnessError::ConfigInvalid(format!("log level '{}': {}", config.level, e)))?;

    // ب. stderr دائماً
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact();

    // ج. ملف دوري غير متزامن (اختياري)
    let (file_layer, guard) = match &config.dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, &config.file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking_file)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_ansi(false)
                .compact();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| HarnessError::ConfigInvalid(format!("logger already initialized: {}", e)))?;

    tracing::debug!("LOGGER: Initialized (level={}, file_dir={:?})", config.level, config.dir);
    Ok(guard)
}

/// إعداد هادئ للعمليات الفرعية: التحذيرات فقط ما لم يحدد RUST_LOG غير ذلك
pub fn fork_child_logging() -> LoggingConfig {
    LoggingConfig {
        level: "warn".to_string(),
        ..LoggingConfig::default()
    }
}
