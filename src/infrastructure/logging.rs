use crate::domain::settings::LogSettings;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Target prefix of everything this crate logs
const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Level for other crates' events unless a directive says otherwise
const DEPENDENCY_LEVEL: &str = "warn";

pub struct LoggingGuard {
    // We need to keep this guard alive for logs to be flushed
    _guards: Vec<WorkerGuard>,
}

fn parse_rotation(rotation: &str) -> Rotation {
    match rotation.to_lowercase().as_str() {
        "hourly" => Rotation::HOURLY,
        "minutely" => Rotation::MINUTELY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

/// Filter built from the settings alone.
///
/// `settings.level` applies to this crate only; everything else logs at
/// `warn`. The extra directives are added last. Entries that fail to parse
/// are skipped and handed back so they can be reported once logging works.
fn settings_filter(settings: &LogSettings) -> (EnvFilter, Vec<String>) {
    let mut rejected = Vec::new();

    let level = settings.level.trim().to_lowercase();
    let level = if LevelFilter::from_str(&level).is_ok() {
        level
    } else {
        rejected.push(settings.level.clone());
        "info".to_string()
    };

    let mut filter = EnvFilter::new(format!("{DEPENDENCY_LEVEL},{CRATE_TARGET}={level}"));
    for directive in &settings.directives {
        match Directive::from_str(directive.trim()) {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(_) => rejected.push(directive.clone()),
        }
    }
    (filter, rejected)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG`, when set and valid, replaces the filter from the settings.
/// Fails if a global subscriber is already set.
pub fn init_logger(settings: &LogSettings) -> anyhow::Result<LoggingGuard> {
    let mut guards = Vec::new();

    let (filter, rejected) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, Vec::new()),
        Err(_) => settings_filter(settings),
    };

    let console_layer = settings.console_logging_enabled.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_file(settings.show_file_line)
            .with_line_number(settings.show_file_line)
            .with_thread_ids(settings.show_thread_ids)
            .with_target(settings.show_target)
            .with_ansi(settings.ansi_colors)
    });

    let file_layer = if settings.file_logging_enabled {
        let file_appender = RollingFileAppender::new(
            parse_rotation(&settings.rotation),
            &settings.log_dir,
            &settings.file_name_prefix,
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        guards.push(guard);
        Some(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(settings.show_file_line)
                .with_line_number(settings.show_file_line)
                .with_thread_ids(settings.show_thread_ids)
                .with_target(settings.show_target),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    for entry in &rejected {
        tracing::warn!("Ignoring invalid log filter entry {:?}", entry);
    }
    tracing::info!(
        "Logging initialized (level {}, file logging {})",
        settings.level,
        settings.file_logging_enabled
    );

    Ok(LoggingGuard { _guards: guards })
}
