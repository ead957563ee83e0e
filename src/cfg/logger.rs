// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{fmt::Debug, path::Path, sync::Arc};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{Event, Subscriber};
use tracing_appender::{non_blocking::WorkerGuard, rolling::RollingFileAppender};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self, FmtContext, FormatEvent, FormatFields,
        format::Writer,
        time::ChronoUtc,
    },
    layer::SubscriberExt,
};

use crate::cfg::enums::{LogFormat, LogOutput, LogRotation};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub output: LogOutput,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub is_show_line: bool,
    #[serde(default)]
    pub is_show_target: bool,
    #[serde(default)]
    pub file: Option<LogFileConfig>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            output: LogOutput::default(),
            format: LogFormat::default(),
            is_show_line: false,
            is_show_target: false,
            file: None,
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogFileConfig {
    pub path: String,
    #[serde(default)]
    pub rotation_frequency: LogRotation,
}

// One JSON object per event
struct JsonFormatter {
    config: Arc<LogConfig>,
}

impl JsonFormatter {
    fn new(config: Arc<LogConfig>) -> Self {
        Self { config }
    }
}

#[derive(Serialize)]
struct LogEntry {
    timestamp: String,
    level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    fields: serde_json::Map<String, Value>,
}

impl LogEntry {
    fn new(config: &LogConfig, event: &Event, fields: serde_json::Map<String, Value>) -> Self {
        let meta = event.metadata();
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level: meta.level().to_string(),
            target: config.is_show_target.then(|| meta.target().to_string()),
            line: if config.is_show_line { meta.line() } else { None },
            fields,
        }
    }
}

impl<S, N> FormatEvent<S, N> for JsonFormatter
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);
        let mut fields = visitor.fields;

        if let Some(scope) = ctx.event_scope() {
            let span_names: Vec<&str> = scope.from_root().map(|s| s.name()).collect();
            fields.insert("span_names".to_string(), json!(span_names));
        }

        let log_entry = LogEntry::new(&self.config, event, fields);
        writeln!(
            writer,
            "{}",
            serde_json::to_string(&log_entry).map_err(|_| std::fmt::Error)?
        )
    }
}

#[derive(Default)]
struct JsonVisitor {
    fields: serde_json::Map<String, Value>,
}

impl tracing::field::Visit for JsonVisitor {
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn Debug) {
        self.fields
            .insert(field.name().to_string(), json!(format!("{value:?}")));
    }
}

fn split_path(path: &str) -> (&Path, &std::ffi::OsStr) {
    let path = Path::new(path);
    let directory = path.parent().unwrap_or_else(|| Path::new(""));
    let file_name = path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("ata_id.log"));
    (directory, file_name)
}

/// Installs the global subscriber. Keep the returned guard alive until exit,
/// dropping it flushes the non-blocking writer.
pub fn init_logger(config: &LogConfig) -> Result<WorkerGuard> {
    let (writer, guard) = match config.output {
        LogOutput::Stderr => tracing_appender::non_blocking(std::io::stderr()),
        LogOutput::File => {
            let cfg = config
                .file
                .as_ref()
                .context("logger.output=file requires logger.file")?;
            let (directory, file_name) = split_path(&cfg.path);
            let file_appender = RollingFileAppender::new(
                cfg.rotation_frequency.into(),
                directory,
                file_name,
            );
            tracing_appender::non_blocking(file_appender)
        },
    };

    let env_filter =
        EnvFilter::try_new(&config.level).context("Failed to parse log level from config")?;
    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format {
        LogFormat::Text => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(ChronoUtc::rfc_3339())
                .with_target(config.is_show_target)
                .with_line_number(config.is_show_line);
            tracing::subscriber::set_global_default(registry.with(layer))
        },
        LogFormat::Json => {
            let layer = fmt::layer()
                .with_writer(writer)
                .event_format(JsonFormatter::new(Arc::new(config.clone())));
            tracing::subscriber::set_global_default(registry.with(layer))
        },
    }
    .context("Failed to set global default subscriber")?;

    Ok(guard)
}
