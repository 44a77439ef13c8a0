use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};

/// Collects event fields as JSON attributes.
#[derive(Default)]
struct AttributeVisitor {
    attributes: Map<String, Value>,
}

impl AttributeVisitor {
    /// `event_name` / `event_domain` become the dotted OTel attribute names.
    fn insert(&mut self, field: &Field, value: Value) {
        let key = match field.name() {
            "event_name" => "event.name",
            "event_domain" => "event.domain",
            other => other,
        };
        self.attributes.insert(key.to_string(), value);
    }
}

impl Visit for AttributeVisitor {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert(field, Value::from(format!("{:?}", value)));
    }
}

/// One JSON object per line, shaped like an OpenTelemetry log record.
#[derive(Clone)]
struct JsonLogFormatter {
    service_name: String,
    service_version: String,
}

fn severity_number(level: &Level) -> u64 {
    match *level {
        Level::TRACE => 1,
        Level::DEBUG => 5,
        Level::INFO => 9,
        Level::WARN => 13,
        Level::ERROR => 17,
    }
}

impl<S, N> FormatEvent<S, N> for JsonLogFormatter
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let mut visitor = AttributeVisitor::default();
        event.record(&mut visitor);

        let mut attributes = visitor.attributes;
        let body = attributes
            .remove("message")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| metadata.name().to_string());
        attributes.insert("code.target".to_string(), Value::from(metadata.target()));
        if let Some(file) = metadata.file() {
            attributes.insert("code.filepath".to_string(), Value::from(file));
        }
        if let Some(line) = metadata.line() {
            attributes.insert("code.lineno".to_string(), Value::from(line));
        }

        let record = json!({
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            "severity_text": metadata.level().as_str(),
            "severity_number": severity_number(metadata.level()),
            "body": body,
            "resource": {
                "service.name": self.service_name,
                "service.version": self.service_version,
            },
            "attributes": attributes,
        });

        let serialized = serde_json::to_string(&record).map_err(|_| std::fmt::Error)?;
        writer.write_str(&serialized)?;
        writer.write_char('\n')
    }
}

/// Parses a `logging.level` value.
pub fn parse_level(level: &str) -> Result<LevelFilter, String> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        _ => Err(format!(
            "Invalid logging.level '{}'. Valid values: trace, debug, info, warn, error",
            level
        )),
    }
}

/// Installs the global subscriber. `RUST_LOG` directives, when set, are
/// applied on top of the configured level.
pub fn init_logging(logging_config: &LoggingConfig) -> Result<(), String> {
    let level_filter = parse_level(&logging_config.level)?;
    let filter_layer = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter_layer);
    let result = match logging_config.format.to_lowercase().as_str() {
        "json" => registry
            .with(fmt::layer().event_format(JsonLogFormatter {
                service_name: logging_config.service_name.clone(),
                service_version: logging_config.service_version.clone(),
            }))
            .try_init(),
        // Anything else falls back to human-readable console output.
        _ => registry.with(fmt::layer().pretty()).try_init(),
    };
    result.map_err(|e| format!("Failed to install logger: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels() {
        assert_eq!(parse_level("debug"), Ok(LevelFilter::DEBUG));
        assert_eq!(parse_level(" WARN "), Ok(LevelFilter::WARN));
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(parse_level("verbose").is_err());
    }
}
