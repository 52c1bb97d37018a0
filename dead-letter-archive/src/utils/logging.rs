use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt::Write as _;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

const DEFAULT_FILTER: &str = "dead_letter_archive=info";

/// Span field shown in its own column by the pretty formatter.
const RECORD_FIELD: &str = "message_id";

/// Fields recorded on a span, kept in the span's extensions.
#[derive(Debug, Clone, Default)]
pub struct SpanFields(HashMap<String, String>);

impl SpanFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl Visit for SpanFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value).trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

/// Collects span fields so the formatters can print them with each event.
pub struct FieldCollectorLayer;

impl<S> Layer<S> for FieldCollectorLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &tracing::span::Attributes<'_>, id: &tracing::span::Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let mut fields = SpanFields::default();
            attrs.record(&mut fields);
            span.extensions_mut().insert(fields);
        }
    }

    fn on_record(&self, id: &tracing::span::Id, values: &tracing::span::Record<'_>, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let mut extensions = span.extensions_mut();
            let mut fields = extensions.remove::<SpanFields>().unwrap_or_default();
            values.record(&mut fields);
            extensions.insert(fields);
        }
    }
}

#[derive(Default)]
struct EventFields {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl Visit for EventFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let value = format!("{:?}", value).trim_matches('"').to_string();
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.insert(field.name().to_string(), Value::String(value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name().to_string(), Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }
}

/// Columnar console format: `timestamp | level | record | message (fields)`.
pub struct PrettyFormatter;

impl<S, N> FormatEvent<S, N> for PrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let level_color = match *event.metadata().level() {
            Level::TRACE => "\x1b[90m",
            Level::DEBUG => "\x1b[34m",
            Level::INFO => "\x1b[32m",
            Level::WARN => "\x1b[33m",
            Level::ERROR => "\x1b[31m",
        };
        let (ts_color, field_color, dim, reset) = ("\x1b[96m", "\x1b[90m", "\x1b[90m", "\x1b[0m");

        let record = ctx
            .lookup_current()
            .and_then(|span| {
                span.extensions().get::<SpanFields>().and_then(|fields| fields.get(RECORD_FIELD).map(str::to_string))
            })
            .unwrap_or_else(|| "-".to_string());

        let mut visitor = EventFields::default();
        event.record(&mut visitor);

        write!(writer, "{}{}{} ", ts_color, Utc::now().format("%y-%m-%d %H:%M:%S"), reset)?;
        write!(writer, "{}|{} {}{:<5}{} ", dim, reset, level_color, event.metadata().level(), reset)?;
        write!(writer, "{}|{} {:<36} {}|{} ", dim, reset, record, dim, reset)?;
        write!(writer, "{}", visitor.message.unwrap_or_default())?;

        if !visitor.fields.is_empty() {
            let mut rendered = String::new();
            for (name, value) in &visitor.fields {
                if !rendered.is_empty() {
                    rendered.push_str(", ");
                }
                match value {
                    Value::String(text) => write!(rendered, "{}={}", name, text)?,
                    other => write!(rendered, "{}={}", name, other)?,
                }
            }
            write!(writer, " ({}{}{})", field_color, rendered, reset)?;
        }
        writeln!(writer)
    }
}

/// One JSON object per line, with span fields merged into `fields`.
pub struct JsonEventFormatter;

impl<S, N> FormatEvent<S, N> for JsonEventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let mut visitor = EventFields::default();
        event.record(&mut visitor);

        let mut root = Map::new();
        root.insert(
            "timestamp".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );
        root.insert("level".to_string(), Value::String(meta.level().to_string()));
        root.insert("target".to_string(), Value::String(meta.target().to_string()));
        if let Some(file) = meta.file() {
            root.insert("filename".to_string(), Value::String(file.to_string()));
        }
        if let Some(line) = meta.line() {
            root.insert("line_number".to_string(), Value::from(line));
        }
        if let Some(message) = visitor.message.take() {
            root.insert("message".to_string(), Value::String(message));
        }

        let mut fields = visitor.fields;
        if let Some(span) = ctx.lookup_current() {
            fields.insert("span_name".to_string(), Value::String(span.metadata().name().to_string()));
            if let Some(span_fields) = span.extensions().get::<SpanFields>() {
                for (name, value) in &span_fields.0 {
                    fields.entry(name.clone()).or_insert_with(|| Value::String(value.clone()));
                }
            }
        }
        if !fields.is_empty() {
            root.insert("fields".to_string(), Value::Object(fields));
        }

        let line = serde_json::to_string(&Value::Object(root)).map_err(|_| std::fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

/// Initialize the tracing subscriber with
/// - PrettyFormatter for console readability (when LOG_FORMAT != "json")
/// - JsonEventFormatter for json logging (when LOG_FORMAT = "json")
///
/// This will also install color_eyre to handle panics in the application
pub fn init_logging() {
    color_eyre::install().expect("Unable to install color_eyre");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(Level::INFO.into())
            .parse(DEFAULT_FILTER)
            .expect("Invalid default filter directive")
    });

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);
    let fmt_layer = if json {
        fmt_layer.event_format(JsonEventFormatter).boxed()
    } else {
        fmt_layer.event_format(PrettyFormatter).boxed()
    };

    let subscriber =
        Registry::default().with(env_filter).with(FieldCollectorLayer).with(fmt_layer).with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global default subscriber");
}
