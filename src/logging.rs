use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Event formatter: `LEVEL module::function [span]: message key=value`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CallSiteFormatter;

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    function: Option<String>,
    extra: Vec<(&'static str, String)>,
}

impl FieldCollector {
    fn store(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = Some(value),
            "function" => self.function = Some(value),
            name => self.extra.push((name, value)),
        }
    }
}

fn unquote(value: String) -> String {
    match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => inner.to_string(),
        None => value,
    }
}

impl Visit for FieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.store(field, unquote(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.store(field, value.to_string());
    }
}

impl<S, N> FormatEvent<S, N> for CallSiteFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let mut fields = FieldCollector::default();
        event.record(&mut fields);

        // the log_* macros pass the full path, which already has the module
        match fields.function {
            Some(function) => write!(writer, "{} {function}", metadata.level())?,
            None => write!(
                writer,
                "{} {}",
                metadata.level(),
                metadata.module_path().unwrap_or_else(|| metadata.target())
            )?,
        }

        if let Some(scope) = ctx.event_scope() {
            let spans: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
            if !spans.is_empty() {
                write!(writer, " [{}]", spans.join("::"))?;
            }
        }

        write!(writer, ":")?;
        if let Some(message) = fields.message {
            write!(writer, " {message}")?;
        }
        for (name, value) in fields.extra {
            write!(writer, " {name}={value}")?;
        }
        writeln!(writer)
    }
}

/// Default level for a `-v` count when `RUST_LOG` is not set.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbosity`.
/// Logs go to stderr so stdout stays clean for DOT/JSON output.
pub fn init_logging(verbosity: u8) {
    let fallback = level_for_verbosity(verbosity).as_str().to_lowercase();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .event_format(CallSiteFormatter)
        .init();
}


#[macro_export]
#[doc(hidden)]
macro_rules! __function_path {
    () => {{
        fn __here() {}
        fn __name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = __name_of(__here);
        name.strip_suffix("::__here").unwrap_or(name)
    }};
}

#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        tracing::trace!(function = %$crate::__function_path!(), $($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        tracing::debug!(function = %$crate::__function_path!(), $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        tracing::info!(function = %$crate::__function_path!(), $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        tracing::warn!(function = %$crate::__function_path!(), $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        tracing::error!(function = %$crate::__function_path!(), $($arg)*)
    };
}
