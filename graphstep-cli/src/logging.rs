//! Diagnostics for the graphstep CLI.
//!
//! Frames and matrices own `stdout`; every `tracing` event goes to `stderr`,
//! human-readable or as JSON lines. Events from crates on the `log` facade
//! are forwarded into the same subscriber.

use std::{env, fmt, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Selects the diagnostics format.
pub const LOG_FORMAT_ENV: &str = "GRAPHSTEP_LOG_FORMAT";
/// Holds `EnvFilter` directives.
pub const FILTER_ENV: &str = "RUST_LOG";
const DEFAULT_FILTER: &str = "info";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Output format of the diagnostics stream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// One JSON object per event, with span context.
    Json,
}

impl LogFormat {
    /// Returns the value accepted in [`LOG_FORMAT_ENV`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalised = raw.trim().to_ascii_lowercase();
        [Self::Human, Self::Json]
            .into_iter()
            .find(|format| format.as_str() == normalised)
            .ok_or(LoggingError::UnsupportedFormat {
                provided: normalised,
            })
    }
}

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The format variable held bytes that are not UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// The format variable named neither `human` nor `json`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Normalised value supplied by the user.
        provided: String,
    },
    /// Another global subscriber was already installed.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Logging options read from the environment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogSettings {
    /// Diagnostics format.
    pub format: LogFormat,
    /// `EnvFilter` directives; `info` when unset or blank.
    pub filter: String,
}

impl LogSettings {
    /// Reads [`LOG_FORMAT_ENV`] and [`FILTER_ENV`] from the process
    /// environment.
    ///
    /// # Errors
    /// See [`Self::from_lookup`].
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|name| env::var(name))
    }

    /// Resolves the settings through `lookup`, which follows the contract of
    /// [`env::var`].
    ///
    /// # Errors
    /// Returns [`LoggingError::InvalidUnicode`] or
    /// [`LoggingError::UnsupportedFormat`] for an unusable format variable.
    /// An unreadable filter variable falls back to `info`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Result<String, env::VarError>,
    ) -> Result<Self, LoggingError> {
        let format = match lookup(LOG_FORMAT_ENV) {
            Ok(raw) => raw.parse()?,
            Err(env::VarError::NotPresent) => LogFormat::default(),
            Err(source) => {
                return Err(LoggingError::InvalidUnicode {
                    name: LOG_FORMAT_ENV,
                    source,
                });
            }
        };
        let filter = lookup(FILTER_ENV)
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_owned());
        Ok(Self { format, filter })
    }

    // Malformed directives fall back to the default rather than silencing
    // diagnostics altogether.
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Installs the global subscriber once per process.
///
/// # Errors
/// Returns [`LoggingError`] when [`LogSettings::from_env`] rejects the
/// environment. A subscriber installed elsewhere is kept and not reported.
pub fn init_logging() -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    let settings = LogSettings::from_env()?;
    match install_subscriber(&settings) {
        Ok(()) | Err(LoggingError::InstallFailed { .. }) => {}
        Err(err) => return Err(err),
    }
    let _ = INITIALISED.set(());
    Ok(())
}

fn install_subscriber(settings: &LogSettings) -> Result<(), LoggingError> {
    let base = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let output = match settings.format {
        LogFormat::Json => base
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Human => base.boxed(),
    };

    // The `log` slot may already be taken by an embedding process.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(settings.env_filter())
        .with(output)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::ffi::OsString;

    use rstest::rstest;

    fn lookup_in(
        vars: &[(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Result<String, env::VarError> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| {
            vars.get(name)
                .map(|&value| value.to_owned())
                .ok_or(env::VarError::NotPresent)
        }
    }

    #[rstest]
    #[case::unset(&[], LogFormat::Human, "info")]
    #[case::json_upper_case(&[(LOG_FORMAT_ENV, " JSON ")], LogFormat::Json, "info")]
    #[case::custom_filter(&[(FILTER_ENV, "core=debug")], LogFormat::Human, "core=debug")]
    #[case::blank_filter(&[(FILTER_ENV, "  ")], LogFormat::Human, "info")]
    fn settings_follow_the_environment(
        #[case] vars: &[(&'static str, &'static str)],
        #[case] format: LogFormat,
        #[case] filter: &str,
    ) {
        let settings = LogSettings::from_lookup(lookup_in(vars)).expect("settings resolve");
        assert_eq!(settings.format, format);
        assert_eq!(settings.filter, filter);
    }

    #[rstest]
    fn unsupported_format_reports_the_normalised_value() {
        let err = LogSettings::from_lookup(lookup_in(&[(LOG_FORMAT_ENV, "Pretty")]))
            .expect_err("pretty is not a format");
        match err {
            LoggingError::UnsupportedFormat { provided } => assert_eq!(provided, "pretty"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    fn non_unicode_format_names_the_variable() {
        let not_unicode = || env::VarError::NotUnicode(OsString::from("json"));
        let err = LogSettings::from_lookup(|_| Err(not_unicode()))
            .expect_err("format must be UTF-8");
        assert!(matches!(
            err,
            LoggingError::InvalidUnicode {
                name: LOG_FORMAT_ENV,
                ..
            }
        ));
    }

    #[rstest]
    #[case(LogFormat::Human)]
    #[case(LogFormat::Json)]
    fn formats_parse_their_own_labels(#[case] format: LogFormat) {
        assert_eq!(format.to_string().parse::<LogFormat>().ok(), Some(format));
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging().expect("logging must initialise");
        init_logging().expect("subsequent calls must be no-ops");
    }
}
