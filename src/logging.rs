use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Verbosity accepted through `LOG_LEVEL`.
///
/// The numeric values leave gaps so that arbitrary integers can be bucketed
/// into the nearest level below them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 100,
    #[default]
    Info = 200,
    Warn = 300,
    Error = 400,
    Alert = 500,
}

impl LogLevel {
    const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Alert,
    ];

    /// Normalize a level name or number. Never fails; unknown input is `Info`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if let Ok(number) = raw.parse::<i64>() {
            return Self::from_number(number);
        }

        match raw.to_ascii_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            "alert" => LogLevel::Alert,
            _ => LogLevel::Info,
        }
    }

    /// Highest level whose value does not exceed `number`.
    pub fn from_number(number: i64) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|level| level.value() <= number)
            .unwrap_or(LogLevel::Trace)
    }

    pub fn value(self) -> i64 {
        self as i64
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Alert => "alert",
        }
    }

    /// `tracing` has no alert level, so alert collapses onto error.
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Alert => LevelFilter::ERROR,
        }
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init(level: LogLevel) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("roxy_scaffold={}", level.as_filter())));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}
