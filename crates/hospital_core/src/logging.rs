//! Process-wide logger for the registry.
//!
//! `init_logging` may be called repeatedly with the same settings; a call
//! asking for a different level or destination fails instead of silently
//! keeping the first one. Records go to stderr unless a log directory is
//! configured, in which case files rotate at 10 MiB and five are kept.

use flexi_logger::{
    detailed_format, Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming,
    WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::PanicHookInfo;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "hospital_registry";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_FILES: usize = 5;
const PANIC_MESSAGE_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    Directory(PathBuf),
}

impl Display for LogTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => f.write_str("stderr"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Level and destination of a logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub target: LogTarget,
}

impl LogSettings {
    /// Parses a level name and an optional absolute log directory.
    pub fn parse(level: &str, log_dir: Option<&str>) -> Result<Self, LoggingError> {
        let target = match log_dir {
            Some(dir) => LogTarget::Directory(absolute_dir(dir)?),
            None => LogTarget::Stderr,
        };
        Ok(Self {
            level: parse_level(level)?,
            target,
        })
    }
}

#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    BadDirectory { path: String, reason: String },
    /// A logger with other settings is already running.
    AlreadyActive {
        active: LogSettings,
        requested: LogSettings,
    },
    Backend(String),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(
                f,
                "unknown log level `{level}` (use trace, debug, info, warn or error)"
            ),
            Self::BadDirectory { path, reason } => write!(f, "log directory `{path}`: {reason}"),
            Self::AlreadyActive { active, requested } => write!(
                f,
                "logger already running at {} to {}; cannot switch to {} to {}",
                active.level, active.target, requested.level, requested.target
            ),
            Self::Backend(message) => write!(f, "logger backend: {message}"),
        }
    }
}

impl Error for LoggingError {}

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Starts the registry logger, or confirms the running one matches.
pub fn init_logging(level: &str, log_dir: Option<&str>) -> Result<(), LoggingError> {
    let requested = LogSettings::parse(level, log_dir)?;
    let active = ACTIVE.get_or_try_init(|| start(requested.clone()))?;
    if active.settings != requested {
        return Err(LoggingError::AlreadyActive {
            active: active.settings.clone(),
            requested,
        });
    }
    Ok(())
}

/// Settings of the running logger, if any.
pub fn logging_status() -> Option<LogSettings> {
    ACTIVE.get().map(|active| active.settings.clone())
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(settings: LogSettings) -> Result<ActiveLogger, LoggingError> {
    let logger = Logger::with(LogSpecification::builder().default(settings.level).build());
    let logger = match &settings.target {
        LogTarget::Stderr => logger.log_to_stderr().format_for_stderr(detailed_format),
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|err| LoggingError::BadDirectory {
                path: dir.display().to_string(),
                reason: err.to_string(),
            })?;
            logger
                .log_to_file(FileSpec::default().directory(dir.clone()).basename(LOG_BASENAME))
                .rotate(
                    Criterion::Size(ROTATE_AT_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(KEEP_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(detailed_format)
        }
    };
    let handle = logger
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    hook_panics();
    info!(
        "event=logging_init module=core status=ok level={} target={} build={} version={} os={}",
        settings.level,
        settings.target,
        if cfg!(debug_assertions) { "debug" } else { "release" },
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    let trimmed = level.trim();
    if trimmed.eq_ignore_ascii_case("warning") {
        return Ok(LevelFilter::Warn);
    }
    trimmed
        .parse()
        .map_err(|_| LoggingError::UnknownLevel(trimmed.to_string()))
}

fn absolute_dir(dir: &str) -> Result<PathBuf, LoggingError> {
    let trimmed = dir.trim();
    let reason = if trimmed.is_empty() {
        "must not be empty"
    } else if !Path::new(trimmed).is_absolute() {
        "must be an absolute path"
    } else {
        return Ok(PathBuf::from(trimmed));
    };
    Err(LoggingError::BadDirectory {
        path: trimmed.to_string(),
        reason: reason.to_string(),
    })
}

// Runs once: `start` is only reached from the `ACTIVE` initializer.
fn hook_panics() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info.location().map_or_else(
            || "unknown".to_string(),
            |loc| format!("{}:{}", loc.file(), loc.line()),
        );
        error!(
            "event=panic module=core status=error location={location} message={}",
            one_line(panic_text(info), PANIC_MESSAGE_LIMIT)
        );
        previous(info);
    }));
}

fn panic_text<'a>(info: &'a PanicHookInfo<'_>) -> &'a str {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

fn one_line(text: &str, limit: usize) -> String {
    let mut line: String = text
        .chars()
        .take(limit)
        .map(|c| if matches!(c, '\n' | '\r') { ' ' } else { c })
        .collect();
    if text.chars().nth(limit).is_some() {
        line.push_str("...");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{
        init_logging, logging_status, one_line, parse_level, LogSettings, LogTarget,
        LoggingError,
    };
    use log::LevelFilter;

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level(" warning ").unwrap(), LevelFilter::Warn);
        assert!(matches!(
            parse_level("verbose"),
            Err(LoggingError::UnknownLevel(level)) if level == "verbose"
        ));
    }

    #[test]
    fn relative_or_empty_directory_is_rejected() {
        for dir in ["logs/dev", "   "] {
            let err = LogSettings::parse("info", Some(dir)).unwrap_err();
            assert!(matches!(err, LoggingError::BadDirectory { .. }), "{dir}");
        }
    }

    #[test]
    fn one_line_flattens_and_truncates() {
        assert_eq!(one_line("line1\nline2\rline3", 8), "line1 li...");
        assert_eq!(one_line("short", 8), "short");
    }

    #[test]
    fn repeat_init_is_idempotent_and_conflicts_are_rejected() {
        let log_dir = tempfile::tempdir().unwrap();
        let dir = log_dir.path().to_str().unwrap().to_string();

        init_logging("info", Some(&dir)).unwrap();
        init_logging("INFO", Some(&dir)).unwrap();

        let level_conflict = init_logging("debug", Some(&dir)).unwrap_err();
        assert!(matches!(level_conflict, LoggingError::AlreadyActive { .. }));
        let target_conflict = init_logging("info", None).unwrap_err();
        assert!(matches!(target_conflict, LoggingError::AlreadyActive { .. }));

        let active = logging_status().unwrap();
        assert_eq!(active.level, LevelFilter::Info);
        assert_eq!(active.target, LogTarget::Directory(log_dir.path().to_path_buf()));
    }
}
