//! File-based logging bootstrap. Initialized once per process by the
//! binary; everything else logs through the `log` facade.

use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

const LOG_FILE_BASENAME: &str = "notefolio";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Initialize rotating file logging in `log_dir`.
///
/// Idempotent for the same directory; re-initialization with a different
/// directory is rejected. Never panics.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), String> {
    if let Some(state) = LOGGING_STATE.get() {
        if state.log_dir == log_dir {
            return Ok(());
        }
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            state.log_dir.display(),
            log_dir.display()
        ));
    }

    LOGGING_STATE
        .get_or_try_init(|| -> Result<LoggingState, String> {
            std::fs::create_dir_all(log_dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", log_dir.display())
            })?;

            let logger = Logger::try_with_str(level)
                .map_err(|err| format!("invalid log level `{level}`: {err}"))?
                .log_to_file(
                    FileSpec::default()
                        .directory(log_dir)
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()
                .map_err(|err| format!("failed to start logger: {err}"))?;

            info!(
                "logging initialized level={level} dir={} version={}",
                log_dir.display(),
                env!("CARGO_PKG_VERSION")
            );

            Ok(LoggingState {
                log_dir: log_dir.to_path_buf(),
                _logger: logger,
            })
        })
        .map(|_| ())
}
