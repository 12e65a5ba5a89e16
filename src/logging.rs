// 📝 Logging - Rotating log files for the wardrobe binary
//
// Logs are written to files only, so they never interleave with prompts.
// Engine events are `event=... key=value` lines; garment names and notes
// are never logged.
//
// The logger starts at most once per process. Asking again with the same
// level and directory is a no-op; asking for a different one is an error.

use anyhow::{anyhow, bail, Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming};
use log::{info, LevelFilter};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "wardrobe";
const ROTATE_AT_BYTES: u64 = 2 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 5;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: LevelFilter,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Start writing `level` and above into files under the absolute `dir`
pub fn init_logging(level: &str, dir: &str) -> Result<()> {
    let level = parse_level(level)?;
    let dir = PathBuf::from(dir.trim());
    if !dir.is_absolute() {
        bail!("log directory must be an absolute path, got `{}`", dir.display());
    }

    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(level, &dir))?;
    if active.level != level || active.dir != dir {
        bail!(
            "logging already running at {} in `{}`",
            active.level,
            active.dir.display()
        );
    }

    Ok(())
}

/// Directory of the running logger, if any
pub fn active_log_dir() -> Option<&'static Path> {
    ACTIVE_LOGGER.get().map(|active| active.dir.as_path())
}

/// `debug` for debug builds, `info` for release builds
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter> {
    raw.trim()
        .parse::<LevelFilter>()
        .map_err(|_| anyhow!("unknown log level `{}`", raw.trim()))
}

fn start_logger(level: LevelFilter, dir: &Path) -> Result<ActiveLogger> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let log_spec = LogSpecification::builder().default(level).build();
    let handle = Logger::with(log_spec)
        .log_to_file(FileSpec::default().directory(dir).basename(LOG_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEPT_LOG_FILES),
        )
        .append()
        .start()
        .context("Failed to start file logger")?;

    info!(
        "event=logging_started module=logging version={} level={}",
        crate::VERSION,
        level
    );

    Ok(ActiveLogger {
        level,
        dir: dir.to_path_buf(),
        _handle: handle,
    })
}
