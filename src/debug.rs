//! Logging bridge for putty-reg.
//!
//! Every module logs through the `log` facade. [`init_log_bridge`] installs a
//! logger that appends to `putty_reg_debug.log` in the temp dir, and mirrors
//! to stderr when `RUST_LOG` is set or `--verbose` was passed. stdout is kept
//! clean for the JSON and report output.
//!
//! Level precedence: CLI `--log-level` > `RUST_LOG` > config `log_level`.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Path of the debug log file.
pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("putty_reg_debug.log")
}

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
pub fn parse_level(name: &str) -> Option<log::LevelFilter> {
    name.trim().parse().ok()
}

/// Pick the effective level from the CLI flag, `RUST_LOG`, and the config.
pub fn resolve_level(
    cli: Option<log::LevelFilter>,
    env: Option<&str>,
    config: &str,
) -> log::LevelFilter {
    cli.or_else(|| env.and_then(parse_level))
        .or_else(|| parse_level(config))
        .unwrap_or(log::LevelFilter::Info)
}

struct LogBridge {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
            record.level(),
            record.target(),
            record.args()
        );

        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

/// Install the logger. Calling it again only adjusts the level.
pub fn init_log_bridge(level: log::LevelFilter, verbose: bool) {
    log::set_max_level(level);

    let bridge = BRIDGE.get_or_init(|| {
        let file = if level == log::LevelFilter::Off {
            None
        } else {
            // Logging must never stop the analysis, so an unwritable log file
            // just disables file output.
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file_path())
                .ok()
        };
        LogBridge {
            file: Mutex::new(file),
            mirror_stderr: verbose || std::env::var_os("RUST_LOG").is_some(),
        }
    });

    if log::set_logger(bridge).is_ok() {
        log::debug!("log bridge installed at level {}", level);
    }
}
