// In-memory log buffer behind the `log` facade, shown on the log screen
use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::config::MAX_DEBUG_LOGS;

static DEBUG_LOGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(Vec::new()));

// Off while the alternate screen is up, stderr would scribble over it
static MIRROR_STDERR: AtomicBool = AtomicBool::new(true);

static LOGGER: DebugLogger = DebugLogger;

pub struct DebugLogger;

impl Log for DebugLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        push(format!(
            "[{}] {:<5} {}",
            Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.args()
        ));
    }

    fn flush(&self) {}
}

/// Install the buffer as the global logger. Safe to call more than once.
pub fn init(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

pub fn set_stderr_mirror(enabled: bool) {
    MIRROR_STDERR.store(enabled, Ordering::Relaxed);
}

pub fn push(line: String) {
    if MIRROR_STDERR.load(Ordering::Relaxed) {
        eprintln!("{}", line);
    }
    if let Ok(mut logs) = DEBUG_LOGS.lock() {
        logs.push(line);
        if logs.len() > MAX_DEBUG_LOGS {
            let overflow = logs.len() - MAX_DEBUG_LOGS;
            logs.drain(..overflow);
        }
    }
}

pub fn snapshot() -> Vec<String> {
    DEBUG_LOGS.lock().map(|logs| logs.clone()).unwrap_or_default()
}
