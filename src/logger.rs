// In-app logger: keeps a bounded buffer for the logs window, appends warn+
// lines to log.txt, optionally mirrors to stderr, and logs panics.

use lazy_static::lazy_static;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::backtrace::Backtrace;
use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::app::environment::is_truthy;

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub msg: String,
}

impl LogEntry {
    pub fn format_line(&self) -> String {
        format!("[{:>5}] {}: {}", self.level, self.target, self.msg)
    }
}

const MAX_LOG_LINES: usize = 5000;
const LOG_FILE_NAME: &str = "log.txt";

#[derive(Default)]
struct LogSink {
    entries: VecDeque<LogEntry>,
    file: Option<File>,
}

impl LogSink {
    fn push(&mut self, entry: LogEntry) {
        self.entries.push_back(entry);
        if self.entries.len() > MAX_LOG_LINES {
            self.entries.pop_front();
        }
    }

    fn write_file_line(&mut self, line: &str) {
        if let Some(f) = self.file.as_mut() {
            let _ = writeln!(f, "{}", line);
            let _ = f.flush();
        }
    }
}

lazy_static! {
    static ref SINK: Mutex<LogSink> = Mutex::new(LogSink::default());
    static ref MIRROR_STDERR: bool = std::env::var("MAP_DATA_LOG_STDERR")
        .map(|v| is_truthy(&v))
        .unwrap_or(false);
}

static NEW_LOGS: AtomicBool = AtomicBool::new(false);

struct GuiLogger;

impl Log for GuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{:>5}] {}: {}",
            timestamp_millis(),
            record.level(),
            record.target(),
            record.args()
        );

        if *MIRROR_STDERR {
            eprintln!("{}", line);
        }

        if let Ok(mut sink) = SINK.lock() {
            if matches!(record.level(), Level::Warn | Level::Error) {
                sink.write_file_line(&line);
            }
            sink.push(LogEntry {
                level: record.level(),
                target: record.target().to_string(),
                msg: record.args().to_string(),
            });
        }
        NEW_LOGS.store(true, Ordering::Relaxed);
    }

    fn flush(&self) {
        if let Ok(mut sink) = SINK.lock() {
            if let Some(f) = sink.file.as_mut() {
                let _ = f.flush();
            }
        }
    }
}

// "debug", "map_data_filters=info" -> first parseable level
fn level_from_env() -> Option<LevelFilter> {
    let val = std::env::var("RUST_LOG").ok()?;
    parse_level(&val)
}

fn parse_level(spec: &str) -> Option<LevelFilter> {
    spec.split([',', '='])
        .find_map(|part| LevelFilter::from_str(part.trim()).ok())
}

/// Installs the logger, opens log.txt and the panic hook.
pub fn init() {
    let _ = log::set_boxed_logger(Box::new(GuiLogger));

    // Everything by default; RUST_LOG narrows it.
    let level = level_from_env().unwrap_or(LevelFilter::Trace);
    log::set_max_level(level);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE_NAME)
        .ok();
    if let Ok(mut sink) = SINK.lock() {
        sink.file = file;
    }

    install_panic_hook();

    log::info!(
        "GUI logger initialized at level {} (persisting warnings to {})",
        level.as_str().to_ascii_lowercase(),
        LOG_FILE_NAME
    );
}

pub fn for_each_range<F: FnMut(&LogEntry)>(start: usize, end: usize, mut f: F) {
    if let Ok(sink) = SINK.lock() {
        let len = sink.entries.len();
        sink.entries
            .range(start.min(len)..end.min(len))
            .for_each(|e| f(e));
    }
}

pub fn get_all() -> Vec<String> {
    SINK.lock()
        .map(|sink| sink.entries.iter().map(LogEntry::format_line).collect())
        .unwrap_or_default()
}

pub fn len() -> usize {
    SINK.lock().map(|sink| sink.entries.len()).unwrap_or(0)
}

pub fn clear() {
    if let Ok(mut sink) = SINK.lock() {
        sink.entries.clear();
    }
    NEW_LOGS.store(true, Ordering::Relaxed);
}

/// Returns true if new logs arrived since the last call.
pub fn take_new_flag() -> bool {
    NEW_LOGS.swap(false, Ordering::Relaxed)
}

fn timestamp_millis() -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    format!("{}.{:03}", now.as_secs(), now.subsec_millis())
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info.payload();
        let msg = if let Some(s) = payload.downcast_ref::<&str>() {
            *s
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.as_str()
        } else {
            "Box<Any>"
        };

        let loc = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let bt = Backtrace::force_capture();
        if let Ok(mut sink) = SINK.lock() {
            sink.write_file_line(&format!(
                "[{}] [ERROR] panic at {loc}: {msg}",
                timestamp_millis()
            ));
            for line in format!("{bt:?}").lines() {
                sink.write_file_line(line);
            }
        }

        log::error!("panic at {loc}: {msg}\n{bt:?}");
    }));
}
