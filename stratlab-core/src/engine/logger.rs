//! Per-run log — an append-only trail of timestamped lines.
//!
//! Every run owns its own sink; nothing is shared between concurrently
//! running backtests. The file sink truncates any previous file at the same
//! path when the run starts and flushes on drop. Writes are best-effort: a
//! failed write never aborts a simulation.

use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug)]
enum Sink {
    File(BufWriter<File>),
    Memory(Vec<String>),
    Null,
}

/// Append-only run log.
#[derive(Debug)]
pub struct RunLogger {
    sink: Sink,
}

impl RunLogger {
    /// Log to a file, truncating whatever was there. Parent directories are
    /// created as needed.
    pub fn to_file(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self {
            sink: Sink::File(BufWriter::new(file)),
        })
    }

    /// Collect lines in memory (tests and result capture).
    pub fn in_memory() -> Self {
        Self {
            sink: Sink::Memory(Vec::new()),
        }
    }

    /// Discard everything.
    pub fn null() -> Self {
        Self { sink: Sink::Null }
    }

    /// Write an undated lifecycle line.
    pub fn note(&mut self, message: impl AsRef<str>) {
        self.write_line(message.as_ref());
    }

    /// Write a bar-dated line: `YYYY-MM-DD, message`.
    pub fn log(&mut self, date: NaiveDate, message: impl AsRef<str>) {
        self.write_line(&format!("{date}, {}", message.as_ref()));
    }

    /// Lines captured so far (memory sink only).
    pub fn lines(&self) -> &[String] {
        match &self.sink {
            Sink::Memory(lines) => lines,
            _ => &[],
        }
    }

    fn write_line(&mut self, line: &str) {
        match &mut self.sink {
            Sink::File(writer) => {
                let _ = writeln!(writer, "{line}");
                let _ = writer.flush();
            }
            Sink::Memory(lines) => lines.push(line.to_string()),
            Sink::Null => {}
        }
    }
}

impl Drop for RunLogger {
    fn drop(&mut self) {
        if let Sink::File(writer) = &mut self.sink {
            let _ = writer.flush();
        }
    }
}
