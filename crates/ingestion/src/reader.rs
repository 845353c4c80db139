//! Daily export reader.
//!
//! Skips the vendor preamble at the top of an export, optionally keeping the
//! preamble line that carries the trading date, then yields the data lines.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines};
use std::path::Path;
use tape_core::{DateSource, Result, TickerConfig};

/// Number of file name characters that form the date key (`yyyymmdd`).
pub const FILE_NAME_DATE_LEN: usize = 8;

/// Date key taken from the leading characters of a file name.
///
/// Names shorter than eight characters are used whole.
pub fn date_from_file_name(file_name: &str) -> String {
    file_name.chars().take(FILE_NAME_DATE_LEN).collect()
}

/// Strip quotes and trailing delimiters from a preamble date line.
pub fn clean_header_date(line: &str) -> String {
    line.replace('"', "")
        .trim()
        .trim_end_matches(',')
        .trim()
        .to_string()
}

/// Pick the date key for a day according to the configured strategy.
pub fn resolve_date(config: &TickerConfig, file_name: &str, header_date: Option<&str>) -> String {
    match (config.date_source, header_date) {
        (DateSource::FileName, _) => date_from_file_name(file_name),
        (DateSource::HeaderLine, Some(line)) => clean_header_date(line),
        (DateSource::HeaderLine, None) => {
            tracing::warn!(
                file = file_name,
                line = config.date_line_number,
                "Date line missing from preamble, using file name"
            );
            date_from_file_name(file_name)
        }
    }
}

/// Line reader for one day's export.
pub struct DayReader<R> {
    /// Underlying line iterator.
    lines: Lines<R>,
    /// Raw preamble line at the configured date index, if captured.
    header_date: Option<String>,
    /// Name used in log messages.
    source: String,
    /// Physical line number of the last line read (1-based).
    line_number: usize,
    /// Set after an unrecoverable read error.
    done: bool,
}

impl DayReader<BufReader<File>> {
    /// Open an export file and skip its preamble.
    pub fn open(path: &Path, config: &TickerConfig) -> Result<Self> {
        let file = File::open(path)?;
        let date_line = match config.date_source {
            DateSource::HeaderLine => Some(config.date_line_number),
            DateSource::FileName => None,
        };
        Self::new(
            BufReader::new(file),
            path.display().to_string(),
            config.header_skip_lines,
            date_line,
        )
    }
}

impl<R: BufRead> DayReader<R> {
    /// Wrap a reader, consuming `skip_lines` preamble lines.
    ///
    /// A read failure inside the preamble is returned to the caller.
    pub fn new(
        reader: R,
        source: impl Into<String>,
        skip_lines: usize,
        date_line: Option<usize>,
    ) -> Result<Self> {
        let mut this = Self {
            lines: reader.lines(),
            header_date: None,
            source: source.into(),
            line_number: 0,
            done: false,
        };

        for index in 0..skip_lines {
            let line = match this.lines.next() {
                Some(line) => line?,
                None => {
                    tracing::debug!(source = %this.source, skipped = index, "Preamble ended early");
                    break;
                }
            };
            this.line_number += 1;

            if date_line == Some(index) {
                tracing::debug!(source = %this.source, date = %line, "Captured date line");
                this.header_date = Some(line);
            } else {
                tracing::trace!(source = %this.source, "Skipping preamble [{}]", line);
            }
        }

        Ok(this)
    }

    /// Preamble line captured as the date, if any.
    pub fn header_date(&self) -> Option<&str> {
        self.header_date.as_deref()
    }

    /// Source name (usually the file path).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Physical line number of the last line returned.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for DayReader<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        loop {
            match self.lines.next()? {
                Ok(line) => {
                    self.line_number += 1;
                    return Some(line);
                }
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    self.line_number += 1;
                    tracing::warn!(
                        source = %self.source,
                        line = self.line_number,
                        "Skipping undecodable line: {}",
                        e
                    );
                }
                Err(e) => {
                    tracing::error!(source = %self.source, "Reading file failed: {}", e);
                    self.done = true;
                    return None;
                }
            }
        }
    }
}
