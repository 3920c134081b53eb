//! Write targets for everything twurl prints.
//!
//! Every write through an [`OutputSink`] is flushed immediately so prompts and
//! piped output interleave in the order they were produced.

use std::io::{self, Stderr, Stdout, Write};

/// Where output for the current invocation goes.
#[derive(Debug)]
pub enum OutputSink {
    /// The process standard output (the default).
    Stdout(Stdout),
    /// The process standard error, used for diagnostics.
    Stderr(Stderr),
    /// An in-memory buffer; `--quiet` redirects here.
    Captured(Vec<u8>),
}

impl OutputSink {
    #[must_use]
    pub fn stdout() -> Self {
        Self::Stdout(io::stdout())
    }

    #[must_use]
    pub fn stderr() -> Self {
        Self::Stderr(io::stderr())
    }

    #[must_use]
    pub fn captured() -> Self {
        Self::Captured(Vec::new())
    }

    /// Writes `text` as-is and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying stream cannot be written.
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.write_all(text.as_bytes())?;
        self.flush()
    }

    /// Writes `text` followed by a newline (unless it already ends with one) and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying stream cannot be written.
    pub fn puts(&mut self, text: &str) -> io::Result<()> {
        self.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            self.write_all(b"\n")?;
        }
        self.flush()
    }

    /// The bytes written so far, when output is being captured.
    #[must_use]
    pub fn captured_output(&self) -> Option<&[u8]> {
        match self {
            Self::Captured(buffer) => Some(buffer),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_captured(&self) -> bool {
        matches!(self, Self::Captured(_))
    }
}

impl Default for OutputSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(stdout) => stdout.write(buf),
            Self::Stderr(stderr) => stderr.write(buf),
            Self::Captured(buffer) => buffer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(stdout) => stdout.flush(),
            Self::Stderr(stderr) => stderr.flush(),
            Self::Captured(_) => Ok(()),
        }
    }
}
