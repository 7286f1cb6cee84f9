use std::{
    io::{self, BufWriter, Stderr, Stdout, Write},
    path::Path,
};

use colored::{ColoredString, Colorize};
use log::trace;

use crate::types::Resolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Console output of a package run.
///
/// Info lines go to `out`, error lines go to `err`. Info lines about specifiers
/// that are already qualified are only shown when `verbose` is set.
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
    verbose: bool,
}

impl Reporter<BufWriter<Stdout>, Stderr> {
    pub fn stdio(verbose: bool) -> Self {
        // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
        Self::new(BufWriter::new(io::stdout()), io::stderr(), verbose)
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E, verbose: bool) -> Self {
        Self { out, err, verbose }
    }

    /// Start reporting on `path`; its header is printed before its first shown line.
    pub fn file<'r>(&'r mut self, path: &'r Path) -> FileLog<'r, O, E> {
        FileLog { reporter: self, path, header_printed: false }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

/// Per-file reporting state.
pub struct FileLog<'r, O: Write, E: Write> {
    reporter: &'r mut Reporter<O, E>,
    path: &'r Path,
    header_printed: bool,
}

impl<O: Write, E: Write> FileLog<'_, O, E> {
    pub fn record(&mut self, resolution: &Resolution) -> io::Result<()> {
        match resolution {
            Resolution::Rewritten { from, to } => {
                self.log(Severity::Info, format!("🛠️  {from} → {to}").yellow())
            }
            Resolution::AlreadyQualified(path) => {
                if !self.reporter.verbose {
                    trace!("Already qualified: {}", path);
                    return Ok(());
                }
                self.log(Severity::Info, format!("✔️  {path}").green())
            }
            Resolution::Unresolvable(path) => {
                self.log(Severity::Error, format!("❌  {path}").red())
            }
        }
    }

    fn log(&mut self, severity: Severity, message: ColoredString) -> io::Result<()> {
        if !self.header_printed {
            self.header_printed = true;
            writeln!(self.reporter.out, "{}", self.path.display().to_string().blue())?;
        }

        match severity {
            Severity::Info => writeln!(self.reporter.out, "\t{message}"),
            Severity::Error => {
                self.reporter.out.flush()?;
                writeln!(self.reporter.err, "\t{message}")
            }
        }
    }
}
