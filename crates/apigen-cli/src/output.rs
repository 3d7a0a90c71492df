//! Terminal output for the command handlers.
//!
//! All user-facing lines funnel through [`OutputManager`] so the glyph,
//! colour, and suppression rules live in one place. Status lines (success,
//! info, warning) are dropped under `--quiet` and under the `json` output
//! format, where only payload and errors may reach the stream. Errors are
//! never dropped.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Status line kinds, each with a fixed glyph and colour.
#[derive(Debug, Clone, Copy)]
enum Status {
    Success,
    Info,
    Warning,
    Error,
}

impl Status {
    fn glyph(self) -> char {
        match self {
            Self::Success => '\u{2713}', // ✓
            Self::Info => '\u{2139}',    // ℹ
            Self::Warning => '\u{26a0}', // ⚠
            Self::Error => '\u{2717}',   // ✗
        }
    }

    fn paint(self, msg: &str) -> String {
        let glyph = self.glyph();
        match self {
            Self::Success => format!("{} {}", glyph.green().bold(), msg.green()),
            Self::Info => format!("{} {}", glyph.blue().bold(), msg.blue()),
            Self::Warning => format!("{} {}", glyph.yellow().bold(), msg.yellow()),
            Self::Error => format!("{} {}", glyph.red().bold(), msg.red()),
        }
    }
}

/// Writer for everything the commands tell the user.
pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };
        Self {
            format,
            quiet: args.quiet,
            color: !(args.no_color || config.output.no_color),
            term: Term::stdout(),
        }
    }

    /// Payload line (generated JSON, file listings). Suppressed by `--quiet`
    /// only.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// `✓ <msg>`
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.chatter() {
            self.write_status(Status::Success, msg)?;
        }
        Ok(())
    }

    /// `ℹ <msg>`
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.chatter() {
            self.write_status(Status::Info, msg)?;
        }
        Ok(())
    }

    /// `⚠ <msg>`
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.chatter() {
            self.write_status(Status::Warning, msg)?;
        }
        Ok(())
    }

    /// `✗ <msg>`, written regardless of quiet mode or format.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.write_status(Status::Error, msg)
    }

    fn chatter(&self) -> bool {
        !self.quiet && self.format != OutputFormat::Json
    }

    fn write_status(&self, status: Status, msg: &str) -> io::Result<()> {
        let line = if self.color {
            status.paint(msg)
        } else {
            format!("{} {msg}", status.glyph())
        };
        self.term.write_line(&line)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
