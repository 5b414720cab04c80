/// Base view shared by every command view
///
/// This module handles:
/// - Writing to the standard and diagnostic streams
/// - Optional terminal colours
/// - Output width detection for wrapped text
/// - Rendering diagnostics and the usage help prompt
use crate::format::wrap_text;
use crate::streams::Streams;
use crate::types::{Diagnostic, Severity};
use term::color::Color;
use terminal_size::{Width, terminal_size};

/// Program name used in help hints when none is configured
pub const DEFAULT_PROGRAM: &str = "terraform";

/// Width used when stdout is not a terminal
const DEFAULT_WIDTH: usize = 78;

pub struct View {
    streams: Streams,
    program: String,
    color: bool,
    width: usize,
}

impl View {
    /// Create a view with colour enabled only when stdout is a terminal
    pub fn new(streams: Streams) -> Self {
        let color = streams.stdout_is_terminal();
        Self { streams, program: DEFAULT_PROGRAM.to_string(), color, width: detect_width() }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(20);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn stdout(&self, text: &str) {
        self.streams.write_stdout(text);
    }

    pub fn stderr(&self, text: &str) {
        self.streams.write_stderr(text);
    }

    /// Wrap `text` in bold ANSI sequences when colour is enabled
    pub fn bold(&self, text: &str) -> String {
        if self.color { format!("\x1b[1m{}\x1b[0m", text) } else { text.to_string() }
    }

    /// Wrap `text` in bold coloured ANSI sequences when colour is enabled
    pub fn colorize(&self, text: &str, fg: Color) -> String {
        if self.color { format!("\x1b[1m\x1b[{}m{}\x1b[0m", ansi_foreground(fg), text) } else { text.to_string() }
    }

    /// Print usage guidance for `command` on the diagnostic stream
    pub fn help_prompt(&self, command: &str) {
        self.stderr(&format!("\nFor more help on using this command, run:\n  {} {} -help\n", self.program, command));
    }

    /// Render diagnostics: errors to the diagnostic stream, warnings to the
    /// standard stream.
    pub fn diagnostics(&self, diags: &[Diagnostic]) {
        for diag in diags {
            let block = self.format_diagnostic(diag);
            match diag.severity {
                Severity::Error => self.stderr(&block),
                Severity::Warning => self.stdout(&block),
            }
        }
    }

    /// Format one diagnostic as a boxed block
    pub fn format_diagnostic(&self, diag: &Diagnostic) -> String {
        let fg = match diag.severity {
            Severity::Error => term::color::RED,
            Severity::Warning => term::color::YELLOW,
        };
        let rule = |s: &str| self.colorize(s, fg);

        let mut out = String::from("\n");
        out.push_str(&rule("╷"));
        out.push('\n');
        out.push_str(&format!(
            "{} {}{}\n",
            rule("│"),
            self.colorize(&format!("{}: ", diag.severity.label()), fg),
            self.bold(&diag.summary)
        ));

        if let Some(detail) = diag.detail.as_deref().filter(|d| !d.trim().is_empty()) {
            out.push_str(&format!("{}\n", rule("│")));
            for line in wrap_text(detail, self.width.saturating_sub(2)) {
                if line.is_empty() {
                    out.push_str(&format!("{}\n", rule("│")));
                } else {
                    out.push_str(&format!("{} {}\n", rule("│"), line));
                }
            }
        }

        out.push_str(&rule("╵"));
        out.push('\n');
        out
    }
}

/// Map a terminal colour number to its ANSI foreground code
fn ansi_foreground(fg: Color) -> u32 {
    if fg < 8 { 30 + fg } else { 90 + (fg - 8).min(7) }
}

/// Get terminal width or fall back to a conservative default
fn detect_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() { w as usize } else { DEFAULT_WIDTH }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;
