//! Command result output on stdout.
//!
//! Commands never touch `println!` directly; they go through
//! [`OutputManager`] so quiet mode, colors and JSON mode are decided once.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Style};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Prefix symbol and color for one kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Warning,
    Info,
}

impl Tone {
    fn symbol(self) -> char {
        match self {
            Self::Success => '\u{2713}',
            Self::Warning => '\u{26a0}',
            Self::Info => '\u{2139}',
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Success => Style::new().green(),
            Self::Warning => Style::new().yellow(),
            Self::Info => Style::new().blue(),
        }
    }
}

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    /// `--output-format auto` defers to `output.format` from the config,
    /// and a remaining `auto` picks human output only on a terminal.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self::resolve(args, config, io::stdout().is_terminal())
    }

    fn resolve(args: &GlobalArgs, config: &AppConfig, stdout_is_tty: bool) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto => parse_format(&config.output.format),
            explicit => explicit,
        };
        let format = match format {
            OutputFormat::Auto if stdout_is_tty => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };
        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            term: Term::stdout(),
        }
    }

    /// Raw line; dropped in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(msg.to_owned())
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.line(self.status(Tone::Success, msg))
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.line(self.status(Tone::Warning, msg))
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.line(self.status(Tone::Info, msg))
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        let text = if self.color {
            text.cyan().bold().to_string()
        } else {
            text.to_owned()
        };
        self.line(text)
    }

    /// Pretty JSON document. Written even in quiet mode, since it is the result.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Stderr spinner for human output, `None` otherwise.
    pub fn spinner(&self, msg: &str) -> Option<ProgressBar> {
        if self.quiet || self.format != OutputFormat::Human {
            return None;
        }
        let bar = ProgressBar::new_spinner().with_message(msg.to_owned());
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    }

    pub fn supports_color(&self) -> bool {
        self.color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn status(&self, tone: Tone, msg: &str) -> String {
        let symbol = tone.symbol();
        if self.color {
            let style = tone.style();
            format!("{} {}", symbol.style(style.bold()), msg.style(style))
        } else {
            format!("{symbol} {msg}")
        }
    }

    fn line(&self, text: String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&text)
    }
}

fn parse_format(value: &str) -> OutputFormat {
    match value.trim().to_ascii_lowercase().as_str() {
        "human" => OutputFormat::Human,
        "plain" => OutputFormat::Plain,
        "json" => OutputFormat::Json,
        _ => OutputFormat::Auto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(format: OutputFormat, quiet: bool, no_color: bool) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
        }
    }

    fn manager(format: OutputFormat, tty: bool) -> OutputManager {
        OutputManager::resolve(&args(format, false, false), &AppConfig::default(), tty)
    }

    #[test]
    fn auto_follows_the_terminal() {
        assert_eq!(manager(OutputFormat::Auto, true).format(), OutputFormat::Human);
        assert_eq!(manager(OutputFormat::Auto, false).format(), OutputFormat::Plain);
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let out = OutputManager::resolve(&args(OutputFormat::Auto, false, false), &config, true);
        assert_eq!(out.format(), OutputFormat::Json);
    }

    #[test]
    fn explicit_flag_beats_config() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let out = OutputManager::resolve(&args(OutputFormat::Plain, false, false), &config, true);
        assert_eq!(out.format(), OutputFormat::Plain);
    }

    #[test]
    fn color_only_for_human_output() {
        assert!(manager(OutputFormat::Human, false).supports_color());
        assert!(!manager(OutputFormat::Plain, true).supports_color());
        assert!(!manager(OutputFormat::Json, true).supports_color());

        let no_color = args(OutputFormat::Human, false, true);
        assert!(!OutputManager::resolve(&no_color, &AppConfig::default(), true).supports_color());

        let mut config = AppConfig::default();
        config.output.no_color = true;
        let out = OutputManager::resolve(&args(OutputFormat::Human, false, false), &config, true);
        assert!(!out.supports_color());
    }

    #[test]
    fn plain_status_lines_carry_symbols() {
        let out = manager(OutputFormat::Plain, false);
        assert_eq!(out.status(Tone::Success, "done"), "\u{2713} done");
        assert_eq!(out.status(Tone::Warning, "careful"), "\u{26a0} careful");
    }

    #[test]
    fn quiet_mode_drops_lines() {
        let out = OutputManager::resolve(
            &args(OutputFormat::Plain, true, false),
            &AppConfig::default(),
            false,
        );
        assert!(out.is_quiet());
        assert!(out.print("hidden").is_ok());
    }

    #[test]
    fn no_spinner_outside_human_output() {
        assert!(manager(OutputFormat::Plain, false).spinner("resolving").is_none());
        assert!(manager(OutputFormat::Json, true).spinner("resolving").is_none());
    }
}
