//! Console implementation of the core `Reporter` port.

use std::path::Path;

use console::Term;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;

use expresso_core::{
    application::{ApplicationError, ports::Reporter},
    error::ExpressoResult,
};

use crate::output::OutputManager;

const WELCOME: &str = "Welcome to the Express.js project generator! 🚀";
const SIGN_OFF: &str = "Generated by Expresso 🔥, Happy Coding 🎉";

/// Banner-style progress messages on stdout.
///
/// Silent in quiet mode and for JSON output, where the command prints a
/// single document instead.
pub struct ConsoleReporter {
    term: Term,
    enabled: bool,
    color: bool,
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new(output: &OutputManager) -> Self {
        Self {
            term: Term::stdout(),
            enabled: !output.is_quiet() && !output.format().is_machine_readable(),
            color: output.supports_color(),
            spinner: None,
        }
    }

    /// Clear `spinner` before the first banner line is written.
    pub fn with_spinner(mut self, spinner: Option<ProgressBar>) -> Self {
        self.spinner = spinner;
        self
    }

    pub fn welcome(&self) -> ExpressoResult<()> {
        let line = if self.color {
            WELCOME.bright_magenta().italic().to_string()
        } else {
            WELCOME.to_owned()
        };
        self.emit(&["", &line, ""])
    }

    fn emit(&self, lines: &[&str]) -> ExpressoResult<()> {
        if !self.enabled {
            return Ok(());
        }
        if let Some(bar) = &self.spinner {
            bar.finish_and_clear();
        }
        for line in lines {
            self.term
                .write_line(line)
                .map_err(|e| ApplicationError::ReporterFailed {
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }
}

impl Reporter for ConsoleReporter {
    fn root_exists(&self, root: &Path) -> ExpressoResult<()> {
        let line = root_exists_line(root, self.color);
        self.emit(&[&line])
    }

    fn created(&self, project_name: &str) -> ExpressoResult<()> {
        let line = created_line(project_name, self.color);
        self.emit(&["", &line, ""])
    }

    fn next_steps(&self, project_name: &str) -> ExpressoResult<()> {
        let lines = next_steps_lines(project_name, self.color);
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        self.emit(&refs)
    }
}

fn root_exists_line(root: &Path, color: bool) -> String {
    let text = format!(
        "Directory '{}' already exists, nothing was written",
        root.display()
    );
    if color {
        format!("{} {}", "\u{26a0}".yellow().bold(), text.yellow())
    } else {
        format!("\u{26a0} {text}")
    }
}

fn created_line(project_name: &str, color: bool) -> String {
    let text = format!(" 🎉 Project '{project_name}' created successfully! 🎉 ");
    if color {
        text.black().on_white().to_string()
    } else {
        text
    }
}

fn next_steps_lines(project_name: &str, color: bool) -> Vec<String> {
    let steps = [
        format!("-> cd {project_name}"),
        "-> npm install".to_string(),
        "-> npm start".to_string(),
    ];
    let mut lines = Vec::with_capacity(steps.len() + 4);
    if color {
        lines.push("Next Steps:".bright_magenta().italic().to_string());
        lines.extend(steps.iter().map(|s| s.bold().to_string()));
        lines.push(String::new());
        lines.push(SIGN_OFF.on_bright_blue().italic().to_string());
    } else {
        lines.push("Next Steps:".to_string());
        lines.extend(steps);
        lines.push(String::new());
        lines.push(SIGN_OFF.to_string());
    }
    lines.push(String::new());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_banner_wording() {
        assert_eq!(
            created_line("demo", false),
            " 🎉 Project 'demo' created successfully! 🎉 "
        );
    }

    #[test]
    fn next_steps_in_order() {
        let lines = next_steps_lines("demo", false);
        assert_eq!(
            &lines[..4],
            ["Next Steps:", "-> cd demo", "-> npm install", "-> npm start"]
        );
        assert!(lines.iter().any(|l| l == SIGN_OFF));
    }

    #[test]
    fn colored_lines_keep_text() {
        assert!(created_line("demo", true).contains("Project 'demo' created successfully!"));
        assert!(next_steps_lines("demo", true)[1].contains("-> cd demo"));
    }

    #[test]
    fn root_exists_names_directory() {
        assert!(root_exists_line(Path::new("./demo"), false).contains("./demo"));
    }
}
