//! Interactive questions for `expresso new`.
//!
//! Each question is asked only when its flag was not given. Without the
//! `interactive` feature, or with `--yes`, the configured default is used.

use crate::error::CliResult;

/// Source of answers for anything not supplied on the command line.
pub trait Prompter {
    fn input(&self, question: &str, default: &str) -> CliResult<String>;
    fn port(&self, question: &str, default: u16) -> CliResult<u16>;
    fn select(&self, question: &str, choices: &[&str], default: usize) -> CliResult<usize>;
    fn confirm(&self, question: &str, default: bool) -> CliResult<bool>;
}

/// Answers every question with its default.
pub struct Defaults;

impl Prompter for Defaults {
    fn input(&self, _question: &str, default: &str) -> CliResult<String> {
        Ok(default.to_owned())
    }

    fn port(&self, _question: &str, default: u16) -> CliResult<u16> {
        Ok(default)
    }

    fn select(&self, _question: &str, _choices: &[&str], default: usize) -> CliResult<usize> {
        Ok(default)
    }

    fn confirm(&self, _question: &str, default: bool) -> CliResult<bool> {
        Ok(default)
    }
}

#[cfg(feature = "interactive")]
pub use terminal::Terminal;

#[cfg(feature = "interactive")]
mod terminal {
    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

    use super::Prompter;
    use crate::error::{CliError, CliResult};

    /// dialoguer-backed prompts on the controlling terminal.
    pub struct Terminal {
        theme: ColorfulTheme,
    }

    impl Terminal {
        pub fn new() -> Self {
            Self {
                theme: ColorfulTheme::default(),
            }
        }
    }

    fn map_err(e: dialoguer::Error) -> CliError {
        match e {
            dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
                CliError::Cancelled
            }
            dialoguer::Error::IO(io) => CliError::IoError {
                message: "failed to read answer".into(),
                source: io,
            },
            #[allow(unreachable_patterns)]
            other => CliError::InvalidInput {
                message: other.to_string(),
                source: None,
            },
        }
    }

    impl Prompter for Terminal {
        fn input(&self, question: &str, default: &str) -> CliResult<String> {
            Input::<String>::with_theme(&self.theme)
                .with_prompt(question)
                .default(default.to_owned())
                .interact_text()
                .map_err(map_err)
        }

        fn port(&self, question: &str, default: u16) -> CliResult<u16> {
            Input::<u16>::with_theme(&self.theme)
                .with_prompt(question)
                .default(default)
                .validate_with(|p: &u16| -> Result<(), &str> {
                    if *p == 0 { Err("port must be between 1 and 65535") } else { Ok(()) }
                })
                .interact_text()
                .map_err(map_err)
        }

        fn select(&self, question: &str, choices: &[&str], default: usize) -> CliResult<usize> {
            Select::with_theme(&self.theme)
                .with_prompt(question)
                .items(choices)
                .default(default)
                .interact()
                .map_err(map_err)
        }

        fn confirm(&self, question: &str, default: bool) -> CliResult<bool> {
            Confirm::with_theme(&self.theme)
                .with_prompt(question)
                .default(default)
                .interact()
                .map_err(map_err)
        }
    }
}

/// Whether real prompts can be shown.
pub fn can_prompt(yes: bool) -> bool {
    cfg!(feature = "interactive")
        && !yes
        && std::io::IsTerminal::is_terminal(&std::io::stdin())
        && std::io::IsTerminal::is_terminal(&std::io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_answer_with_default() {
        let p = Defaults;
        assert_eq!(p.input("name?", "server").unwrap(), "server");
        assert_eq!(p.port("port?", 3000).unwrap(), 3000);
        assert_eq!(p.select("lang?", &["a", "b"], 1).unwrap(), 1);
        assert!(!p.confirm("docker?", false).unwrap());
    }

    #[test]
    fn yes_never_prompts() {
        assert!(!can_prompt(true));
    }
}
