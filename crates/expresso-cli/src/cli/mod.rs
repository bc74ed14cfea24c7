//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "expresso",
    bin_name = "expresso",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Express.js backend scaffolding",
    long_about = "Expresso generates a ready-to-run Express.js backend \
                  (JavaScript or TypeScript, REST or GraphQL).",
    after_help = "EXAMPLES:\n\
        \x20 expresso new\n\
        \x20 expresso new my-api --lang ts --api graphql --docker --yes\n\
        \x20 expresso new my-api --port 8080 --no-cors --offline --yes\n\
        \x20 expresso completions bash > /usr/share/bash-completion/completions/expresso",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new Express.js project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "Options not given on the command line are asked interactively.\n\
            Pass --yes to take the defaults instead.\n\n\
            EXAMPLES:\n\
            \x20 expresso new server\n\
            \x20 expresso new my-api --lang ts --api graphql\n\
            \x20 expresso new my-api --dry-run --yes"
    )]
    New(NewArgs),

    /// Initialise an Expresso configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 expresso init          # default location\n\
            \x20 expresso init --force  # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 expresso completions bash > ~/.local/share/bash-completion/completions/expresso\n\
            \x20 expresso completions zsh  > ~/.zfunc/_expresso\n\
            \x20 expresso completions fish > ~/.config/fish/completions/expresso.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Expresso configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 expresso config get defaults.port\n\
            \x20 expresso config set defaults.language typescript\n\
            \x20 expresso config list"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `expresso new`.
#[derive(Debug, Default, Args)]
pub struct NewArgs {
    /// Project name.  Asked interactively when omitted.
    #[arg(value_name = "NAME", help = "Project name (default: server)")]
    pub name: Option<String>,

    /// Source language.
    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANGUAGE",
        value_enum,
        help = "Source language"
    )]
    pub language: Option<Language>,

    /// Port the generated server listens on.
    #[arg(
        short = 'p',
        long = "port",
        value_name = "PORT",
        value_parser = clap::value_parser!(u16).range(1..),
        help = "Server port"
    )]
    pub port: Option<u16>,

    #[arg(long = "cors", overrides_with = "no_cors", help = "Enable CORS")]
    pub cors: bool,
    #[arg(long = "no-cors", overrides_with = "cors", help = "Disable CORS")]
    pub no_cors: bool,

    #[arg(long = "env", overrides_with = "no_env", help = "Write a .env file")]
    pub env: bool,
    #[arg(long = "no-env", overrides_with = "env", help = "Skip the .env file")]
    pub no_env: bool,

    #[arg(
        long = "gitignore",
        overrides_with = "no_gitignore",
        help = "Write a .gitignore file"
    )]
    pub gitignore: bool,
    #[arg(
        long = "no-gitignore",
        overrides_with = "gitignore",
        help = "Skip the .gitignore file"
    )]
    pub no_gitignore: bool,

    #[arg(
        long = "docker",
        overrides_with = "no_docker",
        help = "Write a Dockerfile and .dockerignore"
    )]
    pub docker: bool,
    #[arg(long = "no-docker", overrides_with = "docker", help = "Skip Docker files")]
    pub no_docker: bool,

    /// API style of the generated server.
    #[arg(
        short = 'a',
        long = "api",
        value_name = "STYLE",
        value_enum,
        help = "API style"
    )]
    pub api: Option<ApiStyle>,

    /// Parent directory of the new project.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Skip all prompts, taking defaults for anything not given.
    #[arg(short = 'y', long = "yes", help = "Accept defaults without prompting")]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Do not contact the registry; every version becomes `latest`.
    #[arg(long = "offline", help = "Skip registry lookups")]
    pub offline: bool,

    /// Override the npm registry URL.
    #[arg(long = "registry", value_name = "URL", help = "npm registry URL")]
    pub registry: Option<String>,

    /// What to do when the project directory already exists.
    #[arg(
        long = "on-existing",
        value_name = "POLICY",
        value_enum,
        help = "Existing directory policy"
    )]
    pub on_existing: Option<OnExisting>,
}

impl NewArgs {
    pub fn cors(&self) -> Option<bool> {
        tri_state(self.cors, self.no_cors)
    }

    pub fn env_file(&self) -> Option<bool> {
        tri_state(self.env, self.no_env)
    }

    pub fn gitignore(&self) -> Option<bool> {
        tri_state(self.gitignore, self.no_gitignore)
    }

    pub fn docker(&self) -> Option<bool> {
        tri_state(self.docker, self.no_docker)
    }
}

/// `--x` / `--no-x` pair: `None` when neither was given.
fn tri_state(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `expresso init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `.expresso.toml` in the current directory instead.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `expresso completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `expresso config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.port`.
        key: String,
    },
    /// Set a configuration key in the config file.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all effective configuration values.
    #[command(visible_alias = "show")]
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Source language of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    #[value(name = "js", alias = "javascript")]
    JavaScript,
    #[value(name = "ts", alias = "typescript")]
    TypeScript,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JavaScript => write!(f, "javascript"),
            Self::TypeScript => write!(f, "typescript"),
        }
    }
}

/// Request handling style of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ApiStyle {
    Rest,
    #[value(name = "graphql", alias = "gql")]
    GraphQl,
}

impl std::fmt::Display for ApiStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rest => write!(f, "rest"),
            Self::GraphQl => write!(f, "graphql"),
        }
    }
}

/// Policy for an already existing project directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnExisting {
    /// Stop with an error.
    Fail,
    /// Leave it untouched and report success.
    Skip,
}

// ── tests ─────────────────────────────────────────────────────────────────────
