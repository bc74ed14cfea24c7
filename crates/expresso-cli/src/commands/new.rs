//! Implementation of the `expresso new` command.
//!
//! Responsibility: turn flags, config defaults and prompt answers into a
//! `ProjectConfiguration`, wire the adapters, call the core scaffold
//! service, and display results. No scaffolding logic lives here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::json;
use tracing::{debug, info, instrument};

use expresso_adapters::{LocalFilesystem, NpmRegistry, StaticVersions};
use expresso_core::{
    application::{
        ExistingRootPolicy, ScaffoldOutcome, ScaffoldReport, ScaffoldService, VersionSource,
    },
    domain::{
        ApiStyle as CoreApiStyle, FsEntry, Language as CoreLanguage, ProjectConfiguration,
        ProjectStructure,
    },
};

use crate::{
    cli::{ApiStyle, Language, NewArgs, OnExisting, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::{self, Prompter},
    reporter::ConsoleReporter,
};

const LANGUAGE_CHOICES: [&str; 2] = ["Javascript", "Typescript"];
const API_CHOICES: [&str; 2] = ["REST", "GraphQL"];

/// Execute the `expresso new` command.
///
/// Dispatch sequence:
/// 1. Gather answers (flags, then prompts or config defaults)
/// 2. Build and validate the `ProjectConfiguration`
/// 3. Wire adapters: local filesystem, registry, console reporter
/// 4. Early-exit with a preview on `--dry-run`
/// 5. Execute scaffolding via `ScaffoldService`
#[instrument(skip_all, fields(project = args.name.as_deref().unwrap_or("<prompt>")))]
pub fn execute(
    args: NewArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let reporter = ConsoleReporter::new(&output);
    reporter.welcome()?;

    // 1-2. Answers and configuration
    let project = if prompt::can_prompt(args.yes) {
        gather(&args, &config, &interactive_prompter())?
    } else {
        gather(&args, &config, &prompt::Defaults)?
    };
    debug!(config = %project, "Configuration resolved");

    let output_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let policy = resolve_policy(&args, &config)?;

    // 3. Adapters
    let versions = version_source(&args, &config);
    let spinner = output.spinner("Resolving package versions...");
    let service = ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        versions,
        Box::new(reporter.with_spinner(spinner.clone())),
    )
    .with_policy(policy)
    .with_parallel_lookups(config.registry.parallel);

    // 4. Dry run: compose but do not write.
    if args.dry_run {
        let preview = service.preview(&project, &output_dir);
        if let Some(bar) = &spinner {
            bar.finish_and_clear();
        }
        return show_preview(&preview?, &output);
    }

    // 5. Scaffold
    info!(
        project = %project.app_name(),
        path = %output_dir.display(),
        %policy,
        "Scaffold started"
    );
    let result = service.scaffold(&project, &output_dir);
    if let Some(bar) = &spinner {
        bar.finish_and_clear();
    }
    let report = result?;

    if output.format().is_machine_readable() {
        output.json(&report_json(&report))?;
    }

    Ok(())
}

#[cfg(feature = "interactive")]
fn interactive_prompter() -> prompt::Terminal {
    prompt::Terminal::new()
}

#[cfg(not(feature = "interactive"))]
fn interactive_prompter() -> prompt::Defaults {
    prompt::Defaults
}

// ── Answer gathering ──────────────────────────────────────────────────────────

/// Fill every field from flags first, then the prompter.
fn gather(
    args: &NewArgs,
    config: &AppConfig,
    prompter: &dyn Prompter,
) -> CliResult<ProjectConfiguration> {
    let defaults = &config.defaults;

    let name = match &args.name {
        Some(name) => name.clone(),
        None => prompter.input("Enter your express project name:", &defaults.name)?,
    };
    let name = name.trim().to_string();
    validate_project_name(&name)?;

    let language = match args.language {
        Some(lang) => convert_language(lang),
        None => {
            let default = parse_default::<CoreLanguage>("defaults.language", &defaults.language)?;
            let index = prompter.select(
                "Which language you want to use?",
                &LANGUAGE_CHOICES,
                usize::from(default.is_typed()),
            )?;
            if index == 1 {
                CoreLanguage::TypeScript
            } else {
                CoreLanguage::JavaScript
            }
        }
    };

    let port = match args.port {
        Some(port) => port,
        None => prompter.port("Which port should the server listen on?", defaults.port)?,
    };

    let cors = ask(args.cors(), prompter, "Do you want to enable CORS?", defaults.cors)?;
    let env_file = ask(
        args.env_file(),
        prompter,
        "Do you want to use an .env file?",
        defaults.env_file,
    )?;
    let gitignore = ask(
        args.gitignore(),
        prompter,
        "Do you want to use a .gitignore file?",
        defaults.gitignore,
    )?;
    let docker = ask(
        args.docker(),
        prompter,
        "Do you want to use Docker for deployment?",
        defaults.docker,
    )?;

    let api_style = match args.api {
        Some(api) => convert_api_style(api),
        None => {
            let default = parse_default::<CoreApiStyle>("defaults.api_style", &defaults.api_style)?;
            let index = prompter.select(
                "Which API style do you want?",
                &API_CHOICES,
                usize::from(default == CoreApiStyle::GraphQl),
            )?;
            if index == 1 {
                CoreApiStyle::GraphQl
            } else {
                CoreApiStyle::Rest
            }
        }
    };

    ProjectConfiguration::builder(name)
        .language(language)
        .port(port)
        .cors(cors)
        .env_file(env_file)
        .ignore_file(gitignore)
        .container(docker)
        .api_style(api_style)
        .build()
        .map_err(|e| CliError::Core(e.into()))
}

fn ask(flag: Option<bool>, prompter: &dyn Prompter, question: &str, default: bool) -> CliResult<bool> {
    match flag {
        Some(value) => Ok(value),
        None => prompter.confirm(question, default),
    }
}

fn parse_default<T>(key: &str, value: &str) -> CliResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| CliError::ConfigError {
        message: format!("invalid '{key}' = '{value}': {e}"),
        source: None,
    })
}

fn validate_project_name(name: &str) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if name.starts_with('.') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot start with '.'".into(),
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot contain path separators".into(),
        });
    }
    Ok(())
}

// ── Adapter wiring ────────────────────────────────────────────────────────────

fn version_source(args: &NewArgs, config: &AppConfig) -> Box<dyn VersionSource> {
    if args.offline || config.registry.offline {
        debug!("Offline mode, every version is 'latest'");
        return Box::new(StaticVersions::offline());
    }
    let url = args
        .registry
        .clone()
        .unwrap_or_else(|| config.registry.url.clone());
    Box::new(NpmRegistry::new(
        url,
        Duration::from_secs(config.registry.timeout_secs),
    ))
}

fn resolve_policy(args: &NewArgs, config: &AppConfig) -> CliResult<ExistingRootPolicy> {
    match args.on_existing {
        Some(OnExisting::Fail) => Ok(ExistingRootPolicy::Fail),
        Some(OnExisting::Skip) => Ok(ExistingRootPolicy::Skip),
        None => parse_default("scaffold.on_existing", &config.scaffold.on_existing),
    }
}

// ── Type conversions CLI → core ───────────────────────────────────────────────

fn convert_language(lang: Language) -> CoreLanguage {
    match lang {
        Language::JavaScript => CoreLanguage::JavaScript,
        Language::TypeScript => CoreLanguage::TypeScript,
    }
}

fn convert_api_style(api: ApiStyle) -> CoreApiStyle {
    match api {
        ApiStyle::Rest => CoreApiStyle::Rest,
        ApiStyle::GraphQl => CoreApiStyle::GraphQl,
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_preview(structure: &ProjectStructure, out: &OutputManager) -> CliResult<()> {
    if out.format().is_machine_readable() {
        out.json(&preview_json(structure))?;
        return Ok(());
    }

    out.header(&format!(
        "Dry run: would create {}",
        structure.root().display()
    ))?;
    for line in preview_lines(structure) {
        out.print(&line)?;
    }
    out.info("No files were written.")?;
    Ok(())
}

fn preview_lines(structure: &ProjectStructure) -> Vec<String> {
    structure
        .entries()
        .iter()
        .map(|entry| match entry {
            FsEntry::Directory(dir) => format!("  {dir}/"),
            FsEntry::File(file) => format!("  {}  ({} bytes)", file.path, file.size()),
        })
        .collect()
}

fn preview_json(structure: &ProjectStructure) -> serde_json::Value {
    json!({
        "root": structure.root().display().to_string(),
        "dry_run": true,
        "directories": structure
            .directories()
            .map(|d| d.to_string())
            .collect::<Vec<_>>(),
        "files": structure
            .files()
            .map(|f| f.path.to_string())
            .collect::<Vec<_>>(),
    })
}

fn report_json(report: &ScaffoldReport) -> serde_json::Value {
    json!({
        "root": report.root.display().to_string(),
        "outcome": match report.outcome {
            ScaffoldOutcome::Populated => "created",
            ScaffoldOutcome::Aborted => "skipped",
        },
        "directories_created": report.directories_created,
        "files": report
            .files_written
            .iter()
            .map(|p| display_relative(&report.root, p))
            .collect::<Vec<_>>(),
    })
}

fn display_relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
