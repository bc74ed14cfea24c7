//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Check whether the project root already exists
//! 2. Compose the project structure (resolving package versions)
//! 3. Write root, directories, manifest, entry point, auxiliary files
//! 4. Report the result
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, Reporter, VersionSource},
        services::VersionResolver,
    },
    domain::{
        DomainError, FsEntry, ManifestComposer, ProjectConfiguration, ProjectStructure,
        compose_structure,
    },
    error::{ExpressoError, ExpressoResult},
};

/// What to do when the project root is already on disk.
///
/// Either way, nothing under the existing root is touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistingRootPolicy {
    /// Report the conflict and return `ProjectExists`.
    #[default]
    Fail,
    /// Write nothing but still report success.
    Skip,
}

impl ExistingRootPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for ExistingRootPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExistingRootPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "skip" => Ok(Self::Skip),
            other => Err(DomainError::InvalidConfiguration(format!(
                "unknown existing-root policy: {other}"
            ))),
        }
    }
}

/// Lifecycle of one scaffold run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldState {
    NotStarted,
    RootChecked,
    Aborted,
    Populated,
    Reported,
}

impl ScaffoldState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: ScaffoldState) -> bool {
        matches!(
            (self, next),
            (Self::NotStarted, Self::RootChecked)
                | (Self::RootChecked, Self::Aborted)
                | (Self::RootChecked, Self::Populated)
                | (Self::Aborted, Self::Reported)
                | (Self::Populated, Self::Reported)
        )
    }

    fn advance(&mut self, next: ScaffoldState) {
        debug_assert!(
            self.can_transition_to(next),
            "illegal scaffold transition {self:?} -> {next:?}"
        );
        debug!(from = ?*self, to = ?next, "Scaffold state");
        *self = next;
    }
}

/// Whether the run wrote the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    /// Root and everything under it were created.
    Populated,
    /// The root already existed; nothing was written.
    Aborted,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub outcome: ScaffoldOutcome,
    pub directories_created: usize,
    pub files_written: Vec<PathBuf>,
}

/// Main scaffolding service.
///
/// Owns the adapters for one or more runs. The version cache is created
/// per run, so two scaffolds never share resolved versions.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    versions: Box<dyn VersionSource>,
    reporter: Box<dyn Reporter>,
    policy: ExistingRootPolicy,
    parallel_lookups: bool,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use expresso_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     filesystem, // impl Filesystem
    ///     versions,   // impl VersionSource
    ///     reporter,   // impl Reporter
    /// );
    /// ```
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        versions: Box<dyn VersionSource>,
        reporter: Box<dyn Reporter>,
    ) -> Self {
        Self {
            filesystem,
            versions,
            reporter,
            policy: ExistingRootPolicy::default(),
            parallel_lookups: false,
        }
    }

    pub fn with_policy(mut self, policy: ExistingRootPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve all package versions concurrently before composing.
    pub fn with_parallel_lookups(mut self, enabled: bool) -> Self {
        self.parallel_lookups = enabled;
        self
    }

    /// Compose the project without touching the filesystem.
    #[instrument(skip_all, fields(project = %config.app_name()))]
    pub fn preview(
        &self,
        config: &ProjectConfiguration,
        output_path: impl AsRef<Path>,
    ) -> ExpressoResult<ProjectStructure> {
        config.validate()?;
        let root = output_path.as_ref().join(config.app_name());
        self.compose(config, &root)
    }

    /// Scaffold a new project under `output_path/<app name>`.
    ///
    /// Filesystem failures abort the run as-is: there is no rollback, so a
    /// failed run may leave a partial tree behind.
    #[instrument(
        skip_all,
        fields(
            project = %config.app_name(),
            output_path = %output_path.as_ref().display()
        )
    )]
    pub fn scaffold(
        &self,
        config: &ProjectConfiguration,
        output_path: impl AsRef<Path>,
    ) -> ExpressoResult<ScaffoldReport> {
        let mut state = ScaffoldState::NotStarted;
        info!(
            "Scaffolding {} {} project",
            config.language(),
            config.api_style()
        );

        // 1. Validate configuration
        config.validate()?;

        // 2. Check root
        let root = output_path.as_ref().join(config.app_name());
        let root_exists = self.filesystem.exists(&root);
        state.advance(ScaffoldState::RootChecked);

        if root_exists {
            state.advance(ScaffoldState::Aborted);
            return self.report_existing(&mut state, config, root);
        }

        // 3. Compose (all registry lookups happen here, before any write)
        let structure = self.compose(config, &root)?;
        info!(
            files = structure.files().count(),
            directories = structure.directories().count(),
            "Project composed"
        );

        // 4. Write
        let report = self.write_structure(&structure).inspect_err(|e| {
            error!(
                error = %e,
                root = %root.display(),
                "Write failed, partial project left on disk"
            );
        })?;
        state.advance(ScaffoldState::Populated);

        // 5. Report
        self.reporter.created(config.app_name())?;
        self.reporter.next_steps(config.app_name())?;
        state.advance(ScaffoldState::Reported);

        info!("Scaffold completed successfully");
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn compose(&self, config: &ProjectConfiguration, root: &Path) -> ExpressoResult<ProjectStructure> {
        let resolver = VersionResolver::new(self.versions.as_ref());
        if self.parallel_lookups {
            resolver.prefetch(&ManifestComposer::all_packages(config));
        }
        compose_structure(config, &resolver, root).map_err(ExpressoError::Domain)
    }

    fn report_existing(
        &self,
        state: &mut ScaffoldState,
        config: &ProjectConfiguration,
        root: PathBuf,
    ) -> ExpressoResult<ScaffoldReport> {
        match self.policy {
            ExistingRootPolicy::Fail => {
                self.reporter.root_exists(&root)?;
                state.advance(ScaffoldState::Reported);
                Err(ApplicationError::ProjectExists { path: root }.into())
            }
            ExistingRootPolicy::Skip => {
                warn!(
                    root = %root.display(),
                    "Project root already exists, nothing was written"
                );
                self.reporter.created(config.app_name())?;
                self.reporter.next_steps(config.app_name())?;
                state.advance(ScaffoldState::Reported);
                Ok(ScaffoldReport {
                    root,
                    outcome: ScaffoldOutcome::Aborted,
                    directories_created: 0,
                    files_written: Vec::new(),
                })
            }
        }
    }

    /// Write all entries in order: root first, then the structure as composed.
    fn write_structure(&self, structure: &ProjectStructure) -> ExpressoResult<ScaffoldReport> {
        structure.validate()?;

        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        let mut directories_created = 0;
        let mut files_written = Vec::new();

        for entry in structure.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    self.filesystem.create_dir_all(&root.join(dir))?;
                    directories_created += 1;
                }
                FsEntry::File(file) => {
                    let path = root.join(&file.path);
                    self.filesystem.write_file(&path, &file.content)?;
                    files_written.push(path);
                }
            }
        }

        Ok(ScaffoldReport {
            root: root.to_path_buf(),
            outcome: ScaffoldOutcome::Populated,
            directories_created,
            files_written,
        })
    }
}
