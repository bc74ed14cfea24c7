use std::fmt;

use crate::domain::{
    error::DomainError,
    value_objects::{ApiStyle, Language},
};

/// Project name offered when the user has no preference.
pub const DEFAULT_APP_NAME: &str = "server";

/// Port the generated server listens on when none is chosen.
pub const DEFAULT_PORT: u16 = 3000;

/// The user's answers, fully populated.
///
/// Immutable once built. Construct through [`ProjectConfiguration::builder`],
/// which trims the name and rejects an empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfiguration {
    app_name: String,
    language: Language,
    port: u16,
    use_cors: bool,
    use_env_file: bool,
    use_ignore_file: bool,
    use_container: bool,
    api_style: ApiStyle,
}

impl ProjectConfiguration {
    pub fn builder(app_name: impl Into<String>) -> ProjectConfigurationBuilder {
        ProjectConfigurationBuilder::new(app_name)
    }

    /// Name as typed by the user (trimmed). Used for the root directory.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Name written into `package.json`: lowercase, whitespace runs as `-`.
    pub fn manifest_name(&self) -> String {
        self.app_name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn use_cors(&self) -> bool {
        self.use_cors
    }

    pub fn use_env_file(&self) -> bool {
        self.use_env_file
    }

    pub fn use_ignore_file(&self) -> bool {
        self.use_ignore_file
    }

    pub fn use_container(&self) -> bool {
        self.use_container
    }

    pub fn api_style(&self) -> ApiStyle {
        self.api_style
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.app_name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "app_name" });
        }
        if self.port == 0 {
            return Err(DomainError::InvalidConfiguration(
                "port must be between 1 and 65535".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ProjectConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}, port {})",
            self.app_name, self.language, self.api_style, self.port
        )
    }
}

/// Builder for [`ProjectConfiguration`].
///
/// Unset options take the same defaults the interactive prompts offer.
#[derive(Debug, Clone)]
pub struct ProjectConfigurationBuilder {
    app_name: String,
    language: Language,
    port: u16,
    use_cors: bool,
    use_env_file: bool,
    use_ignore_file: bool,
    use_container: bool,
    api_style: ApiStyle,
}

impl ProjectConfigurationBuilder {
    fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            language: Language::default(),
            port: DEFAULT_PORT,
            use_cors: true,
            use_env_file: true,
            use_ignore_file: true,
            use_container: false,
            api_style: ApiStyle::default(),
        }
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn cors(mut self, enabled: bool) -> Self {
        self.use_cors = enabled;
        self
    }

    pub fn env_file(mut self, enabled: bool) -> Self {
        self.use_env_file = enabled;
        self
    }

    pub fn ignore_file(mut self, enabled: bool) -> Self {
        self.use_ignore_file = enabled;
        self
    }

    pub fn container(mut self, enabled: bool) -> Self {
        self.use_container = enabled;
        self
    }

    pub fn api_style(mut self, style: ApiStyle) -> Self {
        self.api_style = style;
        self
    }

    pub fn build(self) -> Result<ProjectConfiguration, DomainError> {
        let config = ProjectConfiguration {
            app_name: self.app_name.trim().to_string(),
            language: self.language,
            port: self.port,
            use_cors: self.use_cors,
            use_env_file: self.use_env_file,
            use_ignore_file: self.use_ignore_file,
            use_container: self.use_container,
            api_style: self.api_style,
        };
        config.validate()?;
        Ok(config)
    }
}
