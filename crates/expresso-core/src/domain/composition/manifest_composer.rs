//! `package.json` composition.

use tracing::debug;

use crate::domain::{
    capabilities::{self, api_style_def},
    composition::ResolveVersion,
    entities::{
        configuration::ProjectConfiguration,
        manifest::{DependencySet, Manifest, Scripts},
        project_structure::FileArtifact,
    },
    error::DomainError,
};

pub const MANIFEST_PATH: &str = "package.json";

/// Derives the project manifest from a configuration.
pub struct ManifestComposer;

impl ManifestComposer {
    /// Runtime packages implied by the configuration, in manifest order.
    pub fn runtime_packages(config: &ProjectConfiguration) -> Vec<&'static str> {
        let mut packages = vec![capabilities::EXPRESS];
        if config.use_env_file() {
            packages.push(capabilities::DOTENV);
        }
        if config.use_cors() {
            packages.push(capabilities::CORS);
        }
        packages.extend_from_slice(api_style_def(config.api_style()).runtime_packages);
        packages
    }

    /// Development packages implied by the configuration, in manifest order.
    pub fn dev_packages(config: &ProjectConfiguration) -> Vec<&'static str> {
        let mut packages = vec![capabilities::NODEMON];
        if config.language().is_typed() {
            packages.extend_from_slice(&[
                capabilities::TYPESCRIPT,
                capabilities::TYPES_NODE,
                capabilities::TYPES_EXPRESS,
            ]);
            if config.use_cors() {
                packages.push(capabilities::TYPES_CORS);
            }
            packages.extend_from_slice(api_style_def(config.api_style()).typed_packages);
        }
        packages
    }

    /// Every package the manifest will ask the resolver about.
    pub fn all_packages(config: &ProjectConfiguration) -> Vec<&'static str> {
        let mut packages = Self::runtime_packages(config);
        packages.extend(Self::dev_packages(config));
        packages
    }

    pub fn compose(config: &ProjectConfiguration, resolver: &dyn ResolveVersion) -> Manifest {
        let typed = config.language().is_typed();
        let main = if typed { "dist/index.js" } else { "src/index.js" };

        let scripts = Scripts {
            start: format!("node {main}"),
            dev: if typed {
                "tsc --watch".into()
            } else {
                "nodemon src/index.js".into()
            },
            build: typed.then(|| "tsc".to_string()),
        };

        let manifest = Manifest {
            name: config.manifest_name(),
            version: Manifest::VERSION,
            description: Manifest::DESCRIPTION,
            main: main.into(),
            module_type: Manifest::MODULE_TYPE,
            scripts,
            license: Manifest::LICENSE,
            dependencies: resolve_all(&Self::runtime_packages(config), resolver),
            dev_dependencies: resolve_all(&Self::dev_packages(config), resolver),
        };

        debug!(
            name = %manifest.name,
            dependencies = manifest.dependencies.len(),
            dev_dependencies = manifest.dev_dependencies.len(),
            "Manifest composed"
        );
        manifest
    }

    /// Serialize a manifest into its file artifact.
    pub fn artifact(manifest: &Manifest) -> Result<FileArtifact, DomainError> {
        let json = manifest
            .to_json()
            .map_err(|e| DomainError::SerializationFailed {
                file: MANIFEST_PATH,
                reason: e.to_string(),
            })?;
        Ok(FileArtifact::new(MANIFEST_PATH, json))
    }
}

fn resolve_all(packages: &[&str], resolver: &dyn ResolveVersion) -> DependencySet {
    let mut set = DependencySet::new();
    for package in packages {
        set.insert(*package, resolver.resolve(package));
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiStyle, Language};

    fn fixed(_: &str) -> Option<String> {
        Some("1.2.3".into())
    }

    fn names(set: &DependencySet) -> Vec<&str> {
        set.names().collect()
    }

    #[test]
    fn minimal_javascript_manifest() {
        let cfg = ProjectConfiguration::builder("demo")
            .cors(false)
            .env_file(false)
            .build()
            .unwrap();
        let m = ManifestComposer::compose(&cfg, &fixed);

        assert_eq!(names(&m.dependencies), vec!["express"]);
        assert_eq!(names(&m.dev_dependencies), vec!["nodemon"]);
        assert_eq!(m.scripts.start, "node src/index.js");
        assert_eq!(m.scripts.dev, "nodemon src/index.js");
        assert!(m.scripts.build.is_none());
        assert_eq!(m.main, "src/index.js");
    }

    #[test]
    fn no_cors_means_no_cors_anywhere() {
        let cfg = ProjectConfiguration::builder("demo")
            .language(Language::TypeScript)
            .cors(false)
            .build()
            .unwrap();
        let m = ManifestComposer::compose(&cfg, &fixed);

        assert!(!m.dependencies.contains("cors"));
        assert!(!m.dev_dependencies.contains("@types/cors"));
    }

    #[test]
    fn typescript_adds_compiler_and_type_declarations() {
        let cfg = ProjectConfiguration::builder("demo")
            .language(Language::TypeScript)
            .api_style(ApiStyle::GraphQl)
            .build()
            .unwrap();
        let m = ManifestComposer::compose(&cfg, &fixed);

        assert_eq!(
            names(&m.dev_dependencies),
            vec![
                "nodemon",
                "typescript",
                "@types/node",
                "@types/express",
                "@types/cors",
                "@types/graphql",
            ]
        );
        assert_eq!(m.scripts.start, "node dist/index.js");
        assert_eq!(m.scripts.dev, "tsc --watch");
        assert_eq!(m.scripts.build.as_deref(), Some("tsc"));
    }

    #[test]
    fn graphql_runtime_packages_follow_middleware() {
        let cfg = ProjectConfiguration::builder("demo")
            .api_style(ApiStyle::GraphQl)
            .build()
            .unwrap();
        assert_eq!(
            ManifestComposer::runtime_packages(&cfg),
            vec!["express", "dotenv", "cors", "graphql", "apollo-server-express"]
        );
    }

    #[test]
    fn failed_lookup_is_written_as_null() {
        let cfg = ProjectConfiguration::builder("demo").build().unwrap();
        let resolver = |name: &str| (name != "cors").then(|| "4.0.0".to_string());
        let m = ManifestComposer::compose(&cfg, &resolver);

        assert_eq!(m.dependencies.get("cors"), Some(None));
        let json: serde_json::Value =
            serde_json::from_str(&m.to_json().unwrap()).unwrap();
        assert!(json["dependencies"]["cors"].is_null());
        assert_eq!(json["dependencies"]["express"], "4.0.0");
    }

    #[test]
    fn manifest_name_is_normalized() {
        let cfg = ProjectConfiguration::builder("  My Cool  API ").build().unwrap();
        let m = ManifestComposer::compose(&cfg, &fixed);
        assert_eq!(m.name, "my-cool-api");
    }

    #[test]
    fn json_keys_follow_package_json_order() {
        let cfg = ProjectConfiguration::builder("demo").build().unwrap();
        let json = ManifestComposer::compose(&cfg, &fixed).to_json().unwrap();

        let order = [
            "\"name\"",
            "\"version\"",
            "\"description\"",
            "\"main\"",
            "\"type\"",
            "\"scripts\"",
            "\"license\"",
            "\"dependencies\"",
            "\"devDependencies\"",
        ];
        let positions: Vec<usize> = order.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
        assert!(json.contains("\"type\": \"module\""));
        assert!(json.contains("\"license\": \"ISC\""));
    }

    #[test]
    fn start_script_runs_main() {
        for language in [Language::JavaScript, Language::TypeScript] {
            let cfg = ProjectConfiguration::builder("demo")
                .language(language)
                .build()
                .unwrap();
            let m = ManifestComposer::compose(&cfg, &fixed);
            assert_eq!(m.scripts.start, format!("node {}", m.main));
        }
    }
}
