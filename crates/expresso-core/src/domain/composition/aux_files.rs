//! Secondary project files: `.env`, `tsconfig.json`, `.gitignore`,
//! `Dockerfile`, `.dockerignore`.

use crate::domain::entities::{
    configuration::ProjectConfiguration, project_structure::FileArtifact,
};

pub const ENV_FILE: &str = ".env";
pub const TSCONFIG_FILE: &str = "tsconfig.json";
pub const GITIGNORE_FILE: &str = ".gitignore";
pub const DOCKERFILE: &str = "Dockerfile";
pub const DOCKERIGNORE_FILE: &str = ".dockerignore";

const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2020",
    "module": "ESNext",
    "moduleResolution": "node",
    "esModuleInterop": true,
    "rootDir": "src",
    "outDir": "dist",
    "strict": true,
    "forceConsistentCasingInFileNames": true
  },
  "include": ["src/**/*.ts"],
  "exclude": ["node_modules"]
}
"#;

/// Derives the conditional secondary files.
pub struct AuxFileComposer;

impl AuxFileComposer {
    /// All auxiliary artifacts the configuration asks for, in write order.
    pub fn compose(config: &ProjectConfiguration) -> Vec<FileArtifact> {
        [
            Self::env_file(config),
            Self::tsconfig(config),
            Self::gitignore(config),
            Self::dockerfile(config),
            Self::dockerignore(config),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn env_file(config: &ProjectConfiguration) -> Option<FileArtifact> {
        config
            .use_env_file()
            .then(|| FileArtifact::new(ENV_FILE, format!("PORT={}", config.port())))
    }

    pub fn tsconfig(config: &ProjectConfiguration) -> Option<FileArtifact> {
        config
            .language()
            .is_typed()
            .then(|| FileArtifact::new(TSCONFIG_FILE, TSCONFIG))
    }

    pub fn gitignore(config: &ProjectConfiguration) -> Option<FileArtifact> {
        if !config.use_ignore_file() {
            return None;
        }
        let mut lines = vec!["node_modules"];
        if config.use_env_file() {
            lines.push(ENV_FILE);
        }
        lines.push("dist");
        Some(FileArtifact::new(GITIGNORE_FILE, to_lines(&lines)))
    }

    pub fn dockerfile(config: &ProjectConfiguration) -> Option<FileArtifact> {
        if !config.use_container() {
            return None;
        }
        let content = format!(
            "# Use the official Node.js image.
FROM node:18

# Set the working directory.
WORKDIR /usr/src/app

# Copy package.json and package-lock.json.
COPY package*.json ./

# Install dependencies.
RUN npm install

# Copy the rest of the application code.
COPY . .

# Expose the application port.
EXPOSE {port}

# Start the application.
CMD [ \"npm\", \"run\", \"dev\" ]
",
            port = config.port()
        );
        Some(FileArtifact::new(DOCKERFILE, content))
    }

    pub fn dockerignore(config: &ProjectConfiguration) -> Option<FileArtifact> {
        if !config.use_container() {
            return None;
        }
        let mut lines = vec!["node_modules", "npm-debug.log", DOCKERFILE, DOCKERIGNORE_FILE];
        if config.use_env_file() {
            lines.push(ENV_FILE);
        }
        lines.push("dist");
        Some(FileArtifact::new(DOCKERIGNORE_FILE, to_lines(&lines)))
    }
}

fn to_lines(lines: &[&str]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Language;

    fn paths(files: &[FileArtifact]) -> Vec<&str> {
        files.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn nothing_requested_means_nothing_emitted() {
        let cfg = ProjectConfiguration::builder("demo")
            .env_file(false)
            .ignore_file(false)
            .container(false)
            .build()
            .unwrap();
        assert!(AuxFileComposer::compose(&cfg).is_empty());
    }

    #[test]
    fn everything_requested_in_write_order() {
        let cfg = ProjectConfiguration::builder("demo")
            .language(Language::TypeScript)
            .container(true)
            .build()
            .unwrap();
        assert_eq!(
            paths(&AuxFileComposer::compose(&cfg)),
            vec![".env", "tsconfig.json", ".gitignore", "Dockerfile", ".dockerignore"]
        );
    }

    #[test]
    fn env_file_holds_only_the_port() {
        let cfg = ProjectConfiguration::builder("demo").port(8080).build().unwrap();
        let env = AuxFileComposer::env_file(&cfg).unwrap();
        assert_eq!(env.content, "PORT=8080");
    }

    #[test]
    fn gitignore_lists_env_only_when_used() {
        let with_env = ProjectConfiguration::builder("demo").build().unwrap();
        let without_env = ProjectConfiguration::builder("demo")
            .env_file(false)
            .build()
            .unwrap();

        let lines: Vec<String> = AuxFileComposer::gitignore(&with_env)
            .unwrap()
            .content
            .lines()
            .map(String::from)
            .collect();
        assert_eq!(lines, vec!["node_modules", ".env", "dist"]);

        let content = AuxFileComposer::gitignore(&without_env).unwrap().content;
        assert!(!content.contains(".env"));
        assert!(content.contains("node_modules"));
    }

    #[test]
    fn tsconfig_is_valid_json_with_strict_mode() {
        let cfg = ProjectConfiguration::builder("demo")
            .language(Language::TypeScript)
            .build()
            .unwrap();
        let file = AuxFileComposer::tsconfig(&cfg).unwrap();
        let json: serde_json::Value = serde_json::from_str(&file.content).unwrap();

        let opts = &json["compilerOptions"];
        assert_eq!(opts["target"], "ES2020");
        assert_eq!(opts["moduleResolution"], "node");
        assert_eq!(opts["strict"], true);
        assert_eq!(opts["rootDir"], "src");
        assert_eq!(opts["outDir"], "dist");
    }

    #[test]
    fn javascript_has_no_tsconfig() {
        let cfg = ProjectConfiguration::builder("demo").build().unwrap();
        assert!(AuxFileComposer::tsconfig(&cfg).is_none());
    }

    #[test]
    fn dockerfile_exposes_configured_port_and_runs_dev() {
        let cfg = ProjectConfiguration::builder("demo")
            .port(4000)
            .container(true)
            .build()
            .unwrap();
        let content = AuxFileComposer::dockerfile(&cfg).unwrap().content;

        assert!(content.contains("FROM node:18"));
        assert!(content.contains("WORKDIR /usr/src/app"));
        assert!(content.contains("RUN npm install"));
        assert!(content.contains("COPY . ."));
        assert!(content.lines().any(|l| l == "EXPOSE 4000"));
        assert!(content.contains(r#"CMD [ "npm", "run", "dev" ]"#));
    }

    #[test]
    fn dockerignore_follows_env_choice() {
        let cfg = ProjectConfiguration::builder("demo")
            .container(true)
            .env_file(false)
            .build()
            .unwrap();
        let content = AuxFileComposer::dockerignore(&cfg).unwrap().content;
        assert!(content.lines().any(|l| l == "node_modules"));
        assert!(content.lines().any(|l| l == "Dockerfile"));
        assert!(!content.lines().any(|l| l == ".env"));
    }
}
