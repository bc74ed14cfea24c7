//! Scaffolding onto a real directory.

use std::path::Path;

use expresso_adapters::{LocalFilesystem, StaticVersions};
use expresso_core::{
    application::{ApplicationError, ScaffoldService},
    domain::{Language, ProjectConfiguration},
    error::{ExpressoError, ExpressoResult},
    prelude::{Filesystem, Reporter},
};

struct Silent;

impl Reporter for Silent {
    fn root_exists(&self, _root: &Path) -> ExpressoResult<()> {
        Ok(())
    }

    fn created(&self, _project_name: &str) -> ExpressoResult<()> {
        Ok(())
    }

    fn next_steps(&self, _project_name: &str) -> ExpressoResult<()> {
        Ok(())
    }
}

fn service() -> ScaffoldService {
    ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(StaticVersions::offline()),
        Box::new(Silent),
    )
}

#[test]
fn writes_typescript_project_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProjectConfiguration::builder("My Server")
        .language(Language::TypeScript)
        .container(true)
        .build()
        .unwrap();

    let report = service().scaffold(&config, dir.path()).unwrap();
    let root = dir.path().join("My Server");
    assert_eq!(report.root, root);

    for file in [
        "package.json",
        "src/index.ts",
        ".env",
        "tsconfig.json",
        ".gitignore",
        "Dockerfile",
        ".dockerignore",
    ] {
        assert!(root.join(file).is_file(), "missing {file}");
    }
    assert!(root.join("src/controllers").is_dir());

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(root.join("package.json")).unwrap()).unwrap();
    assert_eq!(manifest["name"], "my-server");
    assert_eq!(manifest["dependencies"]["express"], "latest");
    assert_eq!(manifest["type"], "module");
}

#[test]
fn existing_directory_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("server");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("keep.txt"), "mine").unwrap();

    let config = ProjectConfiguration::builder("server").build().unwrap();
    let err = service().scaffold(&config, dir.path()).unwrap_err();

    assert!(matches!(
        err,
        ExpressoError::Application(ApplicationError::ProjectExists { .. })
    ));
    let entries: Vec<_> = std::fs::read_dir(&root).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(std::fs::read_to_string(root.join("keep.txt")).unwrap(), "mine");
}

#[test]
fn local_exists_tracks_disk() {
    let dir = tempfile::tempdir().unwrap();
    let fs = LocalFilesystem::new();
    let nested = dir.path().join("a/b");

    assert!(!fs.exists(&nested));
    fs.create_dir_all(&nested).unwrap();
    assert!(fs.exists(&nested));
}
