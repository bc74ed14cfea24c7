use serde::{Serialize, Serializer, ser::SerializeMap};

/// `package.json` as the scaffold writes it.
///
/// Field order is the key order in the emitted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: String,
    pub version: &'static str,
    pub description: &'static str,
    pub main: String,
    #[serde(rename = "type")]
    pub module_type: &'static str,
    pub scripts: Scripts,
    pub license: &'static str,
    pub dependencies: DependencySet,
    pub dev_dependencies: DependencySet,
}

impl Manifest {
    pub const VERSION: &'static str = "1.0.0";
    pub const DESCRIPTION: &'static str = "A simple Express.js application generated by the CLI.";
    pub const LICENSE: &'static str = "ISC";
    pub const MODULE_TYPE: &'static str = "module";

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scripts {
    pub start: String,
    pub dev: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}

/// Package name to resolved version, in insertion order.
///
/// A `None` version is a failed registry lookup and serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    entries: Vec<(String, Option<String>)>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package; a name that is already present keeps its first slot.
    pub fn insert(&mut self, name: impl Into<String>, version: Option<String>) {
        let name = name.into();
        if !self.contains(&name) {
            self.entries.push((name, version));
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Resolved version for `name`; `Some(None)` when the lookup failed.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for DependencySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, version) in &self.entries {
            map.serialize_entry(name, version)?;
        }
        map.end()
    }
}
