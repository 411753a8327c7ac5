//! Recovered project model
//!
//! Types produced by the recovery parser. A `ProjectDescriptor` is built once
//! during recovery and never mutated afterwards; downstream components borrow
//! file contents read-only and produce independent values.

use serde::{Deserialize, Serialize};

/// Project kind declared by the generating model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    #[default]
    Static,
    FullStack,
}

impl ProjectKind {
    /// Parse the spellings models actually emit
    pub fn parse_lenient(s: &str) -> Self {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "fullstack" => Self::FullStack,
            _ => Self::Static,
        }
    }
}

/// File category inferred from the path's extension.
///
/// Never trusted for correctness, only for routing decisions downstream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FileKind {
    Markup,
    Styles,
    Script,
    Data,
    Doc,
    #[default]
    Other,
}

impl FileKind {
    /// Classify a path by extension
    pub fn from_path(path: &str) -> Self {
        let ext = std::path::Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match ext.to_lowercase().as_str() {
            "tsx" | "jsx" => Self::Markup,
            "css" | "scss" | "sass" | "less" => Self::Styles,
            "ts" | "js" | "mjs" | "cjs" => Self::Script,
            "json" | "yaml" | "yml" | "toml" => Self::Data,
            "md" | "mdx" | "txt" => Self::Doc,
            _ => Self::Other,
        }
    }
}

/// One recovered file: relative forward-slash path plus raw source text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
    #[serde(default)]
    pub kind: FileKind,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let kind = FileKind::from_path(&path);
        Self {
            path,
            content: content.into(),
            kind,
        }
    }
}

/// Environment variable the generated project expects
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvVar {
    pub key: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// Root artifact recovered from raw model output
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: ProjectKind,
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub dependencies: std::collections::BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: std::collections::BTreeMap<String, String>,
    #[serde(default)]
    pub env_vars: Vec<EnvVar>,
    #[serde(default)]
    pub setup_steps: Vec<String>,
}

impl ProjectDescriptor {
    /// Look up a file by exact path
    pub fn file(&self, path: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Iterate files of a given kind
    pub fn files_of_kind(&self, kind: FileKind) -> impl Iterator<Item = &FileEntry> {
        self.files.iter().filter(move |f| f.kind == kind)
    }
}
