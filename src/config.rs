//! Generator configuration.
//!
//! Every knob has a default matching the conventions of a web-component
//! project: components under `src/`, a `WebComponent` base class, a
//! `static componentName = "..."` tag field and a `tsconfig.json` at the
//! project root.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_COMPONENT_DIR: &str = "src";
pub const BASE_CLASS_MARKER: &str = "WebComponent";
pub const TAG_NAME_MEMBER: &str = "componentName";
pub const AUXILIARY_TYPE_NAME: &str = "AdditionalTypes";
pub const DECLARATION_FILE_NAME: &str = "web-components.d.ts";
pub const PROJECT_CONFIG_FILE_NAME: &str = "tsconfig.json";
pub const SOURCE_EXTENSIONS: [&str; 2] = ["ts", "tsx"];

/// How a class's supertype is matched against the base-class marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeritageMatch {
    /// The supertype's source text contains the marker anywhere.
    /// `MyWebComponentWrapper` matches too; this is a known limitation.
    #[default]
    Contains,
    /// The supertype is a bare identifier equal to the marker, or a local
    /// alias of an import whose imported name equals the marker.
    Exact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    pub project_root: PathBuf,
    /// Raw component-root argument, relative to the project root.
    pub component_root: Option<String>,
    pub base_class_marker: String,
    pub tag_name_member: String,
    pub auxiliary_type_name: String,
    pub declaration_file_name: String,
    pub project_config_file_name: String,
    pub source_extensions: Vec<String>,
    pub heritage_match: HeritageMatch,
    /// Program and arguments; the declaration path is appended.
    pub formatter: Option<Vec<String>>,
    pub register_in_project: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            component_root: None,
            base_class_marker: BASE_CLASS_MARKER.to_string(),
            tag_name_member: TAG_NAME_MEMBER.to_string(),
            auxiliary_type_name: AUXILIARY_TYPE_NAME.to_string(),
            declaration_file_name: DECLARATION_FILE_NAME.to_string(),
            project_config_file_name: PROJECT_CONFIG_FILE_NAME.to_string(),
            source_extensions: SOURCE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            heritage_match: HeritageMatch::Contains,
            formatter: Some(vec![
                "npx".to_string(),
                "prettier".to_string(),
                "--write".to_string(),
            ]),
            register_in_project: true,
        }
    }
}

impl GeneratorConfig {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Default::default()
        }
    }

    pub fn with_component_root(mut self, root: impl Into<String>) -> Self {
        self.component_root = Some(root.into());
        self
    }

    pub fn with_heritage_match(mut self, mode: HeritageMatch) -> Self {
        self.heritage_match = mode;
        self
    }

    pub fn without_formatter(mut self) -> Self {
        self.formatter = None;
        self
    }

    pub fn declaration_path(&self) -> PathBuf {
        self.project_root.join(&self.declaration_file_name)
    }

    pub fn project_config_path(&self) -> PathBuf {
        self.project_root.join(&self.project_config_file_name)
    }

    pub fn is_source_file(&self, path: &Path) -> bool {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.ends_with(".d.ts") {
            return false;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.source_extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false)
    }
}
