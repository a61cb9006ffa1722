//! # Web Component Type Generator
//!
//! Scans a source tree for web-component classes and writes one
//! declaration module that teaches the TypeScript toolchain about every
//! custom tag.
//!
//! ## Pipeline
//!
//! 1. **Locate**: resolve the component root (`src` by default). Missing root is fatal.
//! 2. **Walk**: collect `.ts`/`.tsx` files recursively, sorted by name.
//! 3. **Analyze**: parse each file with oxc and keep top-level classes whose
//!    supertype matches the base-class marker and which declare
//!    `static componentName = "tag-name"`.
//! 4. **Emit**: print imports, the `AdditionalTypes` alias and the two
//!    global registries (`HTMLElementTagNameMap`, `JSX.IntrinsicElements`).
//! 5. **Write + format**: overwrite the declaration file, then run the
//!    formatter best-effort.
//! 6. **Register**: make sure `tsconfig.json` lists the declaration file in
//!    `compilerOptions.types`. Missing tsconfig is fatal.
//!
//! Every run recomputes everything from scratch; unchanged inputs produce
//! byte-identical output.

#[cfg(feature = "napi")]
use napi_derive::napi;

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

mod analyze;
mod config;
mod discovery;
mod emit;
mod error;
mod finalize;
mod registrar;

#[cfg(test)]
mod emit_tests;

pub use analyze::{analyze_source, ComponentRecord, FileAnalysis, SkipReason, SkippedClass};
pub use config::{GeneratorConfig, HeritageMatch};
pub use discovery::{find_source_files, resolve_component_root, SourceFile};
pub use emit::{module_specifier, render_declarations};
pub use error::{GenerateError, Result};
pub use registrar::register_declaration_file;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub component_root: PathBuf,
    pub declaration_path: PathBuf,
    pub components: Vec<ComponentRecord>,
    pub skipped: Vec<SkippedClass>,
    pub files_scanned: usize,
    pub files_failed: usize,
    pub formatted: bool,
    pub project_config_updated: bool,
}

/// Run the whole pipeline once.
pub fn generate(config: &GeneratorConfig) -> Result<GenerationReport> {
    let component_root =
        resolve_component_root(&config.project_root, config.component_root.as_deref())?;
    let project_config_path = config.project_config_path();
    if config.register_in_project && !project_config_path.exists() {
        return Err(GenerateError::ProjectConfigMissing {
            path: project_config_path,
        });
    }
    debug!("scanning {}", component_root.display());

    let files = find_source_files(&component_root, config);

    let mut components = Vec::new();
    let mut skipped = Vec::new();
    let mut files_failed = 0;
    for file in &files {
        let analysis = analyze::analyze_file(file, config);
        if analysis.parse_failed {
            files_failed += 1;
        }
        components.extend(analysis.records);
        skipped.extend(analysis.skipped);
    }

    let declaration_path = config.declaration_path();
    let output = render_declarations(&components, config);
    finalize::write_declarations(&declaration_path, &output)?;

    let formatted = match &config.formatter {
        Some(formatter) => finalize::run_formatter(formatter, &declaration_path),
        None => false,
    };

    let project_config_updated = if config.register_in_project {
        register_declaration_file(&project_config_path, &config.declaration_file_name)?
    } else {
        false
    };

    info!(
        "wrote {} components to {} ({} files scanned, {} skipped classes)",
        components.len(),
        declaration_path.display(),
        files.len(),
        skipped.len()
    );

    Ok(GenerationReport {
        component_root,
        declaration_path,
        components,
        skipped,
        files_scanned: files.len(),
        files_failed,
        formatted,
        project_config_updated,
    })
}

/// Node entry point: generate declarations for the project at `project_root`
/// and return the report as JSON.
#[cfg(feature = "napi")]
#[napi]
pub fn generate_declarations_native(
    project_root: String,
    component_root: Option<String>,
) -> napi::Result<serde_json::Value> {
    let mut config = GeneratorConfig::new(project_root);
    config.component_root = component_root;

    let report = generate(&config).map_err(|e| napi::Error::from_reason(e.to_string()))?;
    serde_json::to_value(report).map_err(|e| napi::Error::from_reason(e.to_string()))
}
