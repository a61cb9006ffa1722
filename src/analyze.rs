//! Analyze Module
//!
//! Parses a component source file with oxc and extracts one
//! [`ComponentRecord`] per top-level class that extends the web-component
//! base class and declares a static tag-name string.
//!
//! Classification is structural, not nominal: by default the supertype
//! only has to *contain* the base-class marker in its source text. See
//! [`HeritageMatch`] for the stricter mode.

use lazy_static::lazy_static;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Class, ClassBody, ClassElement, Declaration, ExportDefaultDeclarationKind, Expression,
    ImportDeclarationSpecifier, ModuleExportName, Program, PropertyKey, Statement, TSType,
    TSTypeName,
};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::{GeneratorConfig, HeritageMatch};
use crate::discovery::SourceFile;

lazy_static! {
    static ref IDENTIFIER_RE: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// RECORD TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub class_name: String,
    pub tag_name: String,
    /// First generic argument of the base class, e.g. `IProps` in
    /// `extends WebComponent<IProps>`.
    pub interface_type: Option<String>,
    pub file_path: PathBuf,
    pub is_default_export: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    MissingTagName,
    TagNameNotStringLiteral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedClass {
    pub class_name: String,
    pub file_path: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    pub records: Vec<ComponentRecord>,
    pub skipped: Vec<SkippedClass>,
    pub parse_failed: bool,
}

// ═══════════════════════════════════════════════════════════════════════════════
// FILE ANALYSIS
// ═══════════════════════════════════════════════════════════════════════════════

pub fn analyze_file(file: &SourceFile, config: &GeneratorConfig) -> FileAnalysis {
    match fs::read_to_string(&file.path) {
        Ok(source) => analyze_source(&source, &file.path, config),
        Err(e) => {
            warn!("failed to read {}: {}", file.path.display(), e);
            FileAnalysis {
                parse_failed: true,
                ..Default::default()
            }
        }
    }
}

/// Analyze one file's contents. A file the parser cannot recover from
/// contributes no records; recoverable syntax errors are tolerated.
pub fn analyze_source(source: &str, path: &Path, config: &GeneratorConfig) -> FileAnalysis {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(path).unwrap_or_else(|_| {
        SourceType::default()
            .with_module(true)
            .with_typescript(true)
            .with_jsx(true)
    });
    let ret = Parser::new(&allocator, source, source_type).parse();

    let mut analysis = FileAnalysis::default();

    if ret.panicked {
        warn!(
            "failed to parse {}, no components taken from it ({} errors)",
            path.display(),
            ret.errors.len()
        );
        analysis.parse_failed = true;
        return analysis;
    }
    if !ret.errors.is_empty() {
        debug!(
            "{} recoverable parse errors in {}",
            ret.errors.len(),
            path.display()
        );
    }

    let import_aliases = collect_import_aliases(&ret.program);
    let default_exports = collect_default_export_names(&ret.program);

    for class in top_level_classes(&ret.program) {
        let Some(super_class) = &class.super_class else {
            continue;
        };
        if !matches_base_class(super_class, source, config, &import_aliases) {
            continue;
        }

        let interface_type = first_type_argument_name(class);

        let Some(id) = &class.id else {
            debug!("anonymous component class in {} ignored", path.display());
            continue;
        };
        let class_name = id.name.to_string();

        match find_tag_name(&class.body, &config.tag_name_member) {
            Ok(tag_name) => {
                let is_default_export = default_exports.contains(&class_name)
                    || has_textual_default_export(source, &class_name);
                analysis.records.push(ComponentRecord {
                    class_name,
                    tag_name,
                    interface_type,
                    file_path: path.to_path_buf(),
                    is_default_export,
                });
            }
            Err(reason) => {
                warn!(
                    "{}: class {} extends {} but has no static `{}` string field, skipping",
                    path.display(),
                    class_name,
                    super_class.span().source_text(source),
                    config.tag_name_member
                );
                analysis.skipped.push(SkippedClass {
                    class_name,
                    file_path: path.to_path_buf(),
                    reason,
                });
            }
        }
    }

    analysis
}

// ═══════════════════════════════════════════════════════════════════════════════
// SYNTAX MATCHING
// ═══════════════════════════════════════════════════════════════════════════════

/// Class declarations at module top level, including exported ones.
/// Nested classes are never visited.
fn top_level_classes<'p, 'a>(program: &'p Program<'a>) -> Vec<&'p Class<'a>> {
    program
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::ClassDeclaration(class) => Some(&**class),
            Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(Declaration::ClassDeclaration(class)) => Some(&**class),
                _ => None,
            },
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::ClassDeclaration(class) => Some(&**class),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

fn matches_base_class(
    super_class: &Expression,
    source: &str,
    config: &GeneratorConfig,
    import_aliases: &HashMap<String, String>,
) -> bool {
    let marker = config.base_class_marker.as_str();
    match config.heritage_match {
        HeritageMatch::Contains => super_class.span().source_text(source).contains(marker),
        HeritageMatch::Exact => match super_class {
            Expression::Identifier(ident) => {
                let local = ident.name.as_str();
                import_aliases
                    .get(local)
                    .map_or(local == marker, |imported| imported == marker)
            }
            _ => false,
        },
    }
}

/// `IProps` from `extends Base<IProps>`; anything but a plain, non-generic
/// type name yields `None`.
fn first_type_argument_name(class: &Class) -> Option<String> {
    let args = class.super_type_arguments.as_ref()?;
    match args.params.first()? {
        TSType::TSTypeReference(reference) if reference.type_arguments.is_none() => {
            match &reference.type_name {
                TSTypeName::IdentifierReference(ident) => Some(ident.name.to_string()),
                _ => None,
            }
        }
        _ => None,
    }
}

fn find_tag_name(body: &ClassBody, member: &str) -> Result<String, SkipReason> {
    for element in &body.body {
        let ClassElement::PropertyDefinition(prop) = element else {
            continue;
        };
        if !prop.r#static || prop.computed || property_key_name(&prop.key) != Some(member) {
            continue;
        }
        return match &prop.value {
            Some(Expression::StringLiteral(lit)) => Ok(lit.value.to_string()),
            _ => Err(SkipReason::TagNameNotStringLiteral),
        };
    }
    Err(SkipReason::MissingTagName)
}

fn property_key_name<'k>(key: &'k PropertyKey) -> Option<&'k str> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.as_str()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.as_str()),
        _ => None,
    }
}

/// Local name -> imported name for every named import specifier.
fn collect_import_aliases(program: &Program) -> HashMap<String, String> {
    let mut aliases = HashMap::new();
    for stmt in &program.body {
        let Statement::ImportDeclaration(import) = stmt else {
            continue;
        };
        let Some(specifiers) = &import.specifiers else {
            continue;
        };
        for specifier in specifiers {
            if let ImportDeclarationSpecifier::ImportSpecifier(named) = specifier {
                let imported = match &named.imported {
                    ModuleExportName::IdentifierName(id) => id.name.to_string(),
                    ModuleExportName::IdentifierReference(id) => id.name.to_string(),
                    ModuleExportName::StringLiteral(s) => s.value.to_string(),
                };
                aliases.insert(named.local.name.to_string(), imported);
            }
        }
    }
    aliases
}

/// Names exported as default: `export default class X`, `export default X;`
/// and `export { X as default }`.
fn collect_default_export_names(program: &Program) -> HashSet<String> {
    let mut names = HashSet::new();
    for stmt in &program.body {
        match stmt {
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                    if let Some(id) = &class.id {
                        names.insert(id.name.to_string());
                    }
                }
                ExportDefaultDeclarationKind::Identifier(ident) => {
                    names.insert(ident.name.to_string());
                }
                _ => {}
            },
            Statement::ExportNamedDeclaration(export) if export.source.is_none() => {
                for specifier in &export.specifiers {
                    let is_default = matches!(
                        &specifier.exported,
                        ModuleExportName::IdentifierName(id) if id.name == "default"
                    );
                    if let (true, ModuleExportName::IdentifierReference(local)) =
                        (is_default, &specifier.local)
                    {
                        names.insert(local.name.to_string());
                    }
                }
            }
            _ => {}
        }
    }
    names
}

/// Raw-text fallback for default exports the syntax walk cannot see.
fn has_textual_default_export(source: &str, class_name: &str) -> bool {
    if !IDENTIFIER_RE.is_match(class_name) {
        return false;
    }
    let pattern = format!(r"export\s+default\s+{}(?:[^\w$]|$)", regex::escape(class_name));
    Regex::new(&pattern)
        .map(|re| re.is_match(source))
        .unwrap_or(false)
}
