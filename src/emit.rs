//! Emit Module
//!
//! Builds the declaration module as a small tree of TypeScript declarations
//! and prints it directly. Registry values are type expressions, never
//! strings, so class identifiers are printed bare.

use std::collections::HashMap;
use std::path::{Component, Path};
use tracing::warn;

use crate::analyze::ComponentRecord;
use crate::config::GeneratorConfig;

pub const CLASS_REGISTRY: &str = "HTMLElementTagNameMap";
pub const MARKUP_NAMESPACE: &str = "JSX";
pub const MARKUP_REGISTRY: &str = "IntrinsicElements";

const HEADER: &str = "// Generated by component-typegen. Do not edit by hand.";

// ═══════════════════════════════════════════════════════════════════════════════
// DECLARATION TREE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Bare type reference, e.g. `Foo`.
    Reference(String),
    /// `import("./src/foo").IFooProps`
    ImportMember { module: String, member: String },
    Intersection(Vec<TypeExpr>),
    /// Verbatim type text.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKey {
    /// Printed bare, e.g. `ref`.
    Name(String),
    /// Printed as a JSON string literal, e.g. `"foo-el"`.
    Quoted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub key: MemberKey,
    pub optional: bool,
    pub value: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    DefaultImport { local: String, module: String },
    NamedImport { name: String, module: String },
    TypeAlias { name: String, value: TypeExpr, members: Vec<Member> },
    Global(Vec<Decl>),
    Namespace { name: String, body: Vec<Decl> },
    Interface { name: String, members: Vec<Member> },
    ExportEmpty,
    Blank,
}

// ═══════════════════════════════════════════════════════════════════════════════
// BUILDING
// ═══════════════════════════════════════════════════════════════════════════════

/// Assemble the full declaration module for `records`, in record order.
pub(crate) fn build_declarations(
    records: &[ComponentRecord],
    config: &GeneratorConfig,
) -> Vec<Decl> {
    let mut decls = Vec::new();

    for record in records {
        let module = module_specifier(&record.file_path, &config.project_root);
        if record.is_default_export {
            decls.push(Decl::DefaultImport {
                local: record.class_name.clone(),
                module,
            });
        } else {
            decls.push(Decl::NamedImport {
                name: record.class_name.clone(),
                module,
            });
        }
    }
    if !records.is_empty() {
        decls.push(Decl::Blank);
    }

    decls.push(auxiliary_type(&config.auxiliary_type_name));
    decls.push(Decl::Blank);

    let records = dedupe_tags(records);
    let class_members = records
        .iter()
        .map(|record| Member {
            key: MemberKey::Quoted(record.tag_name.clone()),
            optional: false,
            value: TypeExpr::Reference(record.class_name.clone()),
        })
        .collect();
    let markup_members = records
        .iter()
        .map(|record| Member {
            key: MemberKey::Quoted(record.tag_name.clone()),
            optional: false,
            value: markup_type(record, config),
        })
        .collect();

    decls.push(Decl::Global(vec![
        Decl::Interface {
            name: CLASS_REGISTRY.to_string(),
            members: class_members,
        },
        Decl::Namespace {
            name: MARKUP_NAMESPACE.to_string(),
            body: vec![Decl::Interface {
                name: MARKUP_REGISTRY.to_string(),
                members: markup_members,
            }],
        },
    ]));
    decls.push(Decl::Blank);
    decls.push(Decl::ExportEmpty);

    decls
}

/// Common optional attributes accepted by every component tag.
fn auxiliary_type(name: &str) -> Decl {
    let optional = |key: &str, value: &str| Member {
        key: MemberKey::Name(key.to_string()),
        optional: true,
        value: TypeExpr::Raw(value.to_string()),
    };
    Decl::TypeAlias {
        name: name.to_string(),
        value: TypeExpr::Raw(r#"Partial<Omit<HTMLElement, "style">>"#.to_string()),
        members: vec![
            optional("ref", "(element: HTMLElement) => void"),
            optional("style", "Partial<CSSStyleDeclaration>"),
            optional("children", "unknown"),
        ],
    }
}

fn markup_type(record: &ComponentRecord, config: &GeneratorConfig) -> TypeExpr {
    let auxiliary = TypeExpr::Reference(config.auxiliary_type_name.clone());
    match &record.interface_type {
        Some(interface) => TypeExpr::Intersection(vec![
            TypeExpr::ImportMember {
                module: module_specifier(&record.file_path, &config.project_root),
                member: interface.clone(),
            },
            auxiliary,
        ]),
        None => auxiliary,
    }
}

/// Keep the last record per tag name, at the position of its first
/// occurrence. Every collision is reported.
fn dedupe_tags(records: &[ComponentRecord]) -> Vec<&ComponentRecord> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut unique: Vec<&ComponentRecord> = Vec::new();

    for record in records {
        match slots.get(record.tag_name.as_str()) {
            Some(&index) => {
                warn!(
                    "tag <{}> is declared by both {} ({}) and {} ({}), keeping {}",
                    record.tag_name,
                    unique[index].class_name,
                    unique[index].file_path.display(),
                    record.class_name,
                    record.file_path.display(),
                    record.class_name
                );
                unique[index] = record;
            }
            None => {
                slots.insert(record.tag_name.as_str(), unique.len());
                unique.push(record);
            }
        }
    }

    unique
}

/// Root-relative import path with a `./` prefix and no source extension.
/// Files outside the project root get a `../` path instead.
pub fn module_specifier(file_path: &Path, project_root: &Path) -> String {
    let relative =
        pathdiff::diff_paths(file_path, project_root).unwrap_or_else(|| file_path.to_path_buf());
    let without_ext = relative.with_extension("");

    let segments: Vec<String> = without_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();

    let joined = segments.join("/");
    if segments.first().is_some_and(|s| s == "..") {
        joined
    } else {
        format!("./{}", joined)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PRINTING
// ═══════════════════════════════════════════════════════════════════════════════

struct Printer {
    buffer: String,
    indent_level: usize,
}

impl Printer {
    fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
        }
    }

    fn add_line(&mut self, text: &str) {
        if text.is_empty() {
            self.buffer.push('\n');
            return;
        }
        self.buffer.push_str(&"  ".repeat(self.indent_level));
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn block(&mut self, opener: &str, body: impl FnOnce(&mut Self)) {
        self.add_line(&format!("{} {{", opener));
        self.indent();
        body(self);
        self.dedent();
        self.add_line("}");
    }

    fn members(&mut self, members: &[Member]) {
        for member in members {
            let optional = if member.optional { "?" } else { "" };
            self.add_line(&format!(
                "{}{}: {};",
                property_key(&member.key),
                optional,
                print_type(&member.value)
            ));
        }
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::DefaultImport { local, module } => {
                self.add_line(&format!("import {} from {};", local, quote(module)));
            }
            Decl::NamedImport { name, module } => {
                self.add_line(&format!("import {{ {} }} from {};", name, quote(module)));
            }
            Decl::TypeAlias {
                name,
                value,
                members,
            } => {
                self.add_line(&format!("type {} = {} & {{", name, print_type(value)));
                self.indent();
                self.members(members);
                self.dedent();
                self.add_line("};");
            }
            Decl::Global(body) => {
                self.block("declare global", |p| {
                    for d in body {
                        p.decl(d);
                    }
                });
            }
            Decl::Namespace { name, body } => {
                self.block(&format!("namespace {}", name), |p| {
                    for d in body {
                        p.decl(d);
                    }
                });
            }
            Decl::Interface { name, members } => {
                if members.is_empty() {
                    self.add_line(&format!("interface {} {{}}", name));
                } else {
                    self.block(&format!("interface {}", name), |p| p.members(members));
                }
            }
            Decl::ExportEmpty => self.add_line("export {};"),
            Decl::Blank => self.add_line(""),
        }
    }
}

pub(crate) fn print_declarations(decls: &[Decl]) -> String {
    let mut printer = Printer::new();
    printer.add_line(HEADER);
    printer.add_line("");
    for decl in decls {
        printer.decl(decl);
    }
    printer.buffer
}

/// Build and print the declaration module in one step.
pub fn render_declarations(records: &[ComponentRecord], config: &GeneratorConfig) -> String {
    print_declarations(&build_declarations(records, config))
}

fn print_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Reference(name) => name.clone(),
        TypeExpr::ImportMember { module, member } => {
            format!("import({}).{}", quote(module), member)
        }
        TypeExpr::Intersection(parts) => parts
            .iter()
            .map(print_type)
            .collect::<Vec<_>>()
            .join(" & "),
        TypeExpr::Raw(text) => text.clone(),
    }
}

fn property_key(key: &MemberKey) -> String {
    match key {
        MemberKey::Name(name) => name.clone(),
        MemberKey::Quoted(text) => quote(text),
    }
}

fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}
