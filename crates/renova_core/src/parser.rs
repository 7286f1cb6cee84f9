use anyhow::{Result, anyhow, bail};
use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::{Statement as OxcStatement, StringLiteral};
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::{SourceType, Span};
use std::path::Path;

use crate::constants::{DECLARATION_SUFFIXES, RELATIVE_MARKER};

/// Module specifier of an import or export declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    value: String,
    /// Span of the string literal in the original text, quotes included
    span: Span,
    modified: bool,
}

impl Specifier {
    fn from_literal(literal: &StringLiteral) -> Self {
        Self { value: literal.value.to_string(), span: literal.span, modified: false }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the specifier starts with `.` (`./` or `../`)
    pub fn is_relative(&self) -> bool {
        self.value.starts_with(RELATIVE_MARKER)
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.modified = true;
    }
}

/// Top-level statement of a parsed module, reduced to what qualification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    ExportDeclaration { source: Option<Specifier> },
    ImportDeclaration { source: Option<Specifier> },
    Other,
}

impl Statement {
    pub fn source(&self) -> Option<&Specifier> {
        match self {
            Statement::ExportDeclaration { source } | Statement::ImportDeclaration { source } => {
                source.as_ref()
            }
            Statement::Other => None,
        }
    }

    pub fn source_mut(&mut self) -> Option<&mut Specifier> {
        match self {
            Statement::ExportDeclaration { source } | Statement::ImportDeclaration { source } => {
                source.as_mut()
            }
            Statement::Other => None,
        }
    }
}

/// An owned, editable view of a source file's top-level statements.
///
/// Only specifiers are editable. [`Module::print`] reproduces the original text
/// and splices in every modified specifier as a single-quoted string literal.
#[derive(Debug, Clone)]
pub struct Module {
    source: String,
    statements: Vec<Statement>,
}

impl Module {
    /// Parse `source` (read from `path`) as a TypeScript module.
    ///
    /// Any syntax error fails the whole file.
    pub fn parse(path: &Path, source: String) -> Result<Self> {
        trace!("Parsing {}", path.display());

        let statements = {
            let allocator = Allocator::default();
            let ParserReturn { program, errors, panicked, .. } =
                OxcParser::new(&allocator, &source, source_type_for(path)).parse();

            if let Some(error) = errors.first() {
                bail!("Failed to parse {}: {}", path.display(), error);
            }
            if panicked {
                return Err(anyhow!("Failed to parse {}", path.display()));
            }

            program.body.iter().map(classify).collect::<Vec<_>>()
        };

        debug!("Parsed {} top-level statements in {}", statements.len(), path.display());
        Ok(Self { source, statements })
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Specifiers of import/export declarations starting with `.`, in source order
    pub fn relative_specifiers_mut(&mut self) -> impl Iterator<Item = &mut Specifier> {
        self.statements
            .iter_mut()
            .filter_map(Statement::source_mut)
            .filter(|specifier| specifier.is_relative())
    }

    pub fn is_modified(&self) -> bool {
        self.statements.iter().filter_map(Statement::source).any(Specifier::is_modified)
    }

    /// Serialize back to source text, normalizing rewritten specifiers to single quotes.
    pub fn print(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;

        for specifier in self.statements.iter().filter_map(Statement::source) {
            if !specifier.modified {
                continue;
            }
            let (start, end) = (specifier.span.start as usize, specifier.span.end as usize);
            out.push_str(&self.source[cursor..start]);
            out.push_str(&single_quoted(&specifier.value));
            cursor = end;
        }

        out.push_str(&self.source[cursor..]);
        out
    }
}

fn classify(stmt: &OxcStatement) -> Statement {
    match stmt {
        OxcStatement::ImportDeclaration(decl) => {
            Statement::ImportDeclaration { source: Some(Specifier::from_literal(&decl.source)) }
        }
        OxcStatement::ExportAllDeclaration(decl) => {
            Statement::ExportDeclaration { source: Some(Specifier::from_literal(&decl.source)) }
        }
        OxcStatement::ExportNamedDeclaration(decl) => Statement::ExportDeclaration {
            source: decl.source.as_ref().map(Specifier::from_literal),
        },
        // export default ..., export = ..., export as namespace ...
        OxcStatement::ExportDefaultDeclaration(_)
        | OxcStatement::TSExportAssignment(_)
        | OxcStatement::TSNamespaceExportDeclaration(_) => {
            Statement::ExportDeclaration { source: None }
        }
        _ => Statement::Other,
    }
}

fn single_quoted(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

fn source_type_for(path: &Path) -> SourceType {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    let ext = path.extension().and_then(|e| e.to_str());

    SourceType::default()
        .with_module(true)
        .with_typescript(true)
        .with_typescript_definition(DECLARATION_SUFFIXES.iter().any(|s| name.ends_with(s)))
        .with_jsx(matches!(ext, Some("tsx")))
}
