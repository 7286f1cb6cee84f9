//! Constants for file selection and specifier qualification.
//!
//! ## Qualifying suffixes
//!
//! A relative specifier is qualified by probing, in order:
//!
//! 1. the specifier itself (already names a file, left untouched)
//! 2. `<specifier>/index.js` (directory import, its index file wins)
//! 3. `<specifier>.js`
//!
//! These suffixes are fixed. The `--extensions` option only decides which files
//! in a package get scanned, never how their specifiers resolve.

/// File name suffix of the files scanned when no `--extensions` are given
pub const DEFAULT_EXTENSION: &str = ".d.ts";

/// Suffixes appended to a relative specifier when probing for its target (in priority order)
pub const QUALIFYING_SUFFIXES: &[&str] = &["", "/index.js", ".js"];

/// Directory holding installed packages; never descended into while walking a package
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Prefix shared by `./` and `../` specifiers
pub const RELATIVE_MARKER: &str = ".";

/// Declaration file suffixes parsed with the TypeScript definition dialect
pub const DECLARATION_SUFFIXES: &[&str] = &[".d.ts", ".d.mts", ".d.cts"];
