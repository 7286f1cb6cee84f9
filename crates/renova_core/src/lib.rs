//! Core of renova: fully qualify relative module specifiers in declaration files.
//!
//! Packages consumed by runtimes with literal path resolution (no extension or
//! `index` inference) break on declaration files that `export * from './lib'`.
//! This crate walks a package, parses every selected file with oxc, and rewrites
//! each relative import/export specifier to the file it actually names:
//!
//! - `./lib` stays as is when `./lib` is a file
//! - becomes `./lib/index.js` when that file exists
//! - otherwise becomes `./lib.js` when that file exists
//! - is reported as unresolvable when none of the above exist
//!
//! # Examples
//!
//! ```no_run
//! use renova_core::{Config, Reporter, walk};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut cfg = Config { dry_run: true, ..Config::default() };
//! cfg.initialize();
//!
//! let mut reporter = Reporter::stdio(cfg.verbose);
//! let summary = walk(&cfg.package_root("@apollo/client"), &cfg, &mut reporter)?;
//! println!("{} specifiers would be rewritten", summary.specifiers_rewritten);
//! # Ok(())
//! # }
//! ```

mod config;
mod constants;
mod parser;
mod reporter;
mod resolver;
mod types;
mod walker;

// Re-export public API
pub use config::{Config, is_package_name};
pub use constants::{DEFAULT_EXTENSION, DEPENDENCY_DIR, QUALIFYING_SUFFIXES};
pub use parser::{Module, Specifier, Statement};
pub use reporter::{FileLog, Reporter, Severity};
pub use resolver::resolve;
pub use types::{Resolution, WalkSummary};
pub use walker::walk;
