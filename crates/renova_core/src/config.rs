use clap::Parser;
use log::{debug, info, warn};
use std::path::PathBuf;

use crate::constants::{DEFAULT_EXTENSION, DEPENDENCY_DIR};

#[derive(Debug, Clone, Parser)]
#[command(name = "renova")]
#[command(about = "Fully qualify relative imports and exports in installed declaration files")]
#[command(
    after_help = "Example: renova --dry-run @apollo/client\n\nEach <PACKAGES> entry names a package under ./node_modules."
)]
pub struct Config {
    /// Print potential outcome without altering files. Implies --verbose
    #[arg(long)]
    pub dry_run: bool,

    /// Comma-separated list of file name extensions to process
    #[arg(long, value_delimiter = ',', default_value = DEFAULT_EXTENSION)]
    pub extensions: Vec<String>,

    /// Print all matching exports and imports
    #[arg(long)]
    pub verbose: bool,

    /// Directory containing node_modules
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Names of packages under node_modules to patch, e.g. '@apollo/client'
    pub packages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dry_run: false,
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            verbose: false,
            root: PathBuf::from("."),
            packages: Vec::new(),
        }
    }
}

impl Config {
    /// Normalize parsed options; the config is read-only afterwards.
    pub fn initialize(&mut self) {
        if self.dry_run {
            debug!("Dry run enables verbose output");
            self.verbose = true;
        }

        let extensions: Vec<String> = self
            .extensions
            .iter()
            .map(|extension| extension.trim())
            .filter(|extension| !extension.is_empty())
            .map(str::to_string)
            .collect();
        if extensions.is_empty() {
            debug!("No usable extensions given, keeping {}", DEFAULT_EXTENSION);
            self.extensions = vec![DEFAULT_EXTENSION.to_string()];
        } else {
            self.extensions = extensions;
        }

        let mut packages: Vec<String> = Vec::new();
        for name in self.packages.drain(..) {
            if !is_package_name(&name) {
                warn!("Ignoring invalid package name '{}'", name);
            } else if !packages.contains(&name) {
                packages.push(name);
            }
        }
        self.packages = packages;

        info!(
            "Processing {} package(s) with extensions {:?}{}",
            self.packages.len(),
            self.extensions,
            if self.dry_run { " (dry run)" } else { "" }
        );
    }

    /// Whether a file with this name gets scanned
    pub fn selects(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|extension| file_name.ends_with(extension.as_str()))
    }

    /// Directory of an installed package, e.g. `./node_modules/@scope/name`
    pub fn package_root(&self, package: &str) -> PathBuf {
        self.root.join(DEPENDENCY_DIR).join(package)
    }
}

/// Permissive npm package name check: 2 to 215 characters, not starting with
/// `.` or `_`, and free of `~)('!*`.
pub fn is_package_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if first == '.' || first == '_' {
        return false;
    }

    let rest: Vec<char> = chars.collect();
    (1..=214).contains(&rest.len()) && !rest.iter().any(|c| "~)('!*".contains(*c))
}
