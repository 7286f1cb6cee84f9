use anyhow::{Context, Result};
use log::trace;
use std::{fs, io::ErrorKind, path::Path};

use crate::types::Resolution;

/// Qualify `specifier` relative to `base_dir` by probing `specifier + suffix` for
/// each suffix in order.
///
/// The first suffix naming a regular file wins. An empty winning suffix means the
/// specifier is already fully qualified. Missing entries and directories move on
/// to the next suffix; any other probe failure is returned as an error.
pub fn resolve(base_dir: &Path, specifier: &str, suffixes: &[&str]) -> Result<Resolution> {
    trace!("Qualifying '{}' from {}", specifier, base_dir.display());

    for suffix in suffixes {
        let candidate = format!("{specifier}{suffix}");
        let path = base_dir.join(&candidate);

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!("No entry at {}", path.display());
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to stat {}", path.display()));
            }
        };

        if !metadata.is_file() {
            trace!("Skipping non-file entry at {}", path.display());
            continue;
        }

        return Ok(if suffix.is_empty() {
            Resolution::AlreadyQualified(candidate)
        } else {
            trace!("Qualified '{}' as '{}'", specifier, candidate);
            Resolution::Rewritten { from: specifier.to_string(), to: candidate }
        });
    }

    trace!("Could not qualify '{}' from {}", specifier, base_dir.display());
    Ok(Resolution::Unresolvable(specifier.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::QUALIFYING_SUFFIXES;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, "").expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_exact_file_is_already_qualified() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "types.js");

        let resolution = resolve(temp_dir.path(), "./types.js", QUALIFYING_SUFFIXES).unwrap();
        assert_eq!(resolution, Resolution::AlreadyQualified("./types.js".to_string()));
    }

    #[test]
    fn test_exact_file_without_extension_is_already_qualified() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "LICENSE");

        let resolution = resolve(temp_dir.path(), "./LICENSE", QUALIFYING_SUFFIXES).unwrap();
        assert_eq!(resolution, Resolution::AlreadyQualified("./LICENSE".to_string()));
    }

    #[test]
    fn test_directory_resolves_to_index() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "b/index.js");

        let resolution = resolve(temp_dir.path(), "./b", QUALIFYING_SUFFIXES).unwrap();
        assert_eq!(
            resolution,
            Resolution::Rewritten { from: "./b".to_string(), to: "./b/index.js".to_string() }
        );
    }

    #[test]
    fn test_missing_file_resolves_to_js_extension() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "utils.js");

        let resolution = resolve(temp_dir.path(), "./utils", QUALIFYING_SUFFIXES).unwrap();
        assert_eq!(
            resolution,
            Resolution::Rewritten { from: "./utils".to_string(), to: "./utils.js".to_string() }
        );
    }

    #[test]
    fn test_index_wins_over_js_extension() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "lib/index.js");
        create_test_file(temp_dir.path(), "lib.js");

        let resolution = resolve(temp_dir.path(), "./lib", QUALIFYING_SUFFIXES).unwrap();
        assert_eq!(
            resolution,
            Resolution::Rewritten { from: "./lib".to_string(), to: "./lib/index.js".to_string() }
        );
    }

    #[test]
    fn test_directory_without_index_falls_through_to_js() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("core")).unwrap();
        create_test_file(temp_dir.path(), "core.js");

        let resolution = resolve(temp_dir.path(), "./core", QUALIFYING_SUFFIXES).unwrap();
        assert_eq!(
            resolution,
            Resolution::Rewritten { from: "./core".to_string(), to: "./core.js".to_string() }
        );
    }

    #[test]
    fn test_directory_only_is_unresolvable() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("empty")).unwrap();

        let resolution = resolve(temp_dir.path(), "./empty", QUALIFYING_SUFFIXES).unwrap();
        assert_eq!(resolution, Resolution::Unresolvable("./empty".to_string()));
    }

    #[test]
    fn test_index_directory_is_not_a_target() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("odd/index.js")).unwrap();

        let resolution = resolve(temp_dir.path(), "./odd", QUALIFYING_SUFFIXES).unwrap();
        assert_eq!(resolution, Resolution::Unresolvable("./odd".to_string()));
    }

    #[test]
    fn test_missing_target_is_unresolvable() {
        let temp_dir = TempDir::new().unwrap();

        let resolution = resolve(temp_dir.path(), "./missing", QUALIFYING_SUFFIXES).unwrap();
        assert_eq!(resolution, Resolution::Unresolvable("./missing".to_string()));
    }

    #[test]
    fn test_parent_relative_specifier() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "shared.js");
        let nested = temp_dir.path().join("nested");
        fs::create_dir_all(&nested).unwrap();

        let resolution = resolve(&nested, "../shared", QUALIFYING_SUFFIXES).unwrap();
        assert_eq!(
            resolution,
            Resolution::Rewritten { from: "../shared".to_string(), to: "../shared.js".to_string() }
        );
    }

    #[test]
    fn test_only_given_suffixes_are_tried() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "utils.js");

        let resolution = resolve(temp_dir.path(), "./utils", &["", "/index.js"]).unwrap();
        assert_eq!(resolution, Resolution::Unresolvable("./utils".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_error_other_than_not_found_propagates() {
        let temp_dir = TempDir::new().unwrap();
        // A path component that is a regular file fails with ENOTDIR, not ENOENT
        create_test_file(temp_dir.path(), "file");

        let result = resolve(temp_dir.path(), "./file/inner", QUALIFYING_SUFFIXES);
        assert!(result.is_err());
    }
}
