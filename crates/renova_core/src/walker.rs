use anyhow::{Context, Result};
use ignore::{DirEntry, WalkBuilder};
use log::{debug, info, trace};
use std::{
    fs::OpenOptions,
    io::{Read, Seek, SeekFrom, Write},
    path::Path,
};

use crate::{
    config::Config,
    constants::{DEPENDENCY_DIR, QUALIFYING_SUFFIXES},
    parser::Module,
    reporter::Reporter,
    resolver::resolve,
    types::{Resolution, WalkSummary},
};

/// Qualify the relative specifiers of every selected file below `root`.
///
/// Entries are visited depth first in file name order. `node_modules`
/// directories are skipped. The first error aborts the walk.
pub fn walk<O: Write, E: Write>(
    root: &Path,
    cfg: &Config,
    reporter: &mut Reporter<O, E>,
) -> Result<WalkSummary> {
    info!("Walking {}", root.display());
    let mut summary = WalkSummary::default();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|dent| !is_dependency_dir(dent))
        .build();

    for res in walker {
        let dent = res.with_context(|| format!("Failed to walk {}", root.display()))?;
        if dent.depth() == 0 || dent.file_type().is_none_or(|ft| ft.is_dir()) {
            continue;
        }

        let name = dent.file_name().to_string_lossy();
        if !cfg.selects(&name) {
            trace!("Skipping unselected file: {}", dent.path().display());
            continue;
        }

        process_file(dent.path(), cfg, reporter, &mut summary)?;
    }

    reporter.flush().context("Failed to flush report")?;
    debug!("Finished {}: {:?}", root.display(), summary);
    Ok(summary)
}

fn is_dependency_dir(dent: &DirEntry) -> bool {
    let skip = dent.depth() > 0
        && dent.file_type().is_some_and(|ft| ft.is_dir())
        && dent.file_name() == DEPENDENCY_DIR;
    if skip {
        trace!("Skipping dependency directory: {}", dent.path().display());
    }
    skip
}

fn process_file<O: Write, E: Write>(
    path: &Path,
    cfg: &Config,
    reporter: &mut Reporter<O, E>,
    summary: &mut WalkSummary,
) -> Result<()> {
    trace!("Processing file: {}", path.display());
    summary.files_scanned += 1;

    // Closed on drop, whichever way this function returns
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut src = String::new();
    file.read_to_string(&mut src).with_context(|| format!("Failed to read {}", path.display()))?;

    let mut module = Module::parse(path, src)?;
    let base_dir = path.parent().unwrap_or(Path::new("."));

    let mut log = reporter.file(path);
    for specifier in module.relative_specifiers_mut() {
        let resolution = resolve(base_dir, specifier.value(), QUALIFYING_SUFFIXES)?;
        if let Resolution::Rewritten { to, .. } = &resolution {
            specifier.set_value(to.as_str());
        }
        log.record(&resolution).context("Failed to write report")?;
        summary.tally(&resolution);
    }

    if !module.is_modified() {
        return Ok(());
    }
    summary.files_rewritten += 1;

    if cfg.dry_run {
        debug!("Dry run, leaving {} untouched", path.display());
        return Ok(());
    }

    let out = module.print();
    file.set_len(0).with_context(|| format!("Failed to truncate {}", path.display()))?;
    file.seek(SeekFrom::Start(0)).with_context(|| format!("Failed to seek {}", path.display()))?;
    file.write_all(out.as_bytes()).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("Rewrote {}", path.display());
    Ok(())
}
