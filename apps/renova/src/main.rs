use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use log::{debug, error, info};
use rayon::prelude::*;
use renova_core::{Config, Reporter, WalkSummary};
use std::io::{BufWriter, Write};
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let mut cfg = Config::parse();
    cfg.initialize();
    debug!("Parsed CLI arguments: {:?}", cfg);

    if cfg.packages.is_empty() {
        Config::command().write_long_help(&mut stdout)?;
        stdout.flush()?;
        return Ok(());
    }

    let start = Instant::now();
    let num_threads = rayon::current_num_threads();
    info!("Qualifying {} package(s) (using {} threads)", cfg.packages.len(), num_threads);

    // Packages run concurrently, so their output may interleave.
    let results: Vec<(&String, Result<WalkSummary>)> = cfg
        .packages
        .par_iter()
        .map(|package| {
            let root = cfg.package_root(package);
            debug!("Package {} resolved to {}", package, root.display());
            let mut reporter = Reporter::stdio(cfg.verbose);
            (package, renova_core::walk(&root, &cfg, &mut reporter))
        })
        .collect();

    let mut total = WalkSummary::default();
    let mut failed = 0;
    for (package, result) in results {
        match result {
            Ok(summary) => total.merge(&summary),
            Err(e) => {
                failed += 1;
                error!("Failed to process {}: {:?}", package, e);
                eprintln!("{} {}: {:#}", "✗".red().bold(), package.bold(), e);
            }
        }
    }

    let elapsed_ms = start.elapsed().as_millis();
    writeln!(
        stdout,
        "\n{} Finished in {}ms on {} files: {} specifiers rewritten in {} files, {} unresolvable{}.",
        "●".bright_blue(),
        elapsed_ms.to_string().cyan(),
        total.files_scanned.to_string().cyan(),
        total.specifiers_rewritten.to_string().cyan(),
        total.files_rewritten.to_string().cyan(),
        total.specifiers_unresolvable.to_string().cyan(),
        if cfg.dry_run { " (dry run, no files written)" } else { "" }
    )?;
    stdout.flush()?;

    if failed > 0 {
        // Non-zero exit when any package could not be processed
        std::process::exit(1);
    }

    Ok(())
}
