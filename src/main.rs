//! DM-CORE command-line entry point.
//!
//! Thin smoke surface over the pipeline facade; the real serving surface
//! lives outside this crate.
//!
//! ## Subcommands
//!
//! - `dm-core-cli load <file>...` - Load model files, print per-file outcome
//! - `dm-core-cli list <file>...` - Load model files, print registered models

use std::process::ExitCode;

use dm_core::{config, logging, DomainModelFramework};

#[tokio::main]
async fn main() -> ExitCode {
    let cfg = config::load();
    if let Err(e) = logging::init_logging(&cfg.log) {
        eprintln!("logging init failed: {e}");
        return ExitCode::FAILURE;
    }

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("");
    let paths = &args[2.min(args.len())..];

    if paths.is_empty() {
        eprintln!("usage: dm-core-cli <load|list> <file>...");
        return ExitCode::FAILURE;
    }

    let framework = DomainModelFramework::new(cfg.framework);
    let results = framework.load_many(paths).await;

    let mut failures = 0;
    for (path, result) in paths.iter().zip(&results) {
        match result {
            Ok(model) => println!(
                "{path}: {} v{} ({})",
                model.metadata.domain_id, model.metadata.version, model.metadata.format
            ),
            Err(e) => {
                failures += 1;
                eprintln!("{path}: {e}");
            }
        }
    }

    match command {
        "load" => {
            let metrics = framework.metrics();
            let stats = framework.cache_statistics();
            println!(
                "loaded={} parse_errors={} validation_errors={} cached={}",
                metrics.load_count,
                metrics.parse_error_count,
                metrics.validation_error_count,
                stats.size
            );
        }
        "list" => {
            for metadata in framework.list_models() {
                println!(
                    "{} v{} - {}",
                    metadata.domain_id, metadata.version, metadata.domain_name
                );
            }
        }
        other => {
            eprintln!("unknown command: {other}");
            return ExitCode::FAILURE;
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
