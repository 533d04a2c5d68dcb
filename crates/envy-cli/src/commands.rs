use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use envy_merge::{MergeEngine, MergeStats, StrategyName};
use serde_json::{json, Value};
use tracing::info;

use crate::cli::*;
use crate::config::CliConfig;
use crate::document::{read_document, render, write_document};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let config = CliConfig::discover(cli.config.as_deref(), &cwd)?;
    let format = cli.format.unwrap_or(config.output.format);

    match cli.command {
        Command::Merge(args) => cmd_merge(args, &config, format),
        Command::Strategies => cmd_strategies(format, config.output.pretty),
    }
}

fn cmd_merge(args: MergeArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let strategy = args.strategy.unwrap_or(config.merge.strategy);
    let (merged, stats) = merge_files(&args.target, &args.sources, strategy)?;

    let destination = if args.in_place {
        Some(args.target.as_path())
    } else {
        args.output.as_deref()
    };
    match destination {
        Some(path) => {
            write_document(path, &merged, config.output.pretty)?;
            info!(path = %path.display(), "merged document written");
        }
        None => println!("{}", render(&merged, format, config.output.pretty)?),
    }

    if args.stats {
        eprintln!(
            "{} Merged {} source(s) with {}: {} conflicts, {} adopted, {} replaced, depth {}",
            "✓".green().bold(),
            args.sources.len(),
            strategy.as_str().cyan(),
            stats.conflicts_resolved,
            stats.keys_adopted,
            stats.values_replaced,
            stats.max_depth,
        );
    }
    Ok(())
}

/// Merge each source into the target document in order.
///
/// Works on an in-memory copy, so a failed merge never touches the target
/// file.
fn merge_files(
    target: &Path,
    sources: &[impl AsRef<Path>],
    strategy: StrategyName,
) -> anyhow::Result<(Value, MergeStats)> {
    let engine = MergeEngine::new(strategy.into());
    let mut document = read_document(target)?;
    let mut total = MergeStats::default();

    for source in sources {
        let source = source.as_ref();
        let incoming = read_document(source)?;
        let stats = engine
            .merge_with_stats(&mut document, &incoming)
            .with_context(|| {
                format!("cannot merge {} into {}", source.display(), target.display())
            })?;
        info!(source = %source.display(), conflicts = stats.conflicts_resolved, "source merged");
        total.absorb(stats);
    }
    Ok((document, total))
}

fn cmd_strategies(format: OutputFormat, pretty: bool) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for name in StrategyName::ALL {
                let marker = if name == StrategyName::default() { " (default)" } else { "" };
                println!(
                    "  {} {}{}",
                    format!("{name:<8}").bold(),
                    name.description(),
                    marker.dimmed()
                );
            }
        }
        OutputFormat::Json | OutputFormat::Toml => {
            let listing: Vec<Value> = StrategyName::ALL
                .into_iter()
                .map(|name| json!({"name": name.as_str(), "description": name.description()}))
                .collect();
            println!("{}", render(&json!({ "strategies": listing }), format, pretty)?);
        }
    }
    Ok(())
}
