use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use envy_merge::StrategyName;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(
    name = "envy",
    about = "Deep-merge JSON and TOML documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output encoding; defaults to the config file's choice, then text
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file; defaults to ./envy.toml when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Toml,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge one or more source documents into a target document
    Merge(MergeArgs),
    /// List the built-in conflict strategies
    Strategies,
}

#[derive(Args)]
pub struct MergeArgs {
    pub target: PathBuf,
    #[arg(required = true)]
    pub sources: Vec<PathBuf>,
    /// ours, theirs, combine or error
    #[arg(short, long)]
    pub strategy: Option<StrategyName>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Write the result back to the target file
    #[arg(long, conflicts_with = "output")]
    pub in_place: bool,
    /// Print merge counters to stderr
    #[arg(long)]
    pub stats: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_merge() {
        let cli = Cli::try_parse_from(["envy", "merge", "a.json", "b.json"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.target, PathBuf::from("a.json"));
            assert_eq!(args.sources, vec![PathBuf::from("b.json")]);
            assert!(args.strategy.is_none());
            assert!(!args.in_place);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_merge_many_sources() {
        let cli = Cli::try_parse_from(["envy", "merge", "a.toml", "b.toml", "c.json"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.sources.len(), 2);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_merge_requires_source() {
        assert!(Cli::try_parse_from(["envy", "merge", "a.json"]).is_err());
    }

    #[test]
    fn parse_strategy_case_insensitive() {
        let cli =
            Cli::try_parse_from(["envy", "merge", "-s", "Theirs", "a.json", "b.json"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.strategy, Some(StrategyName::Theirs));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_unknown_strategy_fails() {
        let result =
            Cli::try_parse_from(["envy", "merge", "--strategy", "newest", "a.json", "b.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_in_place_conflicts_with_output() {
        let result = Cli::try_parse_from([
            "envy", "merge", "--in-place", "-o", "out.json", "a.json", "b.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_strategies() {
        let cli = Cli::try_parse_from(["envy", "strategies"]).unwrap();
        assert!(matches!(cli.command, Command::Strategies));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "envy", "--verbose", "--format", "toml", "--config", "x.toml", "strategies",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, Some(OutputFormat::Toml));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }
}
