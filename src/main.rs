//! a11ymap CLI binary entry point.
//! Delegates to the library for loading, aggregation and printing.

use a11ymap::cli::{Cli, Commands};
use a11ymap::{config, input, output, utils};
use a11ymap::{CriterionCodeParser, ViolationAggregator};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let fallback = if verbose { "a11ymap=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", utils::error_prefix(), err);
    std::process::exit(2);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Report {
            inputs,
            root,
            config: config_path,
            output,
            top,
            check,
        } => {
            let eff = config::resolve_effective(
                root.as_deref(),
                config_path.as_deref(),
                output.as_deref(),
                top,
                if check { Some(true) } else { None },
            )
            .unwrap_or_else(|e| fail(e));
            if eff.source.is_none() && eff.output != "json" {
                eprintln!(
                    "{} No a11ymap.toml found; using defaults.",
                    utils::note_prefix()
                );
            }
            let parser =
                CriterionCodeParser::with_rules(&eff.parser_rules).unwrap_or_else(|e| fail(e));
            let cwd = std::env::current_dir().unwrap_or_else(|_| eff.root.clone());
            let pages = input::load_scan_files(&inputs, &cwd).unwrap_or_else(|e| fail(e));
            if eff.output != "json" {
                eprintln!(
                    "{} Loaded {} {}",
                    utils::info_prefix(),
                    pages.len(),
                    utils::pluralize("page", pages.len())
                );
            }

            let result = ViolationAggregator::new(parser, eff.impact).aggregate_pages(&pages);
            output::print_aggregate(&result, &eff.output, eff.top);
            if eff.check && result.status_summary().not_compliant > 0 {
                std::process::exit(1);
            }
        }
        Commands::Parse {
            code,
            root,
            config: config_path,
        } => {
            let eff = config::resolve_effective(
                root.as_deref(),
                config_path.as_deref(),
                None,
                None,
                None,
            )
            .unwrap_or_else(|e| fail(e));
            let parser =
                CriterionCodeParser::with_rules(&eff.parser_rules).unwrap_or_else(|e| fail(e));
            match parser.explain(&code) {
                Some(m) => println!("{} (rule={})", m.criterion, m.rule),
                None => println!("no match"),
            }
        }
    }
}
