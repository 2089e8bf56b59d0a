//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "a11ymap",
    version,
    about = "Map accessibility scan results onto WCAG success criteria",
    long_about = "a11ymap — resolve scanner rule codes to WCAG success criteria, deduplicate issues per criterion, and summarize compliance.\n\nConfiguration precedence: CLI > a11ymap.toml > defaults.",
    after_help = "Examples:\n  a11ymap report scans/*.json\n  a11ymap report crawl.json --output markdown --top 5\n  a11ymap parse WCAG2AA.Principle1.Guideline1_4.1_4_3.G18.Fail",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(long, global = true, action = clap::ArgAction::SetTrue, help = "Enable debug logging on stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current a11ymap version.")]
    Version,
    /// Aggregate scan output per criterion
    #[command(
        about = "Aggregate scan results",
        long_about = "Load scanner JSON (flat issue lists or per-page lists), map every issue to a success criterion and print per-criterion status.",
        after_help = "Examples:\n  a11ymap report scans/*.json\n  a11ymap report crawl.json --output json --check"
    )]
    Report {
        #[arg(required = true, help = "Scan JSON files or glob patterns")]
        inputs: Vec<String>,
        #[arg(long, help = "Directory to start config discovery from (default: current dir)")]
        root: Option<String>,
        #[arg(long, help = "Explicit config file (skips discovery)")]
        config: Option<String>,
        #[arg(long, help = "Output mode: human|json|markdown (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Example issues shown per criterion (default: 3)")]
        top: Option<usize>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if any criterion is not compliant")]
        check: bool,
    },
    /// Resolve a single rule code
    #[command(
        about = "Resolve a rule code",
        long_about = "Print the success criterion a scanner rule code resolves to and the rule that matched it."
    )]
    Parse {
        #[arg(help = "Scanner rule code")]
        code: String,
        #[arg(long, help = "Directory to start config discovery from (default: current dir)")]
        root: Option<String>,
        #[arg(long, help = "Explicit config file (skips discovery)")]
        config: Option<String>,
    },
}
