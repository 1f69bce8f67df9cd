use crate::config::CliOverrides;
use crate::ui::OutputMode;
use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "tabgrep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract regex capture groups from files into a tab-separated report")]
#[command(
    long_about = "TabGrep selects files whose path matches a regular expression, applies a \
                  second regular expression to their contents and writes every match's \
                  capture groups as one tab-separated line below a configurable header.\n\n\
                  Any value not given on the command line is asked for interactively."
)]
#[command(after_help = "EXAMPLES:\n  \
    tabgrep\n  \
    tabgrep --config events.json --input ./logs --output ./reports\n  \
    tabgrep -c events.json -i ./logs -o . --recursive --sort-by-mod-time\n  \
    tabgrep --generate-config --config events.json")]
pub struct Cli {
    /// Settings JSON file (asked for when omitted)
    #[arg(short, long, env = "TABGREP_CONFIG")]
    pub config: Option<String>,

    /// Data file or folder to search (asked for when omitted)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Folder the report is written to (asked for when omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Search sub-folders regardless of the settings file
    #[arg(short, long, conflicts_with = "no_recursive")]
    pub recursive: bool,

    /// Search only the top-level folder regardless of the settings file
    #[arg(long)]
    pub no_recursive: bool,

    /// Process files in ascending modification time order
    #[arg(long)]
    pub sort_by_mod_time: bool,

    /// Report file name, overriding the settings file
    #[arg(long)]
    pub output_name: Option<String>,

    /// Output format for status messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show which files would be scanned without writing a report
    #[arg(long)]
    pub dry_run: bool,

    /// Write a sample settings file to --config (or tabgrep.json) and exit
    #[arg(long)]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn create_cli_overrides(&self) -> CliOverrides {
        let recursive = if self.recursive {
            Some(true)
        } else if self.no_recursive {
            Some(false)
        } else {
            None
        };

        CliOverrides::new()
            .with_recursive(recursive)
            .with_sort_by_mod_time(self.sort_by_mod_time.then_some(true))
            .with_output_file_name(self.output_name.clone())
    }

    pub fn output_mode(&self) -> OutputMode {
        match self.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }

    pub fn generated_config_path(&self) -> String {
        self.config
            .clone()
            .unwrap_or_else(|| "tabgrep.json".to_string())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
