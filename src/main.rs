use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use tabgrep::{Cli, OutputFormatter, OutputMode, Prompter, TabGrep, UserFriendlyError};
use tracing_subscriber::EnvFilter;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    setup_logging(cli.verbosity_level());

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let formatter = OutputFormatter::new(cli.output_mode(), cli.verbose, cli.quiet);
    formatter.print_title("Tab Grep");

    let mut prompter = Prompter::stdin(cli.output_mode() == OutputMode::Json);

    let (tabgrep, input, output_dir) = match prepare(&cli, &mut prompter) {
        Ok(session) => session,
        Err(e) => {
            formatter.print_user_friendly_error(&e);
            return e.exit_code();
        }
    };

    if cli.dry_run {
        return handle_dry_run(&tabgrep, &input, &output_dir);
    }

    match tabgrep.run(&input, &output_dir) {
        Ok(summary) => {
            tabgrep.output_formatter().print_run_summary(&summary);
            tabgrep.output_formatter().completed();
            0
        }
        Err(e) => {
            tabgrep.handle_error(&e);
            e.exit_code()
        }
    }
}

/// Collects the settings file, data path and output folder, asking for
/// whatever the command line left out, in that order.
fn prepare<R, W>(cli: &Cli, prompter: &mut Prompter<R, W>) -> tabgrep::Result<(TabGrep, PathBuf, PathBuf)>
where
    R: std::io::BufRead,
    W: std::io::Write,
{
    let config_path = prompter.ask_unless(cli.config.as_deref(), "Setting JSON")?;
    let tabgrep = TabGrep::from_cli(cli, &config_path)?;

    let input = prompter.ask_unless(cli.input.as_deref(), "Data Folder")?;
    let output_dir = prompter.ask_unless(cli.output.as_deref(), "Output Folder")?;

    Ok((tabgrep, PathBuf::from(input), PathBuf::from(output_dir)))
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli.generated_config_path();

    match TabGrep::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample settings file: {}", config_path);
            println!("\nTo use these settings:");
            println!("  tabgrep --config {}", config_path);
            println!("\nEdit the file to describe the files and data you want to extract.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate settings file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            e.exit_code()
        }
    }
}

fn handle_dry_run(tabgrep: &TabGrep, input: &Path, output_dir: &Path) -> i32 {
    let formatter = tabgrep.output_formatter();
    let config = tabgrep.config();

    formatter.warning("DRY RUN MODE - No report will be written");
    formatter.print_separator();

    let files = match tabgrep.select_files(input) {
        Ok(files) => files,
        Err(e) => {
            tabgrep.handle_error(&e);
            return e.exit_code();
        }
    };

    formatter.print_separator();
    println!("  Settings:        {}", tabgrep.config_path().display());
    println!("  File pattern:    {}", config.file_path_pattern);
    println!("  Data pattern:    {}", config.data_pattern);
    println!("  Recursive:       {}", config.recursive);
    println!("  Sort by mtime:   {}", config.sort_by_mod_time);
    println!(
        "  Report:          {}",
        output_dir.join(tabgrep.output_naming().file_name()).display()
    );
    println!("  Files to scan:   {}", files.len());
    for file in &files {
        println!("    {}", file.display());
    }

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    0
}

fn setup_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tabgrep={}", default_level)));

    // Diagnostics share stderr with the progress bar; status output stays on stdout.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
