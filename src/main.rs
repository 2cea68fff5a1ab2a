use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Select};
use miette::Result;
use std::path::PathBuf;
use tracing::info;

use resweep::{
    Config, Decision, JsonReporter, PassController, ResourceCatalog, TerminalReporter,
};

/// resweep - find and remove unused resources in Android projects
#[derive(Parser, Debug)]
#[command(name = "resweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Module source root to clean (the directory containing AndroidManifest.xml)
    path: PathBuf,

    /// Additional directories to search for usages of this module's
    /// resources (useful when the module is a library)
    extra_paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Delete unused resources without prompting
    #[arg(long)]
    no_prompt: bool,

    /// Filenames to exclude from indexing and erasing (can be specified
    /// multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Backup directory, relative to the project root
    #[arg(long)]
    backup_dir: Option<String>,

    /// Output format for the final summary
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for the json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("resweep v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    let mut controller = PassController::new(&config, &cli.path, cli.extra_paths.clone())?
        .with_progress(!cli.quiet);

    let terminal_output = cli.format == OutputFormat::Terminal && !cli.quiet;
    let reporter = TerminalReporter::new();

    if terminal_output {
        println!("Indexing resources...");
    }
    controller.index();
    if terminal_output {
        reporter.index_summary(controller.catalog());
    }

    let mut last_pass = 0;
    let summary = controller.run(|pass, catalog| {
        if terminal_output && pass != last_pass {
            last_pass = pass;
            reporter.pass_header(pass);
            reporter.unused_summary(catalog);
        }
        if cli.no_prompt {
            return Decision::Delete;
        }
        prompt_decision(&reporter, catalog)
    });

    match cli.format {
        OutputFormat::Terminal => reporter.run_summary(&summary),
        OutputFormat::Json => JsonReporter::new(cli.output.clone()).report(&summary)?,
    }

    if summary.exited_early {
        println!("{}", "Exited before reaching a fixpoint.".yellow());
    }

    Ok(())
}

/// The between-pass menu. Unrecognized or failed input is a no-op and
/// the menu is shown again.
fn prompt_decision(reporter: &TerminalReporter, catalog: &ResourceCatalog) -> Decision {
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select option")
        .items(&[
            "show UNUSED resources",
            "DELETE unused resources",
            "show ALL indexed resources & usage counts",
            "exit",
        ])
        .default(0)
        .interact();

    match choice {
        Ok(0) => {
            reporter.unused_listing(catalog);
            Decision::ShowUnused
        }
        Ok(1) => Decision::Delete,
        Ok(2) => {
            reporter.all_listing(catalog);
            Decision::ShowAll
        }
        Ok(3) => Decision::Exit,
        Ok(_) => Decision::ShowUnused,
        Err(err) => {
            // No usable terminal, e.g. piped stdin. Bail out rather than
            // loop forever.
            eprintln!("{}: {err}", "prompt failed".red());
            Decision::Exit
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&cli.path)?
    };

    // Override with CLI arguments
    if !cli.exclude.is_empty() {
        config.exclude_files.extend(cli.exclude.clone());
    }
    if let Some(backup_dir) = &cli.backup_dir {
        config.backup_dir = backup_dir.clone();
    }

    Ok(config)
}
