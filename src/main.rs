//! eosl-inventory: server inventory end-of-service-life dashboard
//!
//! Classifies servers by EOSL date, filters them, and records owner
//! notifications in an append-only change log.

#![allow(
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::needless_pass_by_value
)]

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use eosl_inventory::{
    cli,
    config::{
        self, AppConfig, ConfigPreset, ContactConfig, ExportConfig, IntimateConfig,
        IntimateTarget, LogConfig, TicketConfig, Validatable, ViewConfig,
    },
    filter::FilterCriteria,
    model::{EoslStatus, OsFamily},
    pipeline::exit_codes,
    reports::{ExportKind, ReportFormat},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with supported input info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nInput:",
        "\n  Inventory CSV (hostname required; other columns optional, any order)",
        "\n  Dates: YYYY-MM-DD, DD-MM-YYYY, YYYY/MM/DD, DD/Mon/YYYY, month-name layouts",
        "\n\nOutput Formats:",
        "\n  tui, summary, table, json, csv",
        "\n\nExports:",
        "\n  inventory, contacts, tickets"
    )
}

#[derive(Parser)]
#[command(name = "eosl-inventory")]
#[command(version, long_version = build_long_version())]
#[command(about = "Server inventory end-of-service-life dashboard", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Host not found / nothing matched the filter
    3  Error occurred

EXAMPLES:
    # Interactive dashboard over the bundled sample
    eosl-inventory view

    # KPI summary for a real inventory
    eosl-inventory view -i servers.csv -o summary

    # Expired production servers as JSON
    eosl-inventory view -i servers.csv --status expired --env prod -o json

    # Ticket import file for everything inside a 180-day window
    eosl-inventory export -i servers.csv --nearing-days 180 --kind tickets -O tickets.csv

    # Record that the owner of db-01 was notified
    eosl-inventory intimate -i servers.csv db-01 --note \"called owner\"")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Change log CSV (default: change_log.csv)
    #[arg(long, global = true, env = "EOSL_CHANGE_LOG")]
    change_log: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Inventory source shared by every command that loads one
#[derive(Args)]
struct InventoryArgs {
    /// Inventory CSV (bundled sample if omitted or unreadable)
    #[arg(short, long, env = "EOSL_INVENTORY")]
    inventory: Option<PathBuf>,

    /// Width of the NEARING window in days
    #[arg(long)]
    nearing_days: Option<u32>,

    /// Reference date instead of today (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
}

/// Row filters; repeated values of one flag are alternatives
#[derive(Args)]
struct FilterArgs {
    /// Hardware vendor (repeatable)
    #[arg(long)]
    vendor: Vec<String>,

    /// OS family (repeatable)
    #[arg(long, value_enum)]
    os_family: Vec<OsFamily>,

    /// Environment (repeatable)
    #[arg(long = "env")]
    environment: Vec<String>,

    /// Owner or team substring, case-insensitive
    #[arg(long)]
    owner: Option<String>,

    /// EOSL status
    #[arg(long, value_enum)]
    status: Option<EoslStatus>,

    /// Only rows missing firmware or microcode versions
    #[arg(long)]
    missing_firmware: bool,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            vendors: self.vendor.clone(),
            os_families: self.os_family.clone(),
            environments: self.environment.clone(),
            owner: self.owner.clone(),
            status: self.status,
            missing_firmware_only: self.missing_firmware,
        }
    }
}

/// Arguments for the `view` subcommand
#[derive(Parser)]
struct ViewArgs {
    #[command(flatten)]
    inventory: InventoryArgs,

    #[command(flatten)]
    filters: FilterArgs,

    /// Output format (auto detects TTY: tui if interactive, summary otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Dashboard theme (dark, light, high-contrast)
    #[arg(long)]
    theme: Option<String>,

    /// Directory for exports written from the dashboard
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

/// Arguments for the `export` subcommand
#[derive(Parser)]
struct ExportArgs {
    #[command(flatten)]
    inventory: InventoryArgs,

    #[command(flatten)]
    filters: FilterArgs,

    /// What to export
    #[arg(short, long, value_enum, default_value = "inventory")]
    kind: ExportKind,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `contact` subcommand
#[derive(Parser)]
struct ContactArgs {
    #[command(flatten)]
    inventory: InventoryArgs,

    /// Server to contact the owner of
    hostname: String,

    /// Name used to sign the message
    #[arg(long)]
    actor: Option<String>,
}

/// Arguments for the `intimate` subcommand
#[derive(Parser)]
struct IntimateArgs {
    #[command(flatten)]
    inventory: InventoryArgs,

    /// Server whose owner was notified
    #[arg(required_unless_present = "filtered", conflicts_with = "filtered")]
    hostname: Option<String>,

    /// Mark every row matching the filters instead of one host
    #[arg(long)]
    filtered: bool,

    #[command(flatten)]
    filters: FilterArgs,

    /// Note stored with the change log entry
    #[arg(long)]
    note: Option<String>,

    /// Name recorded as the actor
    #[arg(long)]
    actor: Option<String>,
}

/// Arguments for the `ticket` subcommand
#[derive(Parser)]
struct TicketArgs {
    #[command(flatten)]
    inventory: InventoryArgs,

    /// Server to raise a ticket for
    hostname: String,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `log` subcommand
#[derive(Parser)]
struct LogArgs {
    /// Only entries for this host
    #[arg(long)]
    host: Option<String>,

    /// Newest N entries
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard or a report of the filtered inventory
    View(ViewArgs),

    /// Export filtered rows as inventory, contact or ticket CSV
    Export(ExportArgs),

    /// Print a mailto link for a server's owner
    Contact(ContactArgs),

    /// Record that owners were notified
    Intimate(IntimateArgs),

    /// Print a ticket CSV row for one server
    Ticket(TicketArgs),

    /// Show the change log
    Log(LogArgs),

    /// Write the bundled sample inventory
    Sample {
        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .eosl-inventory.yaml in the current directory
    Init {
        /// Preset the example starts from
        #[arg(long, value_enum, default_value = "standard")]
        preset: ConfigPreset,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    if exit_code != exit_codes::SUCCESS {
        std::process::exit(exit_code);
    }
}

/// Layer the config file under the global flags and validate the result.
fn effective_config(cli: &Cli, inventory: Option<&InventoryArgs>) -> Result<AppConfig> {
    let mut overrides = AppConfig::builder()
        .no_color(cli.no_color)
        .quiet(cli.quiet);
    if let Some(path) = &cli.change_log {
        overrides = overrides.change_log_path(path.clone());
    }
    if let Some(args) = inventory {
        overrides = overrides.inventory_path(args.inventory.clone());
    }

    let (mut config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides.build());
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    // An explicit flag wins even when it equals the default
    if let Some(days) = inventory.and_then(|args| args.nearing_days) {
        config.inventory.nearing_days = days;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration: {}", messages.join("; "));
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::View(args) => {
            let mut app = effective_config(&cli, Some(&args.inventory))?;
            if args.output != ReportFormat::Auto {
                app.output.format = args.output;
            }
            if args.output_file.is_some() {
                app.output.file.clone_from(&args.output_file);
            }
            if let Some(theme) = &args.theme {
                app.tui.theme.clone_from(theme);
            }
            if let Some(dir) = &args.export_dir {
                app.output.export_dir.clone_from(dir);
            }
            if let Some(error) = app.output.validate().into_iter().chain(app.tui.validate()).next() {
                anyhow::bail!("invalid option: {error}");
            }

            let criteria = args.filters.criteria();
            let config = ViewConfig {
                pipeline: app.pipeline(criteria, args.inventory.today),
                output: app.output,
                change_log: app.change_log,
                tui: app.tui,
            };
            cli::run_view(config)
        }

        Commands::Export(args) => {
            let app = effective_config(&cli, Some(&args.inventory))?;
            let criteria = args.filters.criteria();
            cli::run_export(ExportConfig {
                pipeline: app.pipeline(criteria, args.inventory.today),
                kind: args.kind,
                output_file: args.output_file.clone(),
            })
        }

        Commands::Contact(args) => {
            let app = effective_config(&cli, Some(&args.inventory))?;
            cli::run_contact(ContactConfig {
                pipeline: app.pipeline(FilterCriteria::new(), args.inventory.today),
                hostname: args.hostname.clone(),
                actor: args.actor.clone().unwrap_or(app.change_log.actor),
            })
        }

        Commands::Intimate(args) => {
            let mut app = effective_config(&cli, Some(&args.inventory))?;
            if let Some(actor) = &args.actor {
                app.change_log.actor.clone_from(actor);
            }
            let target = match &args.hostname {
                Some(hostname) => IntimateTarget::Host(hostname.clone()),
                None => IntimateTarget::Filtered,
            };
            let criteria = args.filters.criteria();
            cli::run_intimate(IntimateConfig {
                pipeline: app.pipeline(criteria, args.inventory.today),
                target,
                note: args.note.clone(),
                change_log: app.change_log,
            })
        }

        Commands::Ticket(args) => {
            let app = effective_config(&cli, Some(&args.inventory))?;
            cli::run_ticket(TicketConfig {
                pipeline: app.pipeline(FilterCriteria::new(), args.inventory.today),
                hostname: args.hostname.clone(),
                output_file: args.output_file.clone(),
            })
        }

        Commands::Log(args) => {
            let app = effective_config(&cli, None)?;
            cli::run_log(LogConfig {
                change_log: app.change_log.path,
                host: args.host.clone(),
                limit: args.limit,
                format: args.output,
                output_file: args.output_file.clone(),
            })
        }

        Commands::Sample { output_file } => cli::run_sample(output_file.clone()),

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "eosl-inventory", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    config::user_config_dir().map(|p| p.display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in config::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init { preset } => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".eosl-inventory.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = config::generate_example_config(*preset);
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_names_this_tool_only() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "eosl-inventory");
        assert!(cmd.get_author().is_none());
    }

    #[test]
    fn test_filter_flags_parse() {
        let cli = Cli::try_parse_from([
            "eosl-inventory",
            "view",
            "--vendor",
            "hpe",
            "--vendor",
            "dell",
            "--os-family",
            "windows",
            "--status",
            "expired",
            "--missing-firmware",
            "--today",
            "2025-01-01",
        ])
        .unwrap();
        let Commands::View(args) = &cli.command else {
            panic!("expected view");
        };
        let criteria = args.filters.criteria();
        assert_eq!(criteria.vendors, vec!["hpe", "dell"]);
        assert_eq!(criteria.os_families, vec![OsFamily::WindowsServer]);
        assert_eq!(criteria.status, Some(EoslStatus::Expired));
        assert!(criteria.missing_firmware_only);
        assert_eq!(args.inventory.today, NaiveDate::from_ymd_opt(2025, 1, 1));
    }

    #[test]
    fn test_intimate_requires_host_or_filtered() {
        assert!(Cli::try_parse_from(["eosl-inventory", "intimate"]).is_err());
        assert!(Cli::try_parse_from(["eosl-inventory", "intimate", "db-01"]).is_ok());
        assert!(Cli::try_parse_from(["eosl-inventory", "intimate", "--filtered"]).is_ok());
        assert!(
            Cli::try_parse_from(["eosl-inventory", "intimate", "db-01", "--filtered"]).is_err()
        );
    }

    #[test]
    fn test_invalid_nearing_days_rejected() {
        let cli = Cli::try_parse_from([
            "eosl-inventory",
            "export",
            "--nearing-days",
            "0",
            "--config",
            "/nonexistent/eosl.yaml",
        ])
        .unwrap();
        let Commands::Export(args) = &cli.command else {
            panic!("expected export");
        };
        let err = effective_config(&cli, Some(&args.inventory)).unwrap_err();
        assert!(err.to_string().contains("nearing_days"), "{err}");
    }
}
