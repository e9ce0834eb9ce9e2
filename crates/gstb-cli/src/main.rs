//! # gstb CLI entry point
//!
//! Parses command-line arguments, resolves configuration and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gstb_cli::backup::{run_export, run_import, ExportArgs, ImportArgs};
use gstb_cli::bill::{
    run_invoice, run_reset, run_show, run_states, InvoiceArgs, ResetArgs, ShowArgs,
};
use gstb_cli::item::{run_item, ItemArgs};
use gstb_cli::license::{run_unlock, UnlockArgs};
use gstb_cli::party::{run_client, run_profile, ClientArgs, ProfileArgs};
use gstb_cli::print::{run_render, run_share, RenderArgs};
use gstb_cli::rates::{run_rates, RatesArgs};
use gstb_cli::{AppConfig, Session, EXIT_FAILURE};
use gstb_store::FileStore;

/// GST Bill Maker — offline GST invoices for Indian small businesses.
///
/// Keeps one bill on disk, computes CGST/SGST or IGST from the business
/// and client states, and prints or exports the invoice.
#[derive(Parser, Debug)]
#[command(name = "gstb", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path of the persisted bill (overrides config and environment).
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the bill and its totals.
    Show(ShowArgs),

    /// List the Indian states accepted for --state.
    States,

    /// Edit the business profile.
    Profile(ProfileArgs),

    /// Edit the billed client.
    Client(ClientArgs),

    /// Edit the invoice header, discount and shipping.
    Invoice(InvoiceArgs),

    /// Add, update, remove or list line items.
    Item(ItemArgs),

    /// Show allowed GST rates or manage custom rates (Pro).
    Rates(RatesArgs),

    /// Unlock the Pro tier with a license key.
    Unlock(UnlockArgs),

    /// Write a JSON backup of the bill.
    Export(ExportArgs),

    /// Replace the bill with a JSON backup.
    Import(ImportArgs),

    /// Print the invoice as text or HTML.
    Render(RenderArgs),

    /// Print a short share message for the invoice.
    Share,

    /// Replace the bill with the default bill.
    Reset(ResetArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level. Logs go to stderr.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("gstb CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    if let Some(path) = cli.state_file {
        config.state_file = Some(path);
    }

    let store = FileStore::new(config.state_path());
    tracing::debug!(state_file = %store.path().display(), "using state file");
    let session = Session::new(&store, &config);

    let result = match &cli.command {
        Commands::Show(args) => run_show(args, &session),
        Commands::States => run_states(),
        Commands::Profile(args) => run_profile(args, &session),
        Commands::Client(args) => run_client(args, &session),
        Commands::Invoice(args) => run_invoice(args, &session),
        Commands::Item(args) => run_item(args, &session),
        Commands::Rates(args) => run_rates(args, &session),
        Commands::Unlock(args) => run_unlock(args, &session),
        Commands::Export(args) => run_export(args, &session),
        Commands::Import(args) => run_import(args, &session),
        Commands::Render(args) => run_render(args, &session),
        Commands::Share => run_share(&session),
        Commands::Reset(args) => run_reset(args, &session),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
