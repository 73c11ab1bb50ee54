//! Address-space planning CLI for cloud network inventories.
//!
//! Inspects an inventory snapshot, suggests free CIDR blocks, lists
//! reclamation candidates, and writes full address-space reports.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Context, Result};
use log::info;

use cidrplan::cidr::{AddressBlock, UsedSet};
use cidrplan::config::{self, Config};
use cidrplan::inventory::{self, InventorySnapshot};
use cidrplan::planner;
use cidrplan::report::{self, InventoryReport};

#[derive(Parser)]
#[command(name = "cidrplan")]
#[command(about = "CIDR allocation planning for cloud network inventories")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the inventory snapshot file (YAML, or JSON by extension)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Path to an optional configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Number of parallel workers for pool searches (0 = auto-detect)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// List every CIDR block the inventory currently uses
    ShowUsed {
        /// Also print the per-subnet utilization table
        #[arg(long)]
        table: bool,
    },

    /// Suggest free address blocks of a given size
    Suggest {
        /// Prefix length of the requested block(s), e.g. 24 for a /24
        #[arg(short, long)]
        prefix_len: u8,

        /// Number of subnets needed
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,

        /// Carve the subnets out of this existing network instead of
        /// searching the pool for a new parent
        #[arg(long)]
        network: Option<String>,
    },

    /// List unused networks and subnets that could be reclaimed
    Reclaim,

    /// Write full JSON and text reports for the snapshot
    Report {
        /// Output directory for the report files
        #[arg(short, long, default_value = "reports")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    // Set thread pool size
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let config = config::load_config(cli.config.as_deref())?;
    let snapshot = inventory::load_snapshot(&cli.snapshot)?;

    match cli.command {
        Commands::ShowUsed { table } => run_show_used(&snapshot, table),
        Commands::Suggest {
            prefix_len,
            count,
            network,
        } => run_suggest(&snapshot, &config, prefix_len, count, network.as_deref()),
        Commands::Reclaim => run_reclaim(&snapshot),
        Commands::Report { output } => run_report(&snapshot, &cli.snapshot, &output),
    }
}

fn run_show_used(snapshot: &InventorySnapshot, table: bool) -> Result<()> {
    let used = planner::used_blocks(snapshot)?;

    println!("Currently used CIDR blocks:");
    if used.is_empty() {
        println!("  (none)");
    }
    for block in used.iter() {
        println!("  {block}");
    }
    println!("\nTotal blocks in use: {}", used.len());

    if table {
        let rows = report::usage_rows(snapshot);
        println!(
            "\n{:<24} {:<22} {:<20} {:<18} {:>10}",
            "Network", "Network CIDRs", "Subnet", "Subnet CIDR", "Addresses"
        );
        println!("{}", "-".repeat(96));
        for row in rows {
            let addresses = row
                .address_count
                .map(|count| count.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:<24} {:<22} {:<20} {:<18} {:>10}",
                row.network, row.network_prefixes, row.subnet, row.subnet_prefix, addresses
            );
        }
    }
    Ok(())
}

fn run_suggest(
    snapshot: &InventorySnapshot,
    config: &Config,
    prefix_len: u8,
    count: u32,
    network: Option<&str>,
) -> Result<()> {
    config.suggest.check(prefix_len, count)?;

    if let Some(name) = network {
        return run_suggest_within(snapshot, name, prefix_len, count);
    }

    let pool = config.build_pool()?;
    let used = planner::used_blocks(snapshot)?;
    info!(
        "Suggesting {} x /{} against {} used block(s)",
        count,
        prefix_len,
        used.len()
    );

    if count == 1 {
        match planner::suggest_block(&pool, &used, prefix_len)? {
            Some(block) => println!("Suggested CIDR: {block}"),
            None => println!("No available /{prefix_len} block in the address pool."),
        }
        return Ok(());
    }

    match planner::suggest_parent_block(&pool, &used, prefix_len, count)? {
        Some(suggestion) => {
            println!("Suggested network CIDR: {}", suggestion.parent);
            println!("Subnets of /{prefix_len} to create inside it:");
            for subnet in &suggestion.subnets {
                println!("  {subnet}");
            }
        }
        None => println!("No available block can hold {count} /{prefix_len} subnet(s)."),
    }
    Ok(())
}

fn run_suggest_within(
    snapshot: &InventorySnapshot,
    name: &str,
    prefix_len: u8,
    count: u32,
) -> Result<()> {
    let net = snapshot
        .find_network(name)
        .ok_or_else(|| eyre!("No network named '{name}' in the snapshot"))?;
    let parent_text = net
        .address_prefixes
        .first()
        .ok_or_else(|| eyre!("Network '{}' declares no address prefixes", net.name))?;
    let parent: AddressBlock = parent_text.parse()?;
    let existing = UsedSet::from_prefixes(net.subnets.iter().map(|s| s.address_prefix.as_str()))?;

    match planner::suggest_subnets_within(&parent, &existing, prefix_len, count)? {
        Some(subnets) => {
            println!("Suggested subnets in {} ({parent}):", net.name);
            for subnet in &subnets {
                println!("  {subnet}");
            }
        }
        None => println!(
            "No room for {count} /{prefix_len} subnet(s) in {} ({parent}).",
            net.name
        ),
    }
    Ok(())
}

fn run_reclaim(snapshot: &InventorySnapshot) -> Result<()> {
    let networks = planner::find_reclaimable_networks(snapshot);
    let subnets = planner::find_reclaimable_subnets(snapshot);

    if networks.is_empty() {
        println!("No unused networks. Every network CIDR has subnets.");
    } else {
        println!("Networks with no subnets (deleting one frees its whole CIDR):");
        for candidate in &networks {
            println!(
                "  {} ({}) in resource group {}",
                candidate.name,
                candidate.address_prefixes.join(", "),
                candidate.parent
            );
        }
    }

    println!();
    if subnets.is_empty() {
        println!("No unused subnets. Every subnet has an attached interface.");
    } else {
        println!("Subnets with no attached interfaces:");
        for candidate in &subnets {
            println!(
                "  {}/{} ({})",
                candidate.parent,
                candidate.name,
                candidate.address_prefixes.join(", ")
            );
        }
    }
    Ok(())
}

fn run_report(snapshot: &InventorySnapshot, snapshot_path: &Path, output: &Path) -> Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    let report = InventoryReport::from_snapshot(snapshot, &snapshot_path.display().to_string())?;
    report::generate_json_report(&report, &output.join("inventory_report.json"))?;
    report::generate_text_report(&report, &output.join("inventory_report.txt"))?;
    report::print_summary(&report);
    Ok(())
}
