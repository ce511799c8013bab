use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use tipjar_types::{AccountId, Amount};

#[derive(Parser)]
#[command(
    name = "tipjar",
    about = "Tipjar — append-only donation ledger with an HTTP API",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the tipjar HTTP server
    Serve(ServeArgs),
    /// Derive or generate a ledger account id
    Account(AccountArgs),
    /// Run a scripted donation session against an in-process ledger
    Demo(DemoArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on; overrides the config file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Owner account as hex; overrides the config file
    #[arg(long)]
    pub owner: Option<AccountId>,
    /// Donation floor in base units; overrides the config file
    #[arg(long)]
    pub min_donation: Option<Amount>,
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct AccountArgs {
    /// Derive the account from a stable label instead of random material
    #[arg(short, long)]
    pub label: Option<String>,
}

#[derive(Args)]
pub struct DemoArgs {}
