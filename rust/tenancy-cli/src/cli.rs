use std::path::PathBuf;

use clap::Parser;
use tenancy_authorization::{Action, Address, Visibility};

#[derive(Debug, Parser)]
#[command(name = "tenancy")]
#[command(bin_name = "tenancy")]
#[command(about = "Evaluate a contract operation against granted permissions", long_about = None)]
pub struct TenancyCli {
    /// Granted permission URI; may be repeated
    #[arg(short, long = "grant")]
    pub grants: Vec<String>,

    /// JSON token file whose authorities follow the `--grant`s
    #[arg(long)]
    pub token: Option<PathBuf>,

    /// JSON settings file
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Contract visibility: public or private
    #[arg(long, default_value = "public")]
    pub visibility: Visibility,

    /// Requested action: read, write or create
    #[arg(long, default_value = "read")]
    pub action: Action,

    /// Executing account
    #[arg(long)]
    pub from: Address,

    /// Target contract or account
    #[arg(long)]
    pub to: Option<Address>,

    /// Private-network party; may be repeated
    #[arg(long = "party")]
    pub parties: Vec<String>,

    /// Private-network originator for contract creation
    #[arg(long)]
    pub private_from: Option<String>,
}
