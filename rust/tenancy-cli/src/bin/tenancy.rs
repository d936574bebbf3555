use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tenancy_cli::TenancyCli;
use tracing_subscriber::EnvFilter;

pub fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = TenancyCli::parse();
    let evaluation = cli.evaluate()?;

    println!("{}", evaluation.ask);

    if evaluation.authorized {
        println!("authorized");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("denied");
        Ok(ExitCode::FAILURE)
    }
}
