use anyhow::{anyhow, Result};
use fundable::{config::Config, csv_import, distribute, types::DistributionMode, validation};
use tracing::info;

fn print_usage() {
    eprintln!("Usage: fundable [--equal | --weighted] <distributions.csv>");
    eprintln!();
    eprintln!("Validates a CSV of address,amount rows and prints the encoded");
    eprintln!("approval + distribution call plan as JSON (dry run).");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {}  RPC endpoint override", fundable::config::RPC_URL_ENV);
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let mut mode = DistributionMode::Equal;
    let mut path: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--equal" => mode = DistributionMode::Equal,
            "--weighted" => mode = DistributionMode::Weighted,
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            flag if flag.starts_with('-') => return Err(anyhow!("unknown flag: {}", flag)),
            file => path = Some(file.to_string()),
        }
    }
    let path = match path {
        Some(path) => path,
        None => {
            print_usage();
            return Err(anyhow!("missing CSV file argument"));
        }
    };

    let config = Config::from_env()?;
    info!(
        "Planning {} distribution on {} via {}",
        mode.label(),
        config.network_label(),
        config.rpc_url
    );

    let rows = csv_import::import_csv_file(&path)?;
    validation::validate_batch(&rows, mode)?;
    let calls = distribute::build_distribution_calls(&rows, mode)?;

    let plan = serde_json::json!({
        "network": config.network_label(),
        "mode": mode.label(),
        "recipients": rows.len(),
        "calls": calls,
    });
    println!("{}", serde_json::to_string_pretty(&plan)?);

    Ok(())
}
