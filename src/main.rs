use barbershop::config::{command, ShopConfig};
use barbershop::lifecycle::{setup_tracing, ShopSystem};
use barbershop::ShopError;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), ShopError> {
    let matches = command().get_matches();
    let config = ShopConfig::from_matches(&matches);

    setup_tracing();
    info!(?config, "Starting simulation");

    let report = ShopSystem::run(&config).await.inspect_err(|e| {
        error!(error = %e, "Simulation failed");
    })?;

    println!("{report}");
    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
