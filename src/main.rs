use crate::argparse::{Cli, Commands};
use anyhow::{Context, Result};
use monnit::{ClientConfig, HttpTransport, SensorClient, SensorId};
use tracing::{info, Level};
// Include these modules as part of the binary crate, not the library crate
// as this contains the actual implementation of the logging facility
mod argparse;
mod logging;

fn print_records(client: &SensorClient) -> Result<()> {
    if let Some(data) = client.data() {
        info!(
            "{} sensor(s) fetched at {}",
            data.len(),
            data.fetched_at().format("%Y-%m-%d %H:%M:%S")
        );
        println!("{}", serde_json::to_string_pretty(data.records())?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = argparse::parse();

    let (g_console, g_log_file, g_verbose) = match cli {
        Cli {
            console,
            ref log_file,
            verbose,
            ..
        } => (console, log_file.clone(), verbose),
    };

    let g_level = match g_verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    let _guards = logging::init(g_level, g_console, Some(g_log_file.as_path()));

    let auth_key = cli.auth_key.or_else(monnit::get_auth_key);
    let mut config = ClientConfig::new(auth_key.as_deref());
    if let Some(url) = monnit::get_base_url() {
        config = config.with_base_url(&url);
    }
    info!("Using Monnit API at {}", config.base_url);
    let mut client = SensorClient::with_config(config, HttpTransport::new());

    match cli.command {
        Commands::List { application_id } => {
            let sensor_type = application_id.map(SensorId::from);
            client
                .read_all_sensors(sensor_type.as_ref())
                .context("Reading sensor list")?;
            print_records(&client)?;
        }
        Commands::Get { sensor_id } => {
            client
                .read_single_sensor(&SensorId::from(sensor_id))
                .context("Reading sensor")?;
            print_records(&client)?;
        }
        Commands::Average {
            application_id,
            sensor_id,
            stats,
        } => {
            let sensor_type = application_id.map(SensorId::from);
            client
                .read_all_sensors(sensor_type.as_ref())
                .context("Reading sensor list")?;
            let ids: Vec<SensorId> = sensor_id.into_iter().map(SensorId::from).collect();
            let filter = if ids.is_empty() { None } else { Some(ids.as_slice()) };
            if stats {
                println!("{}", client.summary(filter)?);
            } else {
                println!("{:0.2}", client.average_temps(filter)?);
            }
        }
    }
    Ok(())
}
