//! Batch CLI: query hazard windspeed data for a point list and write a flat CSV.

use clap::{CommandFactory, Parser};
use hazard_dl::{
    fetch_hazard, read_location_csv, ClientConfig, EnvTokenProvider, HazardClient, HazardQuery,
    Product, TerrainCorrection,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "get_hazard_csv",
    about = "Query DeepCyc or Metryc windspeed data and write a flat CSV keyed by cell_id."
)]
struct Args {
    /// Name of the output CSV file
    #[arg(long)]
    output_filename: PathBuf,

    /// Name of the product to query: DeepCyc or Metryc
    #[arg(long, default_value = "DeepCyc")]
    product: String,

    /// CSV file with l(L)atitude l(L)ongitude columns
    #[arg(long)]
    location_csv: Option<PathBuf>,

    /// A list of latitudes
    #[arg(long, num_args = 1..)]
    latitudes: Vec<f64>,

    /// A list of longitudes
    #[arg(long, num_args = 1..)]
    longitudes: Vec<f64>,

    /// The return period to get (DeepCyc only)
    #[arg(long)]
    rp_year: Option<u32>,

    /// Terrain correction: FT_GUST, OW, OT or AOT
    #[arg(long, default_value = "FT_GUST")]
    terrain_correction: String,

    /// Windspeed averaging period, e.g. "3-seconds"
    #[arg(long, default_value = "3-seconds")]
    windspeed_averaging_period: String,

    /// Optional label echoed back by the API
    #[arg(long)]
    tag: Option<String>,

    /// Base URL of the hazard API
    #[arg(long, env = "HAZARD_API_URL", default_value = "https://api.reask.earth/v1")]
    api_url: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hazard_dl=info,get_hazard_csv=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if args.location_csv.is_none() && args.latitudes.is_empty() {
        eprintln!("Error: please use one of --location_csv or --latitudes, --longitudes");
        let _ = Args::command().print_help();
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> hazard_dl::Result<()> {
    let (lats, lons) = match &args.location_csv {
        Some(path) => read_location_csv(path)?,
        None => {
            if args.latitudes.len() != args.longitudes.len() {
                return Err(hazard_dl::Error::Input(format!(
                    "--latitudes and --longitudes differ in length: {} vs {}",
                    args.latitudes.len(),
                    args.longitudes.len()
                )));
            }
            (args.latitudes.clone(), args.longitudes.clone())
        }
    };

    let product: Product = args.product.parse()?;
    let terrain_correction: TerrainCorrection = args.terrain_correction.parse()?;
    let query = HazardQuery {
        rp_year: args.rp_year,
        terrain_correction,
        windspeed_averaging_period: args.windspeed_averaging_period.clone(),
        tag: args.tag.clone(),
    };

    let client = HazardClient::new(
        ClientConfig::with_base_url(&args.api_url),
        Arc::new(EnvTokenProvider::default()),
    )?;

    tracing::info!(points = lats.len(), %product, "fetching hazard data");
    let table = fetch_hazard(&client, product, &query, &lats, &lons).await?;

    table.write_csv_file(&args.output_filename)?;
    tracing::info!(
        rows = table.len(),
        output = %args.output_filename.display(),
        "wrote hazard CSV"
    );
    Ok(())
}
