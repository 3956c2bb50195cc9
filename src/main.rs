use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use delivery_planner::config::{PlannerConfig, SequencingMetric};
use delivery_planner::export::{exporter_for, route_rows};
use delivery_planner::input::{parse_day, parse_truck_counts};
use delivery_planner::loader::CsvOutletSource;
use delivery_planner::map::{DayMap, LeafletMap, save_day_map};
use delivery_planner::projection::project_plan;
use delivery_planner::traits::OutletSource;
use delivery_planner::{Day, OutletTable, plan_week};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Outlet table (CSV with OUTLET_ID, LATITUDE, LONGITUDE, FREQUENCY columns)
    #[arg(short, long)]
    outlets: PathBuf,

    /// Trucks available Monday to Friday, e.g. "2,2,3,2,1"
    #[arg(short, long)]
    trucks: String,

    /// Day (1-5) whose route map is rendered
    #[arg(long)]
    day: Option<String>,

    /// Route table output; .csv writes CSV, anything else Excel
    #[arg(short = 'O', long, default_value = "optimized_routes.xlsx")]
    output: PathBuf,

    /// Directory for rendered maps
    #[arg(long, default_value = ".")]
    map_dir: PathBuf,

    /// Planner configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the scheduler's random draws
    #[arg(long)]
    seed: Option<u64>,

    /// Sequencing metric: euclidean, haversine or osrm
    #[arg(long)]
    metric: Option<SequencingMetric>,

    #[arg(short, long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let trucks = parse_truck_counts(&cli.trucks)?;
    let day = cli.day.as_deref().map(parse_day).transpose()?;

    let mut config = match &cli.config {
        Some(path) => PlannerConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => PlannerConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(metric) = cli.metric {
        config.metric = metric;
    }

    let outlets = CsvOutletSource::new(&cli.outlets)
        .load()
        .with_context(|| format!("loading outlets from {}", cli.outlets.display()))?;
    let table = OutletTable::new(outlets)?;
    let provider = config.matrix_provider()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!(
        outlets = table.len(),
        trucks = ?trucks.as_array(),
        metric = %config.metric,
        "planning week"
    );
    let plan = plan_week(
        &table,
        &config.depot,
        &trucks,
        &provider,
        &config.plan_options(),
        &mut rng,
    )?;
    let projected = project_plan(&plan, &table, &config.depot)?;

    let weekly_length = projected.weekly_length_km();
    for day in Day::ALL {
        info!(
            %day,
            routes = projected.day(day).len(),
            length_km = %format!("{:.2}", projected.day_length_km(day)),
            "daily total"
        );
    }
    info!(length_km = %format!("{weekly_length:.2}"), "weekly total");

    if let Some(day) = day {
        let map = DayMap {
            day,
            routes: projected.day(day),
            depot: &config.depot,
            weekly_length_km: Some(weekly_length),
        };
        save_day_map(&LeafletMap::default(), &map, &cli.map_dir)?;
    }

    exporter_for(&cli.output)
        .export(&route_rows(&projected))
        .with_context(|| format!("writing routes to {}", cli.output.display()))?;

    Ok(())
}
