use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use compute::{AnalyticsSummary, CO2_PER_CARBON, CarbonMetrics, scenario_values};
use formats::{BoundarySchema, CarbonLookup, load_lookup_from_slice};
use foundation::{YearLabel, parse_year_list};
use layers::{AdminPlan, LayerPlan, TileEndpoints, ViewMode};
use presentation::{
    NOT_AVAILABLE, RegionPanel, TrendSeries, format_density, format_usd, ranking_bars,
    summary_cards,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Carbon stock analytics over a boundary dataset")]
struct Args {
    /// Boundary GeoJSON FeatureCollection
    #[arg(long, global = true, default_value = "data/admin_boundaries.geojson")]
    data: PathBuf,

    /// Comma-separated year columns (default: 2020-2025)
    #[arg(long, global = true)]
    years: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Yearly averages, forecast, growth and ranking
    Summary {
        #[arg(long)]
        latest: Option<String>,

        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// Highest-carbon regions for one year
    Top {
        #[arg(long)]
        year: Option<String>,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Detail for one region
    Region {
        name: String,

        #[arg(long)]
        year: Option<String>,
    },

    /// Value one hectare under every price scenario
    Scenarios {
        /// Carbon density in tC/ha
        #[arg(long)]
        carbon: f64,

        #[arg(long, default_value_t = CO2_PER_CARBON)]
        factor: f64,
    },

    /// Map layers to register for a year and view mode
    Layers {
        #[arg(long)]
        year: Option<String>,

        /// land_cover or carbon_stock
        #[arg(long, default_value = "land_cover")]
        mode: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut schema = BoundarySchema::default();
    if let Some(raw) = &args.years {
        let years = parse_year_list(raw);
        if years.is_empty() {
            return Err("--years must list at least one year".into());
        }
        schema.years = years;
    }
    let latest_default = schema
        .years
        .last()
        .cloned()
        .ok_or("no years configured")?;
    let pick_year = |raw: &Option<String>| {
        raw.as_deref()
            .map(YearLabel::new)
            .unwrap_or_else(|| latest_default.clone())
    };

    match &args.command {
        Command::Summary { latest, top } => {
            let lookup = load(&args.data, &schema)?;
            let summary =
                AnalyticsSummary::compute(&lookup, &schema.years, &pick_year(latest), *top);
            if args.json {
                return emit_json(&summary);
            }
            for card in summary_cards(&summary) {
                println!("{:<32} {:>14}  {}", card.title, card.value, card.caption);
            }
            println!();
            for point in TrendSeries::from_averages(summary.trend()).points {
                println!("{}  {:>10.2}  {:?}", point.year, point.carbon, point.kind);
            }
            println!();
            print_ranking(&summary.top_regions);
        }
        Command::Top { year, limit } => {
            let lookup = load(&args.data, &schema)?;
            let ranked = CarbonMetrics::new(&lookup).top_regions(&pick_year(year), *limit);
            if args.json {
                return emit_json(&ranking_bars(&ranked));
            }
            print_ranking(&ranked);
        }
        Command::Region { name, year } => {
            let lookup = load(&args.data, &schema)?;
            let metrics = CarbonMetrics::new(&lookup);
            let panel = RegionPanel::build(&metrics, name, &pick_year(year))
                .ok_or_else(|| format!("unknown region: {name}"))?;
            if args.json {
                return emit_json(&panel);
            }
            print_region(&panel);
        }
        Command::Scenarios { carbon, factor } => {
            let values = scenario_values(*carbon, *factor);
            if args.json {
                return emit_json(&values);
            }
            for v in values {
                println!(
                    "{:<14} {:>8}/t  {:>14}/ha",
                    v.scenario.label(),
                    format_usd(v.price_usd_per_tonne),
                    format_usd(v.value_usd_per_ha)
                );
            }
        }
        Command::Layers { year, mode } => {
            let mode = ViewMode::parse(mode).ok_or_else(|| format!("unknown view mode: {mode}"))?;
            let plan = LayerPlan::for_selection(&pick_year(year), mode, &TileEndpoints::default());
            let admin =
                AdminPlan::new(args.data.display().to_string(), schema.key_property.clone());
            emit_json(&serde_json::json!({ "admin": admin, "thematic": plan }))?;
        }
    }
    Ok(())
}

fn load(path: &Path, schema: &BoundarySchema) -> Result<CarbonLookup, Box<dyn std::error::Error>> {
    let bytes = fs::read(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let lookup = load_lookup_from_slice(&bytes, schema)?;
    info!(
        path = %path.display(),
        regions = lookup.len(),
        skipped = lookup.skipped(),
        "loaded boundary dataset"
    );
    Ok(lookup)
}

fn emit_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_ranking(ranked: &[compute::RegionCarbon]) {
    for bar in ranking_bars(ranked) {
        println!(
            "{:>3}. {:<28} {:>14}  {:>6.1}%",
            bar.rank,
            bar.region,
            format_density(bar.carbon),
            bar.percent_of_max
        );
    }
}

fn print_region(panel: &RegionPanel) {
    println!("{} ({})", panel.region, panel.province);
    println!("land cover   {}", panel.land_cover);
    println!("{}         {}", panel.year, panel.current_value);
    match &panel.change {
        Some(change) => println!("change       {}", change.text),
        None => println!("change       {NOT_AVAILABLE}"),
    }
    if let Some(valuation) = &panel.valuation {
        println!("price        {}/tCO2e", valuation.price);
        if let Some(value) = &valuation.potential_value {
            println!("value        {value}/ha");
        }
    }
    if let Some(insight) = &panel.insight {
        println!("{}", insight.text);
    }
    let years: Vec<String> = panel
        .series
        .iter()
        .map(|s| format!("{}={:.2}", s.year, s.carbon))
        .collect();
    println!("series       {}", years.join(" "));
}
