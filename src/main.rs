use clap::Parser;
use distancia::compare::{compare, CompareConfig};
use distancia::resolve::{DatasetSource, Strategy};
use distancia::server;
use serde_json::json;

/// distancia — compare the great-circle distance between two cities.
///
/// Resolves both places through an offline CSV dataset (default) or a live
/// Nominatim query, then reports the haversine distance in kilometres.
///
/// Examples:
///   distancia --city1 Lima --country1 Peru --city2 Londres --country2 "Reino Unido"
///   distancia --city1 Lima --country1 Peru --city2 London --country2 "United Kingdom" --method api
///   distancia --city1 Oslo --country1 Norway --city2 Tokyo --country2 Japan --dataset ./worldcities.csv
///   distancia --serve --port 3000
#[derive(Parser)]
#[command(name = "distancia", version, about, long_about = None)]
struct Cli {
    /// First city name.
    #[arg(long)]
    city1: Option<String>,

    /// First country name.
    #[arg(long)]
    country1: Option<String>,

    /// Second city name.
    #[arg(long)]
    city2: Option<String>,

    /// Second country name.
    #[arg(long)]
    country2: Option<String>,

    /// Resolution method: "csv" (offline dataset) or "api" (Nominatim).
    #[arg(long, default_value = "csv", value_parser = parse_method)]
    method: Strategy,

    /// Dataset override for the csv method: a file path or an http(s) URL.
    /// Defaults to the bundled dataset.
    #[arg(long)]
    dataset: Option<String>,

    /// Nominatim search endpoint override for the api method.
    #[arg(long)]
    endpoint: Option<String>,

    /// Run the JSON API server instead of a one-shot comparison.
    #[arg(long)]
    serve: bool,

    /// Server bind host.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server bind port.
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

fn parse_method(s: &str) -> Result<Strategy, String> {
    s.parse()
}

fn dataset_source(arg: Option<&str>) -> DatasetSource {
    match arg {
        Some(s) if s.starts_with("http://") || s.starts_with("https://") => {
            DatasetSource::Url(s.to_string())
        }
        Some(s) => DatasetSource::Path(s.into()),
        None => DatasetSource::Embedded,
    }
}

fn main() {
    let cli = Cli::parse();

    let config = CompareConfig {
        dataset: dataset_source(cli.dataset.as_deref()),
        nominatim_endpoint: cli.endpoint.clone(),
    };

    // ── Server mode ─────────────────────────────────────────────

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start runtime: {}", e);
            std::process::exit(1);
        });
        runtime.block_on(server::start(&cli.host, cli.port, config));
        return;
    }

    // ── One-shot comparison ─────────────────────────────────────

    let (city1, country1, city2, country2) = match (&cli.city1, &cli.country1, &cli.city2, &cli.country2) {
        (Some(c1), Some(p1), Some(c2), Some(p2)) => (c1, p1, c2, p2),
        _ => {
            eprintln!("Error: Both places are required.");
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  distancia --city1 Lima --country1 Peru --city2 Londres --country2 \"Reino Unido\"");
            eprintln!("  distancia --city1 Lima --country1 Peru --city2 London --country2 \"United Kingdom\" --method api");
            eprintln!("  distancia --serve");
            std::process::exit(1);
        }
    };

    match compare(city1, country1, city2, country2, cli.method, &config) {
        Ok(distance_km) => {
            eprintln!("  Distancia: {} km", distance_km);
            let record = json!({
                "city1": city1,
                "country1": country1,
                "city2": city2,
                "country2": country2,
                "method": cli.method.to_string(),
                "distance_km": distance_km,
            });
            println!("{}", serde_json::to_string_pretty(&record).unwrap_or_default());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
