use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use traffic_analyzer::{report, settings::Config, traffic::TrafficAnalyzer, ui::Session};

#[derive(Parser)]
#[command(name = "traffic-analyzer")]
#[command(about = "Bandwidth interpolation and Simpson integration over packet captures")]
struct Cli {
    #[arg(short, long, help = "Configuration file path (TOML)")]
    config: Option<PathBuf>,

    #[arg(long, help = "Raw packet CSV to load")]
    raw: Option<PathBuf>,

    #[arg(long, help = "Processed profile CSV to load and save")]
    processed: Option<PathBuf>,

    #[arg(long, help = "Destination for the exported results CSV")]
    export: Option<PathBuf>,

    #[arg(short, long, help = "Seed for the profile noise generator")]
    seed: Option<u64>,

    #[arg(short, long, help = "Print the complete report for the raw data and exit")]
    report: bool,

    #[arg(long, requires = "report", help = "Print the report as JSON")]
    json: bool,

    #[arg(short, long, help = "Enable debug logging")]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(raw) = cli.raw {
        config.paths.raw_data = raw;
    }
    if let Some(processed) = cli.processed {
        config.paths.processed_data = processed;
    }
    if let Some(export) = cli.export {
        config.paths.export = export;
    }
    if cli.seed.is_some() {
        config.analysis.seed = cli.seed;
    }
    log::debug!("Effective configuration: {:?}", config);

    let mut analyzer = TrafficAnalyzer::with_config(&config.analysis);

    if cli.report {
        analyzer
            .load_raw(&config.paths.raw_data)
            .with_context(|| format!("Failed to load {}", config.paths.raw_data.display()))?;

        if cli.json {
            println!("{}", report::AnalysisReport::build(&analyzer).to_json()?);
        } else {
            report::write_complete_report(&mut io::stdout().lock(), &analyzer)?;
        }
        return Ok(());
    }

    let stdin = io::stdin();
    Session::new(&mut analyzer, config.paths, stdin.lock(), io::stdout()).run()?;
    Ok(())
}
