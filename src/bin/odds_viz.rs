//! odds-viz - render betting odds as an HTML report.
//!
//! Reads the odds CSV, draws the grouped bar chart of averaged outcome
//! probabilities, renders the most-profitable table (derived from the odds
//! when no precomputed CSV is given) and lists arbitrage opportunities.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use odds_viz::config::Config;
use odds_viz::data::Record;
use odds_viz::ingest::{read_csv_file, write_csv_file};
use odds_viz::odds::{arbitrage_opportunities, average_markets, expected_values, most_profitable};
use odds_viz::output::{HtmlExporter, SvgEncoder};
use odds_viz::widgets::TableRenderer;

/// odds-viz: betting odds tables and charts
#[derive(Parser, Debug)]
#[command(name = "odds-viz")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Render betting odds as a highlighted table and a grouped bar chart", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Averaged odds CSV (overrides config)
    #[arg(long)]
    odds: Option<PathBuf>,

    /// Most-profitable CSV (overrides config)
    #[arg(long)]
    profitable: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail on non-numeric chart values
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    run(&config)
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load_or_default(
            dirs::config_dir().map(|p| p.join("odds-viz/config.yaml")).unwrap_or_default(),
        ),
    };

    if let Some(odds) = &cli.odds {
        config.input.odds_csv.clone_from(odds);
    }
    if let Some(profitable) = &cli.profitable {
        config.input.profitable_csv = Some(profitable.clone());
    }
    if let Some(output) = &cli.output {
        config.output.dir.clone_from(output);
    }
    if cli.strict {
        config.chart.strict_numbers = true;
    }
    Ok(config)
}

fn run(config: &Config) -> Result<()> {
    let odds = read_csv_file(&config.input.odds_csv)
        .with_context(|| format!("reading {}", config.input.odds_csv.display()))?;
    let profitable = profitable_records(config, &odds)?;
    let averaged = chart_records(config, &odds);
    let arbitrage = arbitrage_opportunities(&odds, &config.odds.markets);

    let layout = config.chart.chart()?.build(&averaged).context("laying out chart")?;
    let svg = SvgEncoder::chart(&layout, &config.chart.frame()).render();
    let table = config.table.renderer().render(&profitable).context("rendering profitable table")?;

    let dir = &config.output.dir;
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    write(&dir.join("chart.svg"), &svg)?;
    HtmlExporter::new("Most Profitable Matches")
        .with_table(&table)
        .write_to_file(dir.join("table.html"))
        .context("writing table.html")?;

    let mut page = HtmlExporter::default().with_svg(&svg).with_table(&table);
    if arbitrage.is_empty() {
        log::info!("no arbitrage opportunities");
    } else {
        write_csv_file(&arbitrage, dir.join("arbitrage.csv")).context("writing arbitrage.csv")?;
        let arbitrage_table = TableRenderer::new().render(&arbitrage).context("rendering arbitrage table")?;
        page = page.with_table(&arbitrage_table);
        log::info!("found {} arbitrage opportunities", arbitrage.len());
    }
    page.write_to_file(dir.join("index.html")).context("writing index.html")?;

    log::info!(
        "wrote {} bars and {} table rows ({} highlighted) to {}",
        layout.bars().len(),
        table.len(),
        table.highlighted(),
        dir.display()
    );
    Ok(())
}

/// The odds CSV when it already carries every charted field, otherwise its
/// per-bookmaker columns averaged.
fn chart_records(config: &Config, odds: &[Record]) -> Vec<Record> {
    let has_averages = odds
        .first()
        .is_some_and(|first| config.chart.subgroups.iter().all(|s| first.get(&s.field).is_some()));
    if has_averages {
        return odds.to_vec();
    }

    let rows = average_markets(odds, &config.odds.markets);
    log::info!("averaged {} bookmaker markets over {} matches", config.odds.markets.len(), rows.len());
    rows
}

fn profitable_records(config: &Config, odds: &[Record]) -> Result<Vec<Record>> {
    if let Some(path) = &config.input.profitable_csv {
        return read_csv_file(path).with_context(|| format!("reading {}", path.display()));
    }

    let mut rows = expected_values(odds, &config.odds.markets);
    most_profitable(&mut rows);
    log::info!("derived {} expected-value rows from {}", rows.len(), config.input.odds_csv.display());
    Ok(rows)
}

fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}
